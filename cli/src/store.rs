use anyhow::{Context, Result};
use matchpairs_core::{BestScoreStore, StoreError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Best scores kept as a flat JSON object of string values.
#[derive(Debug)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub(crate) fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    /// Reads the file, a missing file is an empty store.
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Could not parse {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("Could not read {}", path.display()));
            }
        };
        log::debug!("opened {} with {} entries", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, raw)
    }
}

impl BestScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save().map_err(|err| StoreError::WriteFailed {
            key: key.to_string(),
            reason: format!("{}: {}", self.path.display(), err),
        })
    }
}

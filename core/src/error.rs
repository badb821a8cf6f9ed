use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Requested {requested} pairs but the symbol catalog only has {available}")]
    TooManyPairs { requested: usize, available: usize },
    #[error("A round needs at least one pair")]
    NoPairs,
    #[error("A board needs at least one column")]
    NoColumns,
    #[error("Match feedback delay must not exceed mismatch feedback delay")]
    FeedbackDelayOrder,
    #[error("Clock sample interval must be above zero")]
    ClockSampleZero,
    #[error("Round timing for {card_count} cards does not fit in a millisecond counter")]
    TimingOverflow { card_count: usize },
}

pub type Result<T> = core::result::Result<T, ConfigError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Best score store unavailable: {0}")]
    Unavailable(String),
    #[error("Best score store rejected write to {key}: {reason}")]
    WriteFailed { key: String, reason: String },
}

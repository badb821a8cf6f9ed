use alloc::format;
use alloc::string::{String, ToString};

/// Placeholder shown when no best has been recorded yet.
pub const NO_BEST: &str = "—";

/// Formats seconds as `m:ss`.
pub fn format_time(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn format_best_time(best: Option<u32>) -> String {
    best.map_or_else(|| NO_BEST.to_string(), format_time)
}

pub fn format_best_moves(best: Option<u32>) -> String {
    best.map_or_else(|| NO_BEST.to_string(), |moves| moves.to_string())
}

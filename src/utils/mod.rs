pub mod config;

pub use config::{HarnessConfig, ReportStyle};

/// Truncate to at most `max` characters, appending `...` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}

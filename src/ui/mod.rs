// UI and formatting module

pub mod formatters;
pub mod messages;
pub mod tables;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_mb, format_seconds, format_timestamp};
pub use messages::{bold, dimmed, info, success, warn};
pub use tables::{print_events, print_results, print_summaries, print_system};

pub mod console_log;
pub mod constants;
pub mod options;

// Re-export primary types for convenience.
pub use console_log::{LogEntry, LogKind, ParseLogKindError, format_time};
pub use options::{CaptureOptions, PanelOptions, PanelPosition};

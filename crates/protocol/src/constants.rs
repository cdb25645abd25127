/// Default number of entries kept by a capture buffer.
pub const DEFAULT_MAX_LOGS: usize = 1000;

/// Default panel width in pixels.
pub const DEFAULT_PANEL_WIDTH: u32 = 400;

/// Default panel height in pixels.
pub const DEFAULT_PANEL_HEIGHT: u32 = 300;

/// `tracing` target used when writing to the original, unintercepted channels.
///
/// The capture layer skips events with this target so forwarded output is
/// never captured a second time.
pub const ORIGINAL_TARGET: &str = "logpanel::console";

/// Prefix of the report written when a subscriber panics.
pub const SUBSCRIBER_ERROR_PREFIX: &str = "Error in log subscriber:";

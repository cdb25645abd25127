use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Severity channel a log call was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    #[serde(alias = "log")]
    Trace,
    #[serde(alias = "verbose")]
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogKind {
    /// All channels, in ascending severity.
    pub const ALL: [LogKind; 5] = [
        LogKind::Trace,
        LogKind::Debug,
        LogKind::Info,
        LogKind::Warn,
        LogKind::Error,
    ];

    /// Lowercase channel name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Trace => "trace",
            LogKind::Debug => "debug",
            LogKind::Info => "info",
            LogKind::Warn => "warn",
            LogKind::Error => "error",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known log channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log kind: {0}")]
pub struct ParseLogKindError(pub String);

impl FromStr for LogKind {
    type Err = ParseLogKindError;

    /// Accepts the browser console aliases (`log`, `warning`, `verbose`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" | "log" => Ok(LogKind::Trace),
            "debug" | "verbose" => Ok(LogKind::Debug),
            "info" => Ok(LogKind::Info),
            "warn" | "warning" => Ok(LogKind::Warn),
            "error" => Ok(LogKind::Error),
            other => Err(ParseLogKindError(other.to_owned())),
        }
    }
}

/// A single captured log call.
///
/// Entries are immutable once created: fields are only reachable through
/// accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    kind: LogKind,
    message: String,
    captured_at: DateTime<Local>,
}

impl LogEntry {
    /// Creates an entry stamped with the current local time.
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            captured_at: Local::now(),
        }
    }

    pub fn kind(&self) -> LogKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    /// Capture time as `HH:MM:SS`.
    pub fn time(&self) -> String {
        format_time(&self.captured_at)
    }
}

/// Formats a wall-clock time as zero-padded 24-hour `HH:MM:SS`.
pub fn format_time<T: Timelike>(t: &T) -> String {
    format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LogKind::Warn).unwrap(), "\"warn\"");
        assert_eq!(serde_json::to_string(&LogKind::Trace).unwrap(), "\"trace\"");
    }

    #[test]
    fn kind_deserializes_console_aliases() {
        let kind: LogKind = serde_json::from_str("\"log\"").unwrap();
        assert_eq!(kind, LogKind::Trace);
        let kind: LogKind = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(kind, LogKind::Warn);
        let kind: LogKind = serde_json::from_str("\"verbose\"").unwrap();
        assert_eq!(kind, LogKind::Debug);
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("error".parse::<LogKind>(), Ok(LogKind::Error));
        assert_eq!("info".parse::<LogKind>(), Ok(LogKind::Info));
        assert_eq!("log".parse::<LogKind>(), Ok(LogKind::Trace));
        assert_eq!(
            "fatal".parse::<LogKind>(),
            Err(ParseLogKindError("fatal".into()))
        );
    }

    #[test]
    fn kind_display_matches_as_str() {
        for kind in LogKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
            assert_eq!(kind.as_str().parse::<LogKind>(), Ok(kind));
        }
    }

    #[test]
    fn format_time_zero_pads() {
        let t = NaiveTime::from_hms_opt(7, 5, 9).unwrap();
        assert_eq!(format_time(&t), "07:05:09");
    }

    #[test]
    fn format_time_is_24_hour() {
        let t = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(format_time(&t), "23:59:00");
    }

    #[test]
    fn entry_time_uses_capture_instant() {
        let entry = LogEntry::new(LogKind::Info, "hello");
        assert_eq!(entry.time(), format_time(&entry.captured_at()));
        assert_eq!(entry.time().len(), 8);
    }

    #[test]
    fn entry_json_uses_camel_case() {
        let entry = LogEntry::new(LogKind::Error, "boom");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"kind\":\"error\""));
        assert!(json.contains("\"message\":\"boom\""));
        assert!(json.contains("\"capturedAt\""));

        let parsed: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind(), LogKind::Error);
        assert_eq!(parsed.message(), "boom");
    }
}

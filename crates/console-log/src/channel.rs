use logpanel_protocol::LogKind;
use logpanel_protocol::constants::ORIGINAL_TARGET;

/// An original, unintercepted output channel set.
///
/// Intercept adapters forward every call here before capture, and the
/// subscription registry reports subscriber failures here so the reports
/// are never captured themselves.
pub trait Channel: Send + Sync {
    fn write(&self, kind: LogKind, message: &str);
}

/// Writes to `tracing` at the level matching the log kind.
///
/// Events carry the `logpanel::console` target, which the capture layer
/// ignores.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingChannel;

impl Channel for TracingChannel {
    fn write(&self, kind: LogKind, message: &str) {
        match kind {
            LogKind::Trace => tracing::trace!(target: ORIGINAL_TARGET, "{message}"),
            LogKind::Debug => tracing::debug!(target: ORIGINAL_TARGET, "{message}"),
            LogKind::Info => tracing::info!(target: ORIGINAL_TARGET, "{message}"),
            LogKind::Warn => tracing::warn!(target: ORIGINAL_TARGET, "{message}"),
            LogKind::Error => tracing::error!(target: ORIGINAL_TARGET, "{message}"),
        }
    }
}

/// Maps a `tracing` level onto the matching log channel.
pub fn kind_for_level(level: &tracing::Level) -> LogKind {
    match *level {
        tracing::Level::TRACE => LogKind::Trace,
        tracing::Level::DEBUG => LogKind::Debug,
        tracing::Level::INFO => LogKind::Info,
        tracing::Level::WARN => LogKind::Warn,
        tracing::Level::ERROR => LogKind::Error,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Fake channel set that records every write.
    #[derive(Default)]
    pub struct RecordingChannel {
        writes: Mutex<Vec<(LogKind, String)>>,
    }

    impl RecordingChannel {
        pub fn writes(&self) -> Vec<(LogKind, String)> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl Channel for RecordingChannel {
        fn write(&self, kind: LogKind, message: &str) {
            self.writes.lock().unwrap().push((kind, message.to_owned()));
        }
    }
}

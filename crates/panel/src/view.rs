use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logpanel_console_log::{CaptureBuffer, RingBuffer, SubscriberId};
use logpanel_protocol::{LogEntry, LogKind, PanelOptions, PanelPosition};

/// Minimize button label while the panel is expanded.
pub const MINIMIZE_LABEL: &str = "−";

/// Minimize button label while the panel is minimized.
pub const RESTORE_LABEL: &str = "+";

/// Maps a log kind to its row icon.
pub fn icon_for(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Trace | LogKind::Info => "ℹ️",
        LogKind::Warn => "⚠️",
        LogKind::Error => "❌",
        LogKind::Debug => "🐛",
    }
}

/// One rendered log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub kind: LogKind,
    pub time: String,
    pub icon: &'static str,
    pub message: String,
}

impl PanelRow {
    pub fn from_entry(entry: &LogEntry) -> Self {
        Self {
            kind: entry.kind(),
            time: entry.time(),
            icon: icon_for(entry.kind()),
            message: entry.message().to_owned(),
        }
    }
}

impl fmt::Display for PanelRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.time, self.icon, self.message)
    }
}

/// Headless presentation of a capture buffer.
///
/// Holds the rendered rows and the minimized state. While attached, every
/// new entry is appended as a row through a capture subscription.
pub struct PanelView {
    state: Arc<Mutex<ViewState>>,
    subscription: Option<SubscriberId>,
    position: PanelPosition,
    width: u32,
    height: u32,
}

struct ViewState {
    rows: RingBuffer<PanelRow>,
    minimized: bool,
}

impl PanelView {
    /// Subscribes to `capture` and renders its current entries.
    pub fn attach(capture: &CaptureBuffer, options: &PanelOptions) -> Self {
        let state = Arc::new(Mutex::new(ViewState {
            rows: RingBuffer::new(capture.max_logs()),
            minimized: false,
        }));

        let rows_state = Arc::clone(&state);
        let subscription = capture.subscribe(Arc::new(move |entry: &LogEntry| {
            lock(&rows_state).rows.push(PanelRow::from_entry(entry));
        }));

        let view = Self {
            state,
            subscription: Some(subscription),
            position: options.position,
            width: options.width,
            height: options.height,
        };
        view.render_logs(capture);
        view
    }

    /// Rebuilds every row from the capture buffer.
    pub fn render_logs(&self, capture: &CaptureBuffer) {
        let entries = capture.list();
        let mut state = lock(&self.state);
        state.rows.clear();
        for entry in &entries {
            state.rows.push(PanelRow::from_entry(entry));
        }
    }

    /// Clear button: empties the capture buffer and the rendered rows.
    pub fn clear(&self, capture: &CaptureBuffer) {
        capture.clear();
        lock(&self.state).rows.clear();
    }

    /// Flips the minimized state and returns the new value.
    pub fn toggle_minimize(&self) -> bool {
        let mut state = lock(&self.state);
        state.minimized = !state.minimized;
        state.minimized
    }

    pub fn is_minimized(&self) -> bool {
        lock(&self.state).minimized
    }

    /// Label of the minimize button for the current state.
    pub fn minimize_label(&self) -> &'static str {
        if self.is_minimized() {
            RESTORE_LABEL
        } else {
            MINIMIZE_LABEL
        }
    }

    /// Rendered rows, oldest first.
    pub fn rows(&self) -> Vec<PanelRow> {
        lock(&self.state).rows.to_vec()
    }

    pub fn position(&self) -> PanelPosition {
        self.position
    }

    /// Panel size in pixels as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stops following `capture`. Rows rendered so far are kept.
    pub fn detach(&mut self, capture: &CaptureBuffer) {
        if let Some(id) = self.subscription.take() {
            capture.unsubscribe(id);
        }
    }
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

use std::sync::Arc;

use logpanel_console_log::{CaptureBuffer, CaptureError, InterceptAdapter};
use logpanel_protocol::{LogEntry, PanelOptions};

use crate::view::PanelView;

/// Owned log panel: one capture session plus its view.
///
/// `init` creates the capture buffer, starts interception and attaches the
/// view; `destroy` tears all of it down. Entries do not survive a destroy.
pub struct LogPanel {
    adapter: Arc<dyn InterceptAdapter>,
    session: Option<Session>,
}

struct Session {
    capture: CaptureBuffer,
    view: PanelView,
}

impl LogPanel {
    pub fn new(adapter: Arc<dyn InterceptAdapter>) -> Self {
        Self {
            adapter,
            session: None,
        }
    }

    /// Starts capturing and attaches the panel view.
    ///
    /// Does nothing but emit a notice if already initialized.
    pub fn init(&mut self, options: PanelOptions) -> Result<(), CaptureError> {
        if self.session.is_some() {
            tracing::warn!("log panel already initialized");
            return Ok(());
        }

        let capture = CaptureBuffer::new(options.capture(), Arc::clone(&self.adapter))?;
        capture.start();
        let view = PanelView::attach(&capture, &options);
        self.session = Some(Session { capture, view });

        tracing::info!(
            position = options.position.as_str(),
            max_logs = options.max_logs,
            "log panel initialized"
        );
        Ok(())
    }

    /// Restores the original channels and drops the session. Idempotent.
    pub fn destroy(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.capture.stop();
        session.view.detach(&session.capture);
        drop(session);

        tracing::info!("log panel destroyed");
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Empties the buffer and re-renders the view.
    pub fn clear(&self) {
        if let Some(session) = &self.session {
            session.capture.clear();
            session.view.render_logs(&session.capture);
        }
    }

    /// Snapshot of the captured entries; empty when not initialized.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.session
            .as_ref()
            .map(|s| s.capture.list())
            .unwrap_or_default()
    }

    pub fn capture(&self) -> Option<&CaptureBuffer> {
        self.session.as_ref().map(|s| &s.capture)
    }

    pub fn view(&self) -> Option<&PanelView> {
        self.session.as_ref().map(|s| &s.view)
    }
}

impl Drop for LogPanel {
    fn drop(&mut self) {
        self.destroy();
    }
}

//! Bounded capture buffer with subscriber notification.
//!
//! Entries arrive either through the installed intercept hook or through
//! [`CaptureBuffer::record`], land in a FIFO ring buffer and are pushed to
//! subscribers synchronously, in buffer order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logpanel_protocol::{CaptureOptions, LogEntry, LogKind};

use crate::buffer::RingBuffer;
use crate::channel::Channel;
use crate::error::CaptureError;
use crate::format::{Arg, format_message};
use crate::intercept::{InterceptAdapter, InterceptHook};
use crate::registry::{SubscriberFn, SubscriberId, SubscriberRegistry};

/// Captures log calls into a bounded, ordered buffer.
pub struct CaptureBuffer {
    shared: Arc<Shared>,
    adapter: Arc<dyn InterceptAdapter>,
    /// The hook this buffer installed, if it has not been stopped since.
    hook: Mutex<Option<InterceptHook>>,
}

/// State reachable from the intercept hook.
struct Shared {
    state: Mutex<CaptureState>,
    registry: SubscriberRegistry,
    original: Arc<dyn Channel>,
}

struct CaptureState {
    entries: RingBuffer<LogEntry>,
    /// Captured entries not yet delivered to subscribers, in capture order.
    pending: VecDeque<LogEntry>,
    /// Set while some call is delivering `pending`.
    draining: bool,
}

impl Shared {
    /// Appends an entry, evicting the oldest when full, then notifies.
    ///
    /// Insertion and delivery share one queue, so subscribers see entries in
    /// buffer order even with concurrent callers. Only one caller delivers
    /// at a time; entries captured meanwhile (including those logged by a
    /// subscriber) are delivered by it, after the current one.
    fn capture(&self, kind: LogKind, message: String) {
        {
            let mut state = self.state();
            let entry = LogEntry::new(kind, message);
            state.entries.push(entry.clone());
            state.pending.push_back(entry);
            if state.draining {
                return;
            }
            state.draining = true;
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let entry = {
                let mut state = self.state();
                match state.pending.pop_front() {
                    Some(entry) => entry,
                    None => {
                        state.draining = false;
                        return;
                    }
                }
            };
            self.registry.notify(&entry, self.original.as_ref());
        }
    }

    fn state(&self) -> MutexGuard<'_, CaptureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CaptureBuffer {
    /// Creates an inactive capture buffer bound to `adapter`.
    pub fn new(
        options: CaptureOptions,
        adapter: Arc<dyn InterceptAdapter>,
    ) -> Result<Self, CaptureError> {
        if options.max_logs == 0 {
            return Err(CaptureError::ZeroCapacity);
        }

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CaptureState {
                    entries: RingBuffer::new(options.max_logs),
                    pending: VecDeque::new(),
                    draining: false,
                }),
                registry: SubscriberRegistry::new(),
                original: adapter.original(),
            }),
            adapter,
            hook: Mutex::new(None),
        })
    }

    /// Starts intercepting the adapter's channels.
    ///
    /// Idempotent: does nothing but emit a notice if already active. When
    /// several buffers share one adapter, the last one started captures.
    pub fn start(&self) {
        if self.is_active() {
            tracing::warn!("console capture already active");
            return;
        }

        tracing::debug!(max_logs = self.max_logs(), "console capture started");
        let shared = Arc::clone(&self.shared);
        let hook: InterceptHook = Arc::new(move |kind: LogKind, message: &str| {
            shared.capture(kind, message.to_owned());
        });
        *self.installed() = Some(Arc::clone(&hook));
        self.adapter.install(hook);
    }

    /// Restores the adapter's original behavior. Entries are kept.
    ///
    /// Only this buffer's own hook is removed; a hook installed since by
    /// another buffer stays in place.
    pub fn stop(&self) {
        let Some(hook) = self.installed().take() else {
            return;
        };
        if self.adapter.uninstall(&hook) {
            tracing::debug!("console capture stopped");
        }
    }

    /// Returns `true` while this buffer's hook is installed on the adapter.
    pub fn is_active(&self) -> bool {
        self.installed()
            .as_ref()
            .is_some_and(|hook| self.adapter.is_installed(hook))
    }

    /// Records a log call directly.
    ///
    /// The call is forwarded to the original channel, then captured and
    /// delivered to subscribers.
    pub fn record(&self, kind: LogKind, args: &[Arg<'_>]) {
        let message = format_message(args);
        self.shared.original.write(kind, &message);
        self.shared.capture(kind, message);
    }

    /// Empties the buffer. Subscribers are not notified.
    pub fn clear(&self) {
        self.shared.state().entries.clear();
    }

    /// Snapshot of the buffered entries, oldest first.
    pub fn list(&self) -> Vec<LogEntry> {
        self.shared.state().entries.to_vec()
    }

    pub fn len(&self) -> usize {
        self.shared.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state().entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn max_logs(&self) -> usize {
        self.shared.state().entries.capacity()
    }

    pub fn subscribe(&self, callback: SubscriberFn) -> SubscriberId {
        self.shared.registry.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.shared.registry.unsubscribe(id)
    }

    /// Removes the first registration of exactly this callback.
    pub fn unsubscribe_callback(&self, callback: &SubscriberFn) -> bool {
        self.shared.registry.unsubscribe_callback(callback)
    }

    fn installed(&self) -> MutexGuard<'_, Option<InterceptHook>> {
        self.hook.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CaptureBuffer {
    fn drop(&mut self) {
        self.stop();
    }
}

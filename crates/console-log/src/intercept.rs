//! Intercept adapters: where log calls are diverted into a capture buffer.

use std::sync::{Arc, PoisonError, RwLock};

use logpanel_protocol::LogKind;

use crate::channel::Channel;
use crate::format::{Arg, format_message};

/// Capture hook installed on an adapter. Receives the formatted message.
pub type InterceptHook = Arc<dyn Fn(LogKind, &str) + Send + Sync + 'static>;

/// Diverts the five log channels into a hook.
///
/// Adapters forward every call to their original channels themselves; the
/// hook only captures.
pub trait InterceptAdapter: Send + Sync {
    /// Routes subsequent log calls through `hook`, replacing any previous one.
    fn install(&self, hook: InterceptHook);

    /// Restores the original behavior if `hook` is still the installed one.
    ///
    /// A hook that was replaced by a later `install` leaves the newer one in
    /// place. Returns whether `hook` was removed.
    fn uninstall(&self, hook: &InterceptHook) -> bool;

    /// Whether `hook` is the currently installed hook.
    fn is_installed(&self, hook: &InterceptHook) -> bool;

    /// The unintercepted channels.
    fn original(&self) -> Arc<dyn Channel>;
}

/// Shared slot holding the installed hook.
#[derive(Default, Clone)]
pub(crate) struct HookSlot(Arc<RwLock<Option<InterceptHook>>>);

impl HookSlot {
    pub(crate) fn set(&self, hook: InterceptHook) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    /// Clears the slot only when it still holds `hook`.
    pub(crate) fn clear_if(&self, hook: &InterceptHook) -> bool {
        let mut slot = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, hook)) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn holds(&self, hook: &InterceptHook) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, hook))
    }

    /// Clones the hook out so it is never invoked under the lock.
    pub(crate) fn get(&self) -> Option<InterceptHook> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// An explicit console object host code logs through.
///
/// Every call is written to the original channel first; when a hook is
/// installed it then receives the same message.
pub struct Console {
    original: Arc<dyn Channel>,
    hook: HookSlot,
}

impl Console {
    pub fn new(original: Arc<dyn Channel>) -> Self {
        Self {
            original,
            hook: HookSlot::default(),
        }
    }

    pub fn log(&self, kind: LogKind, args: &[Arg<'_>]) {
        let message = format_message(args);
        self.original.write(kind, &message);
        if let Some(hook) = self.hook.get() {
            hook(kind, &message);
        }
    }

    pub fn trace(&self, args: &[Arg<'_>]) {
        self.log(LogKind::Trace, args);
    }

    pub fn debug(&self, args: &[Arg<'_>]) {
        self.log(LogKind::Debug, args);
    }

    pub fn info(&self, args: &[Arg<'_>]) {
        self.log(LogKind::Info, args);
    }

    pub fn warn(&self, args: &[Arg<'_>]) {
        self.log(LogKind::Warn, args);
    }

    pub fn error(&self, args: &[Arg<'_>]) {
        self.log(LogKind::Error, args);
    }

    /// Whether a capture hook is currently installed.
    pub fn is_intercepted(&self) -> bool {
        self.hook.get().is_some()
    }
}

impl InterceptAdapter for Console {
    fn install(&self, hook: InterceptHook) {
        self.hook.set(hook);
    }

    fn uninstall(&self, hook: &InterceptHook) -> bool {
        self.hook.clear_if(hook)
    }

    fn is_installed(&self, hook: &InterceptHook) -> bool {
        self.hook.holds(hook)
    }

    fn original(&self) -> Arc<dyn Channel> {
        Arc::clone(&self.original)
    }
}

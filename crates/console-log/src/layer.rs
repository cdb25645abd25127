//! Captures `tracing` events through a subscriber layer.
//!
//! Pair [`CaptureLayer`] with the [`TracingIntercept`] returned alongside it:
//! the layer sits in the subscriber stack, the intercept is handed to a
//! capture buffer as its adapter. Forwarding to the original output is left
//! to the other layers of the stack.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use logpanel_protocol::constants::ORIGINAL_TARGET;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::channel::{Channel, TracingChannel, kind_for_level};
use crate::intercept::{HookSlot, InterceptAdapter, InterceptHook};

/// Creates a connected layer/adapter pair.
pub fn capture_layer() -> (CaptureLayer, TracingIntercept) {
    let slot = HookSlot::default();
    (
        CaptureLayer { hook: slot.clone() },
        TracingIntercept {
            hook: slot,
            original: Arc::new(TracingChannel),
        },
    )
}

/// `tracing` layer feeding events into the installed capture hook.
pub struct CaptureLayer {
    hook: HookSlot,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() == ORIGINAL_TARGET {
            return;
        }
        let Some(hook) = self.hook.get() else {
            return;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        hook(kind_for_level(metadata.level()), &visitor.finish());
    }
}

/// Adapter side of [`capture_layer`].
pub struct TracingIntercept {
    hook: HookSlot,
    original: Arc<dyn Channel>,
}

impl InterceptAdapter for TracingIntercept {
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

/// Builds `message key=value key=value` from an event's fields.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message;
        for field in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&field);
        }
        out
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message.clear();
            let _ = write!(self.message, "{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}

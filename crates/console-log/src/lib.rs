//! Console capture with a bounded buffer and subscriber notification.
//!
//! Log calls on the five channels (trace, debug, info, warn, error) are
//! diverted through an [`InterceptAdapter`], formatted into timestamped
//! entries, kept in a FIFO ring buffer and delivered synchronously to
//! subscribers. Two adapters are provided: an explicit [`Console`] object,
//! and a `tracing` layer built by [`capture_layer`].

mod buffer;
mod capture;
mod channel;
mod error;
mod format;
mod intercept;
mod layer;
mod registry;

pub use buffer::RingBuffer;
pub use capture::CaptureBuffer;
pub use channel::{Channel, TracingChannel, kind_for_level};
pub use error::CaptureError;
pub use format::{Arg, Structured, format_message};
pub use intercept::{Console, InterceptAdapter, InterceptHook};
pub use layer::{CaptureLayer, TracingIntercept, capture_layer};
pub use registry::{SubscriberFn, SubscriberId, SubscriberRegistry};

/// Errors raised while setting up console capture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("max_logs must be a positive integer")]
    ZeroCapacity,
}

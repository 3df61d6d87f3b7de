use thiserror::Error;

/// Failure of a network/service call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a non-success status. `body` is the
    /// response text, which is what gets surfaced to the user.
    #[error("service returned {code}: {body}")]
    Status { code: u16, body: String },

    /// Connection or stream-level failure.
    #[error("network error: {0}")]
    Network(String),
}

use thiserror::Error;

/// Failure modes of a backend invocation.
///
/// Parse failures of the model's *reply content* are not represented here —
/// a malformed reply is an expected occurrence handled by the scoring layer.
/// These variants cover the protocol level only: the call either returns a
/// complete reply string or exactly one of these.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection, auth, or timeout failure — the backend never answered.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered, but not in the shape the wire protocol promises
    /// (undecodable stream chunk, missing completion choice).
    #[error("backend protocol error: {0}")]
    Protocol(String),

    /// The backend explicitly signaled an error payload. Carries the
    /// backend's own message; no further chunks are read after this.
    #[error("backend reported error: {0}")]
    Reported(String),
}

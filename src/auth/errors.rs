use thiserror::Error;

/// Failure reported by the authentication service.
///
/// HTTP rejections keep the status code and the `message` field of the error
/// body, so callers never have to sniff the shape of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("request failed ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
    },
    #[error("unable to reach the server: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    Request(String),
}

impl ServiceError {
    /// HTTP status of a rejection, `None` when no response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the service in the error body, if any.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

// Error types shared by every stage of order assembly

use thiserror::Error;

/// Longest response body excerpt kept inside an error.
pub const BODY_EXCERPT_LIMIT: usize = 512;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid API key")]
    InvalidCredentials,

    #[error("Webservice is unavailable, enable it in the shop settings")]
    ServiceUnavailable,

    #[error("Unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Could not connect to the shop: {0}")]
    ConnectionFailure(#[from] TransportError),

    #[error("No orders found in the shop")]
    NoOrdersAvailable,

    #[error("No permission to access {0}, grant it to the API key")]
    ResourceForbidden(String),

    #[error("Invalid order number {number}, must be between 1 and {max}")]
    InvalidOrderNumber { number: u32, max: u32 },

    #[error("Malformed {resource} data: {reason}")]
    MalformedData { resource: String, reason: String },
}

impl ClientError {
    pub(crate) fn unexpected_status(status: u16, body: &[u8]) -> Self {
        let body: String = String::from_utf8_lossy(body)
            .chars()
            .take(BODY_EXCERPT_LIMIT)
            .collect();
        ClientError::UnexpectedStatus { status, body }
    }

    pub(crate) fn malformed(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::MalformedData {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

use thiserror::Error;

/// Errors raised while talking to the stock board server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

use thiserror::Error;

/// Failures of a single poll-evaluate iteration. None of them are fatal: the
/// watcher logs them, reports them to the chat and retries after a backoff.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Request to the homework API failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Homework API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode homework API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected homework API response: {0}")]
    MalformedResponse(String),
}

impl WatchError {
    pub fn malformed(message: impl Into<String>) -> Self {
        WatchError::MalformedResponse(message.into())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            WatchError::Api { status, .. } => Some(*status),
            WatchError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, WatchError::Network(_))
    }
}

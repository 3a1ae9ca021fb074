use thiserror::Error;

use crate::cancel::Channel;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The request was superseded by a newer one on the same channel.
    #[error("{channel} request superseded by a newer request")]
    Cancelled { channel: Channel },

    #[error("no refresh token stored; log in first")]
    NotAuthenticated,

    #[error("token store I/O error at {path}: {source}")]
    TokenStoreIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("token store at {path} is corrupt: {source}")]
    TokenStoreParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Superseded requests are discarded silently, never shown to the user.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

use thiserror::Error;

/// Errors produced while fetching, decoding and joining provider data
#[derive(Debug, Error)]
pub enum Error {
    /// The top-level response is not the container we expected
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// A structurally required field is missing while mapping an entity
    #[error("failed to decode {entity}: {reason}")]
    Decode { entity: &'static str, reason: String },

    /// A lookup (team, player, result set) found nothing
    #[error("not found: {0}")]
    NotFound(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn decode(entity: &'static str, reason: impl Into<String>) -> Self {
        Error::Decode {
            entity,
            reason: reason.into(),
        }
    }

    /// True for errors that came from talking to a provider rather than from our own input
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Http { .. } | Error::Status { .. } | Error::Shape(_) | Error::Decode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

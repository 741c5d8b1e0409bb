// crates/propmap-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the normalization pipeline and the load cycle.
#[derive(Debug, Error)]
pub enum PropMapError {
    /// Invalid JSON, or JSON whose elements are not record objects.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The map access token is absent or still the placeholder value.
    #[error("Missing configuration: map access token is not set")]
    MissingConfiguration,

    /// The rendering layer refused the data or the interaction setup.
    #[error("Rendering fault: {0}")]
    RenderingFault(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PropMapError {
    fn from(e: serde_json::Error) -> Self {
        PropMapError::MalformedPayload(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PropMapError>;

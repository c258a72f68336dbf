use thiserror::*;

//
// CacheError
//

/// Cache error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Invalid tag.
    #[error("invalid tag {0:?}: {1}")]
    InvalidTag(String, &'static str),

    /// Invalid cache life.
    #[error("invalid cache life: {0}")]
    InvalidLife(String),

    /// Value could not be (de)serialized.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

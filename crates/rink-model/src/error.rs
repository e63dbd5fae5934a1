use thiserror::Error;

/// Errors raised when converting external strings into model types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown player attribute: {0}")]
    UnknownAttribute(String),

    #[error("unknown position: {0}")]
    UnknownPosition(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

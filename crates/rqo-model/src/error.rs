use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown offset strategy: {0}")]
    UnknownStrategy(String),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;

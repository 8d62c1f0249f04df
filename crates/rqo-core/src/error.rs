use thiserror::Error;

use rqo_model::{ModelError, OffsetStrategy};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no offset evaluation registered for strategy: {0}")]
    NoEvaluation(OffsetStrategy),

    #[error("config error: {0}")]
    Config(#[from] ModelError),
}

pub type CoreResult<T> = Result<T, CoreError>;

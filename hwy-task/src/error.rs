use hwy_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TaskError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl TaskError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TaskError::InvalidConfiguration(message.into())
    }
}

use thiserror::Error;

pub type PilotResult<T> = Result<T, PilotError>;

#[derive(Error, Debug)]
pub enum PilotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Missing result for variant {0}")]
    MissingResult(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PilotError {
    pub fn transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<config::ConfigError> for PilotError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

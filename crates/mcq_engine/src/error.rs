use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown question id '{0}'")]
    UnknownQuestion(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

use super::config::ConfigError;
use crate::core::forcefield::term::ScoreTerm;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid score configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Missing {term} parameters: {message}")]
    Parameter { term: ScoreTerm, message: String },

    #[error("Expected {expected} coordinates, got {actual}")]
    CoordinateCount { expected: usize, actual: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

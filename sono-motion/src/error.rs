//! Erros do módulo de movimento

use thiserror::Error;

pub type MotionResult<T> = Result<T, MotionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

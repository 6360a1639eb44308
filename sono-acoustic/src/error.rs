//! Erros específicos do módulo acústico

use thiserror::Error;

pub type AcousticResult<T> = Result<T, AcousticError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcousticError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Thresholds must increase: quiet {quiet} < moderate {moderate} < loud {loud}")]
    UnorderedThresholds { quiet: i32, moderate: i32, loud: i32 },
}

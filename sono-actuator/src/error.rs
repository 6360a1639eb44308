//! Erros da camada de atuador

use sono_core::error::DriverError;
use thiserror::Error;

pub type ActuatorResult<T> = Result<T, ActuatorError>;

/// Erros de atuador
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    /// Driver recusou ou falhou um passo
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Fora de alcance
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Hardware não inicializado
    #[error("Hardware not initialized")]
    NotInitialized,
}

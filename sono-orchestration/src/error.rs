//! Erros de orquestração

use sono_acoustic::AcousticError;
use sono_actuator::ActuatorError;
use sono_motion::MotionError;
use thiserror::Error;

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Erros de carga e validação da configuração do dispositivo
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Arquivo ilegível
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    /// TOML inválido
    #[error("Failed to parse device config: {0}")]
    Parse(String),

    /// Valor fora do permitido
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Erros de orquestração
#[derive(Debug, Error, Clone)]
pub enum OrchestrationError {
    /// Sensor ou servo ausente na inicialização
    #[error("Hardware unavailable: {0}")]
    HardwareUnavailable(String),

    /// Configuração inválida na inicialização
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    #[error("Motion error: {0}")]
    Motion(#[from] MotionError),

    #[error("Acoustic error: {0}")]
    Acoustic(#[from] AcousticError),

    /// Fila de comandos fechada
    #[error("Command queue closed")]
    ChannelClosed,

    /// Lock poison
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for OrchestrationError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        OrchestrationError::LockPoisoned(err.to_string())
    }
}

//! Erros dos colaboradores externos

use thiserror::Error;

/// Erro de leitura de sensor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("Sensor not initialized")]
    NotInitialized,
    #[error("Sensor read failed: {0}")]
    ReadFailed(String),
}

/// Erro do driver de servo
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("Driver not attached")]
    NotAttached,
    #[error("Angle {0}° rejected by driver")]
    Rejected(i32),
    #[error("Driver fault: {0}")]
    Fault(String),
}

/// Erro de armazenamento local (best-effort)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

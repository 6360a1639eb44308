//! # 🎯 Traits — Colaboradores do Núcleo
//!
//! O núcleo não conhece hardware nem rede. Cada colaborador externo entra por
//! um destes traits:
//!
//! | Trait | Papel | Implementações |
//! |:------|:------|:---------------|
//! | [`SampleSource`] | Sensores (IMU, microfone, DHT, luz) | `SyntheticSource`, `ScriptedSource` |
//! | [`ServoDriver`] | Atuador da almofada | `LoggingServo`, `RecordingServo` |
//! | [`RecordStore`] | Espelho local best-effort | `JsonlStore`, `MemoryStore` |
//!
//! > *"Trait no core, implementação no módulo."*

use std::fmt::Debug;

use crate::error::{DriverError, SensorError, StorageError};
use crate::types::RawSample;

/// Trait base para qualquer componente do dispositivo.
pub trait Component: Send + Debug {
    /// Nome do componente (para logging)
    fn name(&self) -> &str;

    /// Hardware presente e pronto?
    ///
    /// Um componente ausente na inicialização é fatal para o controlador.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Fonte de amostras: uma `RawSample` por tick.
///
/// A leitura deve ter latência limitada; uma leitura travada trava o tick.
pub trait SampleSource: Component {
    /// Lê uma amostra
    fn read(&mut self) -> Result<RawSample, SensorError>;
}

/// Driver do servo da almofada.
///
/// Síncrono; deve concluir dentro do atraso de passo configurado.
pub trait ServoDriver: Component {
    /// Posiciona o servo no ângulo dado (graus)
    fn set_angle(&mut self, degrees: i32) -> Result<(), DriverError>;
}

/// Armazenamento local de registros serializados.
///
/// Falhas não são fatais e não sobem além do controlador.
pub trait RecordStore: Send + Debug {
    /// Acrescenta um registro opaco
    fn append(&mut self, record: &str) -> Result<(), StorageError>;
}

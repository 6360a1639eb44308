//! # Prelude — Re-exportações Convenientes
//!
//! ```
//! use sono_core::prelude::*;
//! ```

// Modelo de dados
pub use crate::types::{Cooldown, Posture, PowerMode, RawSample, SoundClass, Timestamp};

// Colaboradores
pub use crate::traits::{Component, RecordStore, SampleSource, ServoDriver};
pub use crate::error::{DriverError, SensorError, StorageError};

// Tempo
pub use crate::clock::{Clock, ManualClock, MonotonicClock};

// Registros de entrada e saída
pub use crate::command::{Command, CommandError, InboundCommand};
pub use crate::event::{
    Axes, EnvironmentReading, EventKind, EventPayload, HeartbeatStatus, OutboundEvent, SessionTag,
};

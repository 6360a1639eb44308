//! # 🌙 Sono-Core
//!
//! Núcleo compartilhado do dispositivo de monitoramento de sono.
//!
//! Define o modelo de dados que flui entre os componentes, os traits dos
//! colaboradores externos (sensores, servo, armazenamento, relógio) e os
//! registros estruturados de entrada e saída (comandos e eventos).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────┐   RawSample   ┌──────────────────────────────────┐
//! │ SampleSource │ ────────────→ │        SessionController         │
//! └──────────────┘               │  Position | Sound | Restlessness │
//!                                └──────────────────────────────────┘
//!        Command ──────────────→        │             │
//!                                 OutboundEvent   set_angle()
//!                                       ↓             ↓
//!                                   transporte    ServoDriver
//! ```
//!
//! ## Módulos
//!
//! - [`types`]: `RawSample`, `Timestamp`, `Cooldown`, `PowerMode`
//! - [`traits`]: `Component`, `SampleSource`, `ServoDriver`, `RecordStore`
//! - [`clock`]: relógio monotônico e relógio manual para testes
//! - [`event`]: eventos de saída (`sensor_data`, `heartbeat`, ...)
//! - [`command`]: comandos de entrada e sua validação
//! - [`testing`]: colaboradores falsos usados pelos testes dos outros crates

pub mod error;
pub mod types;
pub mod traits;
pub mod clock;
pub mod event;
pub mod command;
pub mod testing;
pub mod prelude;

pub use error::{DriverError, SensorError, StorageError};
pub use types::{Cooldown, Posture, PowerMode, RawSample, SoundClass, Timestamp};
pub use traits::{Component, RecordStore, SampleSource, ServoDriver};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use event::{EventKind, EventPayload, OutboundEvent, SessionTag};
pub use command::{Command, CommandError, InboundCommand};

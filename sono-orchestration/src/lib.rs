//! # 🎼 sono-orchestration — Controle de Sessão
//!
//! Liga os classificadores e o atuador num laço cooperativo de um único
//! escritor e traduz tudo em eventos de saída.
//!
//! ## Arquitetura
//!
//! ```text
//!   CommandSender ──(crossbeam)──┐
//!                                ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   SessionController                     │
//! │                                                         │
//! │  poll(): comandos → heartbeat? → tick?                  │
//! │                                                         │
//! │  tick:  SampleSource.read()                             │
//! │           ├─→ RestlessnessTracker ─→ ActuatorController │
//! │           ├─→ PositionClassifier                        │
//! │           └─→ SoundClassifier                           │
//! └─────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//!                 EventBus ──→ transporte / RecordStore
//! ```
//!
//! ## Ordem dos eventos num tick
//!
//! `pillow_adjustment` → `position_change` → `snoring_detection` → `sensor_data`
//!
//! ## Exemplo
//!
//! ```
//! use sono_core::prelude::*;
//! use sono_core::testing::ScriptedSource;
//! use sono_actuator::RecordingServo;
//! use sono_orchestration::{DeviceConfig, SessionController};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = ManualClock::new();
//! let source = ScriptedSource::new([RawSample::at_rest(0)]);
//! let mut controller = SessionController::new(
//!     DeviceConfig::default(),
//!     source,
//!     RecordingServo::new(),
//!     clock.clone(),
//! )?;
//!
//! controller.handle_command(
//!     InboundCommand::bare("start_sleep_tracking")
//!         .with_param("userId", "u1")
//!         .with_param("sessionId", "night-1"),
//! )?;
//! let report = controller.poll()?;
//! assert!(report.ticked);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod config;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod controller;

pub use error::{ConfigError, ConfigResult, OrchestrationError, OrchestrationResult};
pub use config::{DeviceConfig, DeviceSection, SamplingSection, StorageSection};
pub use events::{EventBus, EventFilter, EventHandler};
pub use scheduler::IntervalGate;
pub use session::{Session, TrackingState};
pub use controller::{CommandSender, PollReport, SessionController};

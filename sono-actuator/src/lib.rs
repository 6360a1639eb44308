//! # 🦾 sono-actuator — Almofada Adaptativa
//!
//! Dono único do ângulo da almofada. Converte o pedido de ajuste em uma rampa
//! de passos fixos no servo e garante o cooldown entre ajustes.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          ActuatorController              │
//! │  cooldown ─→ alvo (MIN ⇄ MAX) ─→ rampa   │
//! │               passos de 2°, 30ms cada    │
//! └──────────────────────────────────────────┘
//!                     ↓ set_angle()
//!              ServoDriver (PWM)
//! ```
//!
//! ## Garantias
//!
//! - O ângulo fica sempre em `[min_angle, max_angle]`, inclusive no meio da rampa
//! - O cooldown é verificado dentro do controlador para qualquer origem do
//!   pedido (inquietação ou botão manual)
//! - A rampa bloqueia o chamador até terminar
//! - Concluir um ajuste não mexe no detector de inquietação: o resultado
//!   [`AdjustmentOutcome::Adjusted`] volta ao orquestrador, que decide o reset
//!
//! ## Exemplo
//!
//! ```
//! use sono_actuator::{ActuatorConfig, ActuatorController, AdjustReason, RecordingServo};
//! use sono_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = ManualClock::new();
//! let mut controller = ActuatorController::new(RecordingServo::new(), ActuatorConfig::default())?;
//!
//! let outcome = controller.adjust(AdjustReason::ManualButton, 0, &clock)?;
//! assert!(outcome.is_adjusted());
//! assert_eq!(controller.current_angle(), 45);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod servo;
pub mod controller;

pub use error::{ActuatorError, ActuatorResult};
pub use types::{
    ActuatorConfig, ActuatorState, AdjustReason, AdjustmentOutcome, PillowAdjustment, SkipReason,
};
pub use servo::{RecordingServo, ServoState};
pub use controller::ActuatorController;

#[cfg(test)]
mod tests;

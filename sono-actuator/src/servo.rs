//! Servo simulado que registra cada comando

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use sono_core::error::DriverError;
use sono_core::traits::{Component, ServoDriver};

use crate::types::SERVO_PHYSICAL_MAX;

/// Estado interno do servo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServoState {
    /// Posição atual (graus)
    pub current_position: Option<i32>,
    /// Todos os ângulos comandados, em ordem
    pub history: Vec<i32>,
    /// Total de movimentos realizados
    pub movements: u64,
    /// Falha a partir do N-ésimo comando
    pub fail_after: Option<u64>,
    /// Servo presente?
    pub attached: bool,
}

/// Servo em memória
///
/// Clones compartilham o mesmo estado; os testes guardam um clone para
/// inspecionar os comandos depois de entregar o servo ao controlador.
#[derive(Debug, Clone)]
pub struct RecordingServo {
    state: Arc<Mutex<ServoState>>,
}

impl RecordingServo {
    /// Cria servo presente e funcional
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ServoState {
                attached: true,
                ..ServoState::default()
            })),
        }
    }

    /// Servo não encontrado na inicialização
    pub fn detached() -> Self {
        Self {
            state: Arc::new(Mutex::new(ServoState::default())),
        }
    }

    /// Servo que falha a partir do comando `n` (contando de 0)
    pub fn failing_after(n: u64) -> Self {
        let servo = Self::new();
        if let Ok(mut state) = servo.state.lock() {
            state.fail_after = Some(n);
        }
        servo
    }

    /// Cópia do estado interno
    pub fn state(&self) -> ServoState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Posição atual
    pub fn position(&self) -> Option<i32> {
        self.state().current_position
    }

    /// Ângulos comandados
    pub fn history(&self) -> Vec<i32> {
        self.state().history
    }

    /// Número de movimentos realizados
    pub fn movement_count(&self) -> u64 {
        self.state().movements
    }
}

impl Default for RecordingServo {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RecordingServo {
    fn name(&self) -> &str {
        "RecordingServo"
    }

    fn is_ready(&self) -> bool {
        self.state.lock().map(|s| s.attached).unwrap_or(false)
    }
}

impl ServoDriver for RecordingServo {
    fn set_angle(&mut self, degrees: i32) -> Result<(), DriverError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| DriverError::Fault(e.to_string()))?;

        if !state.attached {
            return Err(DriverError::NotAttached);
        }
        if state.fail_after.is_some_and(|n| state.movements >= n) {
            return Err(DriverError::Fault("simulated stall".into()));
        }
        if !(0..=SERVO_PHYSICAL_MAX).contains(&degrees) {
            return Err(DriverError::Rejected(degrees));
        }

        state.current_position = Some(degrees);
        state.history.push(degrees);
        state.movements += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servo_records_commands() {
        let mut servo = RecordingServo::new();
        let handle = servo.clone();

        servo.set_angle(10).unwrap();
        servo.set_angle(20).unwrap();

        assert_eq!(handle.history(), vec![10, 20]);
        assert_eq!(handle.position(), Some(20));
        assert_eq!(handle.movement_count(), 2);
    }

    #[test]
    fn test_servo_rejects_out_of_range() {
        let mut servo = RecordingServo::new();
        assert_eq!(servo.set_angle(181), Err(DriverError::Rejected(181)));
        assert_eq!(servo.set_angle(-1), Err(DriverError::Rejected(-1)));
        assert_eq!(servo.movement_count(), 0);
    }

    #[test]
    fn test_detached_servo() {
        let mut servo = RecordingServo::detached();
        assert!(!servo.is_ready());
        assert_eq!(servo.set_angle(0), Err(DriverError::NotAttached));
    }

    #[test]
    fn test_failing_servo() {
        let mut servo = RecordingServo::failing_after(2);
        assert!(servo.set_angle(2).is_ok());
        assert!(servo.set_angle(4).is_ok());
        assert!(matches!(servo.set_angle(6), Err(DriverError::Fault(_))));
        assert_eq!(servo.position(), Some(4));
    }
}

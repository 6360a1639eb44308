//! Servo de referência: só registra os comandos no log

use sono_core::error::DriverError;
use sono_core::traits::{Component, ServoDriver};
use tracing::trace;

/// Servo sem hardware; cada passo da rampa vira uma linha de `trace`
#[derive(Debug, Default)]
pub struct LoggingServo {
    angle: Option<i32>,
    writes: u64,
}

impl LoggingServo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self) -> Option<i32> {
        self.angle
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl Component for LoggingServo {
    fn name(&self) -> &str {
        "LoggingServo"
    }
}

impl ServoDriver for LoggingServo {
    fn set_angle(&mut self, degrees: i32) -> Result<(), DriverError> {
        if !(0..=180).contains(&degrees) {
            return Err(DriverError::Rejected(degrees));
        }
        trace!(from = ?self.angle, to = degrees, "servo write");
        self.angle = Some(degrees);
        self.writes += 1;
        Ok(())
    }
}

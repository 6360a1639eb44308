//! Tipos de dados para o atuador

use serde::{Deserialize, Serialize};
use sono_core::types::{Cooldown, Timestamp};

use crate::error::{ActuatorError, ActuatorResult};

/// Limite físico do servo (graus)
pub const SERVO_PHYSICAL_MAX: i32 = 180;

/// Configuração da almofada adaptativa
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Recurso adaptativo habilitado
    pub enabled: bool,
    /// Ângulo mínimo (plano)
    pub min_angle: i32,
    /// Ângulo máximo (elevado)
    pub max_angle: i32,
    /// Tamanho do passo da rampa (graus)
    pub step_degrees: u32,
    /// Atraso entre passos (ms)
    pub step_delay_ms: u64,
    /// Intervalo mínimo entre ajustes (ms)
    pub cooldown_ms: u64,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_angle: 0,
            max_angle: 45,
            step_degrees: 2,
            step_delay_ms: 30,
            cooldown_ms: 600_000, // 10 min
        }
    }
}

impl ActuatorConfig {
    pub fn validate(&self) -> ActuatorResult<()> {
        if self.min_angle < 0 || self.max_angle > SERVO_PHYSICAL_MAX {
            return Err(ActuatorError::OutOfRange(format!(
                "Servo limits must be within 0-{SERVO_PHYSICAL_MAX}°, got {}-{}°",
                self.min_angle, self.max_angle
            )));
        }
        if self.min_angle >= self.max_angle {
            return Err(ActuatorError::InvalidConfig(
                "min_angle must be less than max_angle".into(),
            ));
        }
        if self.step_degrees == 0 {
            return Err(ActuatorError::InvalidConfig(
                "step_degrees must be > 0".into(),
            ));
        }
        let span = (self.max_angle - self.min_angle).unsigned_abs();
        if self.step_degrees > span {
            return Err(ActuatorError::InvalidConfig(format!(
                "step_degrees {} exceeds the {span}° travel",
                self.step_degrees
            )));
        }
        Ok(())
    }

    /// `true` se o ângulo está dentro dos limites configurados
    pub fn contains(&self, angle: i32) -> bool {
        (self.min_angle..=self.max_angle).contains(&angle)
    }
}

/// Motivo de um ajuste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustReason {
    /// Sinalizado pelo detector de inquietação
    #[serde(rename = "restlessness_detected")]
    Restlessness,
    /// Botão físico
    ManualButton,
}

impl AdjustReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustReason::Restlessness => "restlessness_detected",
            AdjustReason::ManualButton => "manual_button",
        }
    }
}

/// Ajuste concluído
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillowAdjustment {
    /// Ângulo final
    pub angle: i32,
    /// Ângulo antes da rampa
    pub previous_angle: i32,
    pub reason: AdjustReason,
    /// Contagem de movimentos no momento do disparo
    pub movement_count_at_trigger: u32,
    /// Fim da rampa (ms)
    pub timestamp: Timestamp,
    /// Passos executados na rampa
    pub steps: u32,
}

/// Motivo de um ajuste ignorado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Recurso adaptativo desabilitado
    Disabled,
    /// Cooldown ainda ativo
    Cooldown { remaining_ms: u64 },
}

/// Resultado de um pedido de ajuste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentOutcome {
    Adjusted(PillowAdjustment),
    Skipped(SkipReason),
}

impl AdjustmentOutcome {
    pub fn is_adjusted(&self) -> bool {
        matches!(self, AdjustmentOutcome::Adjusted(_))
    }
}

/// Estado do atuador (escritor único: o controlador)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorState {
    pub current_angle: i32,
    pub cooldown: Cooldown,
    /// Total de ajustes concluídos
    pub adjustments: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ActuatorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.contains(0));
        assert!(config.contains(45));
        assert!(!config.contains(46));
    }

    #[test]
    fn test_config_out_of_range() {
        let config = ActuatorConfig {
            max_angle: 200,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ActuatorError::OutOfRange(_))));
    }

    #[test]
    fn test_config_inverted_limits() {
        let config = ActuatorConfig {
            min_angle: 45,
            max_angle: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ActuatorError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_zero_step() {
        let config = ActuatorConfig {
            step_degrees: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_step_larger_than_travel() {
        let full = ActuatorConfig {
            step_degrees: 45,
            ..Default::default()
        };
        assert!(full.validate().is_ok());

        let huge = ActuatorConfig {
            step_degrees: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(ActuatorError::InvalidConfig(_))));
    }

    #[test]
    fn test_reason_names() {
        assert_eq!(AdjustReason::Restlessness.as_str(), "restlessness_detected");
        assert_eq!(AdjustReason::ManualButton.as_str(), "manual_button");
        assert_eq!(
            serde_json::to_string(&AdjustReason::Restlessness).unwrap(),
            "\"restlessness_detected\""
        );
    }
}

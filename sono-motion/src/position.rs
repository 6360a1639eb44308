//! Classificação de posição de sono

use serde::{Deserialize, Serialize};
use sono_core::types::{Posture, RawSample};

use crate::error::{MotionError, MotionResult};

/// Faixa angular inclusiva com a confiança atribuída
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleBand {
    /// Limite inferior (graus)
    pub min: f32,
    /// Limite superior (graus)
    pub max: f32,
    /// Confiança da classificação (0.0 - 1.0)
    pub confidence: f32,
}

impl AngleBand {
    pub const fn new(min: f32, max: f32, confidence: f32) -> Self {
        Self { min, max, confidence }
    }

    /// `min <= angle <= max`
    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.min && angle <= self.max
    }

    fn validate(&self, name: &str) -> MotionResult<()> {
        if !(self.min <= self.max) {
            return Err(MotionError::InvalidConfig(format!(
                "{name} band min {} must not exceed max {}",
                self.min, self.max
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(MotionError::InvalidConfig(format!(
                "{name} confidence must be 0.0-1.0, got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Configuração das faixas de postura
///
/// `back` e `side` comparam o ângulo bruto (−180, 180]; `stomach` compara o
/// ângulo normalizado para [0, 360).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    pub back: AngleBand,
    pub side: AngleBand,
    pub stomach: AngleBand,
    pub unknown_confidence: f32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            back: AngleBand::new(-30.0, 30.0, 0.9),
            side: AngleBand::new(30.0, 150.0, 0.8),
            stomach: AngleBand::new(150.0, 210.0, 0.7),
            unknown_confidence: 0.3,
        }
    }
}

impl PositionConfig {
    pub fn validate(&self) -> MotionResult<()> {
        self.back.validate("back")?;
        self.side.validate("side")?;
        self.stomach.validate("stomach")?;
        if !(0.0..=1.0).contains(&self.unknown_confidence) {
            return Err(MotionError::InvalidConfig(format!(
                "unknown confidence must be 0.0-1.0, got {}",
                self.unknown_confidence
            )));
        }
        Ok(())
    }
}

/// Posição classificada de uma amostra
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub posture: Posture,
    /// Inclinação `atan2(y, z)` em graus, (−180, 180]
    pub angle_degrees: f32,
    pub confidence: f32,
}

/// Classificador de postura (puro, sem estado)
#[derive(Debug, Clone, Default)]
pub struct PositionClassifier {
    config: PositionConfig,
}

impl PositionClassifier {
    /// Cria classificador com as faixas padrão
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria classificador com faixas específicas
    pub fn with_config(config: PositionConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PositionConfig {
        &self.config
    }

    /// Inclinação da amostra em graus
    pub fn tilt_degrees(sample: &RawSample) -> f32 {
        sample.accel_y.atan2(sample.accel_z).to_degrees()
    }

    /// Classifica uma amostra
    pub fn classify(&self, sample: &RawSample) -> Position {
        self.classify_angle(Self::tilt_degrees(sample))
    }

    /// Classifica um ângulo; empates de fronteira ficam com a faixa anterior
    /// (costas, depois lado, depois bruços).
    pub fn classify_angle(&self, angle: f32) -> Position {
        let normalized = if angle < 0.0 { angle + 360.0 } else { angle };
        let cfg = &self.config;

        let (posture, confidence) = if cfg.back.contains(angle) {
            (Posture::Back, cfg.back.confidence)
        } else if cfg.side.contains(angle) {
            (Posture::Side, cfg.side.confidence)
        } else if cfg.stomach.contains(normalized) {
            (Posture::Stomach, cfg.stomach.confidence)
        } else {
            (Posture::Unknown, cfg.unknown_confidence)
        };

        Position {
            posture,
            angle_degrees: angle,
            confidence,
        }
    }
}

//! Tipos de dados acústicos

use serde::{Deserialize, Serialize};
use sono_core::types::SoundClass;

use crate::error::{AcousticError, AcousticResult};

/// Limiares superiores exclusivos de cada faixa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundThresholds {
    /// Abaixo disto: Quiet
    pub quiet_below: i32,
    /// Abaixo disto: Moderate
    pub moderate_below: i32,
    /// Abaixo disto: Loud; a partir disto: VeryLoud
    pub loud_below: i32,
}

impl Default for SoundThresholds {
    fn default() -> Self {
        Self {
            quiet_below: 100,
            moderate_below: 300,
            loud_below: 600,
        }
    }
}

impl SoundThresholds {
    /// Faixa de um nível, verificada em ordem
    pub fn classify(&self, level: i32) -> SoundClass {
        if level < self.quiet_below {
            SoundClass::Quiet
        } else if level < self.moderate_below {
            SoundClass::Moderate
        } else if level < self.loud_below {
            SoundClass::Loud
        } else {
            SoundClass::VeryLoud
        }
    }
}

/// Configuração do classificador sonoro
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub thresholds: SoundThresholds,
    /// Intervalo máximo entre amostras de ronco para continuar a sequência (ms)
    pub streak_gap_ms: u64,
    /// Silêncio após o qual a sequência zera (ms)
    pub streak_reset_ms: u64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            thresholds: SoundThresholds::default(),
            streak_gap_ms: 10_000,
            streak_reset_ms: 30_000,
        }
    }
}

impl SoundConfig {
    pub fn validate(&self) -> AcousticResult<()> {
        let t = &self.thresholds;
        if !(t.quiet_below < t.moderate_below && t.moderate_below < t.loud_below) {
            return Err(AcousticError::UnorderedThresholds {
                quiet: t.quiet_below,
                moderate: t.moderate_below,
                loud: t.loud_below,
            });
        }
        if self.streak_gap_ms == 0 {
            return Err(AcousticError::InvalidConfig(
                "streak gap must be > 0ms".into(),
            ));
        }
        if self.streak_reset_ms < self.streak_gap_ms {
            return Err(AcousticError::InvalidConfig(format!(
                "streak reset ({}ms) must not be shorter than streak gap ({}ms)",
                self.streak_reset_ms, self.streak_gap_ms
            )));
        }
        Ok(())
    }
}

/// Resultado da classificação de uma leitura
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub level: i32,
    pub classification: SoundClass,
    pub is_snoring_sample: bool,
    pub snoring_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_exclusive_upper_bounds() {
        let t = SoundThresholds::default();
        assert_eq!(t.classify(99), SoundClass::Quiet);
        assert_eq!(t.classify(100), SoundClass::Moderate);
        assert_eq!(t.classify(299), SoundClass::Moderate);
        assert_eq!(t.classify(300), SoundClass::Loud);
        assert_eq!(t.classify(599), SoundClass::Loud);
        assert_eq!(t.classify(600), SoundClass::VeryLoud);
    }

    #[test]
    fn test_config_validation() {
        assert!(SoundConfig::default().validate().is_ok());

        let unordered = SoundConfig {
            thresholds: SoundThresholds {
                quiet_below: 300,
                moderate_below: 100,
                loud_below: 600,
            },
            ..Default::default()
        };
        assert!(matches!(
            unordered.validate(),
            Err(AcousticError::UnorderedThresholds { .. })
        ));

        let short_reset = SoundConfig {
            streak_reset_ms: 5_000,
            ..Default::default()
        };
        assert!(short_reset.validate().is_err());
    }
}

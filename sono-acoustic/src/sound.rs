//! Classificador sonoro com sequência de ronco

use serde::{Deserialize, Serialize};
use sono_core::types::Timestamp;
use tracing::debug;

use crate::error::AcousticResult;
use crate::types::{SoundConfig, SoundEvent};

/// Estado da sequência de ronco
///
/// Vive enquanto o dispositivo estiver ligado; não zera entre sessões.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnoringStreak {
    /// Última amostra de ronco
    pub last_snoring_time: Option<Timestamp>,
    /// Tamanho da sequência atual
    pub streak: u32,
}

impl SnoringStreak {
    /// Atualiza a sequência com uma amostra
    ///
    /// A comparação usa o `last_snoring_time` anterior, antes de atualizá-lo:
    /// a continuidade depende do intervalo entre amostras, não da contagem.
    pub fn update(&mut self, is_snoring: bool, now: Timestamp, config: &SoundConfig) -> u32 {
        let gap = self.last_snoring_time.map(|last| now.saturating_sub(last));

        if is_snoring {
            self.streak = match gap {
                Some(gap) if gap < config.streak_gap_ms => self.streak + 1,
                _ => 1,
            };
            self.last_snoring_time = Some(now);
        } else if gap.is_none_or(|gap| gap > config.streak_reset_ms) {
            self.streak = 0;
        }

        self.streak
    }
}

/// Classificador de nível sonoro (L1)
#[derive(Debug, Clone)]
pub struct SoundClassifier {
    config: SoundConfig,
    streak: SnoringStreak,
    last_event_time: Option<Timestamp>,
    sample_count: u64,
}

impl SoundClassifier {
    /// Cria classificador com configuração padrão
    pub fn new() -> Self {
        Self {
            config: SoundConfig::default(),
            streak: SnoringStreak::default(),
            last_event_time: None,
            sample_count: 0,
        }
    }

    /// Cria classificador com configuração específica
    pub fn with_config(config: SoundConfig) -> AcousticResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &SoundConfig {
        &self.config
    }

    /// Classifica uma leitura e atualiza a sequência de ronco
    pub fn classify(&mut self, audio_level: i32, now: Timestamp) -> SoundEvent {
        let classification = self.config.thresholds.classify(audio_level);
        let is_snoring_sample = classification.is_snoring();
        let snoring_streak = self.streak.update(is_snoring_sample, now, &self.config);

        self.last_event_time = Some(now);
        self.sample_count += 1;

        if is_snoring_sample {
            debug!(
                level = audio_level,
                class = classification.as_str(),
                streak = snoring_streak,
                "snoring sample"
            );
        }

        SoundEvent {
            level: audio_level,
            classification,
            is_snoring_sample,
            snoring_streak,
        }
    }

    /// Estado atual da sequência
    pub fn streak(&self) -> &SnoringStreak {
        &self.streak
    }

    /// Momento da última classificação
    pub fn last_event_time(&self) -> Option<Timestamp> {
        self.last_event_time
    }

    /// Número de leituras classificadas
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }
}

impl Default for SoundClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_snoring_sample_starts_at_one() {
        let mut streak = SnoringStreak::default();
        assert_eq!(streak.update(true, 50_000, &SoundConfig::default()), 1);
        assert_eq!(streak.last_snoring_time, Some(50_000));
    }

    #[test]
    fn test_quiet_before_any_snoring_stays_zero() {
        let mut streak = SnoringStreak::default();
        assert_eq!(streak.update(false, 0, &SoundConfig::default()), 0);
    }

    #[test]
    fn test_classifier_bookkeeping() {
        let mut classifier = SoundClassifier::new();
        classifier.classify(10, 100);
        classifier.classify(20, 250);
        assert_eq!(classifier.sample_count(), 2);
        assert_eq!(classifier.last_event_time(), Some(250));
        assert_eq!(classifier.streak().last_snoring_time, None);
    }
}

//! Detecção de inquietação por janela deslizante
//!
//! ```text
//!            movimento > limiar            contagem >= limite
//!   Calmo ─────────────────────→ conta ─────────────────────→ Inquieto
//!     ↑                                                          │
//!     └──── janela expirou / reset_movements() após ajuste ──────┘
//! ```

use serde::{Deserialize, Serialize};
use sono_core::types::{Cooldown, Timestamp};
use tracing::debug;

use crate::error::{MotionError, MotionResult};

/// Configuração do detector de inquietação
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestlessnessConfig {
    /// Magnitude de aceleração que conta como movimento (g)
    pub movement_threshold_g: f32,
    /// Número de movimentos na janela para considerar inquieto
    pub count_threshold: u32,
    /// Duração da janela (ms)
    pub window_ms: u64,
}

impl Default for RestlessnessConfig {
    fn default() -> Self {
        Self {
            movement_threshold_g: 1.5,
            count_threshold: 10,
            window_ms: 300_000, // 5 min
        }
    }
}

impl RestlessnessConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.movement_threshold_g.is_finite() && self.movement_threshold_g > 0.0) {
            return Err(MotionError::InvalidConfig(format!(
                "movement threshold must be > 0 g, got {}",
                self.movement_threshold_g
            )));
        }
        if self.count_threshold == 0 {
            return Err(MotionError::InvalidConfig(
                "count threshold must be > 0".into(),
            ));
        }
        if self.window_ms == 0 {
            return Err(MotionError::InvalidConfig("window must be > 0ms".into()));
        }
        Ok(())
    }
}

/// Estado da janela atual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestlessnessState {
    pub window_start: Timestamp,
    pub movement_count: u32,
    pub last_movement_time: Option<Timestamp>,
    pub restless: bool,
}

/// Resultado de uma observação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestlessnessDecision {
    /// Contagem atingiu o limite
    pub restless: bool,
    /// Inquieto e cooldown do atuador cumprido
    pub should_adjust: bool,
}

/// Contador de movimentos em janela deslizante
#[derive(Debug, Clone)]
pub struct RestlessnessTracker {
    config: RestlessnessConfig,
    state: RestlessnessState,
}

impl RestlessnessTracker {
    /// Cria detector com janela começando em `now`
    pub fn new(config: RestlessnessConfig, now: Timestamp) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: RestlessnessState {
                window_start: now,
                movement_count: 0,
                last_movement_time: None,
                restless: false,
            },
        })
    }

    pub fn config(&self) -> &RestlessnessConfig {
        &self.config
    }

    pub fn state(&self) -> &RestlessnessState {
        &self.state
    }

    pub fn movement_count(&self) -> u32 {
        self.state.movement_count
    }

    /// Observa uma magnitude de aceleração
    ///
    /// A virada de janela acontece antes da contagem e independe da magnitude.
    /// O cooldown só decide se o ajuste é sinalizado; a contagem não é afetada.
    pub fn observe(
        &mut self,
        accel_magnitude: f32,
        now: Timestamp,
        cooldown: &Cooldown,
    ) -> RestlessnessDecision {
        if now.saturating_sub(self.state.window_start) > self.config.window_ms {
            if self.state.movement_count > 0 {
                debug!(
                    dropped = self.state.movement_count,
                    "restlessness window rolled over"
                );
            }
            self.state.movement_count = 0;
            self.state.window_start = now;
        }

        if accel_magnitude > self.config.movement_threshold_g {
            self.state.movement_count += 1;
            self.state.last_movement_time = Some(now);
        }

        let restless = self.state.movement_count >= self.config.count_threshold;
        self.state.restless = restless;

        RestlessnessDecision {
            restless,
            should_adjust: restless && cooldown.is_elapsed(now),
        }
    }

    /// Zera a contagem após um ajuste concluído
    ///
    /// A janela não é reiniciada; ela continua até expirar naturalmente.
    pub fn reset_movements(&mut self) {
        self.state.movement_count = 0;
        self.state.restless = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(RestlessnessConfig::default().validate().is_ok());

        let zero_count = RestlessnessConfig {
            count_threshold: 0,
            ..Default::default()
        };
        assert!(RestlessnessTracker::new(zero_count, 0).is_err());

        let nan = RestlessnessConfig {
            movement_threshold_g: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_below_threshold_not_counted() {
        let mut tracker = RestlessnessTracker::new(Default::default(), 0).unwrap();
        let cooldown = Cooldown::new(600_000);

        tracker.observe(1.0, 100, &cooldown);
        tracker.observe(1.5, 200, &cooldown); // igual ao limiar não conta
        assert_eq!(tracker.movement_count(), 0);
        assert_eq!(tracker.state().last_movement_time, None);
    }

    #[test]
    fn test_reset_keeps_window() {
        let mut tracker = RestlessnessTracker::new(Default::default(), 1000).unwrap();
        let cooldown = Cooldown::new(600_000);
        tracker.observe(3.0, 2000, &cooldown);

        tracker.reset_movements();
        assert_eq!(tracker.movement_count(), 0);
        assert_eq!(tracker.state().window_start, 1000);
        assert_eq!(tracker.state().last_movement_time, Some(2000));
    }
}

//! Portões de intervalo fixo para ticks e heartbeat
//!
//! O laço é cooperativo: cada `poll()` pergunta ao portão se o intervalo já
//! passou. Nada dorme aqui.

use serde::{Deserialize, Serialize};
use sono_core::types::Timestamp;

/// Portão de intervalo fixo
///
/// Dispara quando `now - last >= interval`; a primeira consulta dispara
/// imediatamente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalGate {
    interval_ms: u64,
    last_fire: Option<Timestamp>,
    missed: u64,
}

impl IntervalGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fire: None,
            missed: 0,
        }
    }

    /// O intervalo já passou?
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.last_fire {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Dispara se vencido; intervalos inteiros pulados contam como perdidos
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if !self.is_due(now) {
            return false;
        }

        if let Some(last) = self.last_fire
            && self.interval_ms > 0
        {
            let elapsed = now.saturating_sub(last);
            self.missed += (elapsed / self.interval_ms).saturating_sub(1);
        }

        self.last_fire = Some(now);
        true
    }

    /// Esquece o último disparo; o próximo `poll` dispara
    pub fn reset(&mut self) {
        self.last_fire = None;
    }

    /// Intervalos inteiros pulados por um laço lento
    pub fn missed(&self) -> u64 {
        self.missed
    }
}

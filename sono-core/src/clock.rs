//! Relógios monotônicos
//!
//! Toda a lógica temporal (janelas, cooldown, streak, rampa do servo) lê o tempo
//! através de [`Clock`]. Em produção usa-se [`MonotonicClock`]; nos testes,
//! [`ManualClock`] avança o tempo de forma determinística, inclusive durante a
//! rampa bloqueante do atuador.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::types::Timestamp;

/// Fonte de tempo monotônico em milissegundos
pub trait Clock: Send {
    /// Tempo atual (ms desde o início do relógio)
    fn now_ms(&self) -> Timestamp;

    /// Bloqueia o chamador por `ms` milissegundos
    fn sleep_ms(&self, ms: u64);
}

/// Relógio real baseado em `Instant`
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    started: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Timestamp {
        self.started.elapsed().as_millis() as Timestamp
    }

    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Relógio controlado manualmente
///
/// Clones compartilham o mesmo instante; `sleep_ms` apenas avança o tempo.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria relógio parado em `start`
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Avança o relógio
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Define o instante atual
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::starting_at(100);
        let handle = clock.clone();

        handle.advance(50);
        assert_eq!(clock.now_ms(), 150);

        clock.sleep_ms(30);
        assert_eq!(handle.now_ms(), 180);
    }

    #[test]
    fn test_monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}

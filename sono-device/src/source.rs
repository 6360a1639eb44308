//! Sensores simulados: uma noite sintética determinística

use std::f32::consts::PI;

use sono_core::clock::Clock;
use sono_core::error::SensorError;
use sono_core::traits::{Component, SampleSource};
use sono_core::types::{RawSample, Timestamp};

/// Troca de postura a cada 20 min
const POSTURE_PERIOD_MS: u64 = 20 * 60_000;
/// Surto de inquietação nos primeiros 30 s de cada 10 min
const RESTLESS_PERIOD_MS: u64 = 10 * 60_000;
const RESTLESS_BURST_MS: u64 = 30_000;
/// Ronco no 3º minuto de cada ciclo de 5 min
const SNORE_PERIOD_MS: u64 = 5 * 60_000;

/// Fonte de amostras sintéticas
///
/// A amostra depende só do instante, então dois dispositivos com o mesmo
/// relógio produzem a mesma noite.
#[derive(Debug)]
pub struct SyntheticSource<C> {
    clock: C,
    reads: u64,
}

impl<C: Clock> SyntheticSource<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            reads: 0,
        }
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Amostra sintética no instante `t_ms`
    pub fn sample_at(t_ms: Timestamp) -> RawSample {
        let t = t_ms as f32 / 1000.0;

        let tilt_deg = match (t_ms / POSTURE_PERIOD_MS) % 4 {
            0 => 0.0,   // costas
            1 => 90.0,  // lado
            2 => 180.0, // bruços
            _ => -90.0, // outro lado
        };
        let tilt = (tilt_deg + 5.0 * (t * 0.05).sin()) * PI / 180.0;

        let restless = t_ms % RESTLESS_PERIOD_MS < RESTLESS_BURST_MS && (t_ms / 100) % 2 == 1;
        let magnitude = if restless { 2.5 } else { 1.0 };

        let snoring = (t_ms % SNORE_PERIOD_MS) / 60_000 == 2;
        let audio_level = if snoring {
            450.0 + 250.0 * (t * 0.8).sin()
        } else {
            40.0 + 30.0 * (t * 1.3).sin().abs()
        };

        RawSample {
            accel_x: 0.02 * (t * 2.1).sin(),
            accel_y: magnitude * tilt.sin(),
            accel_z: magnitude * tilt.cos(),
            gyro_x: 0.5 * (t * 0.7).sin(),
            gyro_y: 0.5 * (t * 0.9).cos(),
            gyro_z: 0.1 * (t * 0.3).sin(),
            temperature: 22.0 + 0.5 * (t / 600.0).sin(),
            humidity: 45.0 + 2.0 * (t / 900.0).cos(),
            light_level: (5.0 + 5.0 * (t / 3600.0).sin()) as i32,
            audio_level: audio_level as i32,
            timestamp: t_ms,
        }
    }
}

impl<C: Clock + std::fmt::Debug> Component for SyntheticSource<C> {
    fn name(&self) -> &str {
        "SyntheticSource"
    }
}

impl<C: Clock + std::fmt::Debug> SampleSource for SyntheticSource<C> {
    fn read(&mut self) -> Result<RawSample, SensorError> {
        self.reads += 1;
        Ok(Self::sample_at(self.clock.now_ms()))
    }
}

//! Tipos de dados compartilhados

use serde::{Deserialize, Serialize};

/// Timestamp monotônico em milissegundos desde o boot
pub type Timestamp = u64;

/// Amostra bruta de um tick de sensores
///
/// Imutável depois de produzida; pertence ao chamador durante um tick.
/// Temperatura e umidade não finitas indicam leitura ambiental falha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    /// Aceleração X (g)
    pub accel_x: f32,
    /// Aceleração Y (g)
    pub accel_y: f32,
    /// Aceleração Z (g)
    pub accel_z: f32,
    /// Giroscópio X (°/s)
    pub gyro_x: f32,
    /// Giroscópio Y (°/s)
    pub gyro_y: f32,
    /// Giroscópio Z (°/s)
    pub gyro_z: f32,
    /// Temperatura (°C)
    pub temperature: f32,
    /// Umidade relativa (%)
    pub humidity: f32,
    /// Luminosidade (ADC bruto)
    pub light_level: i32,
    /// Nível de áudio (ADC 12-bit, 0-4095)
    pub audio_level: i32,
    /// Momento da leitura (ms)
    pub timestamp: Timestamp,
}

impl RawSample {
    /// Amostra em repouso: deitado de costas, silêncio, ambiente típico
    pub fn at_rest(timestamp: Timestamp) -> Self {
        Self {
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: 1.0,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
            temperature: 22.0,
            humidity: 45.0,
            light_level: 0,
            audio_level: 0,
            timestamp,
        }
    }

    /// Substitui o vetor de aceleração
    pub fn with_accel(mut self, x: f32, y: f32, z: f32) -> Self {
        self.accel_x = x;
        self.accel_y = y;
        self.accel_z = z;
        self
    }

    /// Substitui o nível de áudio
    pub fn with_audio(mut self, level: i32) -> Self {
        self.audio_level = level;
        self
    }

    /// Magnitude do vetor de aceleração (g)
    pub fn accel_magnitude(&self) -> f32 {
        (self.accel_x * self.accel_x + self.accel_y * self.accel_y + self.accel_z * self.accel_z)
            .sqrt()
    }

    /// Temperatura, se a leitura for válida
    pub fn temperature(&self) -> Option<f32> {
        self.temperature.is_finite().then_some(self.temperature)
    }

    /// Umidade, se a leitura for válida
    pub fn humidity(&self) -> Option<f32> {
        self.humidity.is_finite().then_some(self.humidity)
    }
}

/// Janela mínima entre dois eventos (ex.: ajustes do atuador)
///
/// Um cooldown que nunca foi disparado está sempre cumprido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Período mínimo (ms)
    pub period_ms: u64,
    /// Último disparo
    pub last: Option<Timestamp>,
}

impl Cooldown {
    pub fn new(period_ms: u64) -> Self {
        Self { period_ms, last: None }
    }

    /// `now - last > period`
    pub fn is_elapsed(&self, now: Timestamp) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_sub(last) > self.period_ms,
        }
    }

    /// Registra um disparo
    pub fn trigger(&mut self, now: Timestamp) {
        self.last = Some(now);
    }

    /// Tempo restante até o cooldown expirar
    pub fn remaining_ms(&self, now: Timestamp) -> u64 {
        match self.last {
            None => 0,
            Some(last) => self
                .period_ms
                .saturating_add(1)
                .saturating_sub(now.saturating_sub(last)),
        }
    }
}

/// Posição de sono classificada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    Back,
    Side,
    Stomach,
    Unknown,
}

impl Posture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Posture::Back => "back",
            Posture::Side => "side",
            Posture::Stomach => "stomach",
            Posture::Unknown => "unknown",
        }
    }
}

/// Classe de intensidade sonora
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundClass {
    Quiet,
    Moderate,
    Loud,
    VeryLoud,
}

impl SoundClass {
    /// Loud e VeryLoud contam como amostra de ronco
    pub fn is_snoring(&self) -> bool {
        matches!(self, SoundClass::Loud | SoundClass::VeryLoud)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundClass::Quiet => "quiet",
            SoundClass::Moderate => "moderate",
            SoundClass::Loud => "loud",
            SoundClass::VeryLoud => "very_loud",
        }
    }
}

/// Modo de energia sinalizado externamente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerMode {
    #[default]
    Normal,
    /// Amostragem pausada
    Low,
}

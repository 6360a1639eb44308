//! Configuração do dispositivo (`sono.toml`)
//!
//! Todas as seções são opcionais; valores ausentes ficam com os padrões do
//! dispositivo.
//!
//! ```toml
//! [device]
//! id = "SONO_001"
//!
//! [sampling]
//! rate_hz = 10
//! heartbeat_interval_ms = 60000
//!
//! [restlessness]
//! count_threshold = 10
//!
//! [actuator]
//! max_angle = 45
//! cooldown_ms = 600000
//!
//! [storage]
//! enabled = true
//! path = "sono-data.jsonl"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sono_acoustic::SoundConfig;
use sono_actuator::ActuatorConfig;
use sono_motion::{PositionConfig, RestlessnessConfig};

use crate::error::{ConfigError, ConfigResult};

/// Identidade do dispositivo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSection {
    pub id: String,
    pub firmware: String,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            id: "SONO_001".to_string(),
            firmware: "1.0.0".to_string(),
        }
    }
}

/// Cadência de amostragem e de heartbeat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSection {
    /// Ticks por segundo
    pub rate_hz: u32,
    pub heartbeat_interval_ms: u64,
    /// Debounce do botão manual
    pub button_debounce_ms: u64,
    /// Variação de ângulo que gera um novo `position_change`
    pub position_change_threshold_deg: f32,
}

impl Default for SamplingSection {
    fn default() -> Self {
        Self {
            rate_hz: 10,
            heartbeat_interval_ms: 60_000,
            button_debounce_ms: 500,
            position_change_threshold_deg: 30.0,
        }
    }
}

impl SamplingSection {
    /// Intervalo entre ticks (ms)
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / u64::from(self.rate_hz.max(1))
    }
}

/// Espelho local dos eventos `sensor_data`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("sono-data.jsonl"),
        }
    }
}

/// Configuração completa do dispositivo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub device: DeviceSection,
    pub sampling: SamplingSection,
    pub position: PositionConfig,
    pub sound: SoundConfig,
    pub restlessness: RestlessnessConfig,
    pub actuator: ActuatorConfig,
    pub storage: StorageSection,
}

impl DeviceConfig {
    /// Lê configuração de uma string TOML e valida
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Lê configuração de um arquivo
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Serializa para TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Valida todas as seções
    pub fn validate(&self) -> ConfigResult<()> {
        if self.device.id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "device.id",
                reason: "must not be empty".into(),
            });
        }
        if !(1..=1000).contains(&self.sampling.rate_hz) {
            return Err(ConfigError::Invalid {
                field: "sampling.rate_hz",
                reason: format!("{} Hz is outside 1-1000 Hz", self.sampling.rate_hz),
            });
        }
        if self.sampling.heartbeat_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sampling.heartbeat_interval_ms",
                reason: "must be > 0".into(),
            });
        }
        let threshold = self.sampling.position_change_threshold_deg;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "sampling.position_change_threshold_deg",
                reason: format!("{threshold} is not a non-negative angle"),
            });
        }

        self.position.validate().map_err(|e| invalid("position", e))?;
        self.sound.validate().map_err(|e| invalid("sound", e))?;
        self.restlessness.validate().map_err(|e| invalid("restlessness", e))?;
        self.actuator.validate().map_err(|e| invalid("actuator", e))?;
        Ok(())
    }
}

fn invalid(field: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: err.to_string(),
    }
}

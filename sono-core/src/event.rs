//! Eventos de saída para o transporte
//!
//! Cada evento leva a identidade do dispositivo, a identidade da sessão
//! (enquanto rastreando) e um timestamp em ms. A serialização resultante é:
//!
//! ```text
//! {"deviceId":"SONO_001","userId":"u1","sessionId":"s1","timestamp":1200,
//!  "type":"pillow_adjustment","data":{"angle":45,...}}
//! ```

use serde::Serialize;

use crate::types::{Posture, PowerMode, RawSample, SoundClass, Timestamp};

/// Identidade da sessão ativa
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTag {
    pub user_id: String,
    pub session_id: String,
}

/// Vetor de três eixos
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Leitura ambiental; campos com leitura falha são omitidos
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f32>,
    pub light: i32,
    pub audio_level: i32,
}

/// Estado reportado no heartbeat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatStatus {
    pub tracking: bool,
    pub firmware: String,
    pub tick_count: u64,
    pub uptime_ms: u64,
    pub pillow_angle: i32,
    pub power_mode: PowerMode,
}

/// Tipo de evento (para filtros e logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SensorData,
    PositionChange,
    SnoringDetection,
    PillowAdjustment,
    Heartbeat,
    CommandResponse,
    Pong,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SensorData => "sensor_data",
            EventKind::PositionChange => "position_change",
            EventKind::SnoringDetection => "snoring_detection",
            EventKind::PillowAdjustment => "pillow_adjustment",
            EventKind::Heartbeat => "heartbeat",
            EventKind::CommandResponse => "command_response",
            EventKind::Pong => "pong",
        }
    }
}

/// Conteúdo do evento
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EventPayload {
    SensorData {
        acceleration: Axes,
        gyroscope: Axes,
        environment: EnvironmentReading,
    },
    PositionChange {
        position: Posture,
        angle: f32,
        confidence: f32,
    },
    SnoringDetection {
        intensity: i32,
        classification: SoundClass,
        streak: u32,
    },
    PillowAdjustment {
        angle: i32,
        previous_angle: i32,
        reason: String,
        movement_count: u32,
    },
    Heartbeat(HeartbeatStatus),
    CommandResponse {
        command: String,
        status: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    Pong {
        tick_count: u64,
    },
}

impl EventPayload {
    /// Monta `sensor_data` a partir de uma amostra
    pub fn sensor_data(sample: &RawSample) -> Self {
        EventPayload::SensorData {
            acceleration: Axes {
                x: sample.accel_x,
                y: sample.accel_y,
                z: sample.accel_z,
            },
            gyroscope: Axes {
                x: sample.gyro_x,
                y: sample.gyro_y,
                z: sample.gyro_z,
            },
            environment: EnvironmentReading {
                temperature: sample.temperature(),
                humidity: sample.humidity(),
                light: sample.light_level,
                audio_level: sample.audio_level,
            },
        }
    }

    /// Resposta de sucesso a um comando
    pub fn success(command: &str, session_id: Option<String>) -> Self {
        EventPayload::CommandResponse {
            command: command.to_string(),
            status: "success".to_string(),
            session_id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::SensorData { .. } => EventKind::SensorData,
            EventPayload::PositionChange { .. } => EventKind::PositionChange,
            EventPayload::SnoringDetection { .. } => EventKind::SnoringDetection,
            EventPayload::PillowAdjustment { .. } => EventKind::PillowAdjustment,
            EventPayload::Heartbeat(_) => EventKind::Heartbeat,
            EventPayload::CommandResponse { .. } => EventKind::CommandResponse,
            EventPayload::Pong { .. } => EventKind::Pong,
        }
    }
}

/// Evento completo, pronto para o transporte
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub device_id: String,
    #[serde(flatten)]
    pub session: Option<SessionTag>,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl OutboundEvent {
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

//! Comandos de entrada vindos do transporte
//!
//! O transporte entrega registros `{command, parameters}` já decodificados.
//! [`Command::try_from`] separa os comandos reconhecidos dos malformados; os
//! malformados são descartados pelo controlador sem alterar estado.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registro de comando como chega do transporte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundCommand {
    pub command: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl InboundCommand {
    /// Comando sem parâmetros
    pub fn bare(command: &str) -> Self {
        Self {
            command: command.to_string(),
            parameters: HashMap::new(),
        }
    }

    /// Adiciona um parâmetro
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }
}

/// Comando reconhecido
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartSleepTracking { user_id: String, session_id: String },
    StopSleepTracking,
    Ping,
    /// Reservado; sem efeito
    CalibrateSensors,
    /// Reservado; sem efeito
    UpdateConfig,
}

impl Command {
    pub const START_SLEEP_TRACKING: &'static str = "start_sleep_tracking";
    pub const STOP_SLEEP_TRACKING: &'static str = "stop_sleep_tracking";
    pub const PING: &'static str = "ping";
    pub const CALIBRATE_SENSORS: &'static str = "calibrate_sensors";
    pub const UPDATE_CONFIG: &'static str = "update_config";

    /// Nome do comando no protocolo
    pub fn name(&self) -> &'static str {
        match self {
            Command::StartSleepTracking { .. } => Self::START_SLEEP_TRACKING,
            Command::StopSleepTracking => Self::STOP_SLEEP_TRACKING,
            Command::Ping => Self::PING,
            Command::CalibrateSensors => Self::CALIBRATE_SENSORS,
            Command::UpdateConfig => Self::UPDATE_CONFIG,
        }
    }
}

/// Comando malformado ou desconhecido
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Command {command} missing parameter {parameter}")]
    MissingParameter {
        command: &'static str,
        parameter: &'static str,
    },
}

fn required(
    params: &HashMap<String, String>,
    command: &'static str,
    parameter: &'static str,
) -> Result<String, CommandError> {
    params
        .get(parameter)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or(CommandError::MissingParameter { command, parameter })
}

impl TryFrom<InboundCommand> for Command {
    type Error = CommandError;

    fn try_from(inbound: InboundCommand) -> Result<Self, Self::Error> {
        let params = &inbound.parameters;
        match inbound.command.as_str() {
            Self::START_SLEEP_TRACKING => Ok(Command::StartSleepTracking {
                user_id: required(params, Self::START_SLEEP_TRACKING, "userId")?,
                session_id: required(params, Self::START_SLEEP_TRACKING, "sessionId")?,
            }),
            Self::STOP_SLEEP_TRACKING => Ok(Command::StopSleepTracking),
            Self::PING => Ok(Command::Ping),
            Self::CALIBRATE_SENSORS => Ok(Command::CalibrateSensors),
            Self::UPDATE_CONFIG => Ok(Command::UpdateConfig),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        let inbound = InboundCommand::bare("start_sleep_tracking")
            .with_param("userId", "u1")
            .with_param("sessionId", "s1");

        let cmd = Command::try_from(inbound).unwrap();
        assert_eq!(
            cmd,
            Command::StartSleepTracking {
                user_id: "u1".into(),
                session_id: "s1".into()
            }
        );
        assert_eq!(cmd.name(), "start_sleep_tracking");
    }

    #[test]
    fn test_parse_start_missing_session() {
        let inbound = InboundCommand::bare("start_sleep_tracking").with_param("userId", "u1");
        let err = Command::try_from(inbound).unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingParameter {
                command: "start_sleep_tracking",
                parameter: "sessionId"
            }
        );
    }

    #[test]
    fn test_parse_start_blank_user() {
        let inbound = InboundCommand::bare("start_sleep_tracking")
            .with_param("userId", "  ")
            .with_param("sessionId", "s1");
        assert!(Command::try_from(inbound).is_err());
    }

    #[test]
    fn test_parse_placeholders_and_ping() {
        for (name, expected) in [
            ("stop_sleep_tracking", Command::StopSleepTracking),
            ("ping", Command::Ping),
            ("calibrate_sensors", Command::CalibrateSensors),
            ("update_config", Command::UpdateConfig),
        ] {
            assert_eq!(Command::try_from(InboundCommand::bare(name)).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::try_from(InboundCommand::bare("self_destruct")).unwrap_err();
        assert!(err.to_string().contains("self_destruct"));
    }

    #[test]
    fn test_inbound_deserialize_without_parameters() {
        let inbound: InboundCommand = serde_json::from_str(r#"{"command":"ping"}"#).unwrap();
        assert!(inbound.parameters.is_empty());
    }
}

//! sonod — daemon de referência do dispositivo de sono
//!
//! Liga o `SessionController` a colaboradores simulados: sensores sintéticos,
//! um servo que só registra no log, eventos JSON-lines na saída padrão e
//! comandos JSON-lines na entrada padrão. Logs vão para stderr.
//!
//! ## Variáveis de ambiente
//! - `SONO_CONFIG`: arquivo TOML de configuração
//! - `SONO_DEVICE_ID`: identificador do dispositivo
//! - `SONO_RATE_HZ`: taxa de amostragem
//! - `SONO_STORAGE_PATH`: espelho local de `sensor_data` (habilita o armazenamento)
//! - `RUST_LOG`: filtro de logs (padrão `sonod=info,sono_orchestration=info`)

mod servo;
mod source;
mod storage;
mod transport;

use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sono_core::clock::{Clock, MonotonicClock};
use sono_orchestration::{DeviceConfig, SessionController};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use servo::LoggingServo;
use source::SyntheticSource;
use storage::JsonlStore;

#[derive(Parser, Debug)]
#[command(name = "sonod")]
#[command(author = "Sono Contributors")]
#[command(version)]
#[command(about = "Sleep-monitoring device daemon with simulated sensors", long_about = None)]
struct Args {
    /// Device configuration file (TOML)
    #[arg(short, long, env = "SONO_CONFIG")]
    config: Option<PathBuf>,

    /// Device identifier reported in every event
    #[arg(long, env = "SONO_DEVICE_ID")]
    device_id: Option<String>,

    /// Sampling rate (Hz)
    #[arg(long, env = "SONO_RATE_HZ")]
    rate_hz: Option<u32>,

    /// Mirror sensor data to this JSON-lines file
    #[arg(long, env = "SONO_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    /// Disable the adaptive pillow
    #[arg(long, default_value_t = false)]
    no_adaptive: bool,

    /// Stop after this many seconds (runs until killed when omitted)
    #[arg(long)]
    run_for_secs: Option<u64>,

    /// Sleep between loop iterations (ms)
    #[arg(long, default_value_t = 10)]
    idle_ms: u64,

    /// Print the effective configuration as TOML and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sonod=info,sono_orchestration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("sonod failed: {e:#}");
        return Err(e);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    if args.print_config {
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let clock = MonotonicClock::new();
    let source = SyntheticSource::new(clock.clone());
    let mut controller = SessionController::new(config.clone(), source, LoggingServo::new(), clock)
        .context("failed to start session controller")?;

    if config.storage.enabled {
        let store = JsonlStore::open(&config.storage.path)
            .with_context(|| format!("failed to open {}", config.storage.path.display()))?;
        info!(path = %store.path().display(), "Mirroring sensor data");
        controller = controller.with_store(store);
    }

    transport::attach_event_writer(controller.events(), std::io::stdout())
        .context("failed to attach event writer")?;
    transport::spawn_command_reader(BufReader::new(std::io::stdin()), controller.command_sender())
        .context("failed to spawn command reader")?;

    info!(device = %config.device.id, "sonod running");

    let deadline_ms = args.run_for_secs.map(|secs| secs * 1000);
    loop {
        controller.poll().context("session loop failed")?;

        if deadline_ms.is_some_and(|deadline| controller.clock().now_ms() >= deadline) {
            break;
        }
        controller.clock().sleep_ms(args.idle_ms);
    }

    info!(
        ticks = controller.tick_count(),
        reads = controller.source().reads(),
        servo_writes = controller.actuator().driver().writes(),
        pillow_angle = ?controller.actuator().driver().angle(),
        "sonod stopped"
    );
    Ok(())
}

/// Arquivo de configuração + sobrescritas da linha de comando
fn load_config(args: &Args) -> Result<DeviceConfig> {
    let mut config = match &args.config {
        Some(path) => DeviceConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => DeviceConfig::default(),
    };

    if let Some(id) = &args.device_id {
        config.device.id = id.clone();
    }
    if let Some(rate_hz) = args.rate_hz {
        config.sampling.rate_hz = rate_hz;
    }
    if let Some(path) = &args.storage_path {
        config.storage.enabled = true;
        config.storage.path = path.clone();
    }
    if args.no_adaptive {
        config.actuator.enabled = false;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_defaults() {
        let args = Args::parse_from([
            "sonod",
            "--device-id",
            "SONO_900",
            "--rate-hz",
            "5",
            "--storage-path",
            "/tmp/sono.jsonl",
            "--no-adaptive",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.device.id, "SONO_900");
        assert_eq!(config.sampling.tick_interval_ms(), 200);
        assert!(config.storage.enabled);
        assert!(!config.actuator.enabled);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = Args::parse_from(["sonod", "--rate-hz", "0"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_config_file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sono.toml");
        std::fs::write(&path, "[device]\nid = \"FROM_FILE\"\n[sampling]\nrate_hz = 20\n").unwrap();

        let args = Args::parse_from([
            "sonod",
            "--config",
            path.to_str().unwrap(),
            "--device-id",
            "FROM_ARGS",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.device.id, "FROM_ARGS");
        assert_eq!(config.sampling.rate_hz, 20);
    }
}

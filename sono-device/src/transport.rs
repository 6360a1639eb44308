//! Transporte JSON-lines: eventos para um `Write`, comandos de um `BufRead`

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use sono_core::command::InboundCommand;
use sono_orchestration::{CommandSender, EventBus, EventFilter, OrchestrationResult};
use tracing::{info, warn};

/// Inscreve no barramento um escritor que recebe um evento JSON por linha
pub fn attach_event_writer<W>(bus: &EventBus, writer: W) -> OrchestrationResult<()>
where
    W: Write + Send + 'static,
{
    let writer = Arc::new(Mutex::new(writer));
    bus.subscribe(EventFilter::All, move |event| {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, kind = event.kind().as_str(), "Failed to encode event");
                return;
            }
        };
        let Ok(mut out) = writer.lock() else {
            warn!("Event writer lock poisoned");
            return;
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to write event");
        }
    })
}

/// Decodifica uma linha de comando; linhas malformadas são descartadas
pub fn decode_command(line: &str) -> Option<InboundCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(command) => Some(command),
        Err(e) => {
            warn!(error = %e, "Discarding malformed command line");
            None
        }
    }
}

/// Thread leitora de comandos
///
/// Termina no fim da entrada ou quando a fila do controlador fecha.
pub fn spawn_command_reader<R>(reader: R, sender: CommandSender) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("sono-commands".into())
        .spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "Command input failed");
                        break;
                    }
                };
                if let Some(command) = decode_command(&line)
                    && sender.send(command).is_err()
                {
                    break;
                }
            }
            info!("Command input closed");
        })
}

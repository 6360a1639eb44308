//! Controlador de sessão: comandos, ticks de amostragem e heartbeat

use crossbeam_channel::{Receiver, Sender, unbounded};
use sono_acoustic::SoundClassifier;
use sono_actuator::{ActuatorController, AdjustReason, AdjustmentOutcome, PillowAdjustment};
use sono_core::clock::Clock;
use sono_core::command::{Command, InboundCommand};
use sono_core::event::{EventPayload, HeartbeatStatus, OutboundEvent, SessionTag};
use sono_core::traits::{RecordStore, SampleSource, ServoDriver};
use sono_core::types::{Cooldown, PowerMode, RawSample, Timestamp};
use sono_motion::{PositionClassifier, RestlessnessTracker};
use tracing::{debug, info, warn};

use crate::config::DeviceConfig;
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::events::EventBus;
use crate::scheduler::IntervalGate;
use crate::session::{Session, TrackingState};

/// Lado produtor da fila de comandos
///
/// Pode ser clonado e enviado para outras threads (leitor do transporte).
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<InboundCommand>,
}

impl CommandSender {
    /// Enfileira um comando para o próximo `poll()`
    pub fn send(&self, command: InboundCommand) -> OrchestrationResult<()> {
        self.tx
            .send(command)
            .map_err(|_| OrchestrationError::ChannelClosed)
    }
}

/// Resumo de uma chamada a `poll()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    /// Comandos drenados da fila
    pub commands: usize,
    /// Heartbeat emitido
    pub heartbeat: bool,
    /// Tick de amostragem executado
    pub ticked: bool,
}

/// Orquestrador do dispositivo
///
/// Único escritor de todo o estado mutável. Outras threads só falam com ele
/// pela fila de comandos.
pub struct SessionController<S, D, C>
where
    S: SampleSource,
    D: ServoDriver,
    C: Clock,
{
    config: DeviceConfig,
    clock: C,
    source: S,
    actuator: ActuatorController<D>,
    position: PositionClassifier,
    sound: SoundClassifier,
    restlessness: RestlessnessTracker,
    tracking: TrackingState,
    power_mode: PowerMode,
    tick_gate: IntervalGate,
    heartbeat_gate: IntervalGate,
    button: Cooldown,
    commands_tx: Sender<InboundCommand>,
    commands_rx: Receiver<InboundCommand>,
    bus: EventBus,
    store: Option<Box<dyn RecordStore>>,
    started_at: Timestamp,
    tick_count: u64,
}

impl<S, D, C> SessionController<S, D, C>
where
    S: SampleSource,
    D: ServoDriver,
    C: Clock,
{
    /// Monta o controlador
    ///
    /// Falha se a configuração for inválida ou se o sensor ou o servo não
    /// estiverem presentes.
    pub fn new(config: DeviceConfig, source: S, driver: D, clock: C) -> OrchestrationResult<Self> {
        config.validate()?;

        if !source.is_ready() {
            return Err(OrchestrationError::HardwareUnavailable(format!(
                "sample source {} not ready",
                source.name()
            )));
        }
        if !driver.is_ready() {
            return Err(OrchestrationError::HardwareUnavailable(format!(
                "servo driver {} not ready",
                driver.name()
            )));
        }

        let now = clock.now_ms();
        let actuator = ActuatorController::new(driver, config.actuator.clone())?;
        let position = PositionClassifier::with_config(config.position.clone())?;
        let sound = SoundClassifier::with_config(config.sound.clone())?;
        let restlessness = RestlessnessTracker::new(config.restlessness.clone(), now)?;
        let (commands_tx, commands_rx) = unbounded();

        info!(
            device = %config.device.id,
            firmware = %config.device.firmware,
            rate_hz = config.sampling.rate_hz,
            adaptive = config.actuator.enabled,
            "Session controller ready"
        );

        Ok(Self {
            tick_gate: IntervalGate::new(config.sampling.tick_interval_ms()),
            heartbeat_gate: IntervalGate::new(config.sampling.heartbeat_interval_ms),
            button: Cooldown::new(config.sampling.button_debounce_ms),
            config,
            clock,
            source,
            actuator,
            position,
            sound,
            restlessness,
            tracking: TrackingState::Idle,
            power_mode: PowerMode::Normal,
            commands_tx,
            commands_rx,
            bus: EventBus::new(),
            store: None,
            started_at: now,
            tick_count: 0,
        })
    }

    /// Anexa o espelho local dos eventos `sensor_data`
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Produtor da fila de comandos
    pub fn command_sender(&self) -> CommandSender {
        CommandSender {
            tx: self.commands_tx.clone(),
        }
    }

    /// Uma volta do laço cooperativo
    ///
    /// Drena os comandos, emite o heartbeat se vencido e executa no máximo um
    /// tick de amostragem.
    pub fn poll(&mut self) -> OrchestrationResult<PollReport> {
        let mut report = PollReport::default();

        while let Ok(command) = self.commands_rx.try_recv() {
            self.handle_command(command)?;
            report.commands += 1;
        }

        let now = self.clock.now_ms();
        if self.heartbeat_gate.poll(now) {
            self.emit_heartbeat(now)?;
            report.heartbeat = true;
        }

        if self.tracking.is_tracking()
            && self.power_mode == PowerMode::Normal
            && self.tick_gate.poll(now)
        {
            self.tick(now)?;
            report.ticked = true;
        }

        Ok(report)
    }

    /// Aplica um comando recebido
    ///
    /// Comandos desconhecidos ou malformados são descartados sem evento.
    pub fn handle_command(&mut self, inbound: InboundCommand) -> OrchestrationResult<()> {
        let command = match Command::try_from(inbound) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Discarding command");
                return Ok(());
            }
        };

        let now = self.clock.now_ms();
        match command {
            Command::StartSleepTracking { user_id, session_id } => {
                let tag = SessionTag {
                    user_id,
                    session_id: session_id.clone(),
                };
                if let Some(previous) = self.tracking.start(tag, now) {
                    info!(previous = %previous.tag.session_id, "Replacing active session");
                }
                self.tick_gate.reset();
                info!(session = %session_id, "Sleep tracking started");
                self.emit(
                    now,
                    EventPayload::success(Command::START_SLEEP_TRACKING, Some(session_id)),
                )
            }
            Command::StopSleepTracking => {
                match self.tracking.stop() {
                    Some(session) => info!(
                        session = %session.tag.session_id,
                        samples = session.samples,
                        missed_ticks = self.tick_gate.missed(),
                        "Sleep tracking stopped"
                    ),
                    None => info!("Stop requested while idle"),
                }
                self.emit(now, EventPayload::success(Command::STOP_SLEEP_TRACKING, None))
            }
            Command::Ping => {
                debug!(ticks = self.tick_count, "Ping");
                self.emit(now, EventPayload::Pong {
                    tick_count: self.tick_count,
                })
            }
            Command::CalibrateSensors | Command::UpdateConfig => {
                info!(command = command.name(), "Command accepted; nothing to do");
                Ok(())
            }
        }
    }

    /// Pedido do botão físico de ajuste
    ///
    /// Devolve `None` quando o toque cai dentro do debounce. O cooldown do
    /// atuador continua valendo.
    pub fn manual_adjust(&mut self) -> OrchestrationResult<Option<AdjustmentOutcome>> {
        let now = self.clock.now_ms();
        if !self.button.is_elapsed(now) {
            debug!("Button press ignored (debounce)");
            return Ok(None);
        }
        self.button.trigger(now);

        let movements = self.restlessness.movement_count();
        let outcome = self
            .actuator
            .adjust(AdjustReason::ManualButton, movements, &self.clock)?;
        if let AdjustmentOutcome::Adjusted(adjustment) = &outcome {
            self.complete_adjustment(adjustment)?;
        }
        Ok(Some(outcome))
    }

    /// Troca o modo de energia; `Low` pausa os ticks de amostragem
    pub fn set_power_mode(&mut self, mode: PowerMode) {
        if self.power_mode != mode {
            info!(?mode, "Power mode changed");
            self.power_mode = mode;
        }
    }

    /// Um tick de amostragem
    ///
    /// Todos os eventos do tick usam `now`, lido antes da rampa; só o
    /// `pillow_adjustment` leva o instante de conclusão do ajuste.
    fn tick(&mut self, now: Timestamp) -> OrchestrationResult<()> {
        self.tick_count += 1;

        let sample = match self.source.read() {
            Ok(sample) => sample,
            Err(e) => {
                warn!(error = %e, "Sensor read failed; skipping tick");
                return Ok(());
            }
        };
        if let Some(session) = self.tracking.session_mut() {
            session.samples += 1;
        }

        let magnitude = sample.accel_magnitude();
        let decision = self
            .restlessness
            .observe(magnitude, now, self.actuator.cooldown());
        if decision.should_adjust {
            self.adjust_for_restlessness()?;
        }

        let position = self.position.classify(&sample);
        let threshold = self.config.sampling.position_change_threshold_deg;
        let report_position = self
            .tracking
            .session_mut()
            .is_some_and(|session| session.should_report(&position, threshold));
        if report_position {
            debug!(
                posture = position.posture.as_str(),
                angle = position.angle_degrees,
                "Position changed"
            );
            self.emit(now, EventPayload::PositionChange {
                position: position.posture,
                angle: position.angle_degrees,
                confidence: position.confidence,
            })?;
        }

        let sound = self.sound.classify(sample.audio_level, now);
        if sound.is_snoring_sample {
            debug!(level = sound.level, streak = sound.snoring_streak, "Snoring sample");
            self.emit(now, EventPayload::SnoringDetection {
                intensity: sound.level,
                classification: sound.classification,
                streak: sound.snoring_streak,
            })?;
        }

        self.emit_sensor_data(now, &sample)
    }

    fn adjust_for_restlessness(&mut self) -> OrchestrationResult<()> {
        let movements = self.restlessness.movement_count();
        match self
            .actuator
            .adjust(AdjustReason::Restlessness, movements, &self.clock)
        {
            Ok(AdjustmentOutcome::Adjusted(adjustment)) => self.complete_adjustment(&adjustment),
            Ok(AdjustmentOutcome::Skipped(reason)) => {
                debug!(?reason, "Restless but adjustment skipped");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Pillow adjustment failed");
                Ok(())
            }
        }
    }

    fn complete_adjustment(&mut self, adjustment: &PillowAdjustment) -> OrchestrationResult<()> {
        self.restlessness.reset_movements();
        info!(
            angle = adjustment.angle,
            reason = adjustment.reason.as_str(),
            movements = adjustment.movement_count_at_trigger,
            "Pillow adjusted"
        );
        self.emit(adjustment.timestamp, EventPayload::PillowAdjustment {
            angle: adjustment.angle,
            previous_angle: adjustment.previous_angle,
            reason: adjustment.reason.as_str().to_string(),
            movement_count: adjustment.movement_count_at_trigger,
        })
    }

    fn emit_sensor_data(&mut self, now: Timestamp, sample: &RawSample) -> OrchestrationResult<()> {
        let event = self.outbound(now, EventPayload::sensor_data(sample));

        if let Some(store) = self.store.as_mut() {
            match serde_json::to_string(&event) {
                Ok(line) => {
                    if let Err(e) = store.append(&line) {
                        warn!(error = %e, "Local storage write failed");
                    }
                }
                Err(e) => warn!(error = %e, "Failed to encode sensor record"),
            }
        }

        self.bus.emit(event)
    }

    fn emit_heartbeat(&self, now: Timestamp) -> OrchestrationResult<()> {
        self.emit(now, EventPayload::Heartbeat(self.heartbeat_status(now)))
    }

    /// Status reportado no heartbeat
    pub fn heartbeat_status(&self, now: Timestamp) -> HeartbeatStatus {
        HeartbeatStatus {
            tracking: self.tracking.is_tracking(),
            firmware: self.config.device.firmware.clone(),
            tick_count: self.tick_count,
            uptime_ms: now.saturating_sub(self.started_at),
            pillow_angle: self.actuator.current_angle(),
            power_mode: self.power_mode,
        }
    }

    fn outbound(&self, timestamp: Timestamp, payload: EventPayload) -> OutboundEvent {
        OutboundEvent {
            device_id: self.config.device.id.clone(),
            session: self.tracking.tag().cloned(),
            timestamp,
            payload,
        }
    }

    fn emit(&self, timestamp: Timestamp, payload: EventPayload) -> OrchestrationResult<()> {
        self.bus.emit(self.outbound(timestamp, payload))
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_tracking()
    }

    pub fn session(&self) -> Option<&Session> {
        self.tracking.session()
    }

    pub fn power_mode(&self) -> PowerMode {
        self.power_mode
    }

    /// Ticks de amostragem executados desde o boot
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Intervalos de amostragem perdidos por polls atrasados
    pub fn missed_ticks(&self) -> u64 {
        self.tick_gate.missed()
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn actuator(&self) -> &ActuatorController<D> {
        &self.actuator
    }

    pub fn restlessness(&self) -> &RestlessnessTracker {
        &self.restlessness
    }

    pub fn sound(&self) -> &SoundClassifier {
        &self.sound
    }
}

impl<S, D, C> std::fmt::Debug for SessionController<S, D, C>
where
    S: SampleSource,
    D: ServoDriver,
    C: Clock,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("device", &self.config.device.id)
            .field("tracking", &self.tracking)
            .field("power_mode", &self.power_mode)
            .field("tick_count", &self.tick_count)
            .field("pillow_angle", &self.actuator.current_angle())
            .finish()
    }
}

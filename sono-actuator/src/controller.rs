//! Controlador da almofada: cooldown, alternância de alvo e rampa

use sono_core::clock::Clock;
use sono_core::traits::ServoDriver;
use sono_core::types::Cooldown;
use tracing::{debug, info, warn};

use crate::error::{ActuatorError, ActuatorResult};
use crate::types::{
    ActuatorConfig, ActuatorState, AdjustReason, AdjustmentOutcome, PillowAdjustment, SkipReason,
};

/// Dono único do ângulo da almofada
#[derive(Debug)]
pub struct ActuatorController<D: ServoDriver> {
    driver: D,
    config: ActuatorConfig,
    state: ActuatorState,
}

impl<D: ServoDriver> ActuatorController<D> {
    /// Cria o controlador e leva o servo ao ângulo mínimo
    ///
    /// Com o recurso desabilitado o servo não recebe nenhum comando.
    pub fn new(mut driver: D, config: ActuatorConfig) -> ActuatorResult<Self> {
        config.validate()?;

        if !driver.is_ready() {
            return Err(ActuatorError::NotInitialized);
        }

        if config.enabled {
            driver.set_angle(config.min_angle)?;
        }

        let state = ActuatorState {
            current_angle: config.min_angle,
            cooldown: Cooldown::new(config.cooldown_ms),
            adjustments: 0,
        };

        Ok(Self { driver, config, state })
    }

    /// Executa um ajuste, se permitido
    ///
    /// Alterna o alvo entre mínimo e máximo e percorre a rampa até ele,
    /// bloqueando `step_delay_ms` por passo. Um erro do driver aborta a rampa
    /// com o ângulo no último passo confirmado e o cooldown intacto.
    pub fn adjust<C: Clock + ?Sized>(
        &mut self,
        reason: AdjustReason,
        movement_count_at_trigger: u32,
        clock: &C,
    ) -> ActuatorResult<AdjustmentOutcome> {
        if !self.config.enabled {
            debug!(reason = reason.as_str(), "Adjustment skipped: actuator disabled");
            return Ok(AdjustmentOutcome::Skipped(SkipReason::Disabled));
        }

        let now = clock.now_ms();
        if !self.state.cooldown.is_elapsed(now) {
            let remaining_ms = self.state.cooldown.remaining_ms(now);
            debug!(reason = reason.as_str(), remaining_ms, "Adjustment skipped: cooldown active");
            return Ok(AdjustmentOutcome::Skipped(SkipReason::Cooldown { remaining_ms }));
        }

        let previous_angle = self.state.current_angle;
        let target = self.target_for(previous_angle);
        info!(
            reason = reason.as_str(),
            from = previous_angle,
            to = target,
            movements = movement_count_at_trigger,
            "Adjusting pillow"
        );

        let steps = self.ramp_to(target, clock).inspect_err(|e| {
            warn!(angle = self.state.current_angle, error = %e, "Ramp aborted");
        })?;

        let completed_at = clock.now_ms();
        self.state.cooldown.trigger(completed_at);
        self.state.adjustments += 1;

        Ok(AdjustmentOutcome::Adjusted(PillowAdjustment {
            angle: self.state.current_angle,
            previous_angle,
            reason,
            movement_count_at_trigger,
            timestamp: completed_at,
            steps,
        }))
    }

    /// Ângulo atual (graus)
    pub fn current_angle(&self) -> i32 {
        self.state.current_angle
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.state.cooldown
    }

    pub fn state(&self) -> ActuatorState {
        self.state
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn target_for(&self, current: i32) -> i32 {
        if current == self.config.min_angle {
            self.config.max_angle
        } else {
            self.config.min_angle
        }
    }

    /// Percorre a rampa; o último passo é cortado no alvo
    fn ramp_to<C: Clock + ?Sized>(&mut self, target: i32, clock: &C) -> ActuatorResult<u32> {
        let step = i32::try_from(self.config.step_degrees)
            .map_err(|_| ActuatorError::InvalidConfig("step_degrees out of range".into()))?;
        let mut steps = 0;

        while self.state.current_angle != target {
            let current = self.state.current_angle;
            let next = if target > current {
                (current + step).min(target)
            } else {
                (current - step).max(target)
            };

            self.driver.set_angle(next)?;
            self.state.current_angle = next;
            steps += 1;
            clock.sleep_ms(self.config.step_delay_ms);
        }

        Ok(steps)
    }
}

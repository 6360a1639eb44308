//! Testes do módulo sono-actuator

use super::*;
use sono_core::clock::{Clock, ManualClock};
use sono_core::error::DriverError;

fn controller_with(config: ActuatorConfig) -> (ActuatorController<RecordingServo>, RecordingServo) {
    let servo = RecordingServo::new();
    let handle = servo.clone();
    let controller = ActuatorController::new(servo, config).unwrap();
    (controller, handle)
}

// ═══════════════════════════════════════════════════════════════════════════════
// INICIALIZAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_new_moves_servo_to_min() {
    let (controller, servo) = controller_with(ActuatorConfig::default());
    assert_eq!(controller.current_angle(), 0);
    assert_eq!(servo.history(), vec![0]);
    assert!(controller.cooldown().last.is_none());
}

#[test]
fn test_new_disabled_does_not_touch_servo() {
    let (controller, servo) = controller_with(ActuatorConfig {
        enabled: false,
        ..Default::default()
    });
    assert!(!controller.is_enabled());
    assert!(servo.history().is_empty());
}

#[test]
fn test_new_rejects_detached_servo() {
    let result = ActuatorController::new(RecordingServo::detached(), ActuatorConfig::default());
    assert!(matches!(result, Err(ActuatorError::NotInitialized)));
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = ActuatorConfig {
        step_degrees: 0,
        ..Default::default()
    };
    assert!(ActuatorController::new(RecordingServo::new(), config).is_err());
}

#[test]
fn test_new_rejects_step_beyond_travel() {
    let servo = RecordingServo::new();
    let config = ActuatorConfig {
        step_degrees: u32::MAX,
        ..Default::default()
    };
    let result = ActuatorController::new(servo.clone(), config);
    assert!(matches!(result, Err(ActuatorError::InvalidConfig(_))));
    assert!(servo.history().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// RAMPA
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_first_adjustment_ramps_to_max() {
    let clock = ManualClock::new();
    let (mut controller, servo) = controller_with(ActuatorConfig::default());

    let outcome = controller
        .adjust(AdjustReason::Restlessness, 10, &clock)
        .unwrap();

    let AdjustmentOutcome::Adjusted(adjustment) = outcome else {
        panic!("expected adjustment, got {outcome:?}");
    };
    assert_eq!(adjustment.angle, 45);
    assert_eq!(adjustment.previous_angle, 0);
    assert_eq!(adjustment.movement_count_at_trigger, 10);
    assert_eq!(adjustment.reason, AdjustReason::Restlessness);
    assert_eq!(adjustment.steps, 23);

    // 22 passos de 2° e o último cortado em 45°
    let history = servo.history();
    assert_eq!(history.len(), 24);
    assert_eq!(&history[1..4], &[2, 4, 6]);
    assert_eq!(history.last(), Some(&45));
    assert!(history.iter().all(|a| (0..=45).contains(a)));
}

#[test]
fn test_ramp_blocks_for_step_delays() {
    let clock = ManualClock::starting_at(1_000);
    let (mut controller, _) = controller_with(ActuatorConfig::default());

    let outcome = controller
        .adjust(AdjustReason::ManualButton, 0, &clock)
        .unwrap();

    // 23 passos × 30ms
    assert_eq!(clock.now_ms(), 1_000 + 23 * 30);
    let AdjustmentOutcome::Adjusted(adjustment) = outcome else {
        panic!("expected adjustment");
    };
    assert_eq!(adjustment.timestamp, 1_690);
    assert_eq!(controller.cooldown().last, Some(1_690));
}

#[test]
fn test_ramp_steps_are_monotonic() {
    let clock = ManualClock::new();
    let (mut controller, servo) = controller_with(ActuatorConfig {
        step_degrees: 7,
        cooldown_ms: 0,
        ..Default::default()
    });

    controller.adjust(AdjustReason::ManualButton, 0, &clock).unwrap();
    clock.advance(1);
    controller.adjust(AdjustReason::ManualButton, 0, &clock).unwrap();

    assert_eq!(
        servo.history(),
        vec![0, 7, 14, 21, 28, 35, 42, 45, 38, 31, 24, 17, 10, 3, 0]
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// COOLDOWN E ALTERNÂNCIA
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_second_adjustment_within_cooldown_is_skipped() {
    let clock = ManualClock::new();
    let (mut controller, servo) = controller_with(ActuatorConfig::default());

    assert!(controller.adjust(AdjustReason::Restlessness, 10, &clock).unwrap().is_adjusted());
    let writes = servo.movement_count();

    let outcome = controller
        .adjust(AdjustReason::ManualButton, 0, &clock)
        .unwrap();
    assert!(matches!(
        outcome,
        AdjustmentOutcome::Skipped(SkipReason::Cooldown { .. })
    ));
    assert_eq!(controller.current_angle(), 45);
    assert_eq!(servo.movement_count(), writes);
}

#[test]
fn test_cooldown_boundary_is_strict() {
    let clock = ManualClock::new();
    let (mut controller, _) = controller_with(ActuatorConfig::default());

    controller.adjust(AdjustReason::Restlessness, 10, &clock).unwrap();

    clock.advance(600_000);
    let outcome = controller
        .adjust(AdjustReason::Restlessness, 10, &clock)
        .unwrap();
    assert_eq!(
        outcome,
        AdjustmentOutcome::Skipped(SkipReason::Cooldown { remaining_ms: 1 })
    );

    clock.advance(1);
    assert!(controller.adjust(AdjustReason::Restlessness, 10, &clock).unwrap().is_adjusted());
}

#[test]
fn test_adjustments_alternate_between_limits() {
    let clock = ManualClock::new();
    let (mut controller, _) = controller_with(ActuatorConfig::default());

    let mut angles = Vec::new();
    for _ in 0..4 {
        controller.adjust(AdjustReason::Restlessness, 10, &clock).unwrap();
        angles.push(controller.current_angle());
        clock.advance(600_001);
    }

    assert_eq!(angles, vec![45, 0, 45, 0]);
    assert_eq!(controller.state().adjustments, 4);
}

#[test]
fn test_disabled_actuator_skips() {
    let clock = ManualClock::new();
    let (mut controller, servo) = controller_with(ActuatorConfig {
        enabled: false,
        ..Default::default()
    });

    let outcome = controller
        .adjust(AdjustReason::Restlessness, 12, &clock)
        .unwrap();
    assert_eq!(outcome, AdjustmentOutcome::Skipped(SkipReason::Disabled));
    assert!(servo.history().is_empty());
    assert_eq!(clock.now_ms(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// FALHAS DO DRIVER
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_driver_fault_aborts_ramp() {
    let clock = ManualClock::new();
    let servo = RecordingServo::failing_after(5);
    let mut controller = ActuatorController::new(servo, ActuatorConfig::default()).unwrap();

    let result = controller.adjust(AdjustReason::Restlessness, 10, &clock);
    assert!(matches!(
        result,
        Err(ActuatorError::Driver(DriverError::Fault(_)))
    ));

    // Parado no último passo confirmado, cooldown não disparado
    assert_eq!(controller.current_angle(), 8);
    assert!(controller.cooldown().last.is_none());
    assert_eq!(controller.state().adjustments, 0);
}

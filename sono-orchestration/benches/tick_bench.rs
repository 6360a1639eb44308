//! Benchmarks do laço de sessão

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use sono_actuator::RecordingServo;
use sono_core::prelude::*;
use sono_core::testing::ScriptedSource;
use sono_orchestration::{DeviceConfig, SessionController};

fn tracking_controller(
    sample: RawSample,
) -> (SessionController<ScriptedSource, RecordingServo, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut controller = SessionController::new(
        DeviceConfig::default(),
        ScriptedSource::new([sample]),
        RecordingServo::new(),
        clock.clone(),
    )
    .expect("default config is valid");
    controller
        .handle_command(
            InboundCommand::bare("start_sleep_tracking")
                .with_param("userId", "bench")
                .with_param("sessionId", "bench"),
        )
        .expect("start accepted");
    (controller, clock)
}

fn bench_quiet_tick(c: &mut Criterion) {
    let (mut controller, clock) = tracking_controller(RawSample::at_rest(0));

    c.bench_function("poll_quiet_tick", |b| {
        b.iter(|| {
            clock.advance(100);
            black_box(controller.poll().expect("poll"))
        })
    });
}

fn bench_snoring_tick(c: &mut Criterion) {
    let (mut controller, clock) = tracking_controller(RawSample::at_rest(0).with_audio(900));

    c.bench_function("poll_snoring_tick", |b| {
        b.iter(|| {
            clock.advance(100);
            black_box(controller.poll().expect("poll"))
        })
    });
}

fn bench_command_drain(c: &mut Criterion) {
    c.bench_function("drain_100_pings", |b| {
        b.iter_batched(
            || {
                let (controller, _) = tracking_controller(RawSample::at_rest(0));
                let sender = controller.command_sender();
                for _ in 0..100 {
                    sender.send(InboundCommand::bare("ping")).expect("queue open");
                }
                controller
            },
            |mut controller| black_box(controller.poll().expect("poll")),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_quiet_tick, bench_snoring_tick, bench_command_drain);
criterion_main!(benches);

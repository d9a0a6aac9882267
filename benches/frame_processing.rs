//! Benchmarks for per-frame wheel processing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_color_wheel::{
    config::{Config, WheelParams},
    constants::{INDEX_TIP, NUM_HAND_LANDMARKS, THUMB_TIP},
    controller::InteractionController,
    gesture::Landmark,
    palette::Palette,
    wheel::ColorWheelState,
};
use std::time::Duration;

const WIDTH: i32 = 1280;
const HEIGHT: i32 = 720;

/// Fingertip circling the wheel center, one position per frame
#[allow(clippy::cast_precision_loss)]
fn circling_hand(frames: usize) -> Vec<Vec<Landmark>> {
    (0..frames)
        .map(|i| {
            let theta = (i as f64 * 3.0).to_radians();
            let x = (1030.0 + 150.0 * theta.cos()) / f64::from(WIDTH);
            let y = (360.0 + 150.0 * theta.sin()) / f64::from(HEIGHT);
            #[allow(clippy::cast_possible_truncation)]
            let tip = Landmark::new(x as f32, y as f32, 0.0);
            let mut points = vec![tip; NUM_HAND_LANDMARKS];
            points[INDEX_TIP] = tip;
            points[THUMB_TIP] = Landmark::new(tip.x - 0.2, tip.y, 0.0);
            points
        })
        .collect()
}

fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");
    group.measurement_time(Duration::from_secs(5));

    let hands = circling_hand(120);

    group.bench_function("grabbing", |b| {
        let mut controller = InteractionController::from_config(&Config::default(), 8, Some(1));
        b.iter(|| {
            for hand in &hands {
                black_box(controller.process_frame(WIDTH, HEIGHT, Some(hand.clone())));
            }
        });
    });

    group.bench_function("no_hand", |b| {
        let mut controller = InteractionController::from_config(&Config::default(), 8, Some(1));
        b.iter(|| {
            for _ in 0..hands.len() {
                black_box(controller.process_frame(WIDTH, HEIGHT, None));
            }
        });
    });

    group.finish();
}

fn bench_auto_spin(c: &mut Criterion) {
    c.bench_function("auto_spin_to_rest", |b| {
        b.iter(|| {
            let mut state = ColorWheelState::with_seed(WheelParams::default(), 8, 5);
            state.start_auto_spin_with_velocity(black_box(30.0));
            while state.is_auto_spinning() {
                state.update_auto_spin();
            }
            black_box(state.selected_color_index())
        });
    });
}

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");
    for n in [3usize, 8, 20] {
        group.bench_with_input(BenchmarkId::new("generate", n), &n, |b, &n| {
            b.iter(|| black_box(Palette::generate(n)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_process_frame, bench_auto_spin, bench_palette);
criterion_main!(benches);

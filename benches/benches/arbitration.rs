// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use touchstick_controls::{
    Button, Control, DynamicJoystick, Joystick, MobileControls, Touch, TouchId, TouchList,
};

/// A joystick, a dynamic joystick on the left half, and a grid of buttons on
/// the right half of an 800x600 surface.
fn surface(buttons: usize) -> MobileControls {
    let mut controls = MobileControls::new();

    let mut joystick = Joystick::new();
    joystick.set_position(Point::new(120.0, 480.0));
    controls.add(joystick).unwrap();

    for index in 0..buttons {
        let mut button = Button::new();
        let column = (index % 4) as f64;
        let row = (index / 4) as f64;
        button.set_position(Point::new(480.0 + column * 80.0, 60.0 + row * 80.0));
        controls.add(button).unwrap();
    }

    controls
        .add(DynamicJoystick::new(Rect::new(0.0, 0.0, 400.0, 600.0)).unwrap())
        .unwrap();
    controls
}

/// `fingers` touches spread over the surface, nudged by `frame`.
fn touches(fingers: usize, frame: usize) -> TouchList {
    (0..fingers)
        .map(|finger| {
            let x = (finger * 97 + frame * 3) % 800;
            let y = (finger * 61 + frame * 5) % 600;
            Touch::new(TouchId(finger as i64), Point::new(x as f64, y as f64))
        })
        .collect()
}

fn bench_update_touches(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbitration/update_touches");

    for (buttons, fingers) in [(4usize, 1usize), (8, 4), (16, 10)] {
        group.throughput(Throughput::Elements(fingers as u64));
        let stream: Vec<TouchList> = (0..64).map(|frame| touches(fingers, frame)).collect();

        group.bench_with_input(
            BenchmarkId::new(format!("{buttons}_buttons"), fingers),
            &stream,
            |b, stream| {
                let mut controls = surface(buttons);
                let mut now = 0_u64;
                let mut frames = stream.iter().cycle();
                b.iter_batched(
                    || frames.next().cloned().unwrap_or_default(),
                    |mut touches| {
                        now += 16;
                        controls.update_touches(&mut touches, now);
                        black_box(touches);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_release_animation(c: &mut Criterion) {
    c.bench_function("arbitration/animate_release", |b| {
        b.iter_batched(
            || {
                let mut controls = surface(8);
                controls.update_touches(&mut touches(10, 0), 0);
                controls.update_touches(&mut TouchList::new(), 16);
                controls
            },
            |mut controls| {
                let mut now = 16;
                while controls.animate(now) {
                    now += 16;
                }
                black_box(now);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_update_touches, bench_release_animation);
criterion_main!(benches);

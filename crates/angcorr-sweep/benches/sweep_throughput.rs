use angcorr_core::{Cascade, CascadeStep, EmCharacter, Parity, State, Transition};
use angcorr_sweep::{sweep, ParameterBinding, ParameterSlot, SweepConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn toy(theta: f64, phi: f64, cascade: &Cascade) -> f64 {
    let delta = cascade.steps()[cascade.len() - 1].transition.delta();
    let a = 0.4 * (1.0 - delta * delta) / (1.0 + delta * delta);
    let b = 0.8 * delta / (1.0 + delta * delta);
    let c = theta.cos();
    1.0 + a * 0.5 * (3.0 * c * c - 1.0) + b * theta.sin().powi(2) * (2.0 * phi).cos()
}

fn make_binding() -> ParameterBinding {
    let step = |two_j| {
        CascadeStep::new(
            Transition::new(EmCharacter::Electric, 4, EmCharacter::Magnetic, 6, 0.0)
                .expect("transition"),
            State::new(two_j, Parity::Positive),
        )
    };
    ParameterBinding::new(
        State::new(3, Parity::Positive),
        vec![step(7), step(5)],
        vec![
            ParameterSlot::named("delta_1").expect("slot"),
            ParameterSlot::named("delta_2").expect("slot"),
        ],
    )
    .expect("binding")
}

fn bench_sweep(c: &mut Criterion) {
    let binding = make_binding();
    let sequential = SweepConfig::new(101, 100.0);
    let parallel = SweepConfig::new(101, 100.0).with_parallelism(4);
    c.bench_function("sweep_throughput", |b| {
        b.iter(|| {
            let _ = sweep(black_box(&binding), &toy, &sequential).expect("sweep");
        });
    });
    c.bench_function("sweep_throughput_parallel", |b| {
        b.iter(|| {
            let _ = sweep(black_box(&binding), &toy, &parallel).expect("sweep");
        });
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);

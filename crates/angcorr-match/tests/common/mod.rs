#![allow(dead_code)]

use angcorr_core::{Cascade, CascadeStep, EmCharacter, Parity, State, Transition};
use angcorr_sweep::{sweep, AsymmetryGrid, ParameterBinding, ParameterSlot, SweepConfig};

fn u(delta: f64) -> f64 {
    (1.0 - delta * delta) / (1.0 + delta * delta)
}

fn v(delta: f64) -> f64 {
    2.0 * delta / (1.0 + delta * delta)
}

/// `W = 1 + a P2(cos theta) + b sin^2(theta) cos(2 phi)`, normalised to 4 pi.
pub fn toy(theta: f64, phi: f64, cascade: &Cascade) -> f64 {
    let first = cascade.steps()[0].transition.delta();
    let last = cascade.steps()[cascade.len() - 1].transition.delta();
    let a = 0.4 * u(last);
    let b = 0.4 * v(last) * u(first);
    let c = theta.cos();
    1.0 + a * 0.5 * (3.0 * c * c - 1.0) + b * theta.sin().powi(2) * (2.0 * phi).cos()
}

fn step(two_j: u32) -> CascadeStep {
    CascadeStep::new(
        Transition::new(EmCharacter::Electric, 4, EmCharacter::Magnetic, 6, 0.0).unwrap(),
        State::new(two_j, Parity::Positive),
    )
}

pub fn single_binding() -> ParameterBinding {
    ParameterBinding::new(
        State::new(0, Parity::Positive),
        vec![step(4), step(0)],
        vec![ParameterSlot::Literal(0.0), ParameterSlot::named("delta_1").unwrap()],
    )
    .unwrap()
}

pub fn double_binding() -> ParameterBinding {
    ParameterBinding::new(
        State::new(3, Parity::Positive),
        vec![step(7), step(5)],
        vec![
            ParameterSlot::named("delta_1").unwrap(),
            ParameterSlot::named("delta_2").unwrap(),
        ],
    )
    .unwrap()
}

pub fn single_grid(resolution: usize, max_magnitude: f64) -> AsymmetryGrid {
    sweep(&single_binding(), &toy, &SweepConfig::new(resolution, max_magnitude)).unwrap()
}

pub fn double_grid(resolution: usize, max_magnitude: f64) -> AsymmetryGrid {
    sweep(&double_binding(), &toy, &SweepConfig::new(resolution, max_magnitude)).unwrap()
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use angcorr_core::{
    Cascade, CascadeStep, CorrelationOracle, EmCharacter, Parity, State, Transition,
};
use angcorr_sweep::{ParameterBinding, ParameterSlot};

fn u(delta: f64) -> f64 {
    (1.0 - delta * delta) / (1.0 + delta * delta)
}

fn v(delta: f64) -> f64 {
    2.0 * delta / (1.0 + delta * delta)
}

/// Analytic stand-in for the correlation evaluator:
/// `W = 1 + a P2(cos theta) + b sin^2(theta) cos(2 phi)`, positive and
/// normalised to 4 pi, with `a` and `b` driven by the first and last mixing
/// ratios.
pub struct ToyOracle;

impl CorrelationOracle for ToyOracle {
    fn evaluate(&self, theta: f64, phi: f64, cascade: &Cascade) -> f64 {
        let first = cascade.steps()[0].transition.delta();
        let last = cascade.steps()[cascade.len() - 1].transition.delta();
        let a = 0.4 * u(last);
        let b = 0.4 * v(last) * u(first);
        let c = theta.cos();
        1.0 + a * 0.5 * (3.0 * c * c - 1.0) + b * theta.sin().powi(2) * (2.0 * phi).cos()
    }
}

/// Counts oracle calls.
#[derive(Default)]
pub struct CountingOracle {
    pub calls: AtomicUsize,
}

impl CorrelationOracle for CountingOracle {
    fn evaluate(&self, theta: f64, phi: f64, cascade: &Cascade) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ToyOracle.evaluate(theta, phi, cascade)
    }
}

pub fn transition(delta: f64) -> Transition {
    Transition::new(EmCharacter::Electric, 4, EmCharacter::Magnetic, 6, delta).unwrap()
}

/// 0+ -> 2+ -> 0 with the first transition fixed at delta = 0.
pub fn single_binding() -> ParameterBinding {
    ParameterBinding::new(
        State::new(0, Parity::Positive),
        vec![
            CascadeStep::new(transition(0.0), State::new(4, Parity::Positive)),
            CascadeStep::new(transition(0.0), State::new(0, Parity::Unknown)),
        ],
        vec![ParameterSlot::Literal(0.0), ParameterSlot::named("delta_1").unwrap()],
    )
    .unwrap()
}

/// 3/2+ -> 7/2+ -> 5/2+ with both mixing ratios free.
pub fn double_binding() -> ParameterBinding {
    ParameterBinding::new(
        State::new(3, Parity::Positive),
        vec![
            CascadeStep::new(transition(0.0), State::new(7, Parity::Positive)),
            CascadeStep::new(transition(0.0), State::new(5, Parity::Positive)),
        ],
        vec![
            ParameterSlot::named("delta_1").unwrap(),
            ParameterSlot::named("delta_2").unwrap(),
        ],
    )
    .unwrap()
}

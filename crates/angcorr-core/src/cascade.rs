//! Nuclear states, electromagnetic transitions and the cascades they form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AngCorrError, ErrorInfo};

fn cascade_error(code: &str, message: impl Into<String>) -> AngCorrError {
    AngCorrError::InvalidArgument(ErrorInfo::new(code, message))
}

/// Parity quantum number of a nuclear state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// Positive parity.
    Positive,
    /// Negative parity.
    Negative,
    /// Parity not known or not relevant for the observable.
    #[default]
    Unknown,
}

impl Parity {
    /// Returns the conventional integer encoding (+1, -1, 0).
    pub fn as_sign(&self) -> i32 {
        match self {
            Parity::Positive => 1,
            Parity::Negative => -1,
            Parity::Unknown => 0,
        }
    }
}

/// Nuclear state characterised by its angular momentum and parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    two_j: u32,
    parity: Parity,
}

impl State {
    /// Creates a state from twice its angular momentum quantum number.
    pub const fn new(two_j: u32, parity: Parity) -> Self {
        Self { two_j, parity }
    }

    /// Twice the angular momentum quantum number.
    pub fn two_j(&self) -> u32 {
        self.two_j
    }

    /// Parity quantum number.
    pub fn parity(&self) -> Parity {
        self.parity
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.two_j % 2 == 0 {
            write!(f, "{}", self.two_j / 2)?;
        } else {
            write!(f, "{}/2", self.two_j)?;
        }
        match self.parity {
            Parity::Positive => write!(f, "^+"),
            Parity::Negative => write!(f, "^-"),
            Parity::Unknown => Ok(()),
        }
    }
}

/// Electromagnetic character of a multipole component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmCharacter {
    /// Electric multipole radiation.
    Electric,
    /// Magnetic multipole radiation.
    Magnetic,
    /// Character not determined.
    #[default]
    Unknown,
}

impl fmt::Display for EmCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            EmCharacter::Electric => "E",
            EmCharacter::Magnetic => "M",
            EmCharacter::Unknown => "σ",
        };
        f.write_str(symbol)
    }
}

/// Electromagnetic transition mixing two multipolarities.
///
/// The relative amplitude of the secondary multipolarity is the mixing ratio
/// `delta`. A value of zero describes a pure primary transition; the pure
/// secondary limit (`|delta| -> inf`) is approximated by large finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransitionRecord")]
pub struct Transition {
    primary: EmCharacter,
    two_l: u32,
    secondary: EmCharacter,
    two_l_prime: u32,
    delta: f64,
}

#[derive(Deserialize)]
struct TransitionRecord {
    primary: EmCharacter,
    two_l: u32,
    secondary: EmCharacter,
    two_l_prime: u32,
    delta: f64,
}

impl TryFrom<TransitionRecord> for Transition {
    type Error = AngCorrError;

    fn try_from(record: TransitionRecord) -> Result<Self, Self::Error> {
        Transition::new(
            record.primary,
            record.two_l,
            record.secondary,
            record.two_l_prime,
            record.delta,
        )
    }
}

impl Transition {
    /// Creates a transition, rejecting odd doubled multipolarities.
    pub fn new(
        primary: EmCharacter,
        two_l: u32,
        secondary: EmCharacter,
        two_l_prime: u32,
        delta: f64,
    ) -> Result<Self, AngCorrError> {
        for (name, value) in [("two_l", two_l), ("two_l_prime", two_l_prime)] {
            if value % 2 != 0 {
                return Err(AngCorrError::InvalidArgument(
                    ErrorInfo::new("odd-multipolarity", "doubled multipolarity must be even")
                        .with_context(name, value),
                ));
            }
        }
        if !delta.is_finite() {
            return Err(cascade_error(
                "non-finite-mixing-ratio",
                "mixing ratio must be a finite number",
            ));
        }
        Ok(Self {
            primary,
            two_l,
            secondary,
            two_l_prime,
            delta,
        })
    }

    /// Primary electromagnetic character.
    pub fn primary(&self) -> EmCharacter {
        self.primary
    }

    /// Twice the primary multipolarity.
    pub fn two_l(&self) -> u32 {
        self.two_l
    }

    /// Secondary electromagnetic character.
    pub fn secondary(&self) -> EmCharacter {
        self.secondary
    }

    /// Twice the secondary multipolarity.
    pub fn two_l_prime(&self) -> u32 {
        self.two_l_prime
    }

    /// Multipole mixing ratio.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub(crate) fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.primary, self.two_l / 2)?;
        if self.delta != 0.0 {
            write!(f, "/{}{}", self.secondary, self.two_l_prime / 2)?;
        }
        Ok(())
    }
}

/// A transition together with the state it populates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Transition feeding the state.
    pub transition: Transition,
    /// State populated by the transition.
    pub state: State,
}

impl CascadeStep {
    /// Pairs a transition with the state it populates.
    pub fn new(transition: Transition, state: State) -> Self {
        Self { transition, state }
    }
}

/// Initial oriented state followed by at least one cascade step.
///
/// The first and last transitions are the observed ones; any interior
/// transitions are unobserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CascadeRecord")]
pub struct Cascade {
    initial_state: State,
    steps: Vec<CascadeStep>,
}

#[derive(Deserialize)]
struct CascadeRecord {
    initial_state: State,
    steps: Vec<CascadeStep>,
}

impl TryFrom<CascadeRecord> for Cascade {
    type Error = AngCorrError;

    fn try_from(record: CascadeRecord) -> Result<Self, Self::Error> {
        Cascade::new(record.initial_state, record.steps)
    }
}

impl Cascade {
    /// Creates a cascade, rejecting an empty step sequence.
    pub fn new(initial_state: State, steps: Vec<CascadeStep>) -> Result<Self, AngCorrError> {
        if steps.is_empty() {
            return Err(cascade_error(
                "empty-cascade",
                "a cascade needs at least one step",
            ));
        }
        Ok(Self {
            initial_state,
            steps,
        })
    }

    /// Oriented state at the start of the cascade.
    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    /// Ordered cascade steps.
    pub fn steps(&self) -> &[CascadeStep] {
        &self.steps
    }

    /// Number of cascade steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a cascade holds at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Mixing ratios of all transitions in cascade order.
    pub fn deltas(&self) -> Vec<f64> {
        self.steps.iter().map(|step| step.transition.delta).collect()
    }

    /// Overwrites the mixing ratio of the transition at `index`.
    pub fn set_delta(&mut self, index: usize, delta: f64) -> Result<(), AngCorrError> {
        let len = self.steps.len();
        let step = self.steps.get_mut(index).ok_or_else(|| {
            AngCorrError::InvalidArgument(
                ErrorInfo::new("step-out-of-range", "cascade step index out of range")
                    .with_context("index", index)
                    .with_context("len", len),
            )
        })?;
        step.transition.set_delta(delta);
        Ok(())
    }
}

impl fmt::Display for Cascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.initial_state)?;
        for step in &self.steps {
            write!(f, " -({})-> {}", step.transition, step.state)?;
        }
        Ok(())
    }
}

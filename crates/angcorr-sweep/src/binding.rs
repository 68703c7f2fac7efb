use std::fmt;

use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_core::{Cascade, CascadeStep, State};
use serde::{Deserialize, Serialize};

fn binding_error(code: &str, message: impl Into<String>) -> AngCorrError {
    AngCorrError::InvalidArgument(ErrorInfo::new(code, message))
}

/// One of the two free mixing-ratio symbols the engine can sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeParameter {
    /// First free mixing ratio, read from `values[0]`.
    Slot1,
    /// Second free mixing ratio, read from `values[1]`.
    Slot2,
}

impl FreeParameter {
    /// Position of the parameter in the value vector passed to
    /// [`ParameterBinding::set_deltas`].
    pub fn index(&self) -> usize {
        match self {
            FreeParameter::Slot1 => 0,
            FreeParameter::Slot2 => 1,
        }
    }

    /// Parses the symbolic names `delta_1` and `delta_2`.
    ///
    /// Any other name would introduce a third free parameter, which the
    /// engine does not support.
    pub fn from_name(name: &str) -> Result<Self, AngCorrError> {
        match name {
            "delta_1" => Ok(FreeParameter::Slot1),
            "delta_2" => Ok(FreeParameter::Slot2),
            other => Err(AngCorrError::Unsupported(
                ErrorInfo::new(
                    "unknown-free-parameter",
                    "at most two free mixing ratios are supported",
                )
                .with_context("name", other)
                .with_hint("name free mixing ratios 'delta_1' or 'delta_2'"),
            )),
        }
    }

    /// Symbolic name of the parameter.
    pub fn name(&self) -> &'static str {
        match self {
            FreeParameter::Slot1 => "delta_1",
            FreeParameter::Slot2 => "delta_2",
        }
    }
}

impl fmt::Display for FreeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mixing-ratio assignment of a single cascade step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSlot {
    /// Fixed mixing ratio.
    Literal(f64),
    /// Mixing ratio supplied by the sweep.
    Named(FreeParameter),
}

impl ParameterSlot {
    /// Builds a named slot from its symbolic name.
    pub fn named(name: &str) -> Result<Self, AngCorrError> {
        FreeParameter::from_name(name).map(ParameterSlot::Named)
    }
}

/// A cascade whose mixing ratios are partly fixed and partly free.
///
/// Literal slots are written once at construction; [`set_deltas`] only
/// rewrites steps bound to a free parameter.
///
/// [`set_deltas`]: ParameterBinding::set_deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BindingRecord")]
pub struct ParameterBinding {
    cascade: Cascade,
    slots: Vec<ParameterSlot>,
    free_parameter_count: usize,
}

#[derive(Deserialize)]
struct BindingRecord {
    cascade: Cascade,
    slots: Vec<ParameterSlot>,
    free_parameter_count: usize,
}

impl TryFrom<BindingRecord> for ParameterBinding {
    type Error = AngCorrError;

    fn try_from(record: BindingRecord) -> Result<Self, Self::Error> {
        let binding = ParameterBinding::new(
            *record.cascade.initial_state(),
            record.cascade.steps().to_vec(),
            record.slots,
        )?;
        if binding.free_parameter_count != record.free_parameter_count {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new(
                    "free-parameter-count-mismatch",
                    "stored free-parameter count disagrees with the slots",
                )
                .with_context("stored", record.free_parameter_count)
                .with_context("slots", binding.free_parameter_count),
            ));
        }
        Ok(binding)
    }
}

impl ParameterBinding {
    /// Binds every cascade step to a literal or a free parameter.
    pub fn new(
        initial_state: State,
        steps: Vec<CascadeStep>,
        slots: Vec<ParameterSlot>,
    ) -> Result<Self, AngCorrError> {
        if slots.len() != steps.len() {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("slot-count-mismatch", "one slot per cascade step is required")
                    .with_context("steps", steps.len())
                    .with_context("slots", slots.len()),
            ));
        }
        let mut cascade = Cascade::new(initial_state, steps)?;

        let mut slot1 = false;
        let mut slot2 = false;
        for (index, slot) in slots.iter().enumerate() {
            match slot {
                ParameterSlot::Literal(delta) => {
                    if !delta.is_finite() {
                        return Err(binding_error(
                            "non-finite-literal",
                            "literal mixing ratios must be finite",
                        ));
                    }
                    cascade.set_delta(index, *delta)?;
                }
                ParameterSlot::Named(FreeParameter::Slot1) => slot1 = true,
                ParameterSlot::Named(FreeParameter::Slot2) => slot2 = true,
            }
        }
        if slot2 && !slot1 {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new(
                    "second-slot-without-first",
                    "delta_2 can only be used together with delta_1",
                )
                .with_hint("rename the only free mixing ratio to delta_1"),
            ));
        }
        let free_parameter_count = usize::from(slot1) + usize::from(slot2);

        Ok(Self {
            cascade,
            slots,
            free_parameter_count,
        })
    }

    /// Number of distinct free parameters (0, 1 or 2).
    pub fn free_parameter_count(&self) -> usize {
        self.free_parameter_count
    }

    /// Slot assignment, one entry per cascade step.
    pub fn slots(&self) -> &[ParameterSlot] {
        &self.slots
    }

    /// The cascade with the most recently bound mixing ratios.
    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Writes `values[k]` into every step bound to free parameter `k`.
    pub fn set_deltas(&mut self, values: &[f64]) -> Result<(), AngCorrError> {
        if values.len() != self.free_parameter_count {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new(
                    "delta-arity-mismatch",
                    "number of values must equal the number of free parameters",
                )
                .with_context("expected", self.free_parameter_count)
                .with_context("received", values.len()),
            ));
        }
        for (index, slot) in self.slots.iter().enumerate() {
            if let ParameterSlot::Named(parameter) = slot {
                self.cascade.set_delta(index, values[parameter.index()])?;
            }
        }
        Ok(())
    }
}

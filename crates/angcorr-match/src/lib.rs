#![deny(missing_docs)]
#![doc = "Matches swept asymmetries against measured confidence bands and inverts the parameter-to-observable map onto a histogram of the (A45, A90) plane."]

/// Confidence bands on measured asymmetries.
pub mod band;
/// Two-parameter cell classification.
pub mod double;
/// Index-range primitives.
pub mod intervals;
/// Inverse histogram of parameter envelopes.
pub mod inverse;
/// Observable windows and one-parameter landmarks.
pub mod limits;
/// One-parameter interval matching.
pub mod single;

pub use band::ConfidenceBand;
pub use double::{classify_cells, CellCategory, ConsistencyMap, ParameterBounds};
pub use intervals::{find_interval_overlaps, find_true_intervals, values_in_range, IndexRange};
pub use inverse::{inverse_envelopes, InverseEnvelopes, InverseOptions};
pub use limits::{nearest_center, Landmarks, ObservableLimits};
pub use single::{
    match_single, DeltaInterval, ExperimentalConstraints, MatchOutcome, SingleParameterReport,
};

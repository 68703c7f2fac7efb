#![deny(missing_docs)]
#![doc = "Binds free multipole mixing ratios of a cascade, evaluates the 45 and 90 degree azimuthal asymmetries and sweeps them over an arctan-transformed grid."]

/// Asymmetry observables derived from four oracle calls.
pub mod asymmetry;
/// Free-parameter slots and the bound cascade.
pub mod binding;
/// Sweep configuration and its defaults.
pub mod config;
/// Arctan-transformed mixing-ratio grid.
pub mod grid;
/// Canonical hashing helpers.
pub mod hash;
/// Canonical JSON and YAML helpers.
pub mod serde;
/// One- and two-parameter sweep driver.
pub mod sweep;

pub use asymmetry::{asymmetry_ratio, compute_asymmetries, Asymmetries};
pub use binding::{FreeParameter, ParameterBinding, ParameterSlot};
pub use config::SweepConfig;
pub use grid::ArctanGrid;
pub use hash::stable_hash_string;
pub use sweep::{sweep, AsymmetryGrid};

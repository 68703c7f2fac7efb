#![deny(missing_docs)]
#![doc = "Cascade model, correlation oracle contract and shared error surface for gamma-gamma asymmetry analysis."]

pub mod cascade;
pub mod errors;
pub mod oracle;
pub mod provenance;
pub mod rotation;

pub use cascade::{Cascade, CascadeStep, EmCharacter, Parity, State, Transition};
pub use errors::{AngCorrError, ErrorInfo};
pub use oracle::CorrelationOracle;
pub use provenance::SchemaVersion;
pub use rotation::EulerAngles;

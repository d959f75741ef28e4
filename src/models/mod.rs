//! Core data models for the legal computation engines.
//!
//! Every engine takes an immutable input record from this module and
//! returns a freshly built result record.

mod contract;
mod limitation;
mod sentencing;

pub use contract::{ContractPeriod, TerminationReason, TerminationResult, Tenure};
pub use limitation::{LimitationInput, LimitationResult};
pub use sentencing::{CrimeRecord, DosimetryInput, DosimetryResult, LegalFraction, Regime};

//! # Cross-Section Calculations
//!
//! Each calculation is a pure function over validated inputs that returns a
//! serializable result:
//!
//! - [`estimate`] - impedance and effective permittivity per topology, plus
//!   the propagation characteristics that follow from them
//!
//! The underlying closed-form expressions live in [`crate::equations`].

pub mod estimate;

pub use estimate::{characteristics, estimate, EstimateMethod, EstimateResult, LineCharacteristics};

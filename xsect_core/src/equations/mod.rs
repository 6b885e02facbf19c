//! # Transmission-Line Equations
//!
//! Every closed-form expression the estimator uses, kept in one place so each
//! can be checked against its reference and tested in isolation.
//!
//! ## Modules
//!
//! - [`impedance`] - Z0 and effective permittivity per topology
//! - [`propagation`] - phase velocity, delay, wavelength, skin depth, losses
//!
//! ## Units
//!
//! - Ratios (`w_h`) and permittivities are dimensionless
//! - Frequencies in Hz, conductivities in S/m
//! - Outputs are labelled in the function name (`_ps_per_mm`, `_um`, ...)

pub mod impedance;
pub mod propagation;

pub use impedance::{
    coplanar_effective_permittivity,
    microstrip_effective_permittivity,
    microstrip_z0,
    microstrip_z0_narrow,
    microstrip_z0_wide,
    stripline_effective_permittivity,
    stripline_z0,
    stripline_z0_narrow,
    stripline_z0_wide,
};

pub use propagation::{
    conductor_attenuation_db_per_m,
    delay_ps_per_mm,
    dielectric_attenuation_db_per_m,
    dielectric_filling_factor,
    guided_wavelength_mm,
    phase_velocity,
    skin_depth_um,
    surface_resistance_ohms,
};

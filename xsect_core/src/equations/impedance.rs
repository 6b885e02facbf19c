//! # Impedance Formulas
//!
//! Closed-form approximations for characteristic impedance Z0 and effective
//! relative permittivity εeff of planar transmission lines.
//!
//! ## Notation
//!
//! - `w_h` = trace width / substrate height (dimensionless)
//! - `er`  = substrate relative permittivity εr
//!
//! None of these functions guard against `w_h = 0`: the logarithms and
//! divisions then return infinities or NaN, which callers pass through.
//!
//! ## References
//!
//! - H. A. Wheeler, "Transmission-Line Properties of a Strip on a Dielectric
//!   Sheet on a Plane", IEEE Trans. MTT, 1977
//! - D. M. Pozar, *Microwave Engineering*, 4th Edition, Section 3.7-3.8

use std::f64::consts::PI;

/// `w_h` at which the microstrip formulas switch from narrow to wide
pub const MICROSTRIP_WIDE_THRESHOLD: f64 = 1.0;

/// `w_h` at which the stripline formulas switch from narrow to wide
pub const STRIPLINE_WIDE_THRESHOLD: f64 = 0.35;

// =============================================================================
// MICROSTRIP
// =============================================================================

/// Microstrip impedance for narrow traces (`w_h ≤ 1`), Wheeler
///
/// # Formula
/// Z0 = (60/√εr) · ln(8/(w/h) + (w/h)/4)
///
/// # Example
/// ```rust
/// use xsect_core::equations::impedance::microstrip_z0_narrow;
///
/// // 100 µm trace on 1.6 mm FR-4
/// let z0 = microstrip_z0_narrow(0.0625, 4.4);
/// assert!((z0 - 138.79).abs() < 0.01);
/// ```
#[inline]
pub fn microstrip_z0_narrow(w_h: f64, er: f64) -> f64 {
    (60.0 / er.sqrt()) * (8.0 / w_h + w_h / 4.0).ln()
}

/// Microstrip impedance for wide traces (`w_h > 1`), Wheeler
///
/// # Formula
/// Z0 = 120π / (√εr · (w/h + 1.393 + 0.667 · ln(w/h + 1.444)))
#[inline]
pub fn microstrip_z0_wide(w_h: f64, er: f64) -> f64 {
    (120.0 * PI) / (er.sqrt() * (w_h + 1.393 + 0.667 * (w_h + 1.444).ln()))
}

/// Microstrip impedance, selecting the narrow or wide branch
#[inline]
pub fn microstrip_z0(w_h: f64, er: f64) -> f64 {
    if w_h <= MICROSTRIP_WIDE_THRESHOLD {
        microstrip_z0_narrow(w_h, er)
    } else {
        microstrip_z0_wide(w_h, er)
    }
}

/// Microstrip effective permittivity (same expression for both branches)
///
/// # Formula
/// εeff = (εr + 1)/2 + (εr - 1)/2 · (1 + 12/(w/h))^(-1/2)
///
/// Lies between (εr + 1)/2 (very narrow trace, half the field in air) and
/// εr (very wide trace, field almost entirely in the substrate).
#[inline]
pub fn microstrip_effective_permittivity(w_h: f64, er: f64) -> f64 {
    (er + 1.0) / 2.0 + (er - 1.0) / 2.0 * (1.0 + 12.0 / w_h).powf(-0.5)
}

// =============================================================================
// STRIPLINE
// =============================================================================

/// Stripline impedance for narrow traces (`w_h ≤ 0.35`)
///
/// # Formula
/// Z0 = (60/√εr) · ln(4/(w/h))
#[inline]
pub fn stripline_z0_narrow(w_h: f64, er: f64) -> f64 {
    (60.0 / er.sqrt()) * (4.0 / w_h).ln()
}

/// Stripline impedance for wide traces (`w_h > 0.35`)
///
/// # Formula
/// Z0 = (94.15/√εr) / (w/h + 2.7)
#[inline]
pub fn stripline_z0_wide(w_h: f64, er: f64) -> f64 {
    (94.15 / er.sqrt()) / (w_h + 2.7)
}

/// Stripline impedance, selecting the narrow or wide branch
#[inline]
pub fn stripline_z0(w_h: f64, er: f64) -> f64 {
    if w_h <= STRIPLINE_WIDE_THRESHOLD {
        stripline_z0_narrow(w_h, er)
    } else {
        stripline_z0_wide(w_h, er)
    }
}

/// Stripline effective permittivity: the field is entirely inside a
/// homogeneous dielectric, so εeff = εr.
#[inline]
pub fn stripline_effective_permittivity(er: f64) -> f64 {
    er
}

// =============================================================================
// COPLANAR PLACEHOLDERS
// Fixed values, NOT derived from geometry. Rough reference numbers only;
// kept as-is until a proper conformal-mapping model is specified.
// =============================================================================

/// Placeholder Z0 for an ungrounded coplanar waveguide (Ω)
pub const COPLANAR_Z0_OHMS: f64 = 50.0;
/// Placeholder Z0 for a coplanar waveguide over a ground plane (Ω)
pub const COPLANAR_WITH_GROUND_Z0_OHMS: f64 = 45.0;
/// Placeholder Z0 for a via-stitched grounded coplanar waveguide (Ω)
pub const GROUNDED_COPLANAR_Z0_OHMS: f64 = 40.0;

/// Placeholder εeff for coplanar lines: (εr + 1)/2 plus a fixed bump for
/// each added ground (0.0, 0.1, 0.2).
#[inline]
pub fn coplanar_effective_permittivity(er: f64, ground_bump: f64) -> f64 {
    (er + 1.0) / 2.0 + ground_bump
}

// =============================================================================
// TESTS
// =============================================================================

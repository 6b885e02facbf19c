//! # Propagation Formulas
//!
//! Quantities that follow from an impedance estimate and the material set
//! alone. These are textbook TEM relations, not a field solution.
//!
//! Losses are the low-loss approximations: conductor loss from the surface
//! resistance spread over the trace width, dielectric loss from tan δ weighted
//! by the share of the field inside the substrate.
//!
//! ## References
//!
//! - D. M. Pozar, *Microwave Engineering*, 4th Edition, Sections 1.7, 2.1 and 3.8

use std::f64::consts::PI;

/// Permeability of free space µ0 (H/m)
pub const MU0: f64 = 4.0 * PI * 1e-7;

/// Speed of light in vacuum (m/s)
pub const C_LIGHT_M_PER_S: f64 = 299_792_458.0;

/// Decibels per neper (20 / ln 10)
pub const DB_PER_NEPER: f64 = 8.685_889_638_065_037;

/// Phase velocity of a quasi-TEM wave
///
/// # Formula
/// v = c / √εeff
///
/// # Example
/// ```rust
/// use xsect_core::equations::propagation::{phase_velocity, C_LIGHT_M_PER_S};
///
/// assert_eq!(phase_velocity(1.0), C_LIGHT_M_PER_S);
/// assert!((phase_velocity(4.0) - C_LIGHT_M_PER_S / 2.0).abs() < 1e-6);
/// ```
#[inline]
pub fn phase_velocity(effective_permittivity: f64) -> f64 {
    C_LIGHT_M_PER_S / effective_permittivity.sqrt()
}

/// Propagation delay in picoseconds per millimeter of line
///
/// # Formula
/// t = 1/v, scaled from s/m to ps/mm (× 1e9)
#[inline]
pub fn delay_ps_per_mm(effective_permittivity: f64) -> f64 {
    1e9 / phase_velocity(effective_permittivity)
}

/// Guided wavelength in millimeters
///
/// # Formula
/// λg = v / f
#[inline]
pub fn guided_wavelength_mm(effective_permittivity: f64, frequency_hz: f64) -> f64 {
    phase_velocity(effective_permittivity) / frequency_hz * 1e3
}

/// Conductor skin depth in micrometers
///
/// # Formula
/// δ = √(2 / (ω · µ0 · σ)),  ω = 2πf
///
/// # Example
/// ```rust
/// use xsect_core::equations::propagation::skin_depth_um;
///
/// // Copper at 1 GHz is roughly 2.1 µm
/// let delta = skin_depth_um(5.8e7, 1e9);
/// assert!((delta - 2.09).abs() < 0.01);
/// ```
#[inline]
pub fn skin_depth_um(conductivity_s_per_m: f64, frequency_hz: f64) -> f64 {
    let omega = 2.0 * PI * frequency_hz;
    (2.0 / (omega * MU0 * conductivity_s_per_m)).sqrt() * 1e6
}

/// Conductor surface resistance in ohms per square
///
/// # Formula
/// Rs = 1 / (σ · δ)
#[inline]
pub fn surface_resistance_ohms(conductivity_s_per_m: f64, frequency_hz: f64) -> f64 {
    let delta_m = skin_depth_um(conductivity_s_per_m, frequency_hz) * 1e-6;
    1.0 / (conductivity_s_per_m * delta_m)
}

/// Conductor attenuation in dB per meter
///
/// # Formula
/// αc = Rs / (Z0 · w)  (Np/m)
///
/// Current is assumed to flow in one skin depth across the trace width only;
/// return-path loss in the grounds is ignored.
#[inline]
pub fn conductor_attenuation_db_per_m(
    conductivity_s_per_m: f64,
    frequency_hz: f64,
    z0_ohms: f64,
    trace_width_um: f64,
) -> f64 {
    let rs = surface_resistance_ohms(conductivity_s_per_m, frequency_hz);
    rs / (z0_ohms * trace_width_um * 1e-6) * DB_PER_NEPER
}

/// Share of the dielectric loss seen by a partially filled line
///
/// # Formula
/// q = εr(εeff - 1) / (εeff(εr - 1)), capped at 1
///
/// A homogeneous line (εeff = εr) gives 1. With εr = 1 there is no
/// dielectric to share and 1 is returned.
///
/// # Example
/// ```rust
/// use xsect_core::equations::propagation::dielectric_filling_factor;
///
/// assert_eq!(dielectric_filling_factor(4.4, 4.4), 1.0);
/// assert_eq!(dielectric_filling_factor(4.4, 1.0), 0.0);
/// ```
pub fn dielectric_filling_factor(epsilon_r: f64, effective_permittivity: f64) -> f64 {
    if epsilon_r <= 1.0 {
        return 1.0;
    }
    let q = epsilon_r * (effective_permittivity - 1.0) / (effective_permittivity * (epsilon_r - 1.0));
    q.min(1.0)
}

/// Dielectric attenuation in dB per meter
///
/// # Formula
/// αd = π · f · √εeff · tan δ / c · q  (Np/m)
///
/// # Example
/// ```rust
/// use xsect_core::equations::propagation::dielectric_attenuation_db_per_m;
///
/// // Lossless dielectric
/// assert_eq!(dielectric_attenuation_db_per_m(4.4, 3.0, 0.0, 1e9), 0.0);
/// ```
#[inline]
pub fn dielectric_attenuation_db_per_m(
    epsilon_r: f64,
    effective_permittivity: f64,
    loss_tangent: f64,
    frequency_hz: f64,
) -> f64 {
    let q = dielectric_filling_factor(epsilon_r, effective_permittivity);
    PI * frequency_hz * effective_permittivity.sqrt() * loss_tangent / C_LIGHT_M_PER_S * q * DB_PER_NEPER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_in_fr4() {
        // εeff ≈ 3.3 gives roughly 6 ps/mm, the usual FR-4 rule of thumb
        let t = delay_ps_per_mm(3.3);
        assert!((t - 6.06).abs() < 0.01, "delay = {}", t);
    }

    #[test]
    fn test_wavelength_in_vacuum() {
        // 1 GHz in vacuum: ~299.8 mm
        let lambda = guided_wavelength_mm(1.0, 1e9);
        assert!((lambda - 299.792458).abs() < 1e-9);
    }

    #[test]
    fn test_skin_depth_scales_with_inverse_root_frequency() {
        let d1 = skin_depth_um(5.8e7, 1e8);
        let d4 = skin_depth_um(5.8e7, 4e8);
        assert!((d1 / d4 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_copper_surface_resistance() {
        // ~8.25 mΩ/sq at 1 GHz
        let rs = surface_resistance_ohms(5.8e7, 1e9);
        assert!((rs - 8.25e-3).abs() < 1e-5, "Rs = {}", rs);
    }

    #[test]
    fn test_conductor_loss_narrow_stripline() {
        let z0 = (60.0 / 4.4_f64.sqrt()) * 64.0_f64.ln();
        let alpha = conductor_attenuation_db_per_m(5.8e7, 1e9, z0, 100.0);
        assert!((alpha - 6.024).abs() < 0.01, "alpha_c = {}", alpha);
    }

    #[test]
    fn test_conductor_loss_grows_with_root_frequency() {
        let a1 = conductor_attenuation_db_per_m(5.8e7, 1e9, 50.0, 200.0);
        let a4 = conductor_attenuation_db_per_m(5.8e7, 4e9, 50.0, 200.0);
        assert!((a4 / a1 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dielectric_loss_homogeneous() {
        // FR-4 stripline, tan δ 0.02 at 1 GHz: ~3.82 dB/m
        let alpha = dielectric_attenuation_db_per_m(4.4, 4.4, 0.02, 1e9);
        assert!((alpha - 3.819).abs() < 0.01, "alpha_d = {}", alpha);
    }

    #[test]
    fn test_dielectric_loss_is_linear_in_loss_tangent() {
        assert_eq!(dielectric_attenuation_db_per_m(4.4, 2.8, 0.0, 1e9), 0.0);
        let a1 = dielectric_attenuation_db_per_m(4.4, 2.8, 0.01, 1e9);
        let a3 = dielectric_attenuation_db_per_m(4.4, 2.8, 0.03, 1e9);
        assert!(a1 > 0.0);
        assert!((a3 / a1 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_filling_factor_bounds() {
        // Microstrip 100/1600 on FR-4: εeff ≈ 2.82
        let q = dielectric_filling_factor(4.4, 2.8224);
        assert!((q - 0.8356).abs() < 1e-3, "q = {}", q);
        assert_eq!(dielectric_filling_factor(1.0, 1.0), 1.0);
        // Placeholder εeff above εr is capped
        assert_eq!(dielectric_filling_factor(1.1, 1.25), 1.0);
    }
}

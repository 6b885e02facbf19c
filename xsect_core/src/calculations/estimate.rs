//! # Impedance Estimate
//!
//! Rough analytic estimate of characteristic impedance Z0 and effective
//! permittivity for a cross-section. One closed-form approximation is
//! selected by topology and, where it matters, by the `w/h` ratio.
//!
//! ## Assumptions
//!
//! - Quasi-TEM propagation, lossless conductors for Z0
//! - Trace thickness is ignored by every formula
//! - Coplanar variants return fixed reference values, not a geometric model
//!
//! ## Example
//!
//! ```rust
//! use xsect_core::calculations::estimate::{estimate, EstimateMethod};
//! use xsect_core::inputs::{DimensionSet, MaterialSet};
//! use xsect_core::topology::Topology;
//!
//! let dims = DimensionSet {
//!     trace_width_um: 100.0,
//!     substrate_height_um: 1600.0,
//!     ..DimensionSet::default()
//! };
//! let result = estimate(Topology::Microstrip, &dims, &MaterialSet::default());
//!
//! assert_eq!(result.method, EstimateMethod::WheelerNarrow);
//! assert!((result.z0_ohms - 138.8).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::impedance::{
    self,
    COPLANAR_WITH_GROUND_Z0_OHMS,
    COPLANAR_Z0_OHMS,
    GROUNDED_COPLANAR_Z0_OHMS,
    MICROSTRIP_WIDE_THRESHOLD,
    STRIPLINE_WIDE_THRESHOLD,
};
use crate::equations::propagation;
use crate::inputs::{DimensionSet, MaterialSet};
use crate::topology::Topology;

/// Z0 reported for topologies without a model (Ω)
pub const DEFAULT_Z0_OHMS: f64 = 50.0;

/// Which closed-form approximation produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateMethod {
    /// Microstrip, `w/h ≤ 1`
    WheelerNarrow,
    /// Microstrip, `w/h > 1`
    WheelerWide,
    /// Stripline, `w/h ≤ 0.35`
    StriplineNarrow,
    /// Stripline, `w/h > 0.35`
    StriplineWide,
    /// Fixed coplanar reference values
    CoplanarPlaceholder,
    /// No model for this topology
    Default,
}

impl EstimateMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            EstimateMethod::WheelerNarrow => "Wheeler (narrow)",
            EstimateMethod::WheelerWide => "Wheeler (wide)",
            EstimateMethod::StriplineNarrow => "Stripline (narrow)",
            EstimateMethod::StriplineWide => "Stripline (wide)",
            EstimateMethod::CoplanarPlaceholder => "Coplanar placeholder",
            EstimateMethod::Default => "Default",
        }
    }

    /// Whether the numbers are fixed reference values rather than a formula
    pub fn is_placeholder(&self) -> bool {
        matches!(self, EstimateMethod::CoplanarPlaceholder | EstimateMethod::Default)
    }
}

/// Result of an impedance estimate.
///
/// Values are passed through unclamped: a zero `w_h` gives non-finite
/// numbers, which callers must display as-is.
///
/// ## JSON Example
///
/// ```json
/// {
///   "z0_ohms": 138.79,
///   "effective_permittivity": 2.82,
///   "w_h": 0.0625,
///   "method": "wheeler-narrow"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Characteristic impedance (Ω)
    pub z0_ohms: f64,
    /// Effective relative permittivity εeff
    pub effective_permittivity: f64,
    /// Trace width / substrate height
    pub w_h: f64,
    /// Approximation used
    pub method: EstimateMethod,
}

impl EstimateResult {
    /// True when both reported quantities are finite numbers
    pub fn is_finite(&self) -> bool {
        self.z0_ohms.is_finite() && self.effective_permittivity.is_finite()
    }
}

/// Estimate Z0 and εeff for a cross-section.
///
/// Never fails. Inputs are assumed validated; degenerate ratios surface as
/// non-finite numbers in the result.
pub fn estimate(topology: Topology, dims: &DimensionSet, materials: &MaterialSet) -> EstimateResult {
    let w_h = dims.w_h();
    let er = materials.epsilon_r;

    let (z0_ohms, effective_permittivity, method) = match topology {
        Topology::Microstrip => {
            let method = if w_h <= MICROSTRIP_WIDE_THRESHOLD {
                EstimateMethod::WheelerNarrow
            } else {
                EstimateMethod::WheelerWide
            };
            (
                impedance::microstrip_z0(w_h, er),
                impedance::microstrip_effective_permittivity(w_h, er),
                method,
            )
        }
        Topology::Stripline => {
            let method = if w_h <= STRIPLINE_WIDE_THRESHOLD {
                EstimateMethod::StriplineNarrow
            } else {
                EstimateMethod::StriplineWide
            };
            (
                impedance::stripline_z0(w_h, er),
                impedance::stripline_effective_permittivity(er),
                method,
            )
        }
        Topology::Coplanar => (
            COPLANAR_Z0_OHMS,
            impedance::coplanar_effective_permittivity(er, 0.0),
            EstimateMethod::CoplanarPlaceholder,
        ),
        Topology::CoplanarWithGround => (
            COPLANAR_WITH_GROUND_Z0_OHMS,
            impedance::coplanar_effective_permittivity(er, 0.1),
            EstimateMethod::CoplanarPlaceholder,
        ),
        Topology::GroundedCoplanar => (
            GROUNDED_COPLANAR_Z0_OHMS,
            impedance::coplanar_effective_permittivity(er, 0.2),
            EstimateMethod::CoplanarPlaceholder,
        ),
        Topology::Custom => (DEFAULT_Z0_OHMS, er, EstimateMethod::Default),
    };

    EstimateResult {
        z0_ohms,
        effective_permittivity,
        w_h,
        method,
    }
}

/// Propagation characteristics derived from an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineCharacteristics {
    /// Frequency the frequency-dependent values were evaluated at (Hz)
    pub frequency_hz: f64,
    /// Phase velocity (m/s)
    pub phase_velocity_m_per_s: f64,
    /// Phase velocity as a fraction of c
    pub velocity_factor: f64,
    /// Propagation delay (ps/mm)
    pub delay_ps_per_mm: f64,
    /// Guided wavelength (mm)
    pub wavelength_mm: f64,
    /// Conductor skin depth (µm)
    pub skin_depth_um: f64,
    /// Conductor attenuation (dB/m)
    pub conductor_loss_db_per_m: f64,
    /// Dielectric attenuation (dB/m)
    pub dielectric_loss_db_per_m: f64,
    /// Sum of both attenuations (dB/m)
    pub total_loss_db_per_m: f64,
}

/// Derive propagation characteristics at `frequency_hz`.
///
/// Conductor loss uses the estimated Z0 and the trace width, so it inherits
/// the placeholder status of coplanar estimates.
pub fn characteristics(
    result: &EstimateResult,
    dims: &DimensionSet,
    materials: &MaterialSet,
    frequency_hz: f64,
) -> LineCharacteristics {
    let eff = result.effective_permittivity;
    let velocity = propagation::phase_velocity(eff);
    let conductor_loss = propagation::conductor_attenuation_db_per_m(
        materials.conductivity_s_per_m,
        frequency_hz,
        result.z0_ohms,
        dims.trace_width_um,
    );
    let dielectric_loss =
        propagation::dielectric_attenuation_db_per_m(materials.epsilon_r, eff, materials.loss_tangent, frequency_hz);

    LineCharacteristics {
        frequency_hz,
        phase_velocity_m_per_s: velocity,
        velocity_factor: velocity / propagation::C_LIGHT_M_PER_S,
        delay_ps_per_mm: propagation::delay_ps_per_mm(eff),
        wavelength_mm: propagation::guided_wavelength_mm(eff, frequency_hz),
        skin_depth_um: propagation::skin_depth_um(materials.conductivity_s_per_m, frequency_hz),
        conductor_loss_db_per_m: conductor_loss,
        dielectric_loss_db_per_m: dielectric_loss,
        total_loss_db_per_m: conductor_loss + dielectric_loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn thick_fr4() -> (DimensionSet, MaterialSet) {
        let dims = DimensionSet {
            trace_width_um: 100.0,
            substrate_height_um: 1600.0,
            ..DimensionSet::default()
        };
        let materials = MaterialSet {
            epsilon_r: 4.4,
            ..MaterialSet::default()
        };
        (dims, materials)
    }

    #[test]
    fn test_microstrip_scenario() {
        let (dims, materials) = thick_fr4();
        let result = estimate(Topology::Microstrip, &dims, &materials);

        assert_eq!(result.method, EstimateMethod::WheelerNarrow);
        assert!(approx_eq(result.w_h, 0.0625, 1e-12));
        assert!(approx_eq(result.z0_ohms, 138.79, 0.01), "Z0 = {}", result.z0_ohms);
        // Narrow trace: most of the field is in air
        assert!(result.effective_permittivity > 2.7 && result.effective_permittivity < 3.2);
    }

    #[test]
    fn test_stripline_scenario() {
        let (dims, materials) = thick_fr4();
        let result = estimate(Topology::Stripline, &dims, &materials);

        assert_eq!(result.method, EstimateMethod::StriplineNarrow);
        let expected = (60.0 / 4.4_f64.sqrt()) * 64.0_f64.ln();
        assert!(approx_eq(result.z0_ohms, expected, 1e-9));
        assert_eq!(result.effective_permittivity, 4.4);
    }

    #[test]
    fn test_stripline_wide_method() {
        let (mut dims, materials) = thick_fr4();
        dims.trace_width_um = 800.0;
        let result = estimate(Topology::Stripline, &dims, &materials);
        assert_eq!(result.method, EstimateMethod::StriplineWide);
        assert!(approx_eq(result.z0_ohms, (94.15 / 4.4_f64.sqrt()) / 3.2, 1e-9));
    }

    #[test]
    fn test_coplanar_placeholders_ignore_geometry() {
        let materials = MaterialSet::default();
        let expected = [
            (Topology::Coplanar, 50.0, 2.7),
            (Topology::CoplanarWithGround, 45.0, 2.8),
            (Topology::GroundedCoplanar, 40.0, 2.9),
        ];
        for width in [10.0, 300.0, 9000.0] {
            let dims = DimensionSet {
                trace_width_um: width,
                ..DimensionSet::default()
            };
            for (topology, z0, eff) in expected {
                let result = estimate(topology, &dims, &materials);
                assert_eq!(result.z0_ohms, z0, "{}", topology);
                assert!(approx_eq(result.effective_permittivity, eff, 1e-12), "{}", topology);
                assert!(result.method.is_placeholder());
            }
        }
    }

    #[test]
    fn test_custom_default_branch() {
        let materials = MaterialSet {
            epsilon_r: 9.8,
            ..MaterialSet::default()
        };
        let result = estimate(Topology::Custom, &DimensionSet::default(), &materials);
        assert_eq!(result.z0_ohms, 50.0);
        assert_eq!(result.effective_permittivity, 9.8);
        assert_eq!(result.method, EstimateMethod::Default);
    }

    #[test]
    fn test_unknown_topology_falls_back_to_default() {
        let topology: Topology = serde_json::from_str("\"slotline\"").unwrap();
        let result = estimate(topology, &DimensionSet::default(), &MaterialSet::default());
        assert_eq!(result.method, EstimateMethod::Default);
    }

    #[test]
    fn test_microstrip_continuity_at_unit_ratio() {
        let materials = MaterialSet::default();
        let below = DimensionSet {
            trace_width_um: 200.0,
            substrate_height_um: 200.0,
            ..DimensionSet::default()
        };
        let above = DimensionSet {
            trace_width_um: 200.001,
            ..below
        };
        let a = estimate(Topology::Microstrip, &below, &materials);
        let b = estimate(Topology::Microstrip, &above, &materials);
        assert_eq!(a.method, EstimateMethod::WheelerNarrow);
        assert_eq!(b.method, EstimateMethod::WheelerWide);
        assert!((a.z0_ohms - b.z0_ohms).abs() / a.z0_ohms < 0.03);
    }

    #[test]
    fn test_zero_width_is_not_clamped() {
        let dims = DimensionSet {
            trace_width_um: 0.0,
            ..DimensionSet::default()
        };
        let result = estimate(Topology::Microstrip, &dims, &MaterialSet::default());
        assert_eq!(result.w_h, 0.0);
        assert!(!result.is_finite());
    }

    #[test]
    fn test_characteristics() {
        let (dims, materials) = thick_fr4();
        let result = estimate(Topology::Stripline, &dims, &materials);
        let chars = characteristics(&result, &dims, &materials, 1e9);

        assert!(approx_eq(chars.velocity_factor, 1.0 / 4.4_f64.sqrt(), 1e-12));
        assert!(approx_eq(chars.delay_ps_per_mm, 4.4_f64.sqrt() / 0.299792458, 1e-9));
        assert!(approx_eq(chars.wavelength_mm * chars.delay_ps_per_mm, 1000.0, 1e-6));
        assert!(approx_eq(chars.skin_depth_um, 2.09, 0.01));
        // Copper, 100 µm trace, tan δ 0.02
        assert!(approx_eq(chars.conductor_loss_db_per_m, 6.02, 0.01));
        assert!(approx_eq(chars.dielectric_loss_db_per_m, 3.82, 0.01));
        assert!(approx_eq(
            chars.total_loss_db_per_m,
            chars.conductor_loss_db_per_m + chars.dielectric_loss_db_per_m,
            1e-12
        ));
    }

    #[test]
    fn test_loss_tangent_drives_dielectric_loss() {
        let (dims, mut materials) = thick_fr4();
        let at = |materials: &MaterialSet| {
            let result = estimate(Topology::Microstrip, &dims, materials);
            characteristics(&result, &dims, materials, 1e9)
        };

        materials.loss_tangent = 0.0;
        let lossless = at(&materials);
        assert_eq!(lossless.dielectric_loss_db_per_m, 0.0);

        materials.loss_tangent = 0.02;
        let fr4 = at(&materials);
        materials.loss_tangent = 0.9;
        let lossy = at(&materials);

        assert!(fr4.dielectric_loss_db_per_m > 0.0);
        assert!(lossy.dielectric_loss_db_per_m > fr4.dielectric_loss_db_per_m);
        assert_ne!(lossless, lossy);
        // Phase and conductor terms do not depend on tan δ
        assert_eq!(lossless.delay_ps_per_mm, lossy.delay_ps_per_mm);
        assert_eq!(lossless.conductor_loss_db_per_m, lossy.conductor_loss_db_per_m);
    }

    #[test]
    fn test_wider_trace_has_less_conductor_loss() {
        let (mut dims, materials) = thick_fr4();
        let narrow = characteristics(&estimate(Topology::Microstrip, &dims, &materials), &dims, &materials, 1e9);
        dims.trace_width_um = 3000.0;
        let wide = characteristics(&estimate(Topology::Microstrip, &dims, &materials), &dims, &materials, 1e9);
        assert!(wide.conductor_loss_db_per_m < narrow.conductor_loss_db_per_m);
    }

    #[test]
    fn test_result_serialization() {
        let (dims, materials) = thick_fr4();
        let result = estimate(Topology::Microstrip, &dims, &materials);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"method\":\"wheeler-narrow\""));
    }
}

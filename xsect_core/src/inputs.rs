//! # Cross-Section Inputs
//!
//! Physical dimensions and material properties describing a transmission line.
//! Both are plain data owned by whoever supplies parameters (the GUI form, the
//! CLI flags); the engine only reads them.
//!
//! `validate()` is the gate the parameter source runs before handing a set to
//! the engine. The layout engine and the estimator assume validated inputs and
//! never re-check them.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "trace_width_um": 300.0,
//!   "trace_height_um": 35.0,
//!   "ground_thickness_um": 35.0,
//!   "coplanar_gap_um": 150.0,
//!   "substrate_width_um": 3000.0,
//!   "substrate_height_um": 200.0,
//!   "air_height_um": 400.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Minimum substrate relative permittivity (vacuum)
pub const MIN_EPSILON_R: f64 = 1.0;
/// Maximum accepted substrate relative permittivity
pub const MAX_EPSILON_R: f64 = 100.0;
/// Maximum accepted loss tangent
pub const MAX_LOSS_TANGENT: f64 = 1.0;
/// Minimum accepted conductor conductivity (S/m)
pub const MIN_CONDUCTIVITY_S_PER_M: f64 = 1e3;
/// Maximum accepted conductor conductivity (S/m)
pub const MAX_CONDUCTIVITY_S_PER_M: f64 = 1e8;

/// Physical magnitudes of a cross-section, all in micrometers.
///
/// Not every field matters for every topology (the coplanar gap is unused by
/// stripline, for example). Irrelevant fields are ignored, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSet {
    /// Signal conductor width
    pub trace_width_um: f64,
    /// Signal conductor thickness (copper weight)
    pub trace_height_um: f64,
    /// Bottom ground plane thickness
    pub ground_thickness_um: f64,
    /// Gap between the signal and each coplanar side ground
    pub coplanar_gap_um: f64,
    /// Horizontal extent of the substrate (and of air/bottom ground)
    pub substrate_width_um: f64,
    /// Dielectric thickness
    pub substrate_height_um: f64,
    /// Height of the air region drawn above the topmost conductor
    pub air_height_um: f64,
}

impl Default for DimensionSet {
    fn default() -> Self {
        DimensionSet {
            trace_width_um: 300.0,
            trace_height_um: 35.0,
            ground_thickness_um: 35.0,
            coplanar_gap_um: 150.0,
            substrate_width_um: 3000.0,
            substrate_height_um: 200.0,
            air_height_um: 400.0,
        }
    }
}

impl DimensionSet {
    /// Named view of every field, in form order.
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("trace_width_um", self.trace_width_um),
            ("trace_height_um", self.trace_height_um),
            ("ground_thickness_um", self.ground_thickness_um),
            ("coplanar_gap_um", self.coplanar_gap_um),
            ("substrate_width_um", self.substrate_width_um),
            ("substrate_height_um", self.substrate_height_um),
            ("air_height_um", self.air_height_um),
        ]
    }

    /// Validate that every dimension is a strictly positive finite number.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Dimension must be a finite number"));
            }
            if value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Dimension must be positive"));
            }
        }
        Ok(())
    }

    /// Trace-width-to-substrate-height ratio, the branching variable of the
    /// analytic formulas. Not guarded: a zero height yields a non-finite ratio.
    pub fn w_h(&self) -> f64 {
        self.trace_width_um / self.substrate_height_um
    }
}

/// Substrate and conductor material properties.
///
/// These feed the estimator only; they never change layout geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSet {
    /// Substrate relative permittivity εr (1.0 - 100.0)
    pub epsilon_r: f64,
    /// Substrate loss tangent tan δ (0.0 - 1.0)
    pub loss_tangent: f64,
    /// Conductor conductivity σ in S/m (1e3 - 1e8)
    pub conductivity_s_per_m: f64,
}

impl Default for MaterialSet {
    /// FR-4 substrate with copper conductors
    fn default() -> Self {
        MaterialSet {
            epsilon_r: 4.4,
            loss_tangent: 0.02,
            conductivity_s_per_m: 5.8e7,
        }
    }
}

impl MaterialSet {
    /// Validate material ranges.
    pub fn validate(&self) -> CalcResult<()> {
        check_range("epsilon_r", self.epsilon_r, MIN_EPSILON_R, MAX_EPSILON_R)?;
        check_range("loss_tangent", self.loss_tangent, 0.0, MAX_LOSS_TANGENT)?;
        check_range(
            "conductivity_s_per_m",
            self.conductivity_s_per_m,
            MIN_CONDUCTIVITY_S_PER_M,
            MAX_CONDUCTIVITY_S_PER_M,
        )
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DimensionSet::default().validate().is_ok());
        assert!(MaterialSet::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimension() {
        let dims = DimensionSet {
            coplanar_gap_um: 0.0,
            ..DimensionSet::default()
        };
        let err = dims.validate().unwrap_err();
        assert_eq!(err.field(), Some("coplanar_gap_um"));
    }

    #[test]
    fn test_rejects_non_finite_dimension() {
        let dims = DimensionSet {
            air_height_um: f64::NAN,
            ..DimensionSet::default()
        };
        assert_eq!(dims.validate().unwrap_err().field(), Some("air_height_um"));

        let dims = DimensionSet {
            substrate_width_um: f64::INFINITY,
            ..DimensionSet::default()
        };
        assert!(dims.validate().is_err());
    }

    #[test]
    fn test_material_ranges() {
        let low_er = MaterialSet {
            epsilon_r: 0.9,
            ..MaterialSet::default()
        };
        assert_eq!(low_er.validate().unwrap_err().field(), Some("epsilon_r"));

        let lossy = MaterialSet {
            loss_tangent: 1.5,
            ..MaterialSet::default()
        };
        assert_eq!(lossy.validate().unwrap_err().field(), Some("loss_tangent"));

        let poor_conductor = MaterialSet {
            conductivity_s_per_m: 10.0,
            ..MaterialSet::default()
        };
        assert!(poor_conductor.validate().is_err());

        let edges = MaterialSet {
            epsilon_r: 100.0,
            loss_tangent: 0.0,
            conductivity_s_per_m: 1e8,
        };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_w_h_ratio() {
        let dims = DimensionSet {
            trace_width_um: 100.0,
            substrate_height_um: 1600.0,
            ..DimensionSet::default()
        };
        assert!((dims.w_h() - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dims: DimensionSet = serde_json::from_str(r#"{ "trace_width_um": 120.0 }"#).unwrap();
        assert_eq!(dims.trace_width_um, 120.0);
        assert_eq!(dims.substrate_height_um, DimensionSet::default().substrate_height_um);
    }
}

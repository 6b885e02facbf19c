//! # Design Snapshot
//!
//! A [`Design`] is one consistent set of inputs: topology, dimensions and
//! materials. Everything shown to the user (the layout and the estimate) is
//! derived from a single snapshot by [`Design::recompute`], so the geometry
//! and the numbers can never disagree.
//!
//! Parameter sources build a candidate `Design`, call [`Design::validate`],
//! and only then replace the snapshot they hold.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "topology": "grounded-coplanar",
//!   "dimensions": { "trace_width_um": 300.0, "coplanar_gap_um": 150.0 },
//!   "materials": { "epsilon_r": 4.4 }
//! }
//! ```
//!
//! Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::estimate::{estimate, EstimateResult};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::{DimensionSet, MaterialSet};
use crate::layout::{layout, Region};
use crate::topology::Topology;

/// Input snapshot for one recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Design {
    pub topology: Topology,
    pub dimensions: DimensionSet,
    pub materials: MaterialSet,
}

/// Everything computed from a [`Design`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    /// Layout regions in draw order
    pub regions: Vec<Region>,
    pub estimate: EstimateResult,
}

impl Design {
    pub fn new(topology: Topology, dimensions: DimensionSet, materials: MaterialSet) -> Self {
        Design {
            topology,
            dimensions,
            materials,
        }
    }

    /// Validate dimensions and materials.
    pub fn validate(&self) -> CalcResult<()> {
        self.dimensions.validate()?;
        self.materials.validate()
    }

    /// Run the layout engine and the estimator on this snapshot.
    ///
    /// Assumes the design has been validated.
    ///
    /// ```rust
    /// use xsect_core::design::Design;
    /// use xsect_core::topology::Topology;
    ///
    /// let design = Design {
    ///     topology: Topology::Coplanar,
    ///     ..Design::default()
    /// };
    /// let derived = design.recompute();
    /// assert_eq!(derived.estimate.z0_ohms, 50.0);
    /// assert_eq!(derived.regions.len(), 5);
    /// ```
    pub fn recompute(&self) -> Derived {
        let regions = layout(self.topology, &self.dimensions);
        let estimate = estimate(self.topology, &self.dimensions, &self.materials);
        debug!(
            topology = self.topology.as_str(),
            regions = regions.len(),
            z0_ohms = estimate.z0_ohms,
            effective_permittivity = estimate.effective_permittivity,
            "recomputed design"
        );
        Derived { regions, estimate }
    }
}

/// Load a design from a JSON file and validate it.
pub fn load_design(path: &Path) -> CalcResult<Design> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let design: Design = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    design.validate()?;
    Ok(design)
}

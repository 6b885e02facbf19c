//! # Transmission-Line Topologies
//!
//! The discrete cross-section families the layout engine and the estimator
//! both dispatch on. Adding a variant here forces both `layout::layout` and
//! `calculations::estimate::estimate` to handle it (their matches are
//! exhaustive).
//!
//! Topologies serialize in kebab-case. Any unrecognized name, whether from
//! JSON or from [`Topology::parse`], falls back to [`Topology::Custom`]
//! instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cross-section family of a planar transmission line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// Signal trace on top of a substrate over a ground plane
    #[default]
    Microstrip,
    /// Signal trace buried in a substrate between two ground planes
    Stripline,
    /// Coplanar waveguide: signal flanked by side grounds, no bottom ground
    Coplanar,
    /// Coplanar waveguide with an additional bottom ground plane
    CoplanarWithGround,
    /// Coplanar waveguide with bottom ground and stitching vias
    GroundedCoplanar,
    /// Bare signal trace; placeholder for user-defined stackups
    #[serde(other)]
    Custom,
}

impl Topology {
    /// All topologies in menu order
    pub const ALL: [Topology; 6] = [
        Topology::Microstrip,
        Topology::Stripline,
        Topology::Coplanar,
        Topology::CoplanarWithGround,
        Topology::GroundedCoplanar,
        Topology::Custom,
    ];

    /// Stable kebab-case identifier (matches the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::Microstrip => "microstrip",
            Topology::Stripline => "stripline",
            Topology::Coplanar => "coplanar",
            Topology::CoplanarWithGround => "coplanar-with-ground",
            Topology::GroundedCoplanar => "grounded-coplanar",
            Topology::Custom => "custom",
        }
    }

    /// Human-readable name for menus and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Topology::Microstrip => "Microstrip",
            Topology::Stripline => "Stripline",
            Topology::Coplanar => "Coplanar Waveguide",
            Topology::CoplanarWithGround => "Coplanar w/ Ground",
            Topology::GroundedCoplanar => "Grounded Coplanar (vias)",
            Topology::Custom => "Custom",
        }
    }

    /// Parse a topology name. Unknown names map to [`Topology::Custom`].
    ///
    /// Accepts the kebab-case identifiers, case-insensitively, with `_`
    /// allowed in place of `-`.
    ///
    /// ```rust
    /// use xsect_core::topology::Topology;
    ///
    /// assert_eq!(Topology::parse("Grounded_Coplanar"), Topology::GroundedCoplanar);
    /// assert_eq!(Topology::parse("slotline"), Topology::Custom);
    /// ```
    pub fn parse(name: &str) -> Topology {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        Topology::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .unwrap_or(Topology::Custom)
    }

    /// Whether this topology has a ground plane below the substrate
    pub fn has_bottom_ground(&self) -> bool {
        matches!(
            self,
            Topology::Microstrip
                | Topology::Stripline
                | Topology::CoplanarWithGround
                | Topology::GroundedCoplanar
        )
    }

    /// Whether the coplanar gap dimension affects this topology
    pub fn uses_coplanar_gap(&self) -> bool {
        matches!(
            self,
            Topology::Coplanar | Topology::CoplanarWithGround | Topology::GroundedCoplanar
        )
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_is_kebab_case() {
        let json = serde_json::to_string(&Topology::CoplanarWithGround).unwrap();
        assert_eq!(json, "\"coplanar-with-ground\"");
        let roundtrip: Topology = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Topology::CoplanarWithGround);
    }

    #[test]
    fn test_unknown_name_deserializes_to_custom() {
        let topology: Topology = serde_json::from_str("\"suspended-stripline\"").unwrap();
        assert_eq!(topology, Topology::Custom);
    }

    #[test]
    fn test_parse_round_trips_identifiers() {
        for topology in Topology::ALL {
            assert_eq!(Topology::parse(topology.as_str()), topology);
        }
        assert_eq!(Topology::parse("  MICROSTRIP "), Topology::Microstrip);
        assert_eq!(Topology::parse(""), Topology::Custom);
    }

    #[test]
    fn test_feature_flags() {
        assert!(Topology::Microstrip.has_bottom_ground());
        assert!(!Topology::Coplanar.has_bottom_ground());
        assert!(!Topology::Custom.has_bottom_ground());
        assert!(Topology::GroundedCoplanar.uses_coplanar_gap());
        assert!(!Topology::Stripline.uses_coplanar_gap());
    }
}

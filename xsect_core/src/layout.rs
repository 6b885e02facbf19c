//! # Cross-Section Layout Engine
//!
//! Converts a [`Topology`] and a [`DimensionSet`] into an ordered list of
//! positioned 2D [`Region`]s: substrate, air, ground planes, the signal
//! conductor and via markers.
//!
//! ## Coordinate Convention
//!
//! ```text
//!        y ▲
//!          │         ┌──┐  signal (trace_height)
//!  ────────┼─────────┴──┴──────────  y = 0  "substrateTop"
//!          │   substrate (substrate_height)
//!  ────────┼───────────────────────  y = -substrate_height
//!          │   bottom ground (ground_thickness)
//!          └──────────────────────▶ x      (x = 0 is the center line)
//! ```
//!
//! Every topology shares the same substrate placement, so all topologies
//! share a baseline. The substrate, the air region and the bottom ground all
//! span exactly `[-substrate_width/2, substrate_width/2]`. Coplanar side
//! grounds are placed by gap math and may be inset or overhang that extent.
//!
//! ## Region Order
//!
//! The returned list is in draw order: substrate, air, grounds, signal, vias.
//!
//! `layout` is a pure function: identical inputs give identical output, and
//! inputs are assumed already validated (strictly positive and finite).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::inputs::DimensionSet;
use crate::topology::Topology;

/// Thickness of both stripline ground planes (µm).
pub const STRIPLINE_GROUND_THICKNESS_UM: f64 = 35.0;

/// Width of each coplanar side ground strip (µm).
pub const COPLANAR_GROUND_WIDTH_UM: f64 = 500.0;

/// Vertical pitch between via markers under a coplanar side ground (µm).
pub const VIA_SPACING_UM: f64 = 200.0;

/// Radius of a via marker (µm).
pub const VIA_RADIUS_UM: f64 = 50.0;

/// What a region is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionRole {
    Substrate,
    Conductor,
    Ground,
    Via,
    Air,
}

impl RegionRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            RegionRole::Substrate => "Substrate",
            RegionRole::Conductor => "Conductor",
            RegionRole::Ground => "Ground",
            RegionRole::Via => "Via",
            RegionRole::Air => "Air",
        }
    }
}

/// Which part of the topology a region plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionTag {
    Substrate,
    Air,
    Signal,
    GroundLeft,
    GroundRight,
    GroundTop,
    GroundBottom,
    /// N-th via under the left side ground, counted from the top (1-based)
    ViaLeft(u32),
    /// N-th via under the right side ground, counted from the top (1-based)
    ViaRight(u32),
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionTag::Substrate => write!(f, "substrate"),
            RegionTag::Air => write!(f, "air"),
            RegionTag::Signal => write!(f, "signal"),
            RegionTag::GroundLeft => write!(f, "ground-left"),
            RegionTag::GroundRight => write!(f, "ground-right"),
            RegionTag::GroundTop => write!(f, "ground-top"),
            RegionTag::GroundBottom => write!(f, "ground-bottom"),
            RegionTag::ViaLeft(n) => write!(f, "via-left-{}", n),
            RegionTag::ViaRight(n) => write!(f, "via-right-{}", n),
        }
    }
}

/// Geometry of a region in physical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rect(Rect),
    Circle { center: Point, radius: f64 },
}

impl Shape {
    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::Rect(rect) => rect,
            Shape::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
        }
    }
}

/// One positioned layout primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub role: RegionRole,
    pub shape: Shape,
    pub tag: RegionTag,
}

impl Region {
    fn rect(role: RegionRole, tag: RegionTag, rect: Rect) -> Self {
        Region { role, shape: Shape::Rect(rect), tag }
    }

    fn via(tag: RegionTag, center: Point) -> Self {
        Region {
            role: RegionRole::Via,
            shape: Shape::Circle { center, radius: VIA_RADIUS_UM },
            tag,
        }
    }

    /// Bounding box in physical coordinates
    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// The rectangle, if this region is rectangular
    pub fn as_rect(&self) -> Option<Rect> {
        match self.shape {
            Shape::Rect(rect) => Some(rect),
            Shape::Circle { .. } => None,
        }
    }
}

/// Compute the cross-section layout for a topology.
///
/// # Example
///
/// ```rust
/// use xsect_core::inputs::DimensionSet;
/// use xsect_core::layout::{layout, find_region, RegionTag};
/// use xsect_core::topology::Topology;
///
/// let dims = DimensionSet::default();
/// let regions = layout(Topology::Microstrip, &dims);
///
/// let signal = find_region(&regions, RegionTag::Signal).unwrap().bounds();
/// assert_eq!(signal.width(), dims.trace_width_um);
/// assert_eq!(signal.y_min, 0.0); // sits on the substrate top
/// ```
pub fn layout(topology: Topology, dims: &DimensionSet) -> Vec<Region> {
    let substrate = Rect::new(
        -dims.substrate_width_um / 2.0,
        -dims.substrate_height_um,
        dims.substrate_width_um / 2.0,
        0.0,
    );
    let on_top = Rect::centered(0.0, dims.trace_width_um, 0.0, dims.trace_height_um);

    // (grounds, signal, vias, y where the air region starts)
    let (grounds, signal, vias, air_base) = match topology {
        Topology::Microstrip => {
            let grounds = vec![bottom_ground(&substrate, dims.ground_thickness_um)];
            (grounds, on_top, Vec::new(), on_top.y_max)
        }
        Topology::Stripline => {
            let top = Rect::new(substrate.x_min, substrate.y_max, substrate.x_max, substrate.y_max + STRIPLINE_GROUND_THICKNESS_UM);
            let grounds = vec![
                Region::rect(RegionRole::Ground, RegionTag::GroundTop, top),
                bottom_ground(&substrate, STRIPLINE_GROUND_THICKNESS_UM),
            ];
            let mid_y = substrate.center().y;
            let signal = Rect::centered(0.0, dims.trace_width_um, mid_y - dims.trace_height_um / 2.0, dims.trace_height_um);
            (grounds, signal, Vec::new(), top.y_max)
        }
        Topology::Coplanar => {
            let grounds = coplanar_side_grounds(dims).to_vec();
            (grounds, on_top, Vec::new(), on_top.y_max)
        }
        Topology::CoplanarWithGround => {
            let mut grounds = coplanar_side_grounds(dims).to_vec();
            grounds.push(bottom_ground(&substrate, dims.ground_thickness_um));
            (grounds, on_top, Vec::new(), on_top.y_max)
        }
        Topology::GroundedCoplanar => {
            let [left, right] = coplanar_side_grounds(dims);
            let mut vias = via_column(&left.bounds(), &substrate, RegionTag::ViaLeft);
            vias.extend(via_column(&right.bounds(), &substrate, RegionTag::ViaRight));
            let grounds = vec![left, right, bottom_ground(&substrate, dims.ground_thickness_um)];
            (grounds, on_top, vias, on_top.y_max)
        }
        Topology::Custom => (Vec::new(), on_top, Vec::new(), on_top.y_max),
    };

    let air = Rect::new(substrate.x_min, air_base, substrate.x_max, air_base + dims.air_height_um);

    let mut regions = Vec::with_capacity(3 + grounds.len() + vias.len());
    regions.push(Region::rect(RegionRole::Substrate, RegionTag::Substrate, substrate));
    regions.push(Region::rect(RegionRole::Air, RegionTag::Air, air));
    regions.extend(grounds);
    regions.push(Region::rect(RegionRole::Conductor, RegionTag::Signal, signal));
    regions.extend(vias);
    regions
}

/// Ground plane directly below the substrate, sharing its horizontal extent.
fn bottom_ground(substrate: &Rect, thickness: f64) -> Region {
    Region::rect(
        RegionRole::Ground,
        RegionTag::GroundBottom,
        Rect::new(substrate.x_min, substrate.y_min - thickness, substrate.x_max, substrate.y_min),
    )
}

/// Side grounds on the substrate top, each `coplanar_gap` away from the signal edge.
fn coplanar_side_grounds(dims: &DimensionSet) -> [Region; 2] {
    let inner = dims.trace_width_um / 2.0 + dims.coplanar_gap_um;
    let outer = inner + COPLANAR_GROUND_WIDTH_UM;
    [
        Region::rect(
            RegionRole::Ground,
            RegionTag::GroundLeft,
            Rect::new(-outer, 0.0, -inner, dims.trace_height_um),
        ),
        Region::rect(
            RegionRole::Ground,
            RegionTag::GroundRight,
            Rect::new(inner, 0.0, outer, dims.trace_height_um),
        ),
    ]
}

/// Evenly spaced via markers under a side ground, stopping before one would
/// touch the substrate bottom.
fn via_column(ground: &Rect, substrate: &Rect, tag: fn(u32) -> RegionTag) -> Vec<Region> {
    let x = ground.center().x;
    let top = ground.y_min;
    let bottom = substrate.y_min;

    let mut vias = Vec::new();
    let mut k = 1u32;
    loop {
        let y = top - f64::from(k) * VIA_SPACING_UM;
        if !(y - VIA_RADIUS_UM > bottom && y + VIA_RADIUS_UM < top) {
            break;
        }
        vias.push(Region::via(tag(k), Point::new(x, y)));
        k += 1;
    }
    vias
}

/// Bounding box of all regions, or `None` for an empty list
pub fn layout_bounds(regions: &[Region]) -> Option<Rect> {
    regions
        .iter()
        .map(Region::bounds)
        .reduce(|acc, r| acc.union(&r))
}

/// First region carrying `tag`
pub fn find_region(regions: &[Region], tag: RegionTag) -> Option<&Region> {
    regions.iter().find(|r| r.tag == tag)
}

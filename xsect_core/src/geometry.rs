//! # Geometry Primitives
//!
//! Two coordinate spaces meet in this crate and get distinct types so they
//! cannot be mixed up:
//!
//! - **Physical** ([`Point`], [`Rect`]): micrometers, x to the right, y up.
//! - **Surface** ([`SurfacePoint`], [`SurfaceSize`]): rendering units (pixels),
//!   x to the right, y down, origin at the top-left of the drawing surface.
//!
//! Only [`crate::view::ViewTransform`] converts between them.

use serde::{Deserialize, Serialize};

/// A point in physical space (micrometers, y up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in physical space.
///
/// Stored as edges rather than origin + size so that shared edges between
/// stacked regions compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Rect { x_min, y_min, x_max, y_max }
    }

    /// Rectangle of the given width centered horizontally on `center_x`,
    /// spanning `y_min..y_min + height`.
    pub fn centered(center_x: f64, width: f64, y_min: f64, height: f64) -> Self {
        Rect::new(center_x - width / 2.0, y_min, center_x + width / 2.0, y_min + height)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }

    /// Top-left corner (max y, since y points up)
    pub fn top_left(&self) -> Point {
        Point::new(self.x_min, self.y_max)
    }

    /// Bottom-right corner
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x_max, self.y_min)
    }

    /// Check if point is inside rectangle (edges inclusive)
    pub fn contains(&self, p: Point) -> bool {
        self.x_min <= p.x && p.x <= self.x_max && self.y_min <= p.y && p.y <= self.y_max
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }

    /// True when the interiors overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }
}

/// A point on the rendering surface (pixels, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        SurfacePoint { x, y }
    }
}

/// Size of the rendering surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        SurfaceSize { width, height }
    }

    pub fn center(&self) -> SurfacePoint {
        SurfacePoint::new(self.width / 2.0, self.height / 2.0)
    }
}

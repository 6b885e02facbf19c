//! # View Transform
//!
//! Maps between physical coordinates (µm, y up) and surface coordinates
//! (pixels, y down) under the current zoom and pan.
//!
//! ## Mapping
//!
//! ```text
//! surface.x = origin.x + pan.x + zoom · scale · physical.x
//! surface.y = origin.y + pan.y - zoom · scale · physical.y
//! ```
//!
//! - `scale` is the fixed model scale in pixels per micrometer.
//! - `origin` is where the physical origin lands at zoom 1, pan 0 (the
//!   viewport center). It moves only when the viewport is resized.
//! - `zoom` and `pan` form the [`ViewState`], the only part user interaction
//!   changes.
//!
//! ## Anchored Zoom
//!
//! Zooming toward an anchor keeps the physical point under the anchor fixed.
//! With `a` the anchor relative to `origin` and `r = new_zoom / old_zoom`
//! (after clamping):
//!
//! ```text
//! new_pan = a - (a - old_pan) · r
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{Point, SurfacePoint, SurfaceSize};

/// View configuration, loaded as part of [`crate::settings::Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Lowest zoom level; requests below clamp to this
    pub min_zoom: f64,
    /// Highest zoom level; requests above clamp to this
    pub max_zoom: f64,
    /// Multiplicative step of one zoom button press or wheel line
    pub zoom_step: f64,
    /// Model scale: surface pixels per micrometer at zoom 1
    pub pixels_per_um: f64,
    /// Viewport assumed until the surface reports its real size
    pub default_viewport: SurfaceSize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.2,
            pixels_per_um: 0.2,
            default_viewport: SurfaceSize::new(800.0, 480.0),
        }
    }
}

impl ViewSettings {
    /// Validate that the zoom range contains 1.0 and the scale is usable.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.min_zoom > 0.0 && self.min_zoom.is_finite()) {
            return Err(CalcError::invalid_input("view.min_zoom", self.min_zoom.to_string(), "Must be positive"));
        }
        if !(self.max_zoom >= 1.0 && self.max_zoom.is_finite()) || self.min_zoom > 1.0 {
            return Err(CalcError::invalid_input(
                "view.max_zoom",
                format!("{}..{}", self.min_zoom, self.max_zoom),
                "Zoom range must contain 1.0",
            ));
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(CalcError::invalid_input("view.zoom_step", self.zoom_step.to_string(), "Must be greater than 1"));
        }
        if !(self.pixels_per_um > 0.0 && self.pixels_per_um.is_finite()) {
            return Err(CalcError::invalid_input(
                "view.pixels_per_um",
                self.pixels_per_um.to_string(),
                "Must be positive",
            ));
        }
        Ok(())
    }
}

/// Zoom level and pan offset (surface pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Owner of the [`ViewState`] and the physical <-> surface mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    state: ViewState,
    origin: SurfacePoint,
    pixels_per_um: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl ViewTransform {
    /// New transform at zoom 1, no pan, centered on the default viewport.
    pub fn new(settings: &ViewSettings) -> Self {
        ViewTransform {
            state: ViewState::default(),
            origin: settings.default_viewport.center(),
            pixels_per_um: settings.pixels_per_um,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn origin(&self) -> SurfacePoint {
        self.origin
    }

    /// Move the surface origin (called when the viewport is resized)
    pub fn set_origin(&mut self, origin: SurfacePoint) {
        self.origin = origin;
    }

    /// Effective scale in surface pixels per micrometer
    pub fn scale(&self) -> f64 {
        self.state.zoom * self.pixels_per_um
    }

    /// Map a physical point onto the surface
    pub fn to_surface(&self, p: Point) -> SurfacePoint {
        let s = self.scale();
        SurfacePoint::new(
            self.origin.x + self.state.pan_x + s * p.x,
            self.origin.y + self.state.pan_y - s * p.y,
        )
    }

    /// Map a surface point back to physical space (inverse of `to_surface`)
    pub fn to_physical(&self, p: SurfacePoint) -> Point {
        let s = self.scale();
        Point::new(
            (p.x - self.origin.x - self.state.pan_x) / s,
            -(p.y - self.origin.y - self.state.pan_y) / s,
        )
    }

    /// Convert a physical length to surface pixels
    pub fn length_to_surface(&self, um: f64) -> f64 {
        um * self.scale()
    }

    /// Clamp a requested zoom level into the configured range
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Zoom to `requested` (clamped), keeping the point under `anchor` fixed.
    ///
    /// Returns `true` if the view changed. Non-finite requests are ignored.
    pub fn zoom_at(&mut self, anchor: SurfacePoint, requested: f64) -> bool {
        if !requested.is_finite() {
            return false;
        }
        let old_zoom = self.state.zoom;
        let new_zoom = self.clamp_zoom(requested);
        if new_zoom == old_zoom {
            return false;
        }

        let ratio = new_zoom / old_zoom;
        let ax = anchor.x - self.origin.x;
        let ay = anchor.y - self.origin.y;
        self.state.pan_x = ax - (ax - self.state.pan_x) * ratio;
        self.state.pan_y = ay - (ay - self.state.pan_y) * ratio;
        self.state.zoom = new_zoom;
        true
    }

    /// Multiply the zoom by `factor` around `anchor`
    pub fn zoom_by(&mut self, anchor: SurfacePoint, factor: f64) -> bool {
        self.zoom_at(anchor, self.state.zoom * factor)
    }

    /// Shift the view by a surface-space offset (independent of zoom)
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.state.pan_x += dx;
        self.state.pan_y += dy;
    }

    /// Restore zoom 1.0 and zero pan
    pub fn reset(&mut self) {
        self.state = ViewState::default();
    }
}

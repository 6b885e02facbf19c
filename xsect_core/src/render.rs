//! # Cross-Section Renderer
//!
//! Draws a region list onto a [`Surface`] under a [`ViewTransform`]. Every
//! call clears and redraws the whole surface; there is no incremental state.
//!
//! ## Draw Order
//!
//! 1. background clear
//! 2. grid
//! 3. regions, in list order (substrate, air, grounds, signal, vias)
//! 4. dimension annotations (trace width, substrate height)
//! 5. coordinate-axis glyph
//!
//! Later layers paint over earlier ones. Annotations are measured from the
//! region list itself, so the numbers shown always match the shapes drawn.
//!
//! The surface is a trait so the same renderer feeds the iced canvas in the
//! GUI, the SVG writer in the CLI and the recording surface in tests.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, SurfacePoint, SurfaceSize};
use crate::layout::{find_region, Region, RegionRole, RegionTag, Shape};
use crate::units::Micrometers;
use crate::view::ViewTransform;

/// Minimum on-screen spacing between grid lines (pixels)
pub const MIN_GRID_SPACING_PX: f64 = 24.0;

/// Upper bound on grid lines per axis, whatever the zoom
const MAX_GRID_LINES: i64 = 400;

/// RGBA color, components in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// `#rrggbb` form (alpha dropped)
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Horizontal anchoring of a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Draw-call sink the renderer targets.
///
/// Coordinates are surface pixels, y down, origin at the top-left corner.
pub trait Surface {
    fn size(&self) -> SurfaceSize;
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, top_left: SurfacePoint, size: SurfaceSize, color: Rgba);
    fn stroke_rect(&mut self, top_left: SurfacePoint, size: SurfaceSize, color: Rgba, width: f64);
    fn fill_circle(&mut self, center: SurfacePoint, radius: f64, color: Rgba);
    fn line(&mut self, from: SurfacePoint, to: SurfacePoint, color: Rgba, width: f64);
    fn text(&mut self, at: SurfacePoint, content: &str, size: f64, color: Rgba, align: TextAlign);
}

/// Palette and toggles for a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background: Rgba,
    pub grid: Rgba,
    pub substrate: Rgba,
    pub air: Rgba,
    pub conductor: Rgba,
    pub ground: Rgba,
    pub via: Rgba,
    pub outline: Rgba,
    pub annotation: Rgba,
    pub axis: Rgba,
    pub label_size: f64,
    /// Distance between a measured edge and its annotation line (pixels)
    pub annotation_offset: f64,
    pub show_grid: bool,
    pub show_annotations: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            background: Rgba::rgb(0.98, 0.98, 0.97),
            grid: Rgba::rgb(0.90, 0.90, 0.90),
            substrate: Rgba::rgb(0.55, 0.72, 0.45),
            air: Rgba::rgba(0.80, 0.90, 1.00, 0.35),
            conductor: Rgba::rgb(0.85, 0.55, 0.20),
            ground: Rgba::rgb(0.55, 0.55, 0.58),
            via: Rgba::rgb(0.70, 0.45, 0.15),
            outline: Rgba::rgb(0.25, 0.25, 0.25),
            annotation: Rgba::rgb(0.15, 0.25, 0.60),
            axis: Rgba::rgb(0.30, 0.30, 0.30),
            label_size: 11.0,
            annotation_offset: 14.0,
            show_grid: true,
            show_annotations: true,
        }
    }
}

impl RenderStyle {
    pub fn fill_for(&self, role: RegionRole) -> Rgba {
        match role {
            RegionRole::Substrate => self.substrate,
            RegionRole::Air => self.air,
            RegionRole::Conductor => self.conductor,
            RegionRole::Ground => self.ground,
            RegionRole::Via => self.via,
        }
    }
}

/// Which extent an annotation measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKind {
    TraceWidth,
    SubstrateHeight,
}

/// A measured extent in physical space, with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAnnotation {
    pub kind: AnnotationKind,
    pub start: Point,
    pub end: Point,
    pub value_um: f64,
    pub label: String,
}

/// Annotations measured from the region list.
///
/// Trace width runs along the top edge of the signal; substrate height runs
/// along the left edge of the substrate. Missing regions yield no annotation.
pub fn dimension_annotations(regions: &[Region]) -> Vec<DimensionAnnotation> {
    let mut annotations = Vec::with_capacity(2);

    if let Some(signal) = find_region(regions, RegionTag::Signal) {
        let b = signal.bounds();
        annotations.push(DimensionAnnotation {
            kind: AnnotationKind::TraceWidth,
            start: Point::new(b.x_min, b.y_max),
            end: Point::new(b.x_max, b.y_max),
            value_um: b.width(),
            label: Micrometers(b.width()).to_string(),
        });
    }

    if let Some(substrate) = find_region(regions, RegionTag::Substrate) {
        let b = substrate.bounds();
        annotations.push(DimensionAnnotation {
            kind: AnnotationKind::SubstrateHeight,
            start: Point::new(b.x_min, b.y_min),
            end: Point::new(b.x_min, b.y_max),
            value_um: b.height(),
            label: Micrometers(b.height()).to_string(),
        });
    }

    annotations
}

/// Grid pitch in micrometers for a given scale (pixels per µm).
///
/// Picks the smallest 1-2-5 × 10ⁿ step that is at least
/// [`MIN_GRID_SPACING_PX`] apart on screen. `None` for unusable scales.
///
/// ```rust
/// use xsect_core::render::grid_step_um;
///
/// assert_eq!(grid_step_um(0.2), Some(200.0)); // 40 px apart
/// assert_eq!(grid_step_um(2.0), Some(20.0));
/// ```
pub fn grid_step_um(pixels_per_um: f64) -> Option<f64> {
    if !(pixels_per_um > 0.0 && pixels_per_um.is_finite()) {
        return None;
    }
    let min_um = MIN_GRID_SPACING_PX / pixels_per_um;
    let decade = 10f64.powi(min_um.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * decade)
        .find(|step| *step >= min_um)
}

/// Clear the surface and draw the full scene.
pub fn render<S: Surface + ?Sized>(surface: &mut S, regions: &[Region], transform: &ViewTransform, style: &RenderStyle) {
    surface.clear(style.background);

    if style.show_grid {
        draw_grid(surface, transform, style);
    }

    for region in regions {
        draw_region(surface, region, transform, style);
    }

    if style.show_annotations {
        for annotation in dimension_annotations(regions) {
            draw_annotation(surface, &annotation, transform, style);
        }
    }

    draw_axis_glyph(surface, style);
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, transform: &ViewTransform, style: &RenderStyle) {
    let Some(step) = grid_step_um(transform.scale()) else {
        return;
    };
    let size = surface.size();
    let top_left = transform.to_physical(SurfacePoint::new(0.0, 0.0));
    let bottom_right = transform.to_physical(SurfacePoint::new(size.width, size.height));

    for x in grid_positions(top_left.x, bottom_right.x, step) {
        let sx = transform.to_surface(Point::new(x, 0.0)).x;
        surface.line(SurfacePoint::new(sx, 0.0), SurfacePoint::new(sx, size.height), style.grid, 1.0);
    }
    // Physical y decreases down the surface
    for y in grid_positions(bottom_right.y, top_left.y, step) {
        let sy = transform.to_surface(Point::new(0.0, y)).y;
        surface.line(SurfacePoint::new(0.0, sy), SurfacePoint::new(size.width, sy), style.grid, 1.0);
    }
}

/// Multiples of `step` within `[min, max]`
fn grid_positions(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step).ceil() as i64;
    let last = ((max / step).floor() as i64).min(first.saturating_add(MAX_GRID_LINES));
    (first..=last).map(move |k| k as f64 * step)
}

fn draw_region<S: Surface + ?Sized>(surface: &mut S, region: &Region, transform: &ViewTransform, style: &RenderStyle) {
    let fill = style.fill_for(region.role);
    match region.shape {
        Shape::Rect(rect) => {
            let top_left = transform.to_surface(rect.top_left());
            let bottom_right = transform.to_surface(rect.bottom_right());
            let size = SurfaceSize::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y);
            surface.fill_rect(top_left, size, fill);
            if region.role != RegionRole::Air {
                surface.stroke_rect(top_left, size, style.outline, 1.0);
            }
        }
        Shape::Circle { center, radius } => {
            surface.fill_circle(transform.to_surface(center), transform.length_to_surface(radius), fill);
        }
    }
}

fn draw_annotation<S: Surface + ?Sized>(
    surface: &mut S,
    annotation: &DimensionAnnotation,
    transform: &ViewTransform,
    style: &RenderStyle,
) {
    let offset = style.annotation_offset;
    let tick = offset / 3.0;
    let start = transform.to_surface(annotation.start);
    let end = transform.to_surface(annotation.end);
    let color = style.annotation;

    match annotation.kind {
        AnnotationKind::TraceWidth => {
            // Above the measured edge
            let y = start.y - offset;
            surface.line(SurfacePoint::new(start.x, y), SurfacePoint::new(end.x, y), color, 1.0);
            surface.line(SurfacePoint::new(start.x, y - tick), SurfacePoint::new(start.x, y + tick), color, 1.0);
            surface.line(SurfacePoint::new(end.x, y - tick), SurfacePoint::new(end.x, y + tick), color, 1.0);
            let at = SurfacePoint::new((start.x + end.x) / 2.0, y - tick - style.label_size);
            surface.text(at, &annotation.label, style.label_size, color, TextAlign::Center);
        }
        AnnotationKind::SubstrateHeight => {
            // Left of the measured edge
            let x = start.x - offset;
            surface.line(SurfacePoint::new(x, start.y), SurfacePoint::new(x, end.y), color, 1.0);
            surface.line(SurfacePoint::new(x - tick, start.y), SurfacePoint::new(x + tick, start.y), color, 1.0);
            surface.line(SurfacePoint::new(x - tick, end.y), SurfacePoint::new(x + tick, end.y), color, 1.0);
            let at = SurfacePoint::new(x - tick - 2.0, (start.y + end.y) / 2.0 - style.label_size / 2.0);
            surface.text(at, &annotation.label, style.label_size, color, TextAlign::End);
        }
    }
}

/// Fixed-size x/y glyph in the bottom-left corner, independent of zoom and pan.
fn draw_axis_glyph<S: Surface + ?Sized>(surface: &mut S, style: &RenderStyle) {
    const MARGIN: f64 = 16.0;
    const LENGTH: f64 = 36.0;
    const HEAD: f64 = 5.0;

    let size = surface.size();
    let origin = SurfacePoint::new(MARGIN, size.height - MARGIN);
    let x_tip = SurfacePoint::new(origin.x + LENGTH, origin.y);
    let y_tip = SurfacePoint::new(origin.x, origin.y - LENGTH);
    let color = style.axis;

    surface.line(origin, x_tip, color, 1.5);
    surface.line(x_tip, SurfacePoint::new(x_tip.x - HEAD, x_tip.y - HEAD), color, 1.5);
    surface.line(x_tip, SurfacePoint::new(x_tip.x - HEAD, x_tip.y + HEAD), color, 1.5);
    surface.line(origin, y_tip, color, 1.5);
    surface.line(y_tip, SurfacePoint::new(y_tip.x - HEAD, y_tip.y + HEAD), color, 1.5);
    surface.line(y_tip, SurfacePoint::new(y_tip.x + HEAD, y_tip.y + HEAD), color, 1.5);

    let label = style.label_size;
    surface.text(SurfacePoint::new(x_tip.x + 4.0, x_tip.y - label / 2.0), "x", label, color, TextAlign::Start);
    surface.text(SurfacePoint::new(y_tip.x, y_tip.y - label - 4.0), "y", label, color, TextAlign::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::DimensionSet;
    use crate::layout::layout;
    use crate::topology::Topology;
    use crate::view::ViewSettings;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        FillRect(Rgba),
        StrokeRect,
        FillCircle(Rgba),
        Line(Rgba),
        Text(String),
    }

    struct Recorder {
        size: SurfaceSize,
        calls: Vec<Call>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                size: SurfaceSize::new(800.0, 480.0),
                calls: Vec::new(),
            }
        }

        fn position(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().position(pred).expect("call not recorded")
        }

        fn rposition(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().rposition(pred).expect("call not recorded")
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> SurfaceSize {
            self.size
        }
        fn clear(&mut self, _color: Rgba) {
            self.calls.push(Call::Clear);
        }
        fn fill_rect(&mut self, _top_left: SurfacePoint, _size: SurfaceSize, color: Rgba) {
            self.calls.push(Call::FillRect(color));
        }
        fn stroke_rect(&mut self, _top_left: SurfacePoint, _size: SurfaceSize, _color: Rgba, _width: f64) {
            self.calls.push(Call::StrokeRect);
        }
        fn fill_circle(&mut self, _center: SurfacePoint, _radius: f64, color: Rgba) {
            self.calls.push(Call::FillCircle(color));
        }
        fn line(&mut self, _from: SurfacePoint, _to: SurfacePoint, color: Rgba, _width: f64) {
            self.calls.push(Call::Line(color));
        }
        fn text(&mut self, _at: SurfacePoint, content: &str, _size: f64, _color: Rgba, _align: TextAlign) {
            self.calls.push(Call::Text(content.to_string()));
        }
    }

    fn dims() -> DimensionSet {
        DimensionSet {
            trace_width_um: 100.0,
            substrate_height_um: 1600.0,
            substrate_width_um: 5000.0,
            ..DimensionSet::default()
        }
    }

    fn transform() -> ViewTransform {
        ViewTransform::new(&ViewSettings::default())
    }

    #[test]
    fn test_draw_order() {
        let style = RenderStyle::default();
        let regions = layout(Topology::GroundedCoplanar, &dims());
        let mut surface = Recorder::new();
        render(&mut surface, &regions, &transform(), &style);

        assert_eq!(surface.calls[0], Call::Clear);

        let first_grid = surface.position(|c| *c == Call::Line(style.grid));
        let last_grid = surface.rposition(|c| *c == Call::Line(style.grid));
        let substrate = surface.position(|c| *c == Call::FillRect(style.substrate));
        let air = surface.position(|c| *c == Call::FillRect(style.air));
        let ground = surface.position(|c| *c == Call::FillRect(style.ground));
        let signal = surface.position(|c| *c == Call::FillRect(style.conductor));
        let first_via = surface.position(|c| *c == Call::FillCircle(style.via));
        let last_via = surface.rposition(|c| *c == Call::FillCircle(style.via));
        let annotation = surface.position(|c| *c == Call::Line(style.annotation));
        let axis = surface.position(|c| *c == Call::Line(style.axis));

        assert!(first_grid > 0);
        assert!(last_grid < substrate);
        assert!(substrate < air && air < ground && ground < signal && signal < first_via);
        assert!(last_via < annotation);
        assert!(annotation < axis);
        assert_eq!(surface.calls.last(), Some(&Call::Text("y".to_string())));
    }

    #[test]
    fn test_every_region_is_drawn() {
        let style = RenderStyle::default();
        let regions = layout(Topology::GroundedCoplanar, &dims());
        let mut surface = Recorder::new();
        render(&mut surface, &regions, &transform(), &style);

        let fills = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::FillRect(_) | Call::FillCircle(_)))
            .count();
        assert_eq!(fills, regions.len());
    }

    #[test]
    fn test_annotations_match_regions() {
        let regions = layout(Topology::Microstrip, &dims());
        let annotations = dimension_annotations(&regions);
        assert_eq!(annotations.len(), 2);

        let width = &annotations[0];
        assert_eq!(width.kind, AnnotationKind::TraceWidth);
        assert_eq!(width.value_um, 100.0);
        assert_eq!(width.label, "100 µm");
        assert_eq!(width.start, Point::new(-50.0, 35.0));

        let height = &annotations[1];
        assert_eq!(height.kind, AnnotationKind::SubstrateHeight);
        assert_eq!(height.value_um, 1600.0);
        assert_eq!(height.label, "1.60 mm");
        assert_eq!(height.start, Point::new(-2500.0, -1600.0));
        assert_eq!(height.end, Point::new(-2500.0, 0.0));
    }

    #[test]
    fn test_annotation_labels_are_rendered() {
        let regions = layout(Topology::Stripline, &dims());
        let mut surface = Recorder::new();
        render(&mut surface, &regions, &transform(), &RenderStyle::default());
        assert!(surface.calls.contains(&Call::Text("100 µm".to_string())));
        assert!(surface.calls.contains(&Call::Text("1.60 mm".to_string())));
    }

    #[test]
    fn test_toggles() {
        let style = RenderStyle {
            show_grid: false,
            show_annotations: false,
            ..RenderStyle::default()
        };
        let regions = layout(Topology::Microstrip, &dims());
        let mut surface = Recorder::new();
        render(&mut surface, &regions, &transform(), &style);
        assert!(!surface.calls.contains(&Call::Line(style.grid)));
        assert!(!surface.calls.contains(&Call::Line(style.annotation)));
        assert!(surface.calls.contains(&Call::Text("x".to_string())));
    }

    #[test]
    fn test_empty_region_list_still_draws_frame() {
        let mut surface = Recorder::new();
        render(&mut surface, &[], &transform(), &RenderStyle::default());
        assert_eq!(surface.calls[0], Call::Clear);
        assert!(!surface.calls.iter().any(|c| matches!(c, Call::FillRect(_))));
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let regions = layout(Topology::Coplanar, &dims());
        let t = transform();
        let style = RenderStyle::default();
        let mut a = Recorder::new();
        let mut b = Recorder::new();
        render(&mut a, &regions, &t, &style);
        render(&mut b, &regions, &t, &style);
        render(&mut b, &regions, &t, &style);
        assert_eq!(b.calls.len(), 2 * a.calls.len());
        assert_eq!(&b.calls[a.calls.len()..], &a.calls[..]);
    }

    #[test]
    fn test_grid_survives_extreme_pan() {
        let style = RenderStyle::default();
        let regions = layout(Topology::Microstrip, &dims());
        for (dx, dy) in [(-f64::MAX, f64::MAX), (f64::MAX, -f64::MAX)] {
            let mut t = transform();
            t.pan_by(dx, dy);
            let mut surface = Recorder::new();
            render(&mut surface, &regions, &t, &style);
            assert_eq!(surface.calls[0], Call::Clear);
        }
    }

    #[test]
    fn test_grid_positions_are_bounded() {
        assert_eq!(grid_positions(f64::INFINITY, f64::INFINITY, 100.0).count(), 1);
        assert_eq!(grid_positions(0.0, 1e12, 1.0).count(), MAX_GRID_LINES as usize + 1);
        assert_eq!(grid_positions(-250.0, 250.0, 100.0).collect::<Vec<_>>(), vec![-200.0, -100.0, 0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_grid_step_progression() {
        assert_eq!(grid_step_um(0.2), Some(200.0));
        assert_eq!(grid_step_um(0.25), Some(100.0));
        assert_eq!(grid_step_um(0.1), Some(500.0));
        assert_eq!(grid_step_um(0.0), None);
        assert_eq!(grid_step_um(f64::NAN), None);

        for scale in [0.013, 0.02, 0.2, 0.75, 1.9, 2.0] {
            let step = grid_step_um(scale).unwrap();
            assert!(step * scale >= MIN_GRID_SPACING_PX, "scale {}: step {}", scale, step);
            // Next smaller 1-2-5 step would be too dense
            assert!(step * scale < MIN_GRID_SPACING_PX * 2.5 + 1e-9, "scale {}: step {}", scale, step);
        }
    }

    #[test]
    fn test_rgba_hex() {
        assert_eq!(Rgba::rgb(1.0, 0.0, 0.5).to_hex(), "#ff0080");
    }
}

//! # Interaction Controller
//!
//! Translates pointer, wheel and button input into [`ViewTransform`] updates.
//! The controller owns the transform, so it is the only thing that can change
//! the view state. Geometry changes never touch it.
//!
//! Every entry point raises a redraw request, except calls that turn out to be
//! no-ops (a zero wheel delta, zooming past a limit, moving without a drag).
//! The host (the iced canvas, a test) polls it with
//! [`InteractionController::take_redraw`].
//!
//! ```rust
//! use xsect_core::geometry::SurfacePoint;
//! use xsect_core::interaction::InteractionController;
//! use xsect_core::view::ViewSettings;
//!
//! let mut controller = InteractionController::new(&ViewSettings::default());
//! controller.take_redraw();
//!
//! controller.on_drag_start(SurfacePoint::new(100.0, 100.0));
//! controller.on_drag_move(SurfacePoint::new(130.0, 90.0));
//! controller.on_drag_end();
//!
//! assert!(controller.take_redraw());
//! assert_eq!(controller.view_state().pan_x, 30.0);
//! ```

use tracing::trace;

use crate::geometry::{SurfacePoint, SurfaceSize};
use crate::view::{ViewSettings, ViewState, ViewTransform};

/// Pointer-driven owner of the view transform.
#[derive(Debug, Clone)]
pub struct InteractionController {
    transform: ViewTransform,
    viewport: SurfaceSize,
    zoom_step: f64,
    /// Last pointer position while a drag is in progress
    drag_from: Option<SurfacePoint>,
    redraw: bool,
}

impl InteractionController {
    pub fn new(settings: &ViewSettings) -> Self {
        InteractionController {
            transform: ViewTransform::new(settings),
            viewport: settings.default_viewport,
            zoom_step: settings.zoom_step,
            drag_from: None,
            // First frame always needs drawing
            redraw: true,
        }
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn view_state(&self) -> ViewState {
        self.transform.state()
    }

    pub fn viewport(&self) -> SurfaceSize {
        self.viewport
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Report the surface size; the physical origin follows the viewport center.
    pub fn set_viewport(&mut self, size: SurfaceSize) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.transform.set_origin(size.center());
        self.redraw = true;
    }

    /// Zoom around the cursor. `delta` is in wheel lines; positive zooms in.
    pub fn on_wheel(&mut self, anchor: SurfacePoint, delta: f64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let factor = self.zoom_step.powf(delta);
        if self.transform.zoom_by(anchor, factor) {
            trace!(zoom = self.transform.zoom(), "wheel zoom");
            self.redraw = true;
        }
    }

    /// Begin a pan. The view is unchanged, but the host redraws the grab state.
    pub fn on_drag_start(&mut self, at: SurfacePoint) {
        self.drag_from = Some(at);
        self.redraw = true;
    }

    /// Pan by the pointer movement since the last drag event.
    pub fn on_drag_move(&mut self, to: SurfacePoint) {
        let Some(from) = self.drag_from else {
            return;
        };
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        self.drag_from = Some(to);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.transform.pan_by(dx, dy);
        self.redraw = true;
    }

    pub fn on_drag_end(&mut self) {
        self.drag_from = None;
        self.redraw = true;
    }

    /// Zoom in one step around the viewport center
    pub fn zoom_in(&mut self) {
        self.zoom_centered(self.zoom_step);
    }

    /// Zoom out one step around the viewport center
    pub fn zoom_out(&mut self) {
        self.zoom_centered(1.0 / self.zoom_step);
    }

    /// Back to zoom 1.0 and no pan
    pub fn reset_view(&mut self) {
        self.transform.reset();
        self.drag_from = None;
        trace!("view reset");
        self.redraw = true;
    }

    /// Return and clear the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn zoom_centered(&mut self, factor: f64) {
        if self.transform.zoom_by(self.viewport.center(), factor) {
            trace!(zoom = self.transform.zoom(), "button zoom");
            self.redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> InteractionController {
        let mut c = InteractionController::new(&ViewSettings::default());
        c.take_redraw();
        c
    }

    #[test]
    fn test_zoom_buttons_round_trip() {
        let mut c = controller();
        let start = c.view_state().zoom;
        c.zoom_in();
        c.zoom_in();
        c.zoom_out();
        c.zoom_out();
        assert!((c.view_state().zoom - start).abs() < 1e-12);
        assert!(c.take_redraw());
    }

    #[test]
    fn test_center_zoom_keeps_center_fixed() {
        let mut c = controller();
        c.on_drag_start(SurfacePoint::new(0.0, 0.0));
        c.on_drag_move(SurfacePoint::new(35.0, -12.0));
        c.on_drag_end();

        let center = c.viewport().center();
        let before = c.transform().to_physical(center);
        c.zoom_in();
        let after = c.transform().to_physical(center);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_direction() {
        let mut c = controller();
        c.on_wheel(SurfacePoint::new(10.0, 10.0), 1.0);
        assert!(c.view_state().zoom > 1.0);
        c.reset_view();
        c.on_wheel(SurfacePoint::new(10.0, 10.0), -2.0);
        assert!((c.view_state().zoom - 1.0 / 1.44).abs() < 1e-12);
    }

    #[test]
    fn test_zero_wheel_is_noop() {
        let mut c = controller();
        c.on_wheel(SurfacePoint::new(10.0, 10.0), 0.0);
        assert!(!c.take_redraw());
        assert_eq!(c.view_state(), ViewState::default());
    }

    #[test]
    fn test_drag_requires_start() {
        let mut c = controller();
        c.on_drag_move(SurfacePoint::new(50.0, 50.0));
        assert_eq!(c.view_state(), ViewState::default());
        assert!(!c.take_redraw());

        c.on_drag_start(SurfacePoint::new(50.0, 50.0));
        assert!(c.is_dragging());
        c.on_drag_move(SurfacePoint::new(60.0, 45.0));
        c.on_drag_move(SurfacePoint::new(70.0, 40.0));
        c.on_drag_end();
        assert!(!c.is_dragging());

        let state = c.view_state();
        assert_eq!((state.pan_x, state.pan_y), (20.0, -10.0));

        // Moves after the drag ended are ignored
        c.on_drag_move(SurfacePoint::new(500.0, 500.0));
        assert_eq!(c.view_state(), state);
    }

    #[test]
    fn test_every_drag_step_requests_redraw() {
        let mut c = controller();
        c.on_drag_start(SurfacePoint::new(10.0, 10.0));
        assert!(c.take_redraw());
        c.on_drag_move(SurfacePoint::new(20.0, 10.0));
        assert!(c.take_redraw());
        c.on_drag_end();
        assert!(c.take_redraw());
    }

    #[test]
    fn test_zoom_at_limit_requests_no_redraw() {
        let mut c = controller();
        for _ in 0..40 {
            c.zoom_in();
        }
        assert_eq!(c.view_state().zoom, 10.0);
        c.take_redraw();
        c.zoom_in();
        assert!(!c.take_redraw());
    }

    #[test]
    fn test_viewport_resize_moves_origin() {
        let mut c = controller();
        c.set_viewport(SurfaceSize::new(1000.0, 600.0));
        assert_eq!(c.transform().origin(), SurfacePoint::new(500.0, 300.0));
        assert!(c.take_redraw());
        c.set_viewport(SurfaceSize::new(1000.0, 600.0));
        assert!(!c.take_redraw());
    }

    #[test]
    fn test_reset_clears_drag() {
        let mut c = controller();
        c.on_drag_start(SurfacePoint::new(1.0, 1.0));
        c.reset_view();
        assert!(!c.is_dragging());
        assert!(c.take_redraw());
    }

    #[derive(Debug, Clone)]
    enum Gesture {
        Wheel(f64, f64, f64),
        Drag(f64, f64, f64, f64),
        ZoomIn,
        ZoomOut,
    }

    fn arb_gesture() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            (0.0..800.0f64, 0.0..480.0f64, -5.0..5.0f64).prop_map(|(x, y, d)| Gesture::Wheel(x, y, d)),
            (0.0..800.0f64, 0.0..480.0f64, 0.0..800.0f64, 0.0..480.0f64)
                .prop_map(|(a, b, c, d)| Gesture::Drag(a, b, c, d)),
            Just(Gesture::ZoomIn),
            Just(Gesture::ZoomOut),
        ]
    }

    proptest! {
        #[test]
        fn prop_reset_restores_identity(gestures in prop::collection::vec(arb_gesture(), 0..30)) {
            let mut c = controller();
            for gesture in gestures {
                match gesture {
                    Gesture::Wheel(x, y, d) => c.on_wheel(SurfacePoint::new(x, y), d),
                    Gesture::Drag(x0, y0, x1, y1) => {
                        c.on_drag_start(SurfacePoint::new(x0, y0));
                        c.on_drag_move(SurfacePoint::new(x1, y1));
                        c.on_drag_end();
                    }
                    Gesture::ZoomIn => c.zoom_in(),
                    Gesture::ZoomOut => c.zoom_out(),
                }
                let zoom = c.view_state().zoom;
                prop_assert!((0.1..=10.0).contains(&zoom));
            }
            c.reset_view();
            prop_assert_eq!(c.view_state(), ViewState { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 });
        }
    }
}

//! # XSect GUI Application
//!
//! Interactive cross-section editor. The parameter form on the left drives
//! the layout drawing and the impedance estimate; the canvas supports wheel
//! zoom toward the cursor and drag to pan.
//!
//! Built with Iced for native (Windows, macOS, Linux) and WASM targets.

mod ui;

use iced::widget::{canvas, column, container, row};
use iced::{Element, Length, Size, Task};
use tracing::{debug, info, warn};

use xsect_core::calculations::{characteristics, LineCharacteristics};
use xsect_core::design::{Derived, Design};
use xsect_core::geometry::{Point, SurfacePoint, SurfaceSize};
use xsect_core::interaction::InteractionController;
use xsect_core::render::RenderStyle;
use xsect_core::settings::{load_settings, Settings};
use xsect_core::topology::Topology;

use ui::input_panel::{DesignForm, DimensionField, MaterialField};

/// Pointer activity on the cross-section canvas, in surface pixels
#[derive(Debug, Clone, Copy)]
pub enum CanvasEvent {
    Wheel { anchor: SurfacePoint, lines: f64 },
    DragStart(SurfacePoint),
    DragMove(SurfacePoint),
    DragEnd,
    /// Cursor moved over the canvas (`None` once it leaves)
    Hover(Option<SurfacePoint>),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Parameter form
    TopologySelected(Topology),
    DimensionChanged(DimensionField, String),
    MaterialChanged(MaterialField, String),

    // Toolbar
    ZoomIn,
    ZoomOut,
    ResetView,
    ToggleGrid(bool),
    ToggleAnnotations(bool),

    // Canvas, with the canvas size at the time of the event
    Canvas { viewport: SurfaceSize, event: CanvasEvent },
}

pub struct App {
    pub settings: Settings,
    /// Last snapshot that validated; everything on screen derives from it
    pub design: Design,
    pub derived: Derived,
    pub characteristics: LineCharacteristics,
    /// Raw form text, may hold values that do not parse yet
    pub form: DesignForm,
    pub controller: InteractionController,
    pub style: RenderStyle,
    pub cache: canvas::Cache,
    pub cursor_um: Option<Point>,
    pub error_message: Option<String>,
    pub status: String,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let loaded = load_settings(None);
        let settings = loaded.clone().unwrap_or_default();
        init_logging(&settings.logging.level);

        let status = match loaded {
            Ok(_) => "Ready".to_string(),
            Err(e) => {
                warn!(error = %e, "settings not loaded, using defaults");
                format!("Settings not loaded: {}", e)
            }
        };

        let design = settings.defaults;
        let derived = design.recompute();
        let characteristics = characteristics(
            &derived.estimate,
            &design.dimensions,
            &design.materials,
            settings.analysis.frequency_hz,
        );
        info!(topology = design.topology.as_str(), "starting XSect");

        let app = App {
            controller: InteractionController::new(&settings.view),
            form: DesignForm::from_design(&design),
            settings,
            design,
            derived,
            characteristics,
            style: RenderStyle::default(),
            cache: canvas::Cache::new(),
            cursor_um: None,
            error_message: None,
            status,
        };
        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TopologySelected(topology) => {
                self.form.topology = topology;
                self.apply_form();
            }
            Message::DimensionChanged(field, value) => {
                self.form.set_dimension(field, value);
                self.apply_form();
            }
            Message::MaterialChanged(field, value) => {
                self.form.set_material(field, value);
                self.apply_form();
            }
            Message::ZoomIn => self.controller.zoom_in(),
            Message::ZoomOut => self.controller.zoom_out(),
            Message::ResetView => self.controller.reset_view(),
            Message::ToggleGrid(show) => {
                self.style.show_grid = show;
                self.cache.clear();
            }
            Message::ToggleAnnotations(show) => {
                self.style.show_annotations = show;
                self.cache.clear();
            }
            Message::Canvas { viewport, event } => self.handle_canvas(viewport, event),
        }

        if self.controller.take_redraw() {
            self.cache.clear();
        }
        Task::none()
    }

    /// Swap in the form's design if, and only if, the whole form validates.
    fn apply_form(&mut self) {
        match self.form.parse() {
            Ok(design) => {
                self.derived = design.recompute();
                self.characteristics = characteristics(
                    &self.derived.estimate,
                    &design.dimensions,
                    &design.materials,
                    self.settings.analysis.frequency_hz,
                );
                self.design = design;
                self.error_message = None;
                self.cache.clear();
            }
            Err(e) => {
                debug!(error = %e, "form rejected");
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn handle_canvas(&mut self, viewport: SurfaceSize, event: CanvasEvent) {
        self.controller.set_viewport(viewport);
        match event {
            CanvasEvent::Wheel { anchor, lines } => self.controller.on_wheel(anchor, lines),
            CanvasEvent::DragStart(at) => self.controller.on_drag_start(at),
            CanvasEvent::DragMove(to) => {
                self.controller.on_drag_move(to);
                self.cursor_um = Some(self.controller.transform().to_physical(to));
            }
            CanvasEvent::DragEnd => self.controller.on_drag_end(),
            CanvasEvent::Hover(at) => {
                self.cursor_um = at.map(|p| self.controller.transform().to_physical(p));
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let toolbar = ui::toolbar::view_toolbar(&self.style, self.controller.view_state().zoom);
        let inputs = ui::input_panel::view_input_panel(self);
        let drawing = ui::shared::cross_section::view(
            &self.derived.regions,
            &self.controller,
            &self.style,
            &self.cache,
        );
        let results = ui::results_panel::view_results_panel(self);
        let status = ui::status_bar::view_status_bar(
            self.controller.view_state().zoom,
            self.cursor_um,
            &self.status,
        );

        let main = row![
            inputs,
            column![drawing, results].spacing(8).width(Length::FillPortion(70)),
        ]
        .spacing(8)
        .height(Length::Fill);

        container(column![toolbar, main, status].spacing(6))
            .padding(10)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over the settings file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging(_level: &str) {
    console_error_panic_hook::set_once();
}

pub fn main() -> iced::Result {
    iced::application(App::new, App::update, App::view)
        .title("XSect - Transmission-Line Cross-Section Editor")
        .window_size(Size::new(1280.0, 800.0))
        .run()
}

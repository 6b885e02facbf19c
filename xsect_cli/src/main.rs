//! # XSect CLI
//!
//! Command line front end over `xsect_core`:
//!
//! - `xsect estimate` - impedance estimate and propagation characteristics
//! - `xsect layout` - region list of the cross-section
//! - `xsect render` - SVG preview of the cross-section
//!
//! The design starts from the settings file defaults (or `--design <file>`)
//! and individual flags override single fields.

mod svg;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use xsect_core::calculations::{characteristics, EstimateResult, LineCharacteristics};
use xsect_core::design::{load_design, Design};
use xsect_core::errors::{CalcError, CalcResult};
use xsect_core::geometry::SurfaceSize;
use xsect_core::layout::{layout, layout_bounds, Region, Shape};
use xsect_core::render::{render, RenderStyle};
use xsect_core::settings::{load_settings, Settings};
use xsect_core::topology::Topology;
use xsect_core::units::{Micrometers, Millimeters, Mils};
use xsect_core::view::{ViewSettings, ViewTransform};

use svg::SvgSurface;

/// Transmission-line cross-section estimates and previews.
#[derive(Parser, Debug)]
#[command(name = "xsect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate characteristic impedance and line characteristics
    Estimate {
        #[command(flatten)]
        design: DesignArgs,

        /// Frequency for wavelength, skin depth and losses, in GHz
        #[arg(long, value_name = "GHZ")]
        frequency_ghz: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the regions of the cross-section layout
    Layout {
        #[command(flatten)]
        design: DesignArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render the cross-section as SVG
    Render {
        #[command(flatten)]
        design: DesignArgs,

        /// Image width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Image height in pixels
        #[arg(long, default_value_t = 480.0)]
        height: f64,

        /// Zoom level, clamped to the configured range
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Horizontal pan in pixels
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan_x: f64,

        /// Vertical pan in pixels (positive moves the drawing down)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan_y: f64,

        /// Leave out the background grid
        #[arg(long)]
        no_grid: bool,

        /// Leave out the dimension annotations
        #[arg(long)]
        no_annotations: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Unit of the dimension flags
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LengthUnit {
    #[default]
    Um,
    Mm,
    Mil,
}

impl LengthUnit {
    fn to_um(self, value: f64) -> f64 {
        match self {
            LengthUnit::Um => value,
            LengthUnit::Mm => Micrometers::from(Millimeters(value)).value(),
            LengthUnit::Mil => Micrometers::from(Mils(value)).value(),
        }
    }
}

/// Design selection shared by every subcommand
#[derive(Args, Debug)]
struct DesignArgs {
    /// Design JSON file to start from instead of the settings defaults
    #[arg(long = "design", value_name = "FILE")]
    design_file: Option<PathBuf>,

    /// Topology (microstrip, stripline, coplanar, coplanar-with-ground,
    /// grounded-coplanar); anything else is treated as custom
    #[arg(short, long)]
    topology: Option<String>,

    /// Unit of the dimension flags below
    #[arg(long, value_enum, default_value_t = LengthUnit::Um)]
    unit: LengthUnit,

    /// Trace width
    #[arg(long)]
    trace_width: Option<f64>,

    /// Trace thickness
    #[arg(long)]
    trace_height: Option<f64>,

    /// Ground plane thickness
    #[arg(long)]
    ground_thickness: Option<f64>,

    /// Signal-to-ground gap (coplanar topologies)
    #[arg(long)]
    gap: Option<f64>,

    /// Substrate width
    #[arg(long)]
    substrate_width: Option<f64>,

    /// Substrate height
    #[arg(long)]
    substrate_height: Option<f64>,

    /// Air region height
    #[arg(long)]
    air_height: Option<f64>,

    /// Relative permittivity of the substrate
    #[arg(long)]
    er: Option<f64>,

    /// Dielectric loss tangent
    #[arg(long)]
    loss_tangent: Option<f64>,

    /// Conductor conductivity in S/m
    #[arg(long)]
    conductivity: Option<f64>,
}

impl DesignArgs {
    /// Base design with the flag overrides applied, validated as a whole.
    fn resolve(&self, settings: &Settings) -> CalcResult<Design> {
        let mut design = match &self.design_file {
            Some(path) => load_design(path)?,
            None => settings.defaults,
        };

        if let Some(name) = &self.topology {
            design.topology = Topology::parse(name);
            if design.topology == Topology::Custom && !name.trim().eq_ignore_ascii_case("custom") {
                info!(topology = %name, "unknown topology, using custom");
            }
        }

        let unit = self.unit;
        let dims = &mut design.dimensions;
        let overrides = [
            (self.trace_width, &mut dims.trace_width_um),
            (self.trace_height, &mut dims.trace_height_um),
            (self.ground_thickness, &mut dims.ground_thickness_um),
            (self.gap, &mut dims.coplanar_gap_um),
            (self.substrate_width, &mut dims.substrate_width_um),
            (self.substrate_height, &mut dims.substrate_height_um),
            (self.air_height, &mut dims.air_height_um),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = unit.to_um(v);
            }
        }

        let materials = &mut design.materials;
        if let Some(er) = self.er {
            materials.epsilon_r = er;
        }
        if let Some(tan_d) = self.loss_tangent {
            materials.loss_tangent = tan_d;
        }
        if let Some(sigma) = self.conductivity {
            materials.conductivity_s_per_m = sigma;
        }

        design.validate()?;
        debug!(?design, "design resolved");
        Ok(design)
    }
}

/// JSON document printed by `estimate --json`
#[derive(Debug, Serialize)]
struct EstimateReport {
    design: Design,
    estimate: EstimateResult,
    characteristics: LineCharacteristics,
}

/// Filter directive from the flags, falling back to the settings level.
fn log_directive(verbose: u8, quiet: bool, settings_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => settings_level.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn to_json<T: Serialize>(value: &T) -> CalcResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&log_directive(cli.verbose, cli.quiet, &settings.logging.level));

    match run(cli.command, &settings) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a subcommand and return what goes to stdout.
fn run(command: Command, settings: &Settings) -> CalcResult<String> {
    match command {
        Command::Estimate {
            design,
            frequency_ghz,
            json,
        } => {
            let design = design.resolve(settings)?;
            let frequency_hz = match frequency_ghz {
                Some(ghz) if ghz > 0.0 && ghz.is_finite() => ghz * 1e9,
                Some(ghz) => {
                    return Err(CalcError::invalid_input(
                        "frequency_ghz",
                        ghz.to_string(),
                        "Frequency must be positive",
                    ))
                }
                None => settings.analysis.frequency_hz,
            };

            let derived = design.recompute();
            let report = EstimateReport {
                design,
                estimate: derived.estimate,
                characteristics: characteristics(&derived.estimate, &design.dimensions, &design.materials, frequency_hz),
            };
            if json {
                to_json(&report).map(|s| s + "\n")
            } else {
                Ok(format_estimate(&report))
            }
        }

        Command::Layout { design, json } => {
            let design = design.resolve(settings)?;
            let regions = layout(design.topology, &design.dimensions);
            if json {
                to_json(&regions).map(|s| s + "\n")
            } else {
                Ok(format_layout(design.topology, &regions))
            }
        }

        Command::Render {
            design,
            width,
            height,
            zoom,
            pan_x,
            pan_y,
            no_grid,
            no_annotations,
            output,
        } => {
            let design = design.resolve(settings)?;
            let viewport = viewport(width, height)?;
            let regions = layout(design.topology, &design.dimensions);

            let style = RenderStyle {
                show_grid: !no_grid,
                show_annotations: !no_annotations,
                ..RenderStyle::default()
            };
            let transform = preview_transform(&settings.view, viewport, zoom, pan_x, pan_y);
            let document = render_svg(&regions, &transform, &style, viewport);

            match output {
                Some(path) => {
                    fs::write(&path, &document)
                        .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))?;
                    info!(path = %path.display(), "SVG written");
                    Ok(String::new())
                }
                None => Ok(document),
            }
        }
    }
}

fn viewport(width: f64, height: f64) -> CalcResult<SurfaceSize> {
    for (field, value) in [("width", width), ("height", height)] {
        if !(value >= 1.0 && value.is_finite()) {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be at least 1 pixel"));
        }
    }
    Ok(SurfaceSize::new(width, height))
}

/// Transform for a preview image: zoom about the image center, then pan.
fn preview_transform(view: &ViewSettings, viewport: SurfaceSize, zoom: f64, pan_x: f64, pan_y: f64) -> ViewTransform {
    let settings = ViewSettings {
        default_viewport: viewport,
        ..*view
    };
    let mut transform = ViewTransform::new(&settings);
    transform.zoom_at(viewport.center(), zoom);
    transform.pan_by(pan_x, pan_y);
    transform
}

fn render_svg(regions: &[Region], transform: &ViewTransform, style: &RenderStyle, viewport: SurfaceSize) -> String {
    let mut surface = SvgSurface::new(viewport);
    render(&mut surface, regions, transform, style);
    surface.finish()
}

fn format_estimate(report: &EstimateReport) -> String {
    let e = &report.estimate;
    let c = &report.characteristics;
    let mut out = String::new();

    out.push_str(&format!("Topology:    {}\n", report.design.topology.display_name()));
    out.push_str(&format!("Method:      {}\n", e.method.display_name()));
    out.push_str(&format!("Z0:          {:.2} Ω\n", e.z0_ohms));
    out.push_str(&format!("εeff:        {:.3}\n", e.effective_permittivity));
    out.push_str(&format!("w/h:         {:.4}\n", e.w_h));
    if e.method.is_placeholder() {
        out.push_str("Note:        reference value, not computed from the geometry\n");
    }
    if !e.is_finite() {
        out.push_str("Note:        degenerate geometry, the estimate is not finite\n");
    }
    out.push('\n');
    out.push_str(&format!("At {:.3} GHz:\n", c.frequency_hz / 1e9));
    out.push_str(&format!("  Velocity:    {:.3} c\n", c.velocity_factor));
    out.push_str(&format!("  Delay:       {:.2} ps/mm\n", c.delay_ps_per_mm));
    out.push_str(&format!("  λ guided:    {:.2} mm\n", c.wavelength_mm));
    out.push_str(&format!("  Skin depth:  {:.2} µm\n", c.skin_depth_um));
    out.push_str(&format!("  Loss (cond): {:.2} dB/m\n", c.conductor_loss_db_per_m));
    out.push_str(&format!("  Loss (diel): {:.2} dB/m\n", c.dielectric_loss_db_per_m));
    out.push_str(&format!("  Loss total:  {:.2} dB/m\n", c.total_loss_db_per_m));
    out
}

fn format_layout(topology: Topology, regions: &[Region]) -> String {
    let mut out = format!("{} - {} regions\n", topology.display_name(), regions.len());
    for region in regions {
        let shape = match region.shape {
            Shape::Rect(r) => format!(
                "x {:>9.1} .. {:>9.1}  y {:>9.1} .. {:>9.1}",
                r.x_min, r.x_max, r.y_min, r.y_max
            ),
            Shape::Circle { center, radius } => {
                format!("circle at ({:.1}, {:.1}) r {:.1}", center.x, center.y, radius)
            }
        };
        out.push_str(&format!(
            "  {:<14} {:<10} {}\n",
            region.tag.to_string(),
            region.role.display_name(),
            shape
        ));
    }
    if let Some(b) = layout_bounds(regions) {
        out.push_str(&format!(
            "Extent: {} x {}\n",
            Micrometers(b.width()),
            Micrometers(b.height())
        ));
    }
    out
}

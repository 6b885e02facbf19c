//! # xsect_core - Transmission-Line Cross-Section Engine
//!
//! `xsect_core` turns a parametric description of a planar transmission line
//! (topology, dimensions, materials) into a positioned 2D cross-section and a
//! rough analytic estimate of its characteristic impedance. Everything here is
//! UI-agnostic: the GUI and the CLI are thin hosts around it.
//!
//! ## Design Philosophy
//!
//! - **Pure pipeline**: one [`design::Design`] snapshot in, layout and estimate out
//! - **JSON-First**: inputs, regions and results implement Serialize/Deserialize
//! - **Never fails on valid input**: degenerate ratios surface as non-finite numbers
//! - **Rich Errors**: structured errors at the validation and settings edges
//!
//! ## Quick Start
//!
//! ```rust
//! use xsect_core::design::Design;
//! use xsect_core::inputs::DimensionSet;
//! use xsect_core::topology::Topology;
//!
//! let design = Design {
//!     topology: Topology::Microstrip,
//!     dimensions: DimensionSet {
//!         trace_width_um: 100.0,
//!         substrate_height_um: 1600.0,
//!         ..DimensionSet::default()
//!     },
//!     ..Design::default()
//! };
//! design.validate().unwrap();
//!
//! let derived = design.recompute();
//! println!("Z0 = {:.1} Ω over {} regions", derived.estimate.z0_ohms, derived.regions.len());
//! ```
//!
//! ## Modules
//!
//! - [`topology`] - Cross-section families
//! - [`inputs`] - Dimension and material sets with validation
//! - [`geometry`] - Physical and surface coordinate primitives
//! - [`layout`] - Layout engine: topology + dimensions -> regions
//! - [`view`] - Zoom/pan view transform
//! - [`interaction`] - Pointer and button handling over the view transform
//! - [`render`] - Renderer against the [`render::Surface`] trait
//! - [`calculations`] - Impedance estimate and line characteristics
//! - [`equations`] - Closed-form formulas behind the calculations
//! - [`design`] - Input snapshot and recompute pipeline
//! - [`settings`] - User configuration file
//! - [`units`] - Type-safe length units
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design;
pub mod equations;
pub mod errors;
pub mod geometry;
pub mod inputs;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod settings;
pub mod topology;
pub mod units;
pub mod view;

// Re-export commonly used types at crate root for convenience
pub use calculations::{characteristics, estimate, EstimateMethod, EstimateResult, LineCharacteristics};
pub use design::{Design, Derived};
pub use errors::{CalcError, CalcResult};
pub use inputs::{DimensionSet, MaterialSet};
pub use interaction::InteractionController;
pub use layout::{layout, Region, RegionRole, RegionTag, Shape};
pub use render::{render, RenderStyle, Rgba, Surface, TextAlign};
pub use settings::{load_settings, Settings};
pub use topology::Topology;
pub use view::{ViewSettings, ViewState, ViewTransform};

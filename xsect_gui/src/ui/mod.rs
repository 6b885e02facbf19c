//! UI module for the XSect GUI
//!
//! # Panel Structure
//! - `toolbar` - View controls (zoom, reset) and drawing toggles
//! - `input_panel` - Left panel: topology, dimensions, materials
//! - `results_panel` - Below the drawing: impedance estimate and line characteristics
//! - `status_bar` - Zoom level, cursor position, status messages
//!
//! # Shared Components
//! - `shared/cross_section` - Canvas program drawing the cross-section

pub mod toolbar;
pub mod input_panel;
pub mod results_panel;
pub mod status_bar;

pub mod shared;

//! Shared UI components
//!
//! Contains:
//! - `cross_section` - Interactive canvas over the core renderer

pub mod cross_section;

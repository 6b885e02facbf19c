//! # Unit Types
//!
//! Type-safe wrappers for the length units used when describing PCB stackups.
//! Lightweight f64 newtypes that serialize as bare numbers.
//!
//! The engine works in micrometers internally. Millimeters and mils are
//! accepted at the edges (CLI flags, annotation labels) and converted here.
//!
//! ## Example
//!
//! ```rust
//! use xsect_core::units::{Micrometers, Mils, Millimeters};
//!
//! let core = Millimeters(1.6);
//! let core_um: Micrometers = core.into();
//! assert!((core_um.0 - 1600.0).abs() < 1e-9);
//!
//! let trace: Micrometers = Mils(4.0).into();
//! assert!((trace.0 - 101.6).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Micrometers per mil (1 mil = 0.001 inch = 25.4 µm)
pub const UM_PER_MIL: f64 = 25.4;

/// Micrometers per millimeter
pub const UM_PER_MM: f64 = 1000.0;

/// Length in micrometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Micrometers(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in mils (thousandths of an inch)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mils(pub f64);

impl From<Millimeters> for Micrometers {
    fn from(mm: Millimeters) -> Self {
        Micrometers(mm.0 * UM_PER_MM)
    }
}

impl From<Micrometers> for Millimeters {
    fn from(um: Micrometers) -> Self {
        Millimeters(um.0 / UM_PER_MM)
    }
}

impl From<Mils> for Micrometers {
    fn from(mils: Mils) -> Self {
        Micrometers(mils.0 * UM_PER_MIL)
    }
}

impl From<Micrometers> for Mils {
    fn from(um: Micrometers) -> Self {
        Mils(um.0 / UM_PER_MIL)
    }
}

/// Formats as "250 µm" below one millimeter and "1.60 mm" from there up.
impl fmt::Display for Micrometers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.abs() < UM_PER_MM {
            write!(f, "{:.0} µm", self.0)
        } else {
            write!(f, "{:.2} mm", self.0 / UM_PER_MM)
        }
    }
}

macro_rules! impl_raw_value {
    ($type:ty) => {
        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_raw_value!(Micrometers);
impl_raw_value!(Millimeters);
impl_raw_value!(Mils);

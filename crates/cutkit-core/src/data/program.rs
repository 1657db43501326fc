//! Program output options

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::units::Units;

/// Largest supported number of decimal places in program output.
pub const MAX_DECIMAL: u32 = 8;

/// Output units, XY translation and numeric precision of the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramOptions {
    pub units: Units,
    /// Added to every output X, in output units
    pub offset_x: f64,
    /// Added to every output Y, in output units
    pub offset_y: f64,
    /// Fixed number of decimal places for coordinates
    pub decimal: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            units: Units::Inch,
            offset_x: 0.0,
            offset_y: 0.0,
            decimal: 4,
        }
    }
}

impl ProgramOptions {
    /// Factor from geometry plane units to output units.
    pub fn plane_scale(&self) -> f64 {
        1.0 / self.units.geometry_scale()
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.decimal > MAX_DECIMAL {
            return Err(ParameterError::OutOfRange {
                name: "decimal".into(),
                value: self.decimal as f64,
                min: 0.0,
                max: MAX_DECIMAL as f64,
            });
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(ParameterError::NotFinite {
                name: "program offset".into(),
            });
        }
        Ok(())
    }
}

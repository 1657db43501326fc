//! Cutting tool description
//!
//! A single end mill or V-bit with its feeds, in the units the user entered.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, ParameterError};
use crate::units::Units;

/// Cutter geometry and feed rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSpec {
    /// Units of every length and rate below
    pub units: Units,
    /// Cutter diameter
    pub diameter: f64,
    /// Included angle in degrees (180 for flat end mills, V-bits below)
    pub angle: f64,
    /// Maximum depth removed per pass
    pub pass_depth: f64,
    /// Fraction of the diameter advanced between adjacent rings, in (0, 1]
    pub stepover: f64,
    /// Feed for non-cutting moves (units/min)
    pub rapid_rate: f64,
    /// Feed for vertical plunges (units/min)
    pub plunge_rate: f64,
    /// Feed for horizontal cutting (units/min)
    pub cut_rate: f64,
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self {
            units: Units::Inch,
            diameter: 0.125,
            angle: 180.0,
            pass_depth: 0.125,
            stepover: 0.4,
            rapid_rate: 100.0,
            plunge_rate: 5.0,
            cut_rate: 40.0,
        }
    }
}

impl ToolSpec {
    /// Overlap between adjacent rings as a fraction of the diameter.
    pub fn overlap(&self) -> f64 {
        1.0 - self.stepover
    }

    /// Converts a tool length or rate into the given units.
    pub fn in_units(&self, value: f64, units: Units) -> f64 {
        Units::convert(value, self.units, units)
    }

    /// Diameter in geometry plane units.
    pub fn diameter_in_plane(&self) -> f64 {
        self.diameter * self.units.geometry_scale()
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        require_positive("tool diameter", self.diameter)?;
        require_positive("pass depth", self.pass_depth)?;
        require_positive("rapid rate", self.rapid_rate)?;
        require_positive("plunge rate", self.plunge_rate)?;
        require_positive("cut rate", self.cut_rate)?;
        if !(self.stepover > 0.0 && self.stepover <= 1.0) {
            return Err(ParameterError::OutOfRange {
                name: "stepover".into(),
                value: self.stepover,
                min: 0.0,
                max: 1.0,
            });
        }
        if !(self.angle > 0.0 && self.angle <= 180.0) {
            return Err(ParameterError::OutOfRange {
                name: "tool angle".into(),
                value: self.angle,
                min: 0.0,
                max: 180.0,
            });
        }
        Ok(())
    }
}

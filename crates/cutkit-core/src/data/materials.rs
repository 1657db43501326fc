//! Stock material description
//!
//! Thickness, clearance above the top surface and where Z zero sits.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{require_non_negative, ParameterError};
use crate::units::Units;

/// Reference surface for Z = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZOrigin {
    /// Z zero at the top of the stock; cuts go negative
    Top,
    /// Z zero at the bottom of the stock (spoilboard)
    Bottom,
}

impl Default for ZOrigin {
    fn default() -> Self {
        Self::Top
    }
}

impl fmt::Display for ZOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "Top"),
            Self::Bottom => write!(f, "Bottom"),
        }
    }
}

/// Stock material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSpec {
    /// Units of thickness and clearance
    pub units: Units,
    /// Stock thickness
    pub thickness: f64,
    /// Z origin reference
    pub z_origin: ZOrigin,
    /// Height above the top surface where rapid moves are safe
    pub clearance: f64,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            units: Units::Inch,
            thickness: 1.0,
            z_origin: ZOrigin::Top,
            clearance: 0.1,
        }
    }
}

impl MaterialSpec {
    /// Z of the top surface, in `units`.
    pub fn top_z(&self, units: Units) -> f64 {
        match self.z_origin {
            ZOrigin::Top => 0.0,
            ZOrigin::Bottom => Units::convert(self.thickness, self.units, units),
        }
    }

    /// Z of the safe travel height, in `units`.
    pub fn safe_z(&self, units: Units) -> f64 {
        self.top_z(units) + Units::convert(self.clearance, self.units, units)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        require_non_negative("material thickness", self.thickness)?;
        require_non_negative("clearance", self.clearance)?;
        Ok(())
    }
}

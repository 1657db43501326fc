//! Unit conversion utilities
//!
//! Every length in a job is tagged with the unit it was entered in. Values are
//! converted through inches: the geometry plane uses a fixed number of
//! integer-like units per inch, program output uses inches or millimeters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geometry plane resolution: internal units per inch.
pub const UNITS_PER_INCH: f64 = 10_000.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Length units used by tools, materials, operations and program output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Inches
    Inch,
    /// Millimeters
    Mm,
}

impl Default for Units {
    fn default() -> Self {
        Self::Inch
    }
}

impl Units {
    /// Factor that converts a value in these units to inches.
    pub fn inch_conversion(self) -> f64 {
        match self {
            Self::Inch => 1.0,
            Self::Mm => 1.0 / MM_PER_INCH,
        }
    }

    /// Factor that converts a value in these units to geometry plane units.
    pub fn geometry_scale(self) -> f64 {
        UNITS_PER_INCH * self.inch_conversion()
    }

    /// Convert a value from one unit to another
    pub fn convert(value: f64, from: Units, to: Units) -> f64 {
        if from == to {
            return value;
        }
        value * from.inch_conversion() / to.inch_conversion()
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inch => write!(f, "inch"),
            Self::Mm => write!(f, "mm"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inch" | "in" | "imperial" => Ok(Self::Inch),
            "mm" | "millimeter" | "metric" => Ok(Self::Mm),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_conversion() {
        assert_eq!(Units::Inch.inch_conversion(), 1.0);
        assert!((Units::Mm.inch_conversion() * 25.4 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_geometry_scale() {
        assert_eq!(Units::Inch.geometry_scale(), 10_000.0);
        assert!((Units::Mm.geometry_scale() * 25.4 - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert() {
        assert!((Units::convert(1.0, Units::Inch, Units::Mm) - 25.4).abs() < 1e-12);
        assert!((Units::convert(12.7, Units::Mm, Units::Inch) - 0.5).abs() < 1e-12);
        assert_eq!(Units::convert(3.0, Units::Mm, Units::Mm), 3.0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("inch".parse::<Units>().unwrap(), Units::Inch);
        assert_eq!(" MM ".parse::<Units>().unwrap(), Units::Mm);
        assert!("furlong".parse::<Units>().is_err());
        assert_eq!(Units::Mm.to_string(), "mm");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Units::Inch).unwrap(), "\"inch\"");
        let u: Units = serde_json::from_str("\"mm\"").unwrap();
        assert_eq!(u, Units::Mm);
    }
}

//! Bridge (holding tab) description
//!
//! Bridges are regions where the cutter stops short of full depth so that
//! the cut part stays attached to the stock.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, ParameterError};
use crate::geometry::PathSet;
use crate::units::Units;

/// One bridge region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeShape {
    pub enabled: bool,
    /// Grow applied to the region before use
    pub margin: f64,
    pub geometry: PathSet,
}

impl Default for BridgeShape {
    fn default() -> Self {
        Self {
            enabled: true,
            margin: 0.0,
            geometry: Vec::new(),
        }
    }
}

/// All bridges of a job
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSpec {
    /// Units of coordinates, margins and `max_cut_depth`
    pub units: Units,
    /// Deepest cut taken over a bridge, measured from the top surface.
    /// Zero disables bridges.
    pub max_cut_depth: f64,
    pub shapes: Vec<BridgeShape>,
}

impl BridgeSpec {
    /// True when at least one enabled shape has geometry and the depth allows it.
    pub fn is_active(&self) -> bool {
        self.max_cut_depth > 0.0
            && self
                .shapes
                .iter()
                .any(|s| s.enabled && !s.geometry.is_empty())
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        require_non_negative("bridge max cut depth", self.max_cut_depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_inactive_by_default() {
        assert!(!BridgeSpec::default().is_active());
    }

    #[test]
    fn test_active_needs_depth_and_enabled_shape() {
        let mut spec = BridgeSpec {
            units: Units::Inch,
            max_cut_depth: 0.1,
            shapes: vec![BridgeShape {
                geometry: vec![vec![
                    Point::new(0.0, 0.0),
                    Point::new(1.0, 0.0),
                    Point::new(1.0, 1.0),
                ]],
                ..BridgeShape::default()
            }],
        };
        assert!(spec.is_active());
        spec.shapes[0].enabled = false;
        assert!(!spec.is_active());
    }
}

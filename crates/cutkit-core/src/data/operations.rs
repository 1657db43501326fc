//! Machining operation description
//!
//! An operation names what to cut (one or more source regions and how to
//! combine them) and how (operation kind, depth, direction, margin).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{require_non_negative, Error, ParameterError, Result};
use crate::geometry::PathSet;
use crate::units::Units;

/// Kind of toolpath an operation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CamOp {
    /// Clear the whole region with concentric rings
    Pocket,
    /// Contour band on the inside of the region edge
    Inside,
    /// Contour band on the outside of the region edge
    Outside,
    /// Follow the region edges exactly
    Engrave,
    /// V-bit carving, delegated to an external kernel
    VPocket,
}

impl CamOp {
    /// Sign applied to the operation margin: positive grows the region.
    pub fn margin_sign(self) -> f64 {
        match self {
            Self::Pocket | Self::Inside => -1.0,
            Self::Outside | Self::Engrave | Self::VPocket => 1.0,
        }
    }

    /// Whether the margin is applied at all.
    pub fn uses_margin(self) -> bool {
        !matches!(self, Self::Engrave)
    }
}

impl fmt::Display for CamOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pocket => write!(f, "Pocket"),
            Self::Inside => write!(f, "Inside"),
            Self::Outside => write!(f, "Outside"),
            Self::Engrave => write!(f, "Engrave"),
            Self::VPocket => write!(f, "V Pocket"),
        }
    }
}

/// How multiple source regions are folded into one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombineOp {
    Union,
    Intersect,
    Diff,
    Xor,
}

impl fmt::Display for CombineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Union => write!(f, "Union"),
            Self::Intersect => write!(f, "Intersect"),
            Self::Diff => write!(f, "Diff"),
            Self::Xor => write!(f, "Xor"),
        }
    }
}

/// Milling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Conventional,
    Climb,
}

impl Direction {
    pub fn is_climb(self) -> bool {
        self == Self::Climb
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conventional => write!(f, "Conventional"),
            Self::Climb => write!(f, "Climb"),
        }
    }
}

/// One machining operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationSpec {
    /// Free-form label echoed into the program header
    pub name: String,
    /// Disabled operations produce no output
    pub enabled: bool,
    pub kind: CamOp,
    pub combine: CombineOp,
    pub direction: Direction,
    /// Units of the geometry coordinates, depth, margin and width
    pub units: Units,
    /// Total depth below the top surface
    pub cut_depth: f64,
    /// Uniform grow (Outside) or shrink (Pocket, Inside) before planning
    pub margin: f64,
    /// Contour band width for Inside and Outside
    pub width: f64,
    /// Ramp into the material instead of plunging straight down
    pub ramp: bool,
    /// Source regions, combined with `combine`
    pub geometries: Vec<PathSet>,
}

impl Default for OperationSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            enabled: true,
            kind: CamOp::Pocket,
            combine: CombineOp::Union,
            direction: Direction::Conventional,
            units: Units::Inch,
            cut_depth: 0.125,
            margin: 0.0,
            width: 0.0,
            ramp: false,
            geometries: Vec::new(),
        }
    }
}

impl OperationSpec {
    pub fn new(kind: CamOp) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Adds one source region.
    pub fn with_geometry(mut self, geometry: PathSet) -> Self {
        self.geometries.push(geometry);
        self
    }

    /// Source regions scaled into the geometry plane.
    pub fn plane_geometries(&self) -> Vec<PathSet> {
        let scale = self.units.geometry_scale();
        self.geometries
            .iter()
            .map(|set| {
                set.iter()
                    .map(|ring| ring.iter().map(|p| p.scaled(scale)).collect())
                    .collect()
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("cut depth", self.cut_depth)?;
        require_non_negative("width", self.width)?;
        if !self.margin.is_finite() {
            return Err(ParameterError::NotFinite {
                name: "margin".into(),
            }
            .into());
        }
        let bad_point = self
            .geometries
            .iter()
            .flatten()
            .flatten()
            .any(|p| !p.x.is_finite() || !p.y.is_finite());
        if bad_point {
            return Err(Error::Geometry(format!(
                "{} geometry has a non-finite coordinate",
                self.kind
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_margin_sign_by_kind() {
        assert_eq!(CamOp::Pocket.margin_sign(), -1.0);
        assert_eq!(CamOp::Inside.margin_sign(), -1.0);
        assert_eq!(CamOp::Outside.margin_sign(), 1.0);
        assert!(!CamOp::Engrave.uses_margin());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "kind": "Inside",
            "direction": "Climb",
            "geometries": [[[[0, 0], [1, 0], [1, 1]]]]
        }"#;
        let op: OperationSpec = serde_json::from_str(json).unwrap();
        assert_eq!(op.kind, CamOp::Inside);
        assert!(op.direction.is_climb());
        assert!(op.enabled);
        assert!(!op.ramp);
        assert_eq!(op.combine, CombineOp::Union);
        assert_eq!(op.geometries[0][0][2], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_plane_geometries_scale() {
        let op = OperationSpec {
            units: Units::Mm,
            ..OperationSpec::default()
        }
        .with_geometry(vec![vec![Point::new(25.4, 0.0)]]);
        let plane = op.plane_geometries();
        assert!((plane[0][0][0].x - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_depth_rejected() {
        let op = OperationSpec {
            cut_depth: -0.1,
            ..OperationSpec::default()
        };
        assert!(op.validate().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CamOp::VPocket.to_string(), "V Pocket");
        assert_eq!(Direction::Climb.to_string(), "Climb");
        assert_eq!(CombineOp::Diff.to_string(), "Diff");
    }
}

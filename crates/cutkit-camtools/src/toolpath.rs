//! Planned tool movements.

use cutkit_core::geometry::{Point, Polygon};
use serde::{Deserialize, Serialize};

/// A point of a planned movement, in geometry plane units.
///
/// `z` is only meaningful for paths produced by kernels that plan depth
/// themselves (V-pocketing); other planners leave it at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CamPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CamPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for CamPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0)
    }
}

/// One continuous tool movement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CamPath {
    pub path: Vec<CamPoint>,
    /// The straight move from the last point back to the first stays inside
    /// the safe-crossing boundary, so the tool may travel it without lifting.
    pub safe_to_close: bool,
}

impl CamPath {
    pub fn new(path: Vec<CamPoint>, safe_to_close: bool) -> Self {
        Self {
            path,
            safe_to_close,
        }
    }

    /// Builds a path from plane points at zero depth.
    pub fn from_points(points: &[Point], safe_to_close: bool) -> Self {
        Self::new(points.iter().copied().map(CamPoint::from).collect(), safe_to_close)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// XY projection of the path.
    pub fn points(&self) -> Polygon {
        self.path.iter().map(CamPoint::xy).collect()
    }

    pub fn first(&self) -> Option<&CamPoint> {
        self.path.first()
    }

    pub fn last(&self) -> Option<&CamPoint> {
        self.path.last()
    }
}

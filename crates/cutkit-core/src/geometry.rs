//! 2D geometry primitives for the machining plane.
//!
//! Geometry lives in a scaled plane (see [`crate::units::UNITS_PER_INCH`]).
//! A [`Polygon`] is an ordered ring whose closing edge (last point back to
//! first) is implicit. A [`PathSet`] is an unordered collection of rings that
//! together describe one region with even-odd fill.

use serde::{Deserialize, Serialize};

/// Tolerance used by the point and segment predicates, in plane units.
pub const EPSILON: f64 = 1e-6;

/// A point in the machining plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance, used where only ordering matters.
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Point::new(v[0], v[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Closed ring; the closing duplicate point is not stored.
pub type Polygon = Vec<Point>;

/// Collection of rings forming one region (even-odd fill).
pub type PathSet = Vec<Polygon>;

/// Position of a point relative to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Outside,
    OnBoundary,
}

/// Signed area of a ring; positive for counter-clockwise winding.
pub fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..ring.len() {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % ring.len()];
        area += p1.x * p2.y - p2.x * p1.y;
    }
    area / 2.0
}

/// Iterates over the edges of every ring in the set, including closing edges.
fn edges(set: &[Polygon]) -> impl Iterator<Item = (Point, Point)> + '_ {
    set.iter().filter(|ring| ring.len() >= 2).flat_map(|ring| {
        (0..ring.len()).map(move |i| (ring[i], ring[(i + 1) % ring.len()]))
    })
}

fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Classifies a point against a region using even-odd fill.
pub fn locate_point(set: &[Polygon], p: &Point) -> PointLocation {
    let mut inside = false;
    for (a, b) in edges(set) {
        if distance_to_segment(p, &a, &b) <= EPSILON {
            return PointLocation::OnBoundary;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

/// True when the point is inside the region or on its boundary.
pub fn contains_point(set: &[Polygon], p: &Point) -> bool {
    locate_point(set, p) != PointLocation::Outside
}

fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Parameters `t` in `[0, 1]` where segment `a -> b` meets the boundary of
/// `set`, sorted and deduplicated. Collinear overlaps contribute the overlap
/// end points.
pub fn segment_intersections(set: &[Polygon], a: &Point, b: &Point) -> Vec<f64> {
    let rx = b.x - a.x;
    let ry = b.y - a.y;
    let len_sq = rx * rx + ry * ry;
    let mut ts = Vec::new();
    if len_sq <= 0.0 {
        return ts;
    }

    for (c, d) in edges(set) {
        let sx = d.x - c.x;
        let sy = d.y - c.y;
        let denom = cross(rx, ry, sx, sy);
        let qpx = c.x - a.x;
        let qpy = c.y - a.y;

        if denom.abs() <= f64::EPSILON * len_sq.max(1.0) {
            // Parallel; only collinear edges matter.
            if cross(qpx, qpy, rx, ry).abs() / len_sq.sqrt() > EPSILON {
                continue;
            }
            for end in [c, d] {
                let t = ((end.x - a.x) * rx + (end.y - a.y) * ry) / len_sq;
                if (0.0..=1.0).contains(&t) {
                    ts.push(t);
                }
            }
            continue;
        }

        let t = cross(qpx, qpy, sx, sy) / denom;
        let u = cross(qpx, qpy, rx, ry) / denom;
        if (-1e-12..=1.0 + 1e-12).contains(&t) && (-1e-12..=1.0 + 1e-12).contains(&u) {
            ts.push(t.clamp(0.0, 1.0));
        }
    }

    ts.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    ts.dedup_by(|x, y| (*x - *y).abs() <= 1e-12);
    ts
}

/// Point at parameter `t` along `a -> b`.
pub fn lerp(a: &Point, b: &Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Does the straight segment `a -> b` stay within `boundary`?
///
/// A missing boundary never contains anything. A zero-length segment is
/// contained by any boundary.
pub fn segment_inside(boundary: Option<&[Polygon]>, a: &Point, b: &Point) -> bool {
    let Some(boundary) = boundary else {
        return false;
    };
    if a == b {
        return true;
    }

    let mut cuts = vec![0.0];
    cuts.extend(segment_intersections(boundary, a, b));
    cuts.push(1.0);

    cuts.windows(2).all(|w| {
        if w[1] - w[0] <= 1e-12 {
            return true;
        }
        contains_point(boundary, &lerp(a, b, (w[0] + w[1]) / 2.0))
    }) && contains_point(boundary, a)
        && contains_point(boundary, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = square(0.0, 0.0, 10.0);
        assert_eq!(signed_area(&ccw), 100.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_eq!(signed_area(&cw), -100.0);
        assert_eq!(signed_area(&ccw[..2]), 0.0);
    }

    #[test]
    fn test_locate_point_even_odd() {
        let set = vec![square(0.0, 0.0, 10.0), square(3.0, 3.0, 4.0)];
        assert_eq!(locate_point(&set, &Point::new(1.0, 1.0)), PointLocation::Inside);
        assert_eq!(locate_point(&set, &Point::new(5.0, 5.0)), PointLocation::Outside);
        assert_eq!(locate_point(&set, &Point::new(20.0, 5.0)), PointLocation::Outside);
        assert_eq!(
            locate_point(&set, &Point::new(0.0, 5.0)),
            PointLocation::OnBoundary
        );
    }

    #[test]
    fn test_segment_inside_convex() {
        let set = vec![square(0.0, 0.0, 10.0)];
        assert!(segment_inside(Some(&set), &Point::new(1.0, 1.0), &Point::new(9.0, 9.0)));
        assert!(!segment_inside(Some(&set), &Point::new(1.0, 1.0), &Point::new(12.0, 9.0)));
        // Along an edge counts as inside.
        assert!(segment_inside(Some(&set), &Point::new(0.0, 0.0), &Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_segment_inside_crossing_hole() {
        let set = vec![square(0.0, 0.0, 10.0), square(3.0, 3.0, 4.0)];
        assert!(!segment_inside(Some(&set), &Point::new(1.0, 5.0), &Point::new(9.0, 5.0)));
        assert!(segment_inside(Some(&set), &Point::new(1.0, 1.0), &Point::new(9.0, 1.0)));
    }

    #[test]
    fn test_segment_inside_concave_notch() {
        // U shape: the segment between the arms leaves the region.
        let u = vec![vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(7.0, 10.0),
            Point::new(7.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 10.0),
            Point::new(0.0, 10.0),
        ]];
        assert!(!segment_inside(Some(&u), &Point::new(1.0, 8.0), &Point::new(9.0, 8.0)));
        assert!(segment_inside(Some(&u), &Point::new(1.0, 1.0), &Point::new(9.0, 2.0)));
    }

    #[test]
    fn test_segment_inside_without_boundary() {
        let p = Point::new(1.0, 1.0);
        assert!(!segment_inside(None, &p, &p));
        let set = vec![square(0.0, 0.0, 10.0)];
        assert!(segment_inside(Some(&set), &p, &p));
    }

    #[test]
    fn test_point_serde_as_pair() {
        let p: Point = serde_json::from_str("[1.5, -2.0]").unwrap();
        assert_eq!(p, Point::new(1.5, -2.0));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0]");
    }
}

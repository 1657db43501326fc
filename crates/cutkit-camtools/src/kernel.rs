//! Polygon offset and boolean primitives.
//!
//! The planner only needs two capabilities from a geometry library: a
//! rounded-join offset of a region and the four boolean operations. They are
//! expressed by [`OffsetPrimitive`] so the planner can run against any
//! implementation. [`CavalierKernel`] is the default one, built on
//! `cavalier_contours` for offsets and `csgrs` sketches for booleans.
//!
//! Regions use even-odd fill. Rings returned by the kernel are oriented with
//! outer boundaries counter-clockwise and holes clockwise.

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use cutkit_core::geometry::{signed_area, PathSet, Point, Polygon};
use cutkit_core::CombineOp;
use std::f64::consts::PI;
use std::panic;
use tracing::warn;

use crate::error::{CamToolError, CamToolResult};

/// Boolean operation between two regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersect,
    Difference,
    Xor,
}

impl From<CombineOp> for BooleanOp {
    fn from(op: CombineOp) -> Self {
        match op {
            CombineOp::Union => BooleanOp::Union,
            CombineOp::Intersect => BooleanOp::Intersect,
            CombineOp::Diff => BooleanOp::Difference,
            CombineOp::Xor => BooleanOp::Xor,
        }
    }
}

/// Region offset and boolean capability consumed by the planner.
pub trait OffsetPrimitive {
    /// Grows (`distance > 0`) or shrinks (`distance < 0`) a region with
    /// rounded joins. A region that vanishes yields an empty set.
    fn offset(&self, set: &[Polygon], distance: f64) -> CamToolResult<PathSet>;

    /// Combines two regions.
    fn boolean(&self, op: BooleanOp, a: &[Polygon], b: &[Polygon]) -> CamToolResult<PathSet>;
}

/// Rings smaller than this area (plane units squared) are dropped.
const MIN_RING_AREA: f64 = 1e-6;

/// Default [`OffsetPrimitive`] backed by `cavalier_contours` and `csgrs`.
#[derive(Debug, Clone)]
pub struct CavalierKernel {
    /// Maximum deviation between a rounded join and its chords, in plane units.
    pub arc_tolerance: f64,
}

impl Default for CavalierKernel {
    fn default() -> Self {
        Self { arc_tolerance: 1.0 }
    }
}

/// An outer ring and the holes inside it, all stored counter-clockwise.
struct Region {
    outer: Polygon,
    holes: Vec<Polygon>,
}

impl CavalierKernel {
    pub fn new(arc_tolerance: f64) -> Self {
        Self { arc_tolerance }
    }

    /// Splits an even-odd ring set into outer/hole regions.
    fn regions(&self, set: &[Polygon]) -> CamToolResult<Vec<Region>> {
        let rings: Vec<&Polygon> = set.iter().filter(|r| usable_ring(r)).collect();
        if rings.is_empty() {
            return Ok(Vec::new());
        }
        if rings.len() == 1 {
            return Ok(vec![Region {
                outer: oriented(rings[0].clone(), true),
                holes: Vec::new(),
            }]);
        }
        let sketch = guarded("boolean", || to_sketch(set))?;
        Ok(sketch_regions(&sketch))
    }

    /// Offsets one ring treated as a solid region.
    fn offset_ring(&self, ring: &Polygon, distance: f64) -> CamToolResult<Vec<Polygon>> {
        // Clockwise input: positive offsets move outward, negative inward.
        let mut pline = Polyline::new();
        for p in oriented(ring.clone(), false) {
            pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        pline.set_is_closed(true);

        let offsets = guarded("offset", || pline.parallel_offset(distance))?;
        Ok(offsets
            .iter()
            .map(|pl| self.flatten(pl))
            .filter(|ring| usable_ring(ring))
            .collect())
    }

    /// Replaces arc segments (non-zero bulge) with chords within tolerance.
    fn flatten(&self, pline: &Polyline<f64>) -> Polygon {
        let count = pline.vertex_data.len();
        let mut ring = Vec::with_capacity(count);
        for i in 0..count {
            let v1 = pline.vertex_data[i];
            let v2 = pline.vertex_data[(i + 1) % count];
            ring.push(Point::new(v1.x, v1.y));
            if v1.bulge.abs() > 1e-9 && (i + 1 < count || pline.is_closed()) {
                ring.extend(arc_points(
                    Point::new(v1.x, v1.y),
                    Point::new(v2.x, v2.y),
                    v1.bulge,
                    self.arc_tolerance,
                ));
            }
        }
        dedup_ring(ring)
    }
}

impl OffsetPrimitive for CavalierKernel {
    fn offset(&self, set: &[Polygon], distance: f64) -> CamToolResult<PathSet> {
        let regions = self.regions(set)?;
        if distance == 0.0 {
            return Ok(regions_to_set(regions));
        }

        let mut outers = Vec::new();
        let mut holes = Vec::new();
        for region in &regions {
            outers.extend(self.offset_ring(&region.outer, distance)?);
            for hole in &region.holes {
                holes.extend(self.offset_ring(hole, -distance)?);
            }
        }

        if regions.len() == 1 && holes.is_empty() && regions[0].holes.is_empty() {
            return Ok(outers.into_iter().map(|r| oriented(r, true)).collect());
        }

        guarded("boolean", || {
            let solid = union_all(&outers);
            let cut = union_all(&holes);
            let sketch = if holes.is_empty() {
                solid
            } else {
                solid.difference(&cut)
            };
            regions_to_set(sketch_regions(&sketch))
        })
    }

    fn boolean(&self, op: BooleanOp, a: &[Polygon], b: &[Polygon]) -> CamToolResult<PathSet> {
        let a_empty = !a.iter().any(|r| usable_ring(r));
        let b_empty = !b.iter().any(|r| usable_ring(r));
        if a_empty && b_empty {
            return Ok(Vec::new());
        }
        if b_empty {
            return match op {
                BooleanOp::Intersect => Ok(Vec::new()),
                _ => self.offset(a, 0.0),
            };
        }
        if a_empty {
            return match op {
                BooleanOp::Union | BooleanOp::Xor => self.offset(b, 0.0),
                _ => Ok(Vec::new()),
            };
        }

        guarded("boolean", || {
            let sa = to_sketch(a);
            let sb = to_sketch(b);
            let result = match op {
                BooleanOp::Union => sa.union(&sb),
                BooleanOp::Intersect => sa.intersection(&sb),
                BooleanOp::Difference => sa.difference(&sb),
                BooleanOp::Xor => sa.xor(&sb),
            };
            regions_to_set(sketch_regions(&result))
        })
    }
}

/// Runs a geometry library call, turning a panic into an error.
fn guarded<T>(what: &str, f: impl FnOnce() -> T) -> CamToolResult<T> {
    panic::catch_unwind(panic::AssertUnwindSafe(f)).map_err(|_| {
        warn!("Panic during polygon {}", what);
        CamToolError::GeometryError(format!("polygon {} failed", what))
    })
}

fn usable_ring(ring: &[Point]) -> bool {
    ring.len() >= 3 && signed_area(ring).abs() > MIN_RING_AREA
}

/// Returns the ring wound counter-clockwise (`ccw`) or clockwise.
fn oriented(mut ring: Polygon, ccw: bool) -> Polygon {
    if (signed_area(&ring) > 0.0) != ccw {
        ring.reverse();
    }
    ring
}

fn dedup_ring(mut ring: Polygon) -> Polygon {
    ring.dedup_by(|a, b| a.distance_sq(b) < 1e-18);
    while ring.len() > 1 && ring[0].distance_sq(&ring[ring.len() - 1]) < 1e-18 {
        ring.pop();
    }
    ring
}

/// Interior points of the arc from `start` to `end` with the given bulge.
fn arc_points(start: Point, end: Point, bulge: f64, tolerance: f64) -> Vec<Point> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let chord = (dx * dx + dy * dy).sqrt();
    if chord < 1e-12 {
        return Vec::new();
    }

    // Center sits on the chord's left normal for counter-clockwise arcs.
    let offset = chord / 2.0 * (1.0 - bulge * bulge) / (2.0 * bulge);
    let cx = (start.x + end.x) / 2.0 - dy / chord * offset;
    let cy = (start.y + end.y) / 2.0 + dx / chord * offset;
    let radius = ((start.x - cx).powi(2) + (start.y - cy).powi(2)).sqrt();
    let sweep = 4.0 * bulge.atan();

    let max_step = if tolerance < radius {
        2.0 * (1.0 - tolerance / radius).acos()
    } else {
        PI / 4.0
    };
    let steps = ((sweep.abs() / max_step.max(1e-3)).ceil() as usize).max(1);
    let start_angle = (start.y - cy).atan2(start.x - cx);

    (1..steps)
        .map(|k| {
            let angle = start_angle + sweep * k as f64 / steps as f64;
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

fn ring_sketch(ring: &[Point]) -> Sketch<()> {
    let points: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
    Sketch::polygon(&points, None)
}

/// Builds an even-odd region from a ring set.
fn to_sketch(set: &[Polygon]) -> Sketch<()> {
    let mut sketch = Sketch::new();
    for ring in set.iter().filter(|r| usable_ring(r)) {
        sketch = sketch.xor(&ring_sketch(ring));
    }
    sketch
}

fn union_all(rings: &[Polygon]) -> Sketch<()> {
    let mut sketch = Sketch::new();
    for ring in rings.iter().filter(|r| usable_ring(r)) {
        sketch = sketch.union(&ring_sketch(ring));
    }
    sketch
}

fn sketch_regions(sketch: &Sketch<()>) -> Vec<Region> {
    let mp = sketch.to_multipolygon();
    let mut regions = Vec::new();
    for poly in mp.0 {
        let outer = dedup_ring(
            poly.exterior()
                .0
                .iter()
                .map(|c| Point::new(c.x, c.y))
                .collect(),
        );
        if !usable_ring(&outer) {
            continue;
        }
        let holes = poly
            .interiors()
            .iter()
            .map(|ring| dedup_ring(ring.0.iter().map(|c| Point::new(c.x, c.y)).collect()))
            .filter(|ring| usable_ring(ring))
            .map(|ring| oriented(ring, true))
            .collect();
        regions.push(Region {
            outer: oriented(outer, true),
            holes,
        });
    }
    regions
}

fn regions_to_set(regions: Vec<Region>) -> PathSet {
    let mut set = Vec::new();
    for region in regions {
        set.push(region.outer);
        set.extend(region.holes.into_iter().map(|h| oriented(h, false)));
    }
    set
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

    fn total_area(set: &[Polygon]) -> f64 {
        set.iter().map(|r| signed_area(r)).sum()
    }

    #[test]
    fn test_shrink_square() {
        let kernel = CavalierKernel::default();
        let result = kernel.offset(&[square(0.0, 0.0, 100.0)], -10.0).unwrap();
        assert_eq!(result.len(), 1);
        assert!((total_area(&result) - 6400.0).abs() < 1.0);
        assert!(signed_area(&result[0]) > 0.0);
    }

    #[test]
    fn test_shrink_ignores_input_winding() {
        let kernel = CavalierKernel::default();
        let mut cw = square(0.0, 0.0, 100.0);
        cw.reverse();
        let result = kernel.offset(&[cw], -10.0).unwrap();
        assert!((total_area(&result) - 6400.0).abs() < 1.0);
    }

    #[test]
    fn test_grow_square_has_rounded_corners() {
        // Fine tolerance so chord sag stays well below the area check.
        let kernel = CavalierKernel::new(0.01);
        let result = kernel.offset(&[square(0.0, 0.0, 100.0)], 10.0).unwrap();
        assert_eq!(result.len(), 1);
        // 120x120 minus the four corner squares plus a full circle of radius 10.
        let expected = 100.0 * 100.0 + 4.0 * 100.0 * 10.0 + PI * 100.0;
        assert!((total_area(&result) - expected).abs() < 5.0);
        assert!(result[0].len() > 8);
    }

    #[test]
    fn test_shrink_to_nothing() {
        let kernel = CavalierKernel::default();
        let result = kernel.offset(&[square(0.0, 0.0, 100.0)], -60.0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_arc_points_quarter_circle() {
        // Quarter circle of radius 10 around the origin, counter-clockwise.
        let bulge = (PI / 8.0).tan();
        let pts = arc_points(Point::new(10.0, 0.0), Point::new(0.0, 10.0), bulge, 0.01);
        assert!(!pts.is_empty());
        for p in &pts {
            assert!((p.distance_to(&Point::new(0.0, 0.0)) - 10.0).abs() < 1e-9);
            assert!(p.x > 0.0 && p.y > 0.0);
        }
    }

    #[test]
    fn test_boolean_with_empty_operand() {
        let kernel = CavalierKernel::default();
        let a = vec![square(0.0, 0.0, 10.0)];
        assert!(kernel
            .boolean(BooleanOp::Intersect, &a, &[])
            .unwrap()
            .is_empty());
        assert_eq!(kernel.boolean(BooleanOp::Union, &[], &a).unwrap().len(), 1);
        assert!(kernel
            .boolean(BooleanOp::Difference, &[], &a)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_combine_op_mapping() {
        assert_eq!(BooleanOp::from(CombineOp::Diff), BooleanOp::Difference);
        assert_eq!(BooleanOp::from(CombineOp::Intersect), BooleanOp::Intersect);
    }
}

//! Path merging.
//!
//! Stitches independent closed rings into as few continuous tool movements
//! as possible. Each ring is entered at the point nearest to where the tool
//! currently is; a join is only made without lifting the tool when the
//! straight connecting move stays inside the safe-crossing boundary.

use cutkit_core::geometry::{segment_inside, Point, Polygon};
use tracing::debug;

use crate::toolpath::CamPath;

/// Merges `rings` into continuous paths.
///
/// With `boundary == None` every join is unsafe, so each ring becomes its
/// own path. Rings are consumed in nearest-neighbor order starting from the
/// first ring; each one is rotated to start at its entry point and gets that
/// point repeated at the end.
pub fn merge_paths(boundary: Option<&[Polygon]>, rings: &[Polygon]) -> Vec<CamPath> {
    let mut remaining: Vec<usize> = (0..rings.len()).filter(|&i| !rings[i].is_empty()).collect();
    if remaining.is_empty() {
        return Vec::new();
    }

    let first = remaining.remove(0);
    let mut current = closed(&rings[first], 0);
    let mut finished: Vec<Vec<Point>> = Vec::new();

    while !remaining.is_empty() {
        let Some(&last) = current.last() else {
            break;
        };
        let (slot, point_index) = nearest(rings, &remaining, &last);
        let ring = &rings[remaining.remove(slot)];
        let next = closed(ring, point_index);

        if segment_inside(boundary, &last, &next[0]) {
            current.extend(next);
        } else {
            finished.push(std::mem::replace(&mut current, next));
        }
    }
    finished.push(current);

    debug!(
        "Merged {} rings into {} paths",
        rings.len(),
        finished.len()
    );

    finished
        .into_iter()
        .map(|path| {
            let safe = match (path.first(), path.last()) {
                (Some(first), Some(last)) => segment_inside(boundary, last, first),
                _ => false,
            };
            CamPath::from_points(&path, safe)
        })
        .collect()
}

/// Finds the unconsumed ring point nearest to `from`.
///
/// Returns the slot in `remaining` and the point index inside that ring.
/// Ties keep the first point found in scan order.
fn nearest(rings: &[Polygon], remaining: &[usize], from: &Point) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_dist = f64::INFINITY;
    for (slot, &ring_index) in remaining.iter().enumerate() {
        for (point_index, p) in rings[ring_index].iter().enumerate() {
            let dist = from.distance_sq(p);
            if dist < best_dist {
                best_dist = dist;
                best = (slot, point_index);
            }
        }
    }
    best
}

/// The ring rotated to start at `start`, with the start point repeated.
fn closed(ring: &[Point], start: usize) -> Vec<Point> {
    let mut path = Vec::with_capacity(ring.len() + 1);
    path.extend_from_slice(&ring[start..]);
    path.extend_from_slice(&ring[..start]);
    path.push(ring[start]);
    path
}

//! Bridges (holding tabs).
//!
//! Bridge regions are areas where the cutter stays at bridge height instead
//! of cutting to full depth. [`prepare_bridges`] turns the job's bridge
//! shapes into one plane region; a [`BridgeSeparator`] then splits each
//! cutter path at the region boundary.

use cutkit_core::geometry::{lerp, locate_point, segment_intersections, PathSet, Point, PointLocation, Polygon};
use cutkit_core::{BridgeSpec, MaterialSpec, ToolSpec, Units};
use tracing::debug;

use crate::error::{CamToolError, CamToolResult};
use crate::kernel::{BooleanOp, OffsetPrimitive};

/// Capability name used in diagnostics.
pub const BRIDGE_CAPABILITY: &str = "Bridge separator";

/// Splits cutter paths at bridge boundaries.
pub trait BridgeSeparator {
    /// Splits `path` into sub-paths alternating between cutting depth and
    /// bridge height, starting with a depth sub-path that may be empty.
    /// Adjacent sub-paths share their split point.
    fn separate(&self, path: &[Point], bridges: &[Polygon]) -> CamToolResult<Vec<Polygon>>;
}

/// Splits paths with segment/boundary intersection tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonBridgeSeparator;

impl BridgeSeparator for PolygonBridgeSeparator {
    fn separate(&self, path: &[Point], bridges: &[Polygon]) -> CamToolResult<Vec<Polygon>> {
        if bridges.is_empty() || path.len() < 2 {
            return Ok(vec![path.to_vec()]);
        }

        let mut parts: Vec<Polygon> = vec![Vec::new()];
        let mut over_bridge = false;

        for w in path.windows(2) {
            let (a, b) = (w[0], w[1]);
            let mut cuts = vec![0.0];
            cuts.extend(segment_intersections(bridges, &a, &b));
            cuts.push(1.0);

            for c in cuts.windows(2) {
                if c[1] - c[0] <= 1e-12 {
                    continue;
                }
                let start = lerp(&a, &b, c[0]);
                let end = lerp(&a, &b, c[1]);
                let mid = lerp(&a, &b, (c[0] + c[1]) / 2.0);
                let bridge = locate_point(bridges, &mid) == PointLocation::Inside;

                if bridge != over_bridge {
                    parts.push(Vec::new());
                    over_bridge = bridge;
                }
                if let Some(part) = parts.last_mut() {
                    if part.last() != Some(&start) {
                        part.push(start);
                    }
                    part.push(end);
                }
            }
        }

        debug!("Split path into {} bridge/depth parts", parts.len());
        Ok(parts)
    }
}

/// Separator used when bridge splitting is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBridgeSeparator;

impl BridgeSeparator for UnavailableBridgeSeparator {
    fn separate(&self, _path: &[Point], _bridges: &[Polygon]) -> CamToolResult<Vec<Polygon>> {
        Err(CamToolError::CapabilityUnavailable(
            BRIDGE_CAPABILITY.to_string(),
        ))
    }
}

/// Bridge region and height handed to the emitter
#[derive(Debug, Clone, PartialEq)]
pub struct Bridges {
    /// Region in plane units
    pub geometry: PathSet,
    /// Bridge top, in program units
    pub tab_z: f64,
}

/// Builds the bridge region of a job.
///
/// Enabled shapes are grown by their margin plus the cutter radius and
/// unioned. Returns `None` when bridges are disabled or empty.
pub fn prepare_bridges<K: OffsetPrimitive>(
    kernel: &K,
    spec: &BridgeSpec,
    tool: &ToolSpec,
    material: &MaterialSpec,
    units: Units,
) -> CamToolResult<Option<Bridges>> {
    if !spec.is_active() {
        return Ok(None);
    }

    let scale = spec.units.geometry_scale();
    let radius = tool.diameter_in_plane() / 2.0;
    let mut geometry: PathSet = Vec::new();
    for shape in spec.shapes.iter().filter(|s| s.enabled) {
        let rings: PathSet = shape
            .geometry
            .iter()
            .map(|ring| ring.iter().map(|p| p.scaled(scale)).collect())
            .collect();
        let grown = kernel.offset(&rings, shape.margin * scale + radius)?;
        geometry = kernel.boolean(BooleanOp::Union, &geometry, &grown)?;
    }

    if geometry.is_empty() {
        return Ok(None);
    }

    let tab_z = material.top_z(units) - Units::convert(spec.max_cut_depth, spec.units, units);
    debug!("Prepared {} bridge rings at Z {}", geometry.len(), tab_z);
    Ok(Some(Bridges { geometry, tab_z }))
}

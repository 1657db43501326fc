//! Operation planning.
//!
//! Turns one [`OperationSpec`] into merged [`CamPath`]s:
//! - Source regions are folded with the operation's combine op
//! - The margin grows or shrinks the result
//! - The operation kind picks the ring generator (pocket, outline, engrave)
//!   or delegates to the V-pocket kernel
//!
//! All geometry handled here is in geometry plane units.

pub mod engrave;
pub mod outline;
pub mod pocket;
pub mod vpocket;

use cutkit_core::geometry::PathSet;
use cutkit_core::{CamOp, OperationSpec, ToolSpec};
use tracing::debug;

use crate::error::CamToolResult;
use crate::kernel::{BooleanOp, CavalierKernel, OffsetPrimitive};
use crate::toolpath::CamPath;

pub use engrave::engrave;
pub use outline::OutlineSide;
pub use vpocket::{is_v_cutter, UnavailableVPocketKernel, VPocketKernel, VPOCKET_CAPABILITY};

/// Default bound on ring-stepping iterations per operation.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Plans toolpaths for operations using an offset kernel.
pub struct OperationPlanner<K = CavalierKernel> {
    kernel: K,
    vpocket: Box<dyn VPocketKernel>,
    max_iterations: usize,
}

impl OperationPlanner<CavalierKernel> {
    pub fn new() -> Self {
        Self::with_kernel(CavalierKernel::default())
    }
}

impl Default for OperationPlanner<CavalierKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OffsetPrimitive> OperationPlanner<K> {
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            vpocket: Box::new(UnavailableVPocketKernel),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Installs a V-carving kernel.
    pub fn with_vpocket_kernel(mut self, kernel: Box<dyn VPocketKernel>) -> Self {
        self.vpocket = kernel;
        self
    }

    /// Sets the ring-stepping guard.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Folds the operation's source regions left to right.
    ///
    /// A single region is returned as given, open strokes included.
    pub fn combined_geometry(&self, op: &OperationSpec) -> CamToolResult<PathSet> {
        let mut geometries = op.plane_geometries().into_iter();
        let Some(mut result) = geometries.next() else {
            return Ok(Vec::new());
        };
        let boolean = BooleanOp::from(op.combine);
        for geometry in geometries {
            result = self.kernel.boolean(boolean, &result, &geometry)?;
        }
        Ok(result)
    }

    /// Combined geometry with the margin applied.
    pub fn source_geometry(&self, op: &OperationSpec) -> CamToolResult<PathSet> {
        let geometry = self.combined_geometry(op)?;
        let grow = op.kind.margin_sign() * op.margin * op.units.geometry_scale();
        if op.kind.uses_margin() && grow != 0.0 {
            return self.kernel.offset(&geometry, grow);
        }
        Ok(geometry)
    }

    /// Plans the merged paths of one operation.
    pub fn plan(&self, op: &OperationSpec, tool: &ToolSpec) -> CamToolResult<Vec<CamPath>> {
        let geometry = self.source_geometry(op)?;
        let diameter = tool.diameter_in_plane();
        let climb = op.direction.is_climb();

        let paths = match op.kind {
            CamOp::Pocket => self.pocket(&geometry, diameter, tool.overlap(), climb)?,
            CamOp::Inside | CamOp::Outside => {
                let side = if op.kind == CamOp::Inside {
                    OutlineSide::Inside
                } else {
                    OutlineSide::Outside
                };
                let width = contour_width(op, tool);
                self.outline(&geometry, diameter, side, width, tool.overlap(), climb)?
            }
            CamOp::Engrave => engrave(&geometry, climb),
            CamOp::VPocket => {
                if !is_v_cutter(tool.angle) {
                    debug!("Cutter angle {} cannot V-carve", tool.angle);
                    return Ok(Vec::new());
                }
                let pass_depth = tool.pass_depth * tool.units.geometry_scale();
                let max_depth = op.cut_depth * op.units.geometry_scale();
                self.vpocket
                    .v_pocket(&geometry, tool.angle, pass_depth, max_depth)?
            }
        };

        debug!("{} planned {} paths", op.kind, paths.len());
        Ok(paths)
    }

    /// Region the operation will clear, for display.
    pub fn preview_geometry(&self, op: &OperationSpec, tool: &ToolSpec) -> CamToolResult<PathSet> {
        let region = self.source_geometry(op)?;
        let k = &self.kernel;
        match op.kind {
            CamOp::Pocket | CamOp::VPocket => Ok(region),
            CamOp::Inside => {
                let inner = k.offset(&region, -contour_width(op, tool))?;
                k.boolean(BooleanOp::Difference, &region, &inner)
            }
            CamOp::Outside => {
                let outer = k.offset(&region, contour_width(op, tool))?;
                k.boolean(BooleanOp::Difference, &outer, &region)
            }
            CamOp::Engrave => {
                let half = tool.diameter_in_plane() / 2.0;
                let outer = k.offset(&region, half)?;
                let inner = k.offset(&region, -half)?;
                k.boolean(BooleanOp::Difference, &outer, &inner)
            }
        }
    }
}

/// Contour band width in plane units, never narrower than the cutter.
pub fn contour_width(op: &OperationSpec, tool: &ToolSpec) -> f64 {
    let width = op.width * op.units.geometry_scale();
    width.max(tool.diameter_in_plane())
}

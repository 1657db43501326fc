//! V-bit pocketing.
//!
//! Carving with a V-bit needs a medial-axis style computation that is not
//! part of this crate. It is reached through [`VPocketKernel`], which plans
//! paths whose points carry their own depth.

use cutkit_core::geometry::Polygon;

use crate::error::{CamToolError, CamToolResult};
use crate::toolpath::CamPath;

/// Capability name used in diagnostics.
pub const VPOCKET_CAPABILITY: &str = "V-pocket kernel";

/// External V-carving kernel.
///
/// Geometry, `pass_depth` and `max_depth` are in geometry plane units. The
/// returned points carry Z in plane units, zero at the top surface and
/// negative below it.
pub trait VPocketKernel {
    fn v_pocket(
        &self,
        geometry: &[Polygon],
        cutter_angle: f64,
        pass_depth: f64,
        max_depth: f64,
    ) -> CamToolResult<Vec<CamPath>>;
}

/// Kernel used when no V-carving implementation is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableVPocketKernel;

impl VPocketKernel for UnavailableVPocketKernel {
    fn v_pocket(
        &self,
        _geometry: &[Polygon],
        _cutter_angle: f64,
        _pass_depth: f64,
        _max_depth: f64,
    ) -> CamToolResult<Vec<CamPath>> {
        Err(CamToolError::CapabilityUnavailable(
            VPOCKET_CAPABILITY.to_string(),
        ))
    }
}

/// Whether a cutter with this included angle can V-carve at all.
pub fn is_v_cutter(cutter_angle: f64) -> bool {
    cutter_angle > 0.0 && cutter_angle < 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v_cutter_angle_range() {
        assert!(is_v_cutter(60.0));
        assert!(!is_v_cutter(0.0));
        assert!(!is_v_cutter(180.0));
        assert!(!is_v_cutter(-30.0));
    }

    #[test]
    fn test_unavailable_kernel_reports_capability() {
        let result = UnavailableVPocketKernel.v_pocket(&[], 60.0, 10.0, 100.0);
        assert!(matches!(
            result,
            Err(CamToolError::CapabilityUnavailable(ref name)) if name == VPOCKET_CAPABILITY
        ));
    }
}

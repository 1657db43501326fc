//! Inside and outside contour bands.

use cutkit_core::geometry::{PathSet, Polygon};
use tracing::debug;

use super::OperationPlanner;
use crate::error::{CamToolError, CamToolResult};
use crate::kernel::{BooleanOp, OffsetPrimitive};
use crate::merge::merge_paths;
use crate::toolpath::CamPath;

/// Which side of the region edge the band lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineSide {
    Inside,
    Outside,
}

impl OutlineSide {
    /// Direction in which rings step away from the edge.
    fn sign(self) -> f64 {
        match self {
            Self::Inside => -1.0,
            Self::Outside => 1.0,
        }
    }

    /// Whether rings must be reversed for the requested milling direction.
    fn needs_reverse(self, climb: bool) -> bool {
        match self {
            Self::Inside => climb,
            Self::Outside => !climb,
        }
    }
}

fn reverse_all(rings: &mut PathSet) {
    rings.iter_mut().for_each(|ring| ring.reverse());
}

impl<K: OffsetPrimitive> OperationPlanner<K> {
    /// Cuts a band of `width` along the edge of `geometry`.
    ///
    /// The first ring sits one cutter radius from the edge; later rings step
    /// away by `cutter_diameter * (1 - overlap)`. A step that would pass
    /// `width` is replaced by a final ring at exactly `width`. Joins may only
    /// cross the band itself.
    pub fn outline(
        &self,
        geometry: &[Polygon],
        cutter_diameter: f64,
        side: OutlineSide,
        width: f64,
        overlap: f64,
        climb: bool,
    ) -> CamToolResult<Vec<CamPath>> {
        let kernel = self.kernel();
        let sign = side.sign();
        let radius = cutter_diameter / 2.0;
        let each_width = cutter_diameter * (1.0 - overlap);
        let need_reverse = side.needs_reverse(climb);

        let mut current = kernel.offset(geometry, sign * radius)?;
        let far = kernel.offset(geometry, sign * (width - radius))?;
        let bounds = match side {
            OutlineSide::Inside => kernel.boolean(BooleanOp::Difference, &current, &far)?,
            OutlineSide::Outside => kernel.boolean(BooleanOp::Difference, &far, &current)?,
        };

        let mut all: PathSet = Vec::new();
        let mut current_width = cutter_diameter;
        let mut iterations = 0;

        while current_width <= width {
            iterations += 1;
            if iterations > self.max_iterations() {
                return Err(CamToolError::RingLimitExceeded {
                    operation: format!("{:?} outline", side),
                    limit: self.max_iterations(),
                });
            }
            if need_reverse {
                reverse_all(&mut current);
            }
            let mut rings = current.clone();
            rings.append(&mut all);
            all = rings;

            let next_width = current_width + each_width;
            if next_width > width && width - current_width > 0.0 {
                let mut last = kernel.offset(&current, sign * (width - current_width))?;
                if need_reverse {
                    reverse_all(&mut last);
                }
                last.append(&mut all);
                all = last;
                break;
            }
            current_width = next_width;
            current = kernel.offset(&current, sign * each_width)?;
        }

        debug!("{:?} outline generated {} rings", side, all.len());
        Ok(merge_paths(Some(&bounds), &all))
    }
}

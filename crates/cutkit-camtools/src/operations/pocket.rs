//! Pocket clearing with concentric offset rings.

use cutkit_core::geometry::{PathSet, Polygon};
use tracing::debug;

use super::OperationPlanner;
use crate::error::{CamToolError, CamToolResult};
use crate::kernel::OffsetPrimitive;
use crate::merge::merge_paths;
use crate::toolpath::CamPath;

impl<K: OffsetPrimitive> OperationPlanner<K> {
    /// Clears `geometry` with rings stepping inward from the edge.
    ///
    /// The first ring sits one cutter radius inside the region and also
    /// serves as the safe-crossing boundary. Each further ring moves in by
    /// `cutter_diameter * (1 - overlap)` until the region is used up. Newer
    /// rings are placed ahead of older ones before merging.
    pub fn pocket(
        &self,
        geometry: &[Polygon],
        cutter_diameter: f64,
        overlap: f64,
        climb: bool,
    ) -> CamToolResult<Vec<CamPath>> {
        let step = cutter_diameter * (1.0 - overlap);
        let mut current = self.kernel().offset(geometry, -cutter_diameter / 2.0)?;
        let bounds = current.clone();
        let mut all: PathSet = Vec::new();
        let mut iterations = 0;

        while !current.is_empty() {
            iterations += 1;
            if iterations > self.max_iterations() {
                return Err(CamToolError::RingLimitExceeded {
                    operation: "Pocket".to_string(),
                    limit: self.max_iterations(),
                });
            }
            if climb {
                current.iter_mut().for_each(|ring| ring.reverse());
            }
            let next = self.kernel().offset(&current, -step)?;
            current.append(&mut all);
            all = current;
            current = next;
        }

        debug!("Pocket generated {} rings", all.len());
        Ok(merge_paths(Some(&bounds), &all))
    }
}

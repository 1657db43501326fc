//! Job pipeline: plan every operation and assemble the program.
//!
//! Operations are independent. A planning failure in one operation is
//! recorded as an error diagnostic and that operation is left out of the
//! program; the remaining operations are still emitted.

use cutkit_core::{CamOp, JobSpec, OperationSpec};
use serde::Serialize;
use tracing::{debug, info};

use crate::bridges::{prepare_bridges, Bridges};
use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
use crate::emitter::{EmitParams, ProgramEmitter};
use crate::error::{CamToolError, CamToolResult};
use crate::kernel::{CavalierKernel, OffsetPrimitive};
use crate::operations::OperationPlanner;
use crate::toolpath::CamPath;

/// Planned paths of one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedOperation {
    /// Position in the job's operation list
    pub index: usize,
    pub name: String,
    pub paths: Vec<CamPath>,
}

/// Result of running a job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOutput {
    pub gcode: String,
    pub operations: Vec<PlannedOperation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl JobOutput {
    /// Indices of operations that failed to plan.
    pub fn failed_operations(&self) -> Vec<usize> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .filter_map(|d| d.operation)
            .collect()
    }
}

/// Runs planner and emitter over a whole job.
pub struct JobPipeline<K = CavalierKernel> {
    planner: OperationPlanner<K>,
    emitter: ProgramEmitter,
}

impl JobPipeline<CavalierKernel> {
    pub fn new() -> Self {
        Self::with_planner(OperationPlanner::new())
    }
}

impl Default for JobPipeline<CavalierKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OffsetPrimitive> JobPipeline<K> {
    pub fn with_planner(planner: OperationPlanner<K>) -> Self {
        Self {
            planner,
            emitter: ProgramEmitter::new(),
        }
    }

    pub fn with_emitter(mut self, emitter: ProgramEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn planner(&self) -> &OperationPlanner<K> {
        &self.planner
    }

    /// Plans one operation, turning unavailable capabilities into an empty
    /// result and a one-time warning.
    fn plan(
        &self,
        index: usize,
        op: &OperationSpec,
        job: &JobSpec,
        diagnostics: &mut Diagnostics,
    ) -> CamToolResult<Vec<CamPath>> {
        match self.planner.plan(op, &job.tool) {
            Err(CamToolError::CapabilityUnavailable(name)) => {
                diagnostics.warn_once(
                    &name,
                    Some(index),
                    format!("{} is not available; {} produces no paths", name, op.kind),
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Validates the job, plans every enabled operation and emits the program.
    ///
    /// Only an invalid job fails the whole run; planning failures are
    /// reported per operation.
    pub fn run(&self, job: &JobSpec) -> CamToolResult<JobOutput> {
        job.validate()?;

        let mut diagnostics = Diagnostics::new();
        let mut gcode = self
            .emitter
            .program_header(&job.tool, &job.material, &job.program);

        let bridges: Option<Bridges> = match prepare_bridges(
            self.planner.kernel(),
            &job.bridges,
            &job.tool,
            &job.material,
            job.program.units,
        ) {
            Ok(bridges) => bridges,
            Err(e) => {
                diagnostics.warn(None, format!("Bridges ignored: {}", e));
                None
            }
        };

        let mut operations = Vec::new();
        for (index, op) in job.enabled_operations() {
            debug!("Planning operation {} ({})", index, op.kind);

            let paths = match self.plan(index, op, job, &mut diagnostics) {
                Ok(paths) => paths,
                Err(e) if e.is_planning_failure() => {
                    diagnostics.error(Some(index), format!("{} failed: {}", op.kind, e));
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut params = EmitParams::for_operation(op, &job.tool, &job.material, &job.program);
            if op.kind == CamOp::VPocket {
                params = params.with_z();
            }

            gcode.push_str(&self.emitter.operation_block(
                index,
                op,
                &job.tool,
                &job.program,
                paths.len(),
            ));
            gcode.push_str(&self.emitter.emit_paths(
                &paths,
                &params,
                bridges.as_ref(),
                &mut diagnostics,
                Some(index),
            ));

            operations.push(PlannedOperation {
                index,
                name: op.name.clone(),
                paths,
            });
        }

        info!(
            "Generated program for {} operations ({} diagnostics)",
            operations.len(),
            diagnostics.entries().len()
        );

        Ok(JobOutput {
            gcode,
            operations,
            diagnostics: diagnostics.into_vec(),
        })
    }
}

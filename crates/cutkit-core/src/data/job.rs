//! A complete planning job.

use serde::{Deserialize, Serialize};

use crate::data::{BridgeSpec, MaterialSpec, OperationSpec, ProgramOptions, ToolSpec};
use crate::error::Result;

/// Everything needed to produce one program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSpec {
    pub tool: ToolSpec,
    pub material: MaterialSpec,
    pub program: ProgramOptions,
    pub bridges: BridgeSpec,
    pub operations: Vec<OperationSpec>,
}

impl JobSpec {
    /// Operations that take part in planning, with their job index.
    pub fn enabled_operations(&self) -> impl Iterator<Item = (usize, &OperationSpec)> {
        self.operations.iter().enumerate().filter(|(_, op)| op.enabled)
    }

    pub fn validate(&self) -> Result<()> {
        self.tool.validate()?;
        self.material.validate()?;
        self.program.validate()?;
        self.bridges.validate()?;
        for op in &self.operations {
            op.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CamOp;

    #[test]
    fn test_empty_job_is_valid() {
        assert!(JobSpec::default().validate().is_ok());
    }

    #[test]
    fn test_enabled_operations_keep_index() {
        let mut job = JobSpec::default();
        job.operations.push(OperationSpec {
            enabled: false,
            ..OperationSpec::new(CamOp::Pocket)
        });
        job.operations.push(OperationSpec::new(CamOp::Engrave));
        let enabled: Vec<usize> = job.enabled_operations().map(|(i, _)| i).collect();
        assert_eq!(enabled, vec![1]);
    }

    #[test]
    fn test_invalid_tool_rejected() {
        let mut job = JobSpec::default();
        job.tool.diameter = 0.0;
        assert!(job.validate().is_err());
    }
}

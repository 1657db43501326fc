//! # CutKit
//!
//! A 2D CAM toolpath planner for CNC routers:
//! - Pocket, inside/outside contour and engrave operations
//! - Region combination (union, intersect, difference, xor) and margins
//! - Bridges (holding tabs) and ramped plunges
//! - G-code output in inches or millimeters
//!
//! ## Architecture
//!
//! CutKit is organized as a workspace with multiple crates:
//!
//! 1. **cutkit-core** - Units, plane geometry and the job data model
//! 2. **cutkit-camtools** - Offset kernel, path merging, operation planning and G-code emission
//! 3. **cutkit-settings** - Job file loading, saving and validation
//! 4. **cutkit** - Command-line binary that integrates all crates

use std::path::Path;

pub use cutkit_camtools::{
    Diagnostic, JobOutput, JobPipeline, OperationPlanner, PlannedOperation, ProgramEmitter,
    Severity,
};
pub use cutkit_core::{
    BridgeShape, BridgeSpec, CamOp, CombineOp, Direction, JobSpec, MaterialSpec, OperationSpec,
    ProgramOptions, ToolSpec, Units, ZOrigin,
};
pub use cutkit_settings::{JobConfig, JobFormat, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so a program written to stdout stays clean
/// - RUST_LOG environment variable support, INFO when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Loads a job file and plans it with the default pipeline.
///
/// Load-time repairs are prepended to the job's diagnostics as warnings.
pub fn run_job_file(path: &Path) -> anyhow::Result<JobOutput> {
    use anyhow::Context;

    let config = JobConfig::load_from_file(path)
        .with_context(|| format!("Failed to read job file {}", path.display()))?;

    let mut output = JobPipeline::new()
        .run(&config.job)
        .with_context(|| format!("Failed to plan job {}", path.display()))?;

    let mut diagnostics: Vec<Diagnostic> = config
        .warnings
        .into_iter()
        .map(|message| Diagnostic {
            severity: Severity::Warning,
            message,
            operation: None,
        })
        .collect();
    diagnostics.append(&mut output.diagnostics);
    output.diagnostics = diagnostics;
    Ok(output)
}

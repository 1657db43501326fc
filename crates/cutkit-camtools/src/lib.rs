//! # CutKit CAM Tools
//!
//! Toolpath planning and G-code emission for 2D machining operations.
//!
//! ## Pipeline
//!
//! - **Kernel**: polygon offset and boolean primitives ([`OffsetPrimitive`])
//! - **Operations**: pocket, inside/outside contour, engrave and V-pocket
//!   planning ([`OperationPlanner`])
//! - **Merge**: stitching offset rings into continuous tool movements
//! - **Bridges**: holding tabs left at reduced depth
//! - **Emitter**: multi-pass G-code with plunges, ramps and retracts
//! - **Job**: runs all of the above for a complete [`cutkit_core::JobSpec`]

pub mod bridges;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod job;
pub mod kernel;
pub mod merge;
pub mod operations;
pub mod toolpath;

pub use bridges::{
    prepare_bridges, BridgeSeparator, Bridges, PolygonBridgeSeparator, UnavailableBridgeSeparator,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use emitter::{EmitParams, ProgramEmitter};
pub use error::{CamToolError, CamToolResult};
pub use job::{JobOutput, JobPipeline, PlannedOperation};
pub use kernel::{BooleanOp, CavalierKernel, OffsetPrimitive};
pub use merge::merge_paths;
pub use operations::{
    engrave, OperationPlanner, OutlineSide, UnavailableVPocketKernel, VPocketKernel,
};
pub use toolpath::{CamPath, CamPoint};

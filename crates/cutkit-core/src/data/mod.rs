//! Job data model
//!
//! This module provides the immutable inputs of a planning run:
//! - Tool geometry and feeds
//! - Stock material and Z references
//! - Operations and their source regions
//! - Program output options
//! - Bridge (tab) regions
//! - The job bundling all of the above

pub mod bridges;
pub mod job;
pub mod materials;
pub mod operations;
pub mod program;
pub mod tools;

pub use bridges::{BridgeShape, BridgeSpec};
pub use job::JobSpec;
pub use materials::{MaterialSpec, ZOrigin};
pub use operations::{CamOp, CombineOp, Direction, OperationSpec};
pub use program::ProgramOptions;
pub use tools::ToolSpec;

//! # CutKit Core
//!
//! Core types and utilities for CutKit.
//! Provides the geometry primitives of the machining plane, unit handling
//! and the job data model consumed by the CAM planner.

pub mod data;
pub mod error;
pub mod geometry;
pub mod units;

pub use data::{
    BridgeShape, BridgeSpec, CamOp, CombineOp, Direction, JobSpec, MaterialSpec, OperationSpec,
    ProgramOptions, ToolSpec, ZOrigin,
};
pub use error::{Error, ParameterError, Result};
pub use geometry::{PathSet, Point, Polygon};
pub use units::Units;

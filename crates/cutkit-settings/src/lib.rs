//! CutKit Settings Crate
//!
//! Loads, validates and saves job files.

pub mod config;
pub mod error;

pub use config::{JobConfig, JobFormat};
pub use error::{SettingsError, SettingsResult};

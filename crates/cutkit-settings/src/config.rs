//! Job file handling for CutKit
//!
//! A job file holds everything the planner needs to produce one program:
//! - Tool (diameter, V angle, pass depth, stepover, feeds)
//! - Material (thickness, Z origin, clearance)
//! - Program options (output units, XY offset, precision)
//! - Bridges (holding tabs)
//! - Operations with their source geometry
//!
//! JSON and TOML are supported, chosen by file extension. Omitted fields take
//! their defaults, so a job file only needs to state what differs.
//!
//! An operation naming an unknown kind is kept but disabled, and one naming an
//! unknown combine op loses its geometry. Both are reported as warnings
//! instead of failing the load.

use cutkit_core::JobSpec;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{SettingsError, SettingsResult};

const KNOWN_KINDS: &[&str] = &["Pocket", "Inside", "Outside", "Engrave", "VPocket"];
const KNOWN_COMBINES: &[&str] = &["Union", "Intersect", "Diff", "Xor"];

/// On-disk encoding of a job file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Json,
    Toml,
}

impl JobFormat {
    /// Format named by the path's extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(SettingsError::UnsupportedFormat(ext.to_string())),
            None => Err(SettingsError::UnsupportedFormat(
                "job file must be .json or .toml".to_string(),
            )),
        }
    }
}

impl fmt::Display for JobFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
        }
    }
}

/// A loaded job
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobConfig {
    pub job: JobSpec,
    /// Problems repaired while loading
    pub warnings: Vec<String>,
}

impl JobConfig {
    /// Create new job config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_job(job: JobSpec) -> Self {
        Self {
            job,
            warnings: Vec::new(),
        }
    }

    /// Parse and validate a job from text.
    pub fn parse(content: &str, format: JobFormat) -> SettingsResult<Self> {
        let mut value: Value = match format {
            JobFormat::Json => serde_json::from_str(content)?,
            JobFormat::Toml => toml::from_str(content)?,
        };
        let warnings = repair_operations(&mut value);
        let job: JobSpec = serde_json::from_value(value)?;

        let config = Self { job, warnings };
        config.validate()?;
        Ok(config)
    }

    /// Validate and encode the job as text.
    pub fn render(&self, format: JobFormat) -> SettingsResult<String> {
        self.validate()?;
        let content = match format {
            JobFormat::Json => serde_json::to_string_pretty(&self.job)?,
            JobFormat::Toml => toml::to_string_pretty(&self.job)?,
        };
        Ok(content)
    }

    /// Load job from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = JobFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content, format)?;
        info!(
            "Loaded {} job {} with {} operations",
            format,
            path.display(),
            config.job.operations.len()
        );
        Ok(config)
    }

    /// Save job to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let format = JobFormat::from_path(path)?;
        let content = self.render(format)?;

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved {} job {}", format, path.display());
        Ok(())
    }

    /// Validate every section of the job
    pub fn validate(&self) -> SettingsResult<()> {
        self.job.validate()?;
        Ok(())
    }
}

/// Disables operations of unknown kind and empties operations with an
/// unknown combine op. Returns one message per repair.
fn repair_operations(value: &mut Value) -> Vec<String> {
    let mut warnings = Vec::new();
    let Some(operations) = value.get_mut("operations").and_then(Value::as_array_mut) else {
        return warnings;
    };

    for (index, op) in operations.iter_mut().enumerate() {
        let Some(op) = op.as_object_mut() else {
            continue;
        };

        if let Some(kind) = op.get("kind").and_then(Value::as_str) {
            if !KNOWN_KINDS.contains(&kind) {
                let message = format!("Operation {}: unknown kind '{}', disabled", index, kind);
                warn!("{}", message);
                warnings.push(message);
                op.remove("kind");
                op.insert("enabled".to_string(), Value::Bool(false));
            }
        }

        if let Some(combine) = op.get("combine").and_then(Value::as_str) {
            if !KNOWN_COMBINES.contains(&combine) {
                let message = format!(
                    "Operation {}: unknown combine op '{}', geometry dropped",
                    index, combine
                );
                warn!("{}", message);
                warnings.push(message);
                op.remove("combine");
                op.insert("geometries".to_string(), Value::Array(Vec::new()));
            }
        }
    }

    warnings
}

impl From<JobSpec> for JobConfig {
    fn from(job: JobSpec) -> Self {
        Self::from_job(job)
    }
}

//! Non-fatal conditions collected while planning a job.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Warning,
    /// An operation failed and was left out of the program
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One reported condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Index of the operation the condition belongs to, if any
    pub operation: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Some(index) => write!(f, "{} (operation {}): {}", self.severity, index, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Diagnostics of one planning run.
///
/// Warnings keyed by capability are recorded only the first time.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, operation: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        if severity != Severity::Info {
            warn!("{}", message);
        }
        self.entries.push(Diagnostic {
            severity,
            message,
            operation,
        });
    }

    pub fn warn(&mut self, operation: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Warning, operation, message);
    }

    pub fn error(&mut self, operation: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Error, operation, message);
    }

    /// Records a warning unless one with the same key was already recorded.
    /// Returns whether it was recorded.
    pub fn warn_once(
        &mut self,
        key: &str,
        operation: Option<usize>,
        message: impl Into<String>,
    ) -> bool {
        if !self.seen.insert(key.to_string()) {
            return false;
        }
        self.warn(operation, message);
        true
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

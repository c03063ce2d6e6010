//! Problems found during a pass.
//!
//! A pass never prints anything itself. Problems that don't stop it are
//! collected as [`Diagnostic`]s and rendered by the caller.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The pass stopped early.
    Error,
    /// Something was dropped or renamed; output was still produced.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// One problem, tagged with the step that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// "parse", "namespace" or "render".
    pub phase: String,
    pub message: String,
    /// File, optionally with a line (e.g., "project.godot:12").
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(phase, message)
        }
    }

    pub fn at(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        match &self.location {
            Some(location) => write!(f, " ({})", location),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let diag = Diagnostic::error("parse", "project.godot not found");
        assert!(diag.is_error());
        assert_eq!(diag.phase, "parse");

        let diag = Diagnostic::warning("parse", "layer dropped").at("project.godot:4");
        assert!(!diag.is_error());
        assert_eq!(diag.location.as_deref(), Some("project.godot:4"));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::warning("render", "'a-b' and 'a_b' both become 'AB'").at("Actions.cs");
        assert_eq!(
            diag.to_string(),
            "warning: 'a-b' and 'a_b' both become 'AB' (Actions.cs)"
        );
        assert_eq!(Diagnostic::error("parse", "bad").to_string(), "error: bad");
    }
}

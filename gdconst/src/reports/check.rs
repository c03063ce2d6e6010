//! Check command report data structures.

use std::path::PathBuf;

use gdconst_codegen::Diagnostic;
use serde::Serialize;

use super::{
    output::{Marker, Output, Report},
    render_diagnostics,
};

/// Report data from project validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the settings file.
    pub config_path: PathBuf,
    /// Namespace generated classes would declare.
    pub namespace: String,
    /// Directory generated files would be written to.
    pub output_dir: PathBuf,
    pub artifacts: Vec<CheckedArtifact>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One artifact as the next pass would handle it.
#[derive(Debug, Serialize)]
pub struct CheckedArtifact {
    /// Settings table name (e.g., "audio_buses").
    pub kind: &'static str,
    pub class_name: String,
    pub file_name: String,
    pub entries: usize,
    /// Whether the file would be written.
    pub generate: bool,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.text(&format!("✓ {} is valid\n", self.config_path.display()));
        }

        out.key_value("Namespace", &self.namespace);
        out.key_value("Output", &self.output_dir.display().to_string());
        out.newline();

        out.section("Artifacts");
        for artifact in &self.artifacts {
            let status = if artifact.generate {
                format!("{} entries", artifact.entries)
            } else if artifact.entries == 0 {
                "empty, skipped".to_string()
            } else {
                "disabled".to_string()
            };
            out.item(Marker::Bullet, &format!("{} ({})", artifact.file_name, status));
        }
    }
}

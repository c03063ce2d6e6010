//! Check operation - parse everything and report what would be generated.

use std::path::Path;

use eyre::{Context, Result};
use gdconst_codegen::Generator;
use gdconst_project::AudioBusSource;

use crate::reports::{CheckReport, CheckedArtifact};

/// Execute the check operation.
///
/// Builds the same artifacts a generation pass would and collects their
/// diagnostics. Nothing is written.
pub fn check(
    generator: &Generator,
    buses: &dyn AudioBusSource,
    config_path: &Path,
) -> Result<CheckReport> {
    let plan = generator.plan(buses).wrap_err("Validation failed")?;

    let artifacts = plan
        .artifacts
        .iter()
        .map(|planned| CheckedArtifact {
            kind: planned.artifact.kind().key(),
            class_name: planned.artifact.class_name().to_string(),
            file_name: planned.artifact.file_name(),
            entries: planned.artifact.len(),
            generate: planned.generate,
        })
        .collect();

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        namespace: plan.namespace,
        output_dir: generator.output_dir(),
        artifacts,
        diagnostics: plan.diagnostics,
    })
}

//! Generate command report data structures.

use gdconst_codegen::{
    ArtifactOutcome, ArtifactReport, Diagnostic, PassReport, PassStatus, PreviewFile,
};

use super::{
    output::{Marker, Output, Report},
    render_diagnostics,
};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Generation result (passes run or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Passes ran against the output directory.
    Written(Vec<PassReport>),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Namespace the files would declare.
    pub namespace: String,
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
    /// Warnings found while rendering.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateReport {
    /// Whether any pass was aborted or reported an error.
    pub fn has_errors(&self) -> bool {
        match &self.result {
            GenerationResult::Written(passes) => passes.iter().any(|pass| {
                pass.status == PassStatus::Aborted
                    || pass.diagnostics.iter().any(Diagnostic::is_error)
            }),
            GenerationResult::Preview(preview) => {
                preview.diagnostics.iter().any(Diagnostic::is_error)
            }
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(passes) => render_passes(out, passes),
            GenerationResult::Preview(preview) => render_preview(out, preview),
        }
    }
}

fn render_passes(out: &mut dyn Output, passes: &[PassReport]) {
    for (i, pass) in passes.iter().enumerate() {
        if i > 0 {
            out.newline();
        }
        render_diagnostics(out, &pass.diagnostics);

        match pass.status {
            PassStatus::Skipped => {
                out.text(&format!("Skipped {} pass", pass.trigger));
                continue;
            }
            PassStatus::Aborted => {
                out.text(&format!("Aborted {} pass, no files touched", pass.trigger));
                continue;
            }
            PassStatus::Completed => {}
        }

        out.section(&format!("From {}", pass.trigger));
        for artifact in &pass.artifacts {
            render_artifact(out, artifact);
        }
        if pass.changed_files() == 0 {
            out.text("  Up to date");
        }
    }

    let resolved = passes
        .iter()
        .find_map(|pass| pass.namespace.as_deref().map(|namespace| (namespace, pass)));
    if let Some((namespace, pass)) = resolved {
        out.newline();
        out.key_value("Namespace", namespace);
        out.key_value("Output", &pass.output_dir.display().to_string());
    }
}

fn render_artifact(out: &mut dyn Output, artifact: &ArtifactReport) {
    let name = &artifact.file_name;
    match artifact.outcome {
        ArtifactOutcome::Written => {
            let noun = artifact.kind.entry_noun();
            out.item(Marker::Added, &format!("{} ({} {})", name, artifact.entries, noun));
        }
        ArtifactOutcome::Unchanged => out.item(Marker::Same, name),
        ArtifactOutcome::Removed => out.item(Marker::Removed, name),
        ArtifactOutcome::Absent => {}
    }
}

fn render_preview(out: &mut dyn Output, preview: &PreviewResult) {
    render_diagnostics(out, &preview.diagnostics);

    for file in &preview.files {
        out.divider(&file.path);
        out.text(&file.content);
    }

    out.divider("Summary");
    out.key_value("Namespace", &preview.namespace);
    out.text(&format!("{} files would be generated", preview.files.len()));
}

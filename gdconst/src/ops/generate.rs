//! Generate operation - run generation passes.

use eyre::{Context, Result};
use gdconst_codegen::{Generator, PreviewFile, Trigger};
use gdconst_project::AudioBusSource;

use crate::reports::{GenerateReport, GenerationResult, PreviewResult};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Passes to run, in order.
    pub triggers: Vec<Trigger>,
    /// Whether to preview without writing.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Runs one pass per trigger, or renders their artifacts for a dry run.
pub fn generate(
    generator: &Generator,
    buses: &dyn AudioBusSource,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    if opts.dry_run {
        return preview(generator, buses, &opts.triggers);
    }

    let mut passes = Vec::with_capacity(opts.triggers.len());
    for trigger in opts.triggers {
        let pass = match trigger {
            Trigger::Configuration => generator.on_configuration_changed(),
            Trigger::AudioLayout => generator.on_audio_layout_changed(buses),
        }
        .wrap_err_with(|| format!("Generation from {} failed", trigger))?;
        passes.push(pass);
    }

    Ok(GenerateReport {
        result: GenerationResult::Written(passes),
    })
}

fn preview(
    generator: &Generator,
    buses: &dyn AudioBusSource,
    triggers: &[Trigger],
) -> Result<GenerateReport> {
    let plan = generator.plan(buses).wrap_err("Failed to render artifacts")?;

    let files = plan
        .artifacts
        .iter()
        .filter(|planned| planned.generate)
        .filter(|planned| {
            triggers
                .iter()
                .any(|trigger| trigger.kinds().contains(&planned.artifact.kind()))
        })
        .map(|planned| PreviewFile {
            path: planned.artifact.file_name(),
            content: planned.artifact.render(),
        })
        .collect();

    Ok(GenerateReport {
        result: GenerationResult::Preview(PreviewResult {
            namespace: plan.namespace,
            files,
            diagnostics: plan.diagnostics,
        }),
    })
}

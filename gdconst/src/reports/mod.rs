//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod generate;
mod output;

pub use check::{CheckReport, CheckedArtifact};
pub use clean::CleanReport;
use gdconst_codegen::Diagnostic;
pub use generate::{GenerateReport, GenerationResult, PreviewResult};
use output::Output;
pub use output::{Report, TerminalOutput};

/// Render diagnostics in the order they were collected.
fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let text = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        out.message(diag.severity, &text);
    }
}

//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Marker, Output, Report};

/// Report data from removing generated files.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Directory the files live in.
    pub output_dir: PathBuf,
    /// Deleted files (or files that would be deleted in a dry run).
    pub removed: Vec<PathBuf>,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.removed.is_empty() {
            out.text(&format!(
                "No generated files found in {}.",
                self.output_dir.display()
            ));
            return;
        }

        if self.dry_run {
            out.section("Would delete");
        } else {
            out.section("Deleted");
        }
        for path in &self.removed {
            let shown = path.strip_prefix(&self.output_dir).unwrap_or(path);
            out.item(Marker::Removed, &shown.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_dry_run() {
        let report = CleanReport {
            dry_run: true,
            output_dir: PathBuf::from("out"),
            removed: vec![PathBuf::from("out/Actions.cs")],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines, vec!["Would delete:", "  - Actions.cs"]);
    }
}

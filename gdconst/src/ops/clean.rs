//! Clean operation - remove generated files.

use eyre::{Context, Result};
use gdconst_codegen::Generator;

use crate::reports::CleanReport;

/// Execute the clean operation.
///
/// Removes every artifact file the generator could have written. With
/// `dry_run`, only lists them.
pub fn clean(generator: &Generator, dry_run: bool) -> Result<CleanReport> {
    let removed = generator
        .clean(dry_run)
        .wrap_err("Failed to clean generated files")?;

    Ok(CleanReport {
        dry_run,
        output_dir: generator.output_dir(),
        removed,
    })
}

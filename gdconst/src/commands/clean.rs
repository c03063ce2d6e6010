use clap::Args;
use eyre::Result;
use gdconst_codegen::Generator;

use super::ProjectPaths;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self, project: &ProjectPaths) -> Result<()> {
        let settings = project.settings();
        let generator = Generator::new(&project.root, &settings);

        let report = ops::clean(&generator, self.dry_run)?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

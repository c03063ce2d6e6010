use clap::{Args, ValueEnum};
use eyre::Result;
use gdconst_codegen::{Generator, Trigger};
use gdconst_project::BusLayout;

use super::{ProjectPaths, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

/// Which pass to run on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Only {
    /// Actions, collision layers and groups from project.godot
    Settings,
    /// Audio buses from the bus layout
    Audio,
}

#[derive(Args)]
pub struct GenerateCommand {
    /// Run a single pass instead of both
    #[arg(long, value_enum)]
    pub only: Option<Only>,

    /// Print the generated files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self, project: &ProjectPaths) -> Result<()> {
        let settings = project.settings();
        let buses = BusLayout::open(&settings.bus_layout_path(&project.root)).unwrap_or_exit();
        let generator = Generator::new(&project.root, &settings);

        let report = ops::generate(
            &generator,
            &buses,
            ops::generate::GenerateOptions {
                triggers: self.triggers(),
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn triggers(&self) -> Vec<Trigger> {
        match self.only {
            None => vec![Trigger::Configuration, Trigger::AudioLayout],
            Some(Only::Settings) => vec![Trigger::Configuration],
            Some(Only::Audio) => vec![Trigger::AudioLayout],
        }
    }
}

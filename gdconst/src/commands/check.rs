use clap::Args;
use eyre::{Context, Result};
use gdconst_codegen::Generator;
use gdconst_project::BusLayout;

use super::{ProjectPaths, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self, project: &ProjectPaths) -> Result<()> {
        let settings = project.settings();
        let buses = BusLayout::open(&settings.bus_layout_path(&project.root)).unwrap_or_exit();
        let generator = Generator::new(&project.root, &settings);

        let report = ops::check(&generator, &buses, &project.config)?;

        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}

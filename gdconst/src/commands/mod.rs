mod check;
mod clean;
mod completions;
mod generate;
mod init;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use gdconst_project::{SETTINGS_FILE_NAME, Settings, SettingsToml};
use generate::GenerateCommand;
use init::InitCommand;

/// Extension trait for exiting on settings errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gdconst_project::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "gdconst")]
#[command(version)]
#[command(about = "Generate C# constants from a Godot project")]
pub(crate) struct Cli {
    /// Godot project root (defaults to the current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Path to gdconst.toml (defaults to <project>/gdconst.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show more log output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let project = ProjectPaths::new(&self.project, self.config.as_deref());
        match &self.command {
            Commands::Generate(cmd) => cmd.run(&project),
            Commands::Check(cmd) => cmd.run(&project),
            Commands::Clean(cmd) => cmd.run(&project),
            Commands::Init(cmd) => cmd.run(&project),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the constants classes
    Generate(GenerateCommand),

    /// Parse the project and report what would be generated
    Check(CheckCommand),

    /// Delete every generated file
    Clean(CleanCommand),

    /// Write a gdconst.toml with the default settings
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Locations every command works from.
pub(crate) struct ProjectPaths {
    pub root: PathBuf,
    pub config: PathBuf,
}

impl ProjectPaths {
    fn new(root: &Path, config: Option<&Path>) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.join(SETTINGS_FILE_NAME)),
        }
    }

    /// Load the settings, or exit with a rendered diagnostic.
    pub fn settings(&self) -> Settings {
        SettingsToml::open_or_default(&self.config)
            .unwrap_or_exit()
            .into_settings()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_defaults_to_project_root() {
        let paths = ProjectPaths::new(Path::new("game"), None);
        assert_eq!(paths.config, Path::new("game").join("gdconst.toml"));

        let paths = ProjectPaths::new(Path::new("game"), Some(Path::new("ci/gdconst.toml")));
        assert_eq!(paths.config, PathBuf::from("ci/gdconst.toml"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gdconst", "generate", "--project", "game", "-vv"]).unwrap();
        assert_eq!(cli.project, PathBuf::from("game"));
        assert_eq!(cli.verbose, 2);
    }
}

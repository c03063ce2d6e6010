use clap::Args;
use eyre::{Context, Result, bail};
use gdconst_core::sync;
use gdconst_project::Settings;

use super::ProjectPaths;

#[derive(Args)]
pub struct InitCommand {
    /// Project identifier to write instead of discovering it from the .csproj
    #[arg(long)]
    pub project_name: Option<String>,

    /// Overwrite an existing gdconst.toml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self, project: &ProjectPaths) -> Result<()> {
        if project.config.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                project.config.display()
            );
        }

        let content = self
            .settings()
            .to_toml_string()
            .wrap_err("Failed to serialize default settings")?;
        sync(&project.config, &content)
            .wrap_err_with(|| format!("Failed to write {}", project.config.display()))?;

        println!("Created {}", project.config.display());
        Ok(())
    }

    fn settings(&self) -> Settings {
        Settings {
            project_name: self.project_name.clone().unwrap_or_default(),
            ..Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use gdconst_project::SettingsToml;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_init_writes_loadable_settings() {
        let temp = TempDir::new().unwrap();
        let project = ProjectPaths::new(temp.path(), None);
        let cmd = InitCommand {
            project_name: Some("Platformer".to_string()),
            force: false,
        };

        cmd.run(&project).unwrap();

        let file = SettingsToml::open(&project.config).unwrap();
        assert_eq!(file.settings(), &cmd.settings());
        assert!(cmd.run(&project).is_err());
    }
}

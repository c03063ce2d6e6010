use std::path::{Path, PathBuf};

use super::Settings;
use crate::Result;

/// Default settings file name, looked up in the project root.
pub const SETTINGS_FILE_NAME: &str = "gdconst.toml";

/// Represents a gdconst.toml file with both raw content and parsed settings.
pub struct SettingsToml {
    path: PathBuf,
    content: String,
    settings: Settings,
}

impl SettingsToml {
    /// Open and parse a gdconst.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let settings = Settings::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            settings,
        })
    }

    /// Open a gdconst.toml file, falling back to default settings when the
    /// file does not exist.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::open(path);
        }
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        Ok(Self {
            path: path.to_path_buf(),
            content: String::new(),
            settings: Settings::default(),
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content. Empty when the file did not exist.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consume the file and keep the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

//! Generator settings read from `gdconst.toml`.

mod file;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

pub use file::{SETTINGS_FILE_NAME, SettingsToml};
use gdconst_core::{ArtifactKind, is_identifier};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, SourceContext};

/// What to do with an enabled artifact that has no entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyArtifactPolicy {
    /// Remove the stale file instead of writing an empty class.
    #[default]
    Skip,
    /// Write the class even without members.
    Emit,
}

/// What to do when no project identifier can be found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingProjectPolicy {
    /// Fail the pass.
    #[default]
    Error,
    /// Log a warning and leave existing files alone.
    Skip,
}

/// Per-artifact toggle and class name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactSettings {
    pub enabled: bool,
    pub class_name: Option<String>,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            class_name: None,
        }
    }
}

impl ArtifactSettings {
    fn named(kind: ArtifactKind) -> Self {
        Self {
            enabled: true,
            class_name: Some(kind.default_class_name().to_string()),
        }
    }
}

/// Generator settings.
///
/// Every field has a default, so an empty or missing `gdconst.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Project identifier. Discovered from the `.csproj` when empty.
    pub project_name: String,
    /// Namespace used verbatim when non-empty.
    pub namespace: String,
    /// Output directory, relative to the project root.
    pub output_path: PathBuf,
    /// Audio bus layout resource, relative to the project root.
    pub audio_bus_layout: PathBuf,
    pub empty_artifacts: EmptyArtifactPolicy,
    pub missing_project: MissingProjectPolicy,
    pub actions: ArtifactSettings,
    pub layers: ArtifactSettings,
    pub groups: ArtifactSettings,
    pub audio_buses: ArtifactSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            namespace: String::new(),
            output_path: PathBuf::from("scripts/generated"),
            audio_bus_layout: PathBuf::from("default_bus_layout.tres"),
            empty_artifacts: EmptyArtifactPolicy::default(),
            missing_project: MissingProjectPolicy::default(),
            actions: ArtifactSettings::named(ArtifactKind::Actions),
            layers: ArtifactSettings::named(ArtifactKind::Layers),
            groups: ArtifactSettings::named(ArtifactKind::Groups),
            audio_buses: ArtifactSettings::named(ArtifactKind::AudioBuses),
        }
    }
}

impl Settings {
    /// Parse and validate settings, naming `filename` in diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let settings: Self = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        settings.validate(&ctx)?;
        Ok(settings)
    }

    /// Render these settings as a `gdconst.toml` document.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn artifact(&self, kind: ArtifactKind) -> &ArtifactSettings {
        match kind {
            ArtifactKind::Actions => &self.actions,
            ArtifactKind::Layers => &self.layers,
            ArtifactKind::Groups => &self.groups,
            ArtifactKind::AudioBuses => &self.audio_buses,
        }
    }

    /// Whether the artifact should be generated.
    pub fn is_enabled(&self, kind: ArtifactKind) -> bool {
        self.artifact(kind).enabled
    }

    /// Configured class name, or the kind's default.
    pub fn class_name(&self, kind: ArtifactKind) -> &str {
        self.artifact(kind)
            .class_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(kind.default_class_name())
    }

    /// Absolute output directory for a project.
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output_path)
    }

    /// Absolute path of the audio bus layout for a project.
    pub fn bus_layout_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.audio_bus_layout)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        let mut seen: Vec<(&str, ArtifactKind)> = Vec::new();
        for kind in ArtifactKind::ALL {
            let name = self.class_name(kind);
            if !is_identifier(name) {
                return Err(ctx.invalid_class_name_error(name, kind.key()));
            }
            if let Some((_, first)) = seen.iter().find(|(other, _)| *other == name) {
                return Err(ctx.duplicate_class_name_error(name, first.key(), kind.key()));
            }
            seen.push((name, kind));
        }
        Ok(())
    }
}

impl FromStr for Settings {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, SETTINGS_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_are_defaults() {
        let settings: Settings = "".parse().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output_path, PathBuf::from("scripts/generated"));
        for kind in ArtifactKind::ALL {
            assert!(settings.is_enabled(kind));
            assert_eq!(settings.class_name(kind), kind.default_class_name());
        }
    }

    #[test]
    fn test_partial_artifact_table() {
        let settings: Settings = r#"
            project_name = "Platformer"
            empty_artifacts = "emit"
            missing_project = "skip"

            [layers]
            enabled = false

            [audio_buses]
            class_name = "Buses"
        "#
        .parse()
        .unwrap();

        assert_eq!(settings.project_name, "Platformer");
        assert_eq!(settings.empty_artifacts, EmptyArtifactPolicy::Emit);
        assert_eq!(settings.missing_project, MissingProjectPolicy::Skip);
        assert!(!settings.is_enabled(ArtifactKind::Layers));
        assert_eq!(settings.class_name(ArtifactKind::Layers), "CollisionLayers");
        assert!(settings.is_enabled(ArtifactKind::AudioBuses));
        assert_eq!(settings.class_name(ArtifactKind::AudioBuses), "Buses");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "outptu_path = \"x\"".parse::<Settings>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_class_name() {
        let err = "[actions]\nclass_name = \"Input Map\"\n"
            .parse::<Settings>()
            .unwrap_err();
        match *err {
            Error::InvalidClassName { name, artifact, span, .. } => {
                assert_eq!(name, "Input Map");
                assert_eq!(artifact, "actions");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_class_name() {
        let err = "[groups]\nclass_name = \"Actions\"\n"
            .parse::<Settings>()
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::DuplicateClassName { ref first, ref second, .. }
                if first == "actions" && second == "groups"
        ));
    }

    #[test]
    fn test_paths_are_joined_to_root() {
        let settings = Settings::default();
        let root = Path::new("/game");
        assert_eq!(
            settings.output_dir(root),
            PathBuf::from("/game/scripts/generated")
        );
        assert_eq!(
            settings.bus_layout_path(root),
            PathBuf::from("/game/default_bus_layout.tres")
        );
    }

    #[test]
    fn test_default_settings_round_trip_through_toml() {
        let text = Settings::default().to_toml_string().unwrap();
        assert!(text.contains("output_path = \"scripts/generated\""));
        assert!(text.contains("class_name = \"CollisionLayers\""));
        assert_eq!(text.parse::<Settings>().unwrap(), Settings::default());
    }
}

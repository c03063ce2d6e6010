//! The generation passes.
//!
//! [`Generator`] reacts to two triggers: the project configuration changed,
//! or the audio bus layout changed. Each pass re-derives everything from
//! scratch and only touches files whose rendered content differs.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::{Component, Path, PathBuf},
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use eyre::{Result, WrapErr};
use gdconst_core::{ArtifactKind, GeneratedFile, SyncResult, remove_if_exists};
use gdconst_project::{
    AudioBusSource, CONFIG_FILE_NAME, CsprojLookup, EmptyArtifactPolicy, Error as ProjectError,
    MissingProjectPolicy, ProjectConfig, ProjectLookup, Settings, read_buses, resolve_namespace,
};

use crate::{Artifact, Diagnostic, artifact::file_name};

/// What started a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `project.godot` changed.
    Configuration,
    /// The audio bus layout changed.
    AudioLayout,
}

impl Trigger {
    /// Artifact kinds a pass for this trigger owns.
    pub fn kinds(self) -> &'static [ArtifactKind] {
        match self {
            Self::Configuration => &ArtifactKind::PROJECT,
            Self::AudioLayout => &[ArtifactKind::AudioBuses],
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => f.write_str("project settings"),
            Self::AudioLayout => f.write_str("audio bus layout"),
        }
    }
}

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStatus {
    /// Every owned artifact was synced or removed.
    Completed,
    /// Skipped on purpose (no project identifier under the skip policy).
    Skipped,
    /// Stopped early without touching any file.
    Aborted,
}

/// What happened to one artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// Created or overwritten.
    Written,
    /// Already up to date.
    Unchanged,
    /// Stale file deleted.
    Removed,
    /// Not generated and no file to delete.
    Absent,
}

impl From<SyncResult> for ArtifactOutcome {
    fn from(result: SyncResult) -> Self {
        match result {
            SyncResult::Written => Self::Written,
            SyncResult::Unchanged => Self::Unchanged,
        }
    }
}

/// Per-artifact result of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub file_name: String,
    /// Members in the rendered class. Zero when the file was not generated.
    pub entries: usize,
    pub outcome: ArtifactOutcome,
}

/// Result of one pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub trigger: Trigger,
    pub status: PassStatus,
    pub namespace: Option<String>,
    pub output_dir: PathBuf,
    pub artifacts: Vec<ArtifactReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PassReport {
    fn new(trigger: Trigger, output_dir: PathBuf) -> Self {
        Self {
            trigger,
            status: PassStatus::Completed,
            namespace: None,
            output_dir,
            artifacts: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn stop(mut self, status: PassStatus, diagnostic: Diagnostic) -> Self {
        self.status = status;
        self.diagnostics.push(diagnostic);
        self
    }

    /// Number of files created, overwritten or deleted.
    pub fn changed_files(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| matches!(a.outcome, ArtifactOutcome::Written | ArtifactOutcome::Removed))
            .count()
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactReport> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from the output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// An artifact as the next pass would handle it.
#[derive(Debug, Clone)]
pub struct PlannedArtifact {
    pub artifact: Artifact,
    /// False when the artifact is disabled, or empty under [`EmptyArtifactPolicy::Skip`].
    pub generate: bool,
}

/// Everything a pass would do, computed without writing.
#[derive(Debug, Clone)]
pub struct Plan {
    pub namespace: String,
    pub artifacts: Vec<PlannedArtifact>,
    /// Parse warnings and warnings about generated artifacts.
    pub diagnostics: Vec<Diagnostic>,
}

impl Plan {
    /// Rendered files for the artifacts that would be generated.
    pub fn preview(&self) -> Vec<PreviewFile> {
        self.artifacts
            .iter()
            .filter(|planned| planned.generate)
            .map(|planned| PreviewFile {
                path: planned.artifact.file_name(),
                content: planned.artifact.render(),
            })
            .collect()
    }
}

/// Where a pass stands after resolving its namespace.
enum Prepared {
    Ready(String),
    Stopped(PassReport),
}

/// Runs generation passes for one Godot project.
pub struct Generator<'a> {
    project_root: PathBuf,
    settings: &'a Settings,
    lookup: Box<dyn ProjectLookup + 'a>,
}

impl<'a> Generator<'a> {
    /// Create a generator discovering the project identifier from the `.csproj`.
    pub fn new(project_root: impl Into<PathBuf>, settings: &'a Settings) -> Self {
        Self {
            project_root: project_root.into(),
            settings,
            lookup: Box::new(CsprojLookup),
        }
    }

    /// Replace the project identifier lookup.
    pub fn with_lookup(mut self, lookup: impl ProjectLookup + 'a) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.settings.output_dir(&self.project_root)
    }

    /// Regenerate actions, layers and groups from `project.godot`.
    pub fn on_configuration_changed(&self) -> Result<PassReport> {
        let output_dir = self.output_dir();
        let _guard = lock_output(&output_dir);
        let report = PassReport::new(Trigger::Configuration, output_dir);

        let namespace = match self.prepare(report.trigger, &report.output_dir)? {
            Prepared::Ready(namespace) => namespace,
            Prepared::Stopped(stopped) => return Ok(stopped),
        };

        let config = match self.read_config() {
            Ok(config) => config,
            Err(diagnostic) => return Ok(report.stop(PassStatus::Aborted, diagnostic)),
        };

        let mut report = PassReport {
            namespace: Some(namespace.clone()),
            ..report
        };
        report
            .diagnostics
            .extend(config.warnings.iter().map(parse_warning));

        for artifact in self.configuration_artifacts(&namespace, &config) {
            self.apply(&mut report, artifact)?;
        }
        Ok(report)
    }

    /// Regenerate the audio bus class from `buses`.
    pub fn on_audio_layout_changed(&self, buses: &dyn AudioBusSource) -> Result<PassReport> {
        let output_dir = self.output_dir();
        let _guard = lock_output(&output_dir);
        let report = PassReport::new(Trigger::AudioLayout, output_dir);

        let namespace = match self.prepare(report.trigger, &report.output_dir)? {
            Prepared::Ready(namespace) => namespace,
            Prepared::Stopped(stopped) => return Ok(stopped),
        };

        let mut report = PassReport {
            namespace: Some(namespace.clone()),
            ..report
        };
        let artifact = self.audio_artifact(&namespace, &read_buses(buses));
        self.apply(&mut report, artifact)?;
        Ok(report)
    }

    /// Build every artifact the next passes would produce, without touching
    /// the disk.
    pub fn plan(&self, buses: &dyn AudioBusSource) -> Result<Plan> {
        let namespace = self.resolve_namespace()?;
        let config = ProjectConfig::open(&self.project_root)?;

        let mut artifacts = self.configuration_artifacts(&namespace, &config);
        artifacts.push(self.audio_artifact(&namespace, &read_buses(buses)));

        let mut diagnostics: Vec<Diagnostic> = config.warnings.iter().map(parse_warning).collect();
        let artifacts = artifacts
            .into_iter()
            .map(|artifact| {
                let generate = self.should_generate(&artifact);
                if generate {
                    diagnostics.extend(artifact.diagnostics());
                }
                PlannedArtifact { artifact, generate }
            })
            .collect();

        Ok(Plan {
            namespace,
            artifacts,
            diagnostics,
        })
    }

    /// Render every artifact that would be written.
    pub fn preview(&self, buses: &dyn AudioBusSource) -> Result<Vec<PreviewFile>> {
        Ok(self.plan(buses)?.preview())
    }

    /// Delete every artifact file this generator could have written.
    ///
    /// With `dry_run`, nothing is deleted and the existing files are listed.
    pub fn clean(&self, dry_run: bool) -> Result<Vec<PathBuf>> {
        let output_dir = self.output_dir();
        let _guard = lock_output(&output_dir);

        let mut removed = Vec::new();
        for kind in ArtifactKind::ALL {
            let path = output_dir.join(file_name(self.settings.class_name(kind)));
            let deleted = if dry_run {
                path.is_file()
            } else {
                remove_if_exists(&path)
                    .wrap_err_with(|| format!("Failed to remove {} artifact", kind))?
            };
            if deleted {
                removed.push(path);
            }
        }
        Ok(removed)
    }

    /// Build the three artifacts backed by `project.godot`.
    pub fn configuration_artifacts(&self, namespace: &str, config: &ProjectConfig) -> Vec<Artifact> {
        let settings = self.settings;
        vec![
            Artifact::actions(
                namespace,
                settings.class_name(ArtifactKind::Actions),
                &config.actions,
            ),
            Artifact::layers(
                namespace,
                settings.class_name(ArtifactKind::Layers),
                &config.layers,
            ),
            Artifact::groups(
                namespace,
                settings.class_name(ArtifactKind::Groups),
                &config.groups,
            ),
        ]
    }

    pub fn audio_artifact(&self, namespace: &str, buses: &BTreeMap<usize, String>) -> Artifact {
        Artifact::audio_buses(
            namespace,
            self.settings.class_name(ArtifactKind::AudioBuses),
            buses,
        )
    }

    /// The effective namespace of generated classes.
    pub fn resolve_namespace(&self) -> Result<String> {
        let namespace = resolve_namespace(
            &self.settings.project_name,
            &self.settings.namespace,
            &self.output_dir(),
            &self.project_root,
            self.lookup.as_ref(),
        )?;
        Ok(namespace)
    }

    fn prepare(&self, trigger: Trigger, output_dir: &Path) -> Result<Prepared> {
        match self.resolve_namespace() {
            Ok(namespace) => Ok(Prepared::Ready(namespace)),
            Err(err) => match self.settings.missing_project {
                MissingProjectPolicy::Error => Err(err),
                MissingProjectPolicy::Skip => {
                    tracing::warn!(error = %err, "skipping pass");
                    let report = PassReport::new(trigger, output_dir.to_path_buf());
                    Ok(Prepared::Stopped(report.stop(
                        PassStatus::Skipped,
                        Diagnostic::warning("namespace", format!("{}, pass skipped", err)),
                    )))
                }
            },
        }
    }

    fn read_config(&self) -> std::result::Result<ProjectConfig, Diagnostic> {
        ProjectConfig::open(&self.project_root).map_err(|err| {
            tracing::error!(error = %err, "aborting pass");
            Diagnostic::error("parse", err.to_string()).at(CONFIG_FILE_NAME)
        })
    }

    /// Enabled and non-empty. `EmptyArtifactPolicy::Emit` lifts the second
    /// condition for the `project.godot` artifacts only; an empty bus map
    /// never produces a class.
    fn should_generate(&self, artifact: &Artifact) -> bool {
        let kind = artifact.kind();
        let emit_empty = self.settings.empty_artifacts == EmptyArtifactPolicy::Emit
            && kind != ArtifactKind::AudioBuses;
        self.settings.is_enabled(kind) && (!artifact.is_empty() || emit_empty)
    }

    fn apply(&self, report: &mut PassReport, artifact: Artifact) -> Result<()> {
        let file_name = artifact.file_name();

        if !self.should_generate(&artifact) {
            let path = report.output_dir.join(&file_name);
            let removed = remove_if_exists(&path)
                .wrap_err_with(|| format!("Failed to remove stale {}", file_name))?;
            if removed {
                tracing::info!(file = %file_name, "removed");
            }
            report.artifacts.push(ArtifactReport {
                kind: artifact.kind(),
                file_name,
                entries: 0,
                outcome: if removed {
                    ArtifactOutcome::Removed
                } else {
                    ArtifactOutcome::Absent
                },
            });
            return Ok(());
        }

        report.diagnostics.extend(artifact.diagnostics());
        let result = artifact
            .sync(&report.output_dir)
            .wrap_err_with(|| format!("Failed to write {}", file_name))?;
        if result.changed() {
            tracing::info!(
                file = %file_name,
                entries = artifact.len(),
                "generated {} with {} {}",
                file_name,
                artifact.len(),
                artifact.kind().entry_noun()
            );
        }
        report.artifacts.push(ArtifactReport {
            kind: artifact.kind(),
            file_name,
            entries: artifact.len(),
            outcome: result.into(),
        });
        Ok(())
    }
}

/// Turn a dropped `project.godot` entry into a warning.
fn parse_warning(err: &ProjectError) -> Diagnostic {
    let diagnostic = Diagnostic::warning("parse", err.to_string());
    match err {
        ProjectError::MalformedLayerIndex { line, .. } => {
            diagnostic.at(format!("{}:{}", CONFIG_FILE_NAME, line))
        }
        _ => diagnostic,
    }
}

/// Serialize passes writing into the same output directory.
fn lock_output(output_dir: &Path) -> MutexGuard<'static, ()> {
    output_mutex(output_dir)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// The mutex guarding `output_dir`, kept for the life of the process.
fn output_mutex(output_dir: &Path) -> &'static Mutex<()> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, &'static Mutex<()>>>> = OnceLock::new();

    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *locks
        .entry(lock_key(output_dir))
        .or_insert_with(|| Box::leak(Box::new(Mutex::new(()))))
}

/// `path` made absolute with `.` and `..` folded away, so every spelling of
/// a directory shares one lock. Symlinks are not resolved.
fn lock_key(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                key.pop();
            }
            other => key.push(other),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_key_folds_relative_spellings() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(lock_key(Path::new("out")), cwd.join("out"));
        assert_eq!(lock_key(Path::new("./a/../out/.")), cwd.join("out"));
        assert_eq!(lock_key(&cwd.join("x/../out")), cwd.join("out"));
    }

    #[test]
    fn test_same_directory_shares_one_lock() {
        let cwd = std::env::current_dir().unwrap();
        let relative = output_mutex(Path::new("./target/../gdconst-lock-test"));
        let absolute = output_mutex(&cwd.join("gdconst-lock-test"));
        let other = output_mutex(&cwd.join("gdconst-lock-test-other"));

        assert!(std::ptr::eq(relative, absolute));
        assert!(!std::ptr::eq(relative, other));
    }
}

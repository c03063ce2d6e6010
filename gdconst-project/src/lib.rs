//! Godot project inputs for the gdconst constants generator.
//!
//! Everything a generation pass reads lives here:
//!
//! - [`ProjectConfig`] - input actions, physics layers and global groups parsed
//!   from `project.godot`
//! - [`BusLayout`] / [`AudioBusSource`] - audio bus names by index
//! - [`ProjectLookup`] / [`CsprojLookup`] - project identifier discovery
//! - [`resolve_namespace`] - the effective namespace of generated code
//! - [`Settings`] - generator settings loaded from `gdconst.toml`

mod audio;
mod error;
mod metadata;
mod namespace;
mod project;
mod settings;

pub use audio::{AudioBusSource, BusLayout, MASTER_BUS, StaticBuses, read_buses};
pub use error::{Error, Result, SourceContext};
pub use metadata::{CsprojLookup, ProjectLookup, parse_root_namespace};
pub use namespace::{dotted_relative_path, resolve_namespace};
pub use project::{CONFIG_FILE_NAME, ConfigSection, ProjectConfig};
pub use settings::{
    ArtifactSettings, EmptyArtifactPolicy, MissingProjectPolicy, SETTINGS_FILE_NAME, Settings,
    SettingsToml,
};

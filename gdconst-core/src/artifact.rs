//! The four kinds of generated artifacts.

use std::fmt;

/// One generated output file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Input action names from `[input]`.
    Actions,
    /// Physics layer names from `[layer_names]`.
    Layers,
    /// Global group names from `[global_group]`.
    Groups,
    /// Audio bus names from the bus layout.
    AudioBuses,
}

impl ArtifactKind {
    /// All kinds, in generation order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Actions,
        ArtifactKind::Layers,
        ArtifactKind::Groups,
        ArtifactKind::AudioBuses,
    ];

    /// Kinds backed by the project configuration file.
    pub const PROJECT: [ArtifactKind; 3] = [
        ArtifactKind::Actions,
        ArtifactKind::Layers,
        ArtifactKind::Groups,
    ];

    /// Class name used when none is configured.
    pub fn default_class_name(self) -> &'static str {
        match self {
            Self::Actions => "Actions",
            Self::Layers => "CollisionLayers",
            Self::Groups => "Groups",
            Self::AudioBuses => "AudioBus",
        }
    }

    /// Settings table name for this kind.
    pub fn key(self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::Layers => "layers",
            Self::Groups => "groups",
            Self::AudioBuses => "audio_buses",
        }
    }

    /// Human-readable noun for entry counts (e.g., "3 input actions").
    pub fn entry_noun(self) -> &'static str {
        match self {
            Self::Actions => "input actions",
            Self::Layers => "layer names",
            Self::Groups => "group names",
            Self::AudioBuses => "audio buses",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

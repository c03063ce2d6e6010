//! Rendering of the four constants classes.
//!
//! Each [`Artifact`] is built fresh from parsed data, rendered in full and
//! compared against what is on disk. Nothing is patched in place.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use gdconst_core::{ArtifactKind, GeneratedFile, UNNAMED, sanitize};
use indexmap::IndexMap;

use crate::{
    Diagnostic,
    csharp::{CsFile, FILE_EXTENSION, Field, StaticClass, Using},
};

/// C# type of layer bit flags.
const LAYER_TYPE: &str = "uint";
/// C# type of audio bus indices.
const BUS_TYPE: &str = "int";

/// One generated member and the raw name it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Constant {
    raw: String,
    field: Field,
    /// The raw name had no letter or digit to build an identifier from.
    degenerate: bool,
}

impl Constant {
    fn new(raw: &str, build: impl FnOnce(String) -> Field) -> Self {
        let sanitized = sanitize(raw);
        let degenerate = sanitized.is_empty();
        let identifier = if degenerate {
            UNNAMED.to_string()
        } else {
            sanitized
        };
        Self {
            raw: raw.to_string(),
            field: build(identifier),
            degenerate,
        }
    }

    fn identifier(&self) -> &str {
        self.field.name()
    }
}

/// A generated constants class, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    kind: ArtifactKind,
    namespace: String,
    class_name: String,
    constants: Vec<Constant>,
}

impl Artifact {
    fn new(kind: ArtifactKind, namespace: &str, class_name: &str, constants: Vec<Constant>) -> Self {
        Self {
            kind,
            namespace: namespace.to_string(),
            class_name: class_name.to_string(),
            constants,
        }
    }

    /// `StringName` constants for input actions, in file order.
    pub fn actions(namespace: &str, class_name: &str, names: &[String]) -> Self {
        Self::new(
            ArtifactKind::Actions,
            namespace,
            class_name,
            string_names(names),
        )
    }

    /// `StringName` constants for global groups, in file order.
    pub fn groups(namespace: &str, class_name: &str, names: &[String]) -> Self {
        Self::new(
            ArtifactKind::Groups,
            namespace,
            class_name,
            string_names(names),
        )
    }

    /// Bit-flag constants for physics layers, ordered by bit index.
    ///
    /// Layers sharing an index keep their map order.
    pub fn layers(namespace: &str, class_name: &str, layers: &IndexMap<String, u32>) -> Self {
        let mut sorted: Vec<(&String, &u32)> = layers.iter().collect();
        sorted.sort_by_key(|(_, index)| **index);

        let constants = sorted
            .into_iter()
            .map(|(name, index)| {
                Constant::new(name, |id| {
                    Field::constant(id, LAYER_TYPE, layer_flag(*index))
                })
            })
            .collect();
        Self::new(ArtifactKind::Layers, namespace, class_name, constants)
    }

    /// Index constants for audio buses, ordered by index.
    pub fn audio_buses(namespace: &str, class_name: &str, buses: &BTreeMap<usize, String>) -> Self {
        let constants = buses
            .iter()
            .map(|(index, name)| {
                Constant::new(name, |id| Field::constant(id, BUS_TYPE, index.to_string()))
            })
            .collect();
        Self::new(ArtifactKind::AudioBuses, namespace, class_name, constants)
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// `<ClassName>.cs`
    pub fn file_name(&self) -> String {
        file_name(&self.class_name)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Member identifiers in render order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.constants.iter().map(Constant::identifier)
    }

    /// Warnings about members that won't compile as intended: names without
    /// any letter or digit, and names colliding after sanitizing.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let location = self.file_name();
        let mut diagnostics = Vec::new();
        let mut first_use: HashMap<&str, &str> = HashMap::new();

        for constant in &self.constants {
            if constant.degenerate {
                diagnostics.push(
                    Diagnostic::warning(
                        "render",
                        format!(
                            "{} name '{}' has no letters or digits, generated as '{}'",
                            self.kind, constant.raw, UNNAMED
                        ),
                    )
                    .at(&location),
                );
            }

            match first_use.get(constant.identifier()) {
                Some(first) if *first == constant.raw => diagnostics.push(
                    Diagnostic::warning(
                        "render",
                        format!("{} name '{}' appears more than once", self.kind, constant.raw),
                    )
                    .at(&location),
                ),
                Some(first) => diagnostics.push(
                    Diagnostic::warning(
                        "render",
                        format!(
                            "{} names '{}' and '{}' both become '{}'",
                            self.kind,
                            first,
                            constant.raw,
                            constant.identifier()
                        ),
                    )
                    .at(&location),
                ),
                None => {
                    first_use.insert(constant.identifier(), &constant.raw);
                }
            }
        }
        diagnostics
    }

    /// Render the complete source file.
    pub fn render(&self) -> String {
        let class = StaticClass::new(&self.class_name)
            .fields(self.constants.iter().map(|c| c.field.clone()));

        let file = CsFile::new(&self.namespace);
        let file = if needs_godot(self.kind) {
            file.using(Using::godot())
        } else {
            file
        };
        file.add(class).render()
    }
}

impl GeneratedFile for Artifact {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn render(&self) -> String {
        Artifact::render(self)
    }
}

/// File name of the artifact declaring `class_name`.
pub fn file_name(class_name: &str) -> String {
    format!("{}.{}", class_name, FILE_EXTENSION)
}

/// `1 << index`. Shifting into bit 31 overflows C#'s `int`, so the top
/// layer uses an unsigned literal.
fn layer_flag(index: u32) -> String {
    if index >= 31 {
        format!("1u << {}", index)
    } else {
        format!("1 << {}", index)
    }
}

/// Whether members of `kind` use Godot types.
fn needs_godot(kind: ArtifactKind) -> bool {
    matches!(kind, ArtifactKind::Actions | ArtifactKind::Groups)
}

fn string_names(names: &[String]) -> Vec<Constant> {
    names
        .iter()
        .map(|name| Constant::new(name, |id| Field::string_name(id, name.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_actions_render() {
        let artifact = Artifact::actions("Game.Gen", "Actions", &names(&["move_left", "jump"]));

        assert_eq!(
            artifact.render(),
            "using Godot;\n\nnamespace Game.Gen;\n\npublic static class Actions {\n\tpublic static readonly StringName MoveLeft = \"move_left\";\n\tpublic static readonly StringName Jump = \"jump\";\n}\n"
        );
        assert_eq!(artifact.file_name(), "Actions.cs");
    }

    #[test]
    fn test_layers_sorted_by_index() {
        let mut layers = IndexMap::new();
        layers.insert("Enemies".to_string(), 4);
        layers.insert("World".to_string(), 0);
        layers.insert("Player".to_string(), 1);

        let artifact = Artifact::layers("Game", "CollisionLayers", &layers);

        assert_eq!(
            artifact.identifiers().collect::<Vec<_>>(),
            vec!["World", "Player", "Enemies"]
        );
        assert!(!artifact.render().contains("using"));
        assert!(artifact.render().contains("\tpublic const uint Enemies = 1 << 4;\n"));
    }

    #[test]
    fn test_top_layer_is_unsigned() {
        let layers = IndexMap::from([("Low".to_string(), 30), ("Top".to_string(), 31)]);

        let rendered = Artifact::layers("Game", "CollisionLayers", &layers).render();

        assert!(rendered.contains("\tpublic const uint Low = 1 << 30;\n"));
        assert!(rendered.contains("\tpublic const uint Top = 1u << 31;\n"));
    }

    #[test]
    fn test_audio_buses_render() {
        let buses = BTreeMap::from([
            (1, "Sound Effects".to_string()),
            (0, "Master".to_string()),
        ]);

        let artifact = Artifact::audio_buses("Game", "AudioBus", &buses);

        assert_eq!(
            artifact.render(),
            "namespace Game;\n\npublic static class AudioBus {\n\tpublic const int Master = 0;\n\tpublic const int SoundEffects = 1;\n}\n"
        );
    }

    #[test]
    fn test_empty_artifact_renders_empty_class() {
        let artifact = Artifact::groups("Game", "Groups", &[]);
        assert!(artifact.is_empty());
        assert_eq!(
            artifact.render(),
            "using Godot;\n\nnamespace Game;\n\npublic static class Groups {\n}\n"
        );
    }

    #[test]
    fn test_degenerate_name_uses_placeholder() {
        let artifact = Artifact::groups("Game", "Groups", &names(&["---"]));

        assert_eq!(artifact.identifiers().collect::<Vec<_>>(), vec![UNNAMED]);
        let diagnostics = artifact.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("no letters or digits"));
    }

    #[test]
    fn test_collisions_are_reported() {
        let artifact = Artifact::actions(
            "Game",
            "Actions",
            &names(&["move-left", "move_left", "jump", "jump"]),
        );

        let messages: Vec<String> = artifact
            .diagnostics()
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "actions names 'move-left' and 'move_left' both become 'MoveLeft'".to_string(),
                "actions name 'jump' appears more than once".to_string(),
            ]
        );
        // Output is still rendered verbatim.
        assert_eq!(artifact.len(), 4);
    }

    #[test]
    fn test_raw_names_are_escaped() {
        let artifact = Artifact::groups("Game", "Groups", &names(&["say \"hi\""]));
        assert!(
            artifact
                .render()
                .contains("public static readonly StringName SayHi = \"say \\\"hi\\\"\";")
        );
    }

    #[test]
    fn test_generated_file_path() {
        let artifact = Artifact::audio_buses("Game", "Buses", &BTreeMap::new());
        assert_eq!(
            GeneratedFile::path(&artifact, Path::new("/out")),
            PathBuf::from("/out/Buses.cs")
        );
    }
}

//! Line-oriented parsing of `project.godot`.
//!
//! Only three sections matter: `[input]`, `[layer_names]` and
//! `[global_group]`. Any other header switches parsing off until one of the
//! three comes back.

use std::path::Path;

use indexmap::IndexMap;

use crate::{Error, Result};

/// Name of the Godot project configuration file.
pub const CONFIG_FILE_NAME: &str = "project.godot";

/// Substrings marking a physics layer name key inside `[layer_names]`.
///
/// Godot writes `2d_physics/layer_N` and `3d_physics/layer_N`; the nested
/// `layer/layer_N/name` spelling is accepted as well.
const LAYER_KEY_MARKERS: [&str; 2] = ["d_physics/layer_", "layer/layer_"];

/// Highest physics layer Godot supports.
const MAX_LAYER: u32 = 32;

/// The section the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Input,
    LayerNames,
    GlobalGroup,
    /// Before the first header, or inside any header we don't read.
    Other,
}

impl ConfigSection {
    /// Classify a trimmed line. Returns `None` for non-header lines.
    pub fn from_header(trimmed: &str) -> Option<Self> {
        match trimmed {
            "[input]" => Some(Self::Input),
            "[layer_names]" => Some(Self::LayerNames),
            "[global_group]" => Some(Self::GlobalGroup),
            _ if trimmed.starts_with('[') => Some(Self::Other),
            _ => None,
        }
    }
}

/// Data extracted from `project.godot`.
#[derive(Debug, Default)]
pub struct ProjectConfig {
    /// Input action names in file order, duplicates kept.
    pub actions: Vec<String>,
    /// Physics layer name to zero-based bit index.
    ///
    /// Map semantics: a repeated name overwrites the earlier index but keeps
    /// its original position.
    pub layers: IndexMap<String, u32>,
    /// Global group names in file order, duplicates kept.
    pub groups: Vec<String>,
    /// Entries dropped while parsing. Always [`Error::MalformedLayerIndex`].
    pub warnings: Vec<Error>,
}

impl ProjectConfig {
    /// Read and parse `project.godot` from the project root.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Box::new(Error::ConfigFileMissing { path: path.clone() })
            } else {
                Box::new(Error::Io {
                    path: path.clone(),
                    source,
                })
            }
        })?;
        Ok(Self::parse_str(&content))
    }

    /// Parse the content of a `project.godot` file.
    pub fn parse_str(content: &str) -> Self {
        Self::parse(content.lines())
    }

    /// Parse `project.godot` line by line.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut section = ConfigSection::Other;

        for (number, line) in lines.into_iter().enumerate() {
            let trimmed = line.as_ref().trim();

            if let Some(next) = ConfigSection::from_header(trimmed) {
                section = next;
                continue;
            }

            match section {
                ConfigSection::Input => config.actions.extend(entry_key(trimmed)),
                ConfigSection::GlobalGroup => config.groups.extend(entry_key(trimmed)),
                ConfigSection::LayerNames => config.parse_layer(number + 1, trimmed),
                ConfigSection::Other => {}
            }
        }

        tracing::debug!(
            actions = config.actions.len(),
            layers = config.layers.len(),
            groups = config.groups.len(),
            dropped = config.warnings.len(),
            "parsed project configuration"
        );
        config
    }

    fn parse_layer(&mut self, line: usize, trimmed: &str) {
        if !LAYER_KEY_MARKERS.iter().any(|m| trimmed.contains(m)) {
            return;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return;
        };

        let token = layer_index_token(key.trim());
        match token.parse::<u32>() {
            Ok(index) if (1..=MAX_LAYER).contains(&index) => {
                let name = value.trim().trim_matches('"');
                self.layers.insert(name.to_string(), index - 1);
            }
            _ => {
                tracing::debug!(line, token, "dropping layer with malformed index");
                self.warnings.push(Error::MalformedLayerIndex {
                    line,
                    token: token.to_string(),
                });
            }
        }
    }
}

/// The trimmed text before the first `=` without surrounding quotes, if non-empty.
fn entry_key(line: &str) -> Option<String> {
    let (key, _) = line.split_once('=')?;
    let key = key.trim().trim_matches('"');
    (!key.is_empty()).then(|| key.to_string())
}

/// The index segment of a layer key: the text after the last `layer_`, up to
/// the next `/`.
fn layer_index_token(key: &str) -> &str {
    let rest = key
        .rfind("layer_")
        .map_or(key, |at| &key[at + "layer_".len()..]);
    rest.split('/').next().unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_sections() {
        let config = ProjectConfig::parse_str(
            "[input]\nmove_left=\nmove_right=\n[layer_names]\nlayer/layer_1/name=\"Ground\"\n[global_group]\nplayers=",
        );

        assert_eq!(config.actions, vec!["move_left", "move_right"]);
        assert_eq!(config.layers.len(), 1);
        assert_eq!(config.layers.get("Ground"), Some(&0));
        assert_eq!(config.groups, vec!["players"]);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_parse_godot_input_block() {
        let config = ProjectConfig::parse_str(
            r#"
config_version=5

[application]

config/name="Platformer"
run/main_scene="res://main.tscn"

[input]

jump={
"deadzone": 0.5,
"events": [Object(InputEventKey,"resource_local_to_scene":false,"resource_name":"","device":-1,"keycode":0,"physical_keycode":32,"unicode":32,"echo":false,"script":null)
]
}
move_left={
"deadzone": 0.5,
"events": []
}
"#,
        );

        assert_eq!(config.actions, vec!["jump", "move_left"]);
        assert!(config.layers.is_empty());
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_parse_physics_layers() {
        let config = ProjectConfig::parse_str(
            r#"[layer_names]

2d_render/layer_1="Background"
2d_physics/layer_1="World"
2d_physics/layer_2="Player"
3d_physics/layer_5="Enemies"
2d_navigation/layer_1="Walkable"
"#,
        );

        let layers: Vec<_> = config.layers.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(layers, vec![("World", 0), ("Player", 1), ("Enemies", 4)]);
    }

    #[test]
    fn test_duplicate_layer_name_overwrites() {
        let config = ProjectConfig::parse_str(
            "[layer_names]\n2d_physics/layer_1=\"Ground\"\n2d_physics/layer_2=\"Wall\"\n3d_physics/layer_3=\"Ground\"\n",
        );

        assert_eq!(config.layers.len(), 2);
        assert_eq!(config.layers.get("Ground"), Some(&2));
        assert_eq!(config.layers.get_index(0).map(|(k, _)| k.as_str()), Some("Ground"));
    }

    #[test]
    fn test_malformed_layer_index_is_dropped() {
        let config = ProjectConfig::parse_str(
            "[layer_names]\n2d_physics/layer_x=\"Broken\"\n2d_physics/layer_0=\"Zero\"\n2d_physics/layer_2=\"Fine\"\n",
        );

        assert_eq!(config.layers.len(), 1);
        assert_eq!(config.layers.get("Fine"), Some(&1));
        assert_eq!(config.warnings.len(), 2);
        assert!(matches!(
            &config.warnings[0],
            Error::MalformedLayerIndex { line: 2, token } if token == "x"
        ));
    }

    #[test]
    fn test_unknown_section_isolates_entries() {
        let config = ProjectConfig::parse_str(
            "[input]\njump=\n[unknown_section]\nmove_left=\nmove_right=\n[global_group]\nenemies=\n",
        );

        assert_eq!(config.actions, vec!["jump"]);
        assert_eq!(config.groups, vec!["enemies"]);
    }

    #[test]
    fn test_lines_before_any_header_are_ignored() {
        let config = ProjectConfig::parse_str("jump=\n[input]\nfire=\n");
        assert_eq!(config.actions, vec!["fire"]);
    }

    #[test]
    fn test_header_switch_resets_section() {
        let config = ProjectConfig::parse_str(
            "[global_group]\nplayers=\n[input]\njump=\n[layer_names]\nnot_a_layer=\"x\"\n",
        );

        assert_eq!(config.groups, vec!["players"]);
        assert_eq!(config.actions, vec!["jump"]);
        assert!(config.layers.is_empty());
    }

    #[test]
    fn test_lines_without_equals_contribute_nothing() {
        let config = ProjectConfig::parse_str("[input]\njump\n  \n=\n =value\n");
        assert!(config.actions.is_empty());
    }

    #[test]
    fn test_only_first_equals_splits() {
        let config = ProjectConfig::parse_str(
            "[global_group]\nmobs=\"a=b\"\n[layer_names]\n2d_physics/layer_3=\"x=y\"\n",
        );

        assert_eq!(config.groups, vec!["mobs"]);
        assert_eq!(config.layers.get("x=y"), Some(&2));
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let config = ProjectConfig::parse_str("[input]\njump=\nfire=\njump=\n");
        assert_eq!(config.actions, vec!["jump", "fire", "jump"]);
    }

    #[test]
    fn test_indented_header_and_crlf() {
        let config = ProjectConfig::parse_str("  [input]  \r\njump={\r\n}\r\n");
        assert_eq!(config.actions, vec!["jump"]);
    }

    #[test]
    fn test_open_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = ProjectConfig::open(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::ConfigFileMissing { .. }));
    }

    #[test]
    fn test_open_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[global_group]\nenemies=\"\"\n")
            .unwrap();

        let config = ProjectConfig::open(temp.path()).unwrap();
        assert_eq!(config.groups, vec!["enemies"]);
    }

    #[test]
    fn test_layer_index_token() {
        assert_eq!(layer_index_token("2d_physics/layer_12"), "12");
        assert_eq!(layer_index_token("layer/layer_1/name"), "1");
        assert_eq!(layer_index_token("3d_physics/layer_"), "");
    }

    #[test]
    fn test_quoted_keys_are_unquoted() {
        let config = ProjectConfig::parse_str("[global_group]\n\"boss fight\"=\"\"\n");
        assert_eq!(config.groups, vec!["boss fight"]);
    }
}

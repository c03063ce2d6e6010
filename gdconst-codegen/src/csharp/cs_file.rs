//! A complete C# source file.

use super::{Fragment, Node, SourceWriter, Using};

/// `using` directives, a file-scoped namespace, then the declarations.
///
/// ```
/// use gdconst_codegen::csharp::{CsFile, Field, StaticClass, Using};
///
/// let text = CsFile::new("Game.Generated")
///     .using(Using::godot())
///     .add(StaticClass::new("Groups").field(Field::string_name("Enemies", "enemies")))
///     .render();
///
/// assert_eq!(
///     text,
///     "using Godot;\n\nnamespace Game.Generated;\n\npublic static class Groups {\n\tpublic static readonly StringName Enemies = \"enemies\";\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsFile {
    usings: Vec<Using>,
    namespace: String,
    declarations: Vec<Vec<Fragment>>,
}

impl CsFile {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn using(mut self, using: Using) -> Self {
        self.usings.push(using);
        self
    }

    /// Append a top-level declaration.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, node: impl Node) -> Self {
        self.declarations.push(node.fragments());
        self
    }

    /// Declarations are separated by one blank line.
    pub fn render(&self) -> String {
        let mut writer = SourceWriter::new();

        for using in &self.usings {
            writer.node(using);
        }
        if !self.usings.is_empty() {
            writer.blank();
        }

        writer
            .line(&format!("namespace {};", self.namespace))
            .blank();

        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                writer.blank();
            }
            for fragment in declaration {
                writer.fragment(fragment);
            }
        }

        writer.finish()
    }
}

//! Line-oriented writer for C# source text.

/// One level of indentation. Godot's C# templates use tabs.
const INDENT: char = '\t';

/// A piece of source produced by a syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Line(String),
    Blank,
    /// `open`, then `body` one level deeper, then `close`.
    Block {
        open: String,
        body: Vec<Fragment>,
        close: String,
    },
}

impl Fragment {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    /// A `{ ... }` block under `header`.
    pub fn braced(header: impl AsRef<str>, body: Vec<Fragment>) -> Self {
        Self::Block {
            open: format!("{} {{", header.as_ref()),
            body,
            close: "}".to_string(),
        }
    }
}

/// A syntax node that can be written as source.
pub trait Node {
    fn fragments(&self) -> Vec<Fragment>;
}

impl<T: Node + ?Sized> Node for &T {
    fn fragments(&self) -> Vec<Fragment> {
        (**self).fragments()
    }
}

/// Accumulates source lines, indenting nested blocks.
///
/// Every line, the last included, ends in `\n`.
#[derive(Debug, Default)]
pub struct SourceWriter {
    depth: usize,
    out: String,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        self.out.extend(std::iter::repeat_n(INDENT, self.depth));
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    /// An empty line, never indented.
    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn fragment(&mut self, fragment: &Fragment) -> &mut Self {
        match fragment {
            Fragment::Line(text) => self.line(text),
            Fragment::Blank => self.blank(),
            Fragment::Block { open, body, close } => {
                self.line(open);
                self.depth += 1;
                for inner in body {
                    self.fragment(inner);
                }
                self.depth -= 1;
                self.line(close)
            }
        }
    }

    pub fn node(&mut self, node: &impl Node) -> &mut Self {
        for fragment in node.fragments() {
            self.fragment(&fragment);
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_blanks() {
        let mut writer = SourceWriter::new();
        writer.line("using Godot;").blank().line("namespace Game;");
        assert_eq!(writer.finish(), "using Godot;\n\nnamespace Game;\n");
    }

    #[test]
    fn test_braced_block_indents_with_tabs() {
        let mut writer = SourceWriter::new();
        writer.fragment(&Fragment::braced(
            "public static class Actions",
            vec![Fragment::line("public static readonly StringName Jump = \"jump\";")],
        ));
        assert_eq!(
            writer.finish(),
            "public static class Actions {\n\tpublic static readonly StringName Jump = \"jump\";\n}\n"
        );
    }

    #[test]
    fn test_nested_blocks() {
        let mut writer = SourceWriter::new();
        writer.fragment(&Fragment::braced(
            "outer",
            vec![
                Fragment::braced("inner", vec![Fragment::line("x;")]),
                Fragment::Blank,
                Fragment::line("y;"),
            ],
        ));
        assert_eq!(writer.finish(), "outer {\n\tinner {\n\t\tx;\n\t}\n\n\ty;\n}\n");
    }
}

//! C# syntax nodes for generated constants classes.

mod class;
mod cs_file;
mod using;
mod writer;

pub use class::{Field, FieldKind, StaticClass};
pub use cs_file::CsFile;
pub use using::Using;
pub use writer::{Fragment, Node, SourceWriter};

/// File extension of generated sources.
pub const FILE_EXTENSION: &str = "cs";

/// Quote `value` as a C# string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("move_left"), "\"move_left\"");
        assert_eq!(string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal(""), "\"\"");
    }
}

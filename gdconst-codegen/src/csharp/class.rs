//! Static classes and their constant fields.

use super::{Fragment, Node, string_literal};

/// How a field holds its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `public static readonly <ty> <name> = "<value>";`
    StaticReadonly { ty: String, value: String },
    /// `public const <ty> <name> = <expr>;`
    Const { ty: String, expr: String },
}

/// A public constant-like field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

impl Field {
    /// A `static readonly StringName` initialized from a string literal.
    pub fn string_name(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::StaticReadonly {
                ty: "StringName".to_string(),
                value: value.into(),
            },
        }
    }

    /// A `const` with the given type and initializer expression.
    pub fn constant(
        name: impl Into<String>,
        ty: impl Into<String>,
        expr: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Const {
                ty: ty.into(),
                expr: expr.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the declaration without indentation.
    pub fn declaration(&self) -> String {
        match &self.kind {
            FieldKind::StaticReadonly { ty, value } => format!(
                "public static readonly {} {} = {};",
                ty,
                self.name,
                string_literal(value)
            ),
            FieldKind::Const { ty, expr } => {
                format!("public const {} {} = {};", ty, self.name, expr)
            }
        }
    }
}

impl Node for Field {
    fn fragments(&self) -> Vec<Fragment> {
        vec![Fragment::line(self.declaration())]
    }
}

/// `public static class <Name> { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticClass {
    name: String,
    fields: Vec<Field>,
}

impl StaticClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add fields from an iterator.
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }
}

impl Node for StaticClass {
    fn fragments(&self) -> Vec<Fragment> {
        let body = self.fields.iter().flat_map(|field| field.fragments()).collect();
        vec![Fragment::braced(
            format!("public static class {}", self.name),
            body,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csharp::SourceWriter;

    #[test]
    fn test_string_name_field() {
        let field = Field::string_name("MoveLeft", "move_left");
        assert_eq!(
            field.declaration(),
            "public static readonly StringName MoveLeft = \"move_left\";"
        );
    }

    #[test]
    fn test_const_field() {
        let field = Field::constant("Ground", "uint", "1 << 0");
        assert_eq!(field.declaration(), "public const uint Ground = 1 << 0;");
    }

    #[test]
    fn test_empty_class() {
        let mut writer = SourceWriter::new();
        writer.node(&StaticClass::new("Groups"));
        assert_eq!(writer.finish(), "public static class Groups {\n}\n");
    }

    #[test]
    fn test_class_with_fields() {
        let class = StaticClass::new("AudioBus")
            .field(Field::constant("Master", "int", "0"))
            .fields([Field::constant("Music", "int", "1")]);

        let mut writer = SourceWriter::new();
        writer.node(&class);
        assert_eq!(
            writer.finish(),
            "public static class AudioBus {\n\tpublic const int Master = 0;\n\tpublic const int Music = 1;\n}\n"
        );
    }
}

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for gdconst-project operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the settings file content and name so validation code can build
/// labelled diagnostics without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Locate the first quoted occurrence of `value` in the source.
    pub fn span_of(&self, value: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", value);
        self.src
            .find(&quoted)
            .map(|offset| SourceSpan::from((offset, quoted.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an invalid class name error.
    pub fn invalid_class_name_error(
        &self,
        name: impl Into<String>,
        artifact: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::InvalidClassName {
            src: self.named_source(),
            span: self.span_of(&name),
            name,
            artifact: artifact.into(),
        })
    }

    /// Create a duplicate class name error.
    pub fn duplicate_class_name_error(
        &self,
        name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::DuplicateClassName {
            src: self.named_source(),
            span: self.span_of(&name),
            name,
            first: first.into(),
            second: second.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse generator settings")]
    #[diagnostic(code(gdconst::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid class name '{name}' for {artifact}")]
    #[diagnostic(
        code(gdconst::invalid_class_name),
        help("use only letters, numbers, and underscores, starting with a letter or underscore")
    )]
    InvalidClassName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        artifact: String,
    },

    #[error("class name '{name}' is used by both {first} and {second}")]
    #[diagnostic(
        code(gdconst::duplicate_class_name),
        help("each artifact is written to '<class_name>.cs', so class names must differ")
    )]
    DuplicateClassName {
        #[source_code]
        src: NamedSource<String>,
        #[label("used twice")]
        span: Option<SourceSpan>,
        name: String,
        first: String,
        second: String,
    },

    #[error("no project identifier found in '{root}'")]
    #[diagnostic(
        code(gdconst::project_not_found),
        help("set `project_name` in gdconst.toml or add a .csproj file to the project root")
    )]
    ProjectIdentifierNotFound { root: PathBuf },

    #[error("project configuration '{path}' not found")]
    #[diagnostic(
        code(gdconst::config_missing),
        help("run gdconst from a Godot project root or pass --project")
    )]
    ConfigFileMissing { path: PathBuf },

    #[error("line {line}: layer index '{token}' is not a number between 1 and 32")]
    #[diagnostic(code(gdconst::malformed_layer_index), severity(Warning))]
    MalformedLayerIndex { line: usize, token: String },
}

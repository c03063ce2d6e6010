//! Where reports are rendered.

use gdconst_codegen::Severity;

/// Prefix of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bullet,
    /// File written.
    Added,
    /// File already up to date.
    Same,
    /// File deleted.
    Removed,
}

impl Marker {
    fn symbol(self) -> char {
        match self {
            Self::Bullet | Self::Removed => '-',
            Self::Added => '+',
            Self::Same => '=',
        }
    }
}

/// Target output for reports.
///
/// Reports say *what* to show; implementations decide how.
pub trait Output {
    /// `name:` heading for the items that follow.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn item(&mut self, marker: Marker, text: &str);

    /// A diagnostic line, on stderr for terminals.
    fn message(&mut self, severity: Severity, text: &str);

    /// `── label ──`
    fn divider(&mut self, label: &str);

    /// Text printed as is.
    fn text(&mut self, text: &str);

    fn newline(&mut self) {
        self.text("");
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain-text output on stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn item(&mut self, marker: Marker, text: &str) {
        println!("  {} {}", marker.symbol(), text);
    }

    fn message(&mut self, severity: Severity, text: &str) {
        eprintln!("{}: {}", severity, text);
    }

    fn divider(&mut self, label: &str) {
        println!("── {} ──", label);
    }

    fn text(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Collects what [`TerminalOutput`] would print, one entry per call.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn section(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{}: {}", key, value));
    }

    fn item(&mut self, marker: Marker, text: &str) {
        self.lines.push(format!("  {} {}", marker.symbol(), text));
    }

    fn message(&mut self, severity: Severity, text: &str) {
        self.lines.push(format!("{}: {}", severity, text));
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("── {} ──", label));
    }

    fn text(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

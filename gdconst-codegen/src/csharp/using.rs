use super::{Fragment, Node};

/// A `using <namespace>;` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Using {
    namespace: String,
}

impl Using {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// `using Godot;`
    pub fn godot() -> Self {
        Self::new("Godot")
    }
}

impl Node for Using {
    fn fragments(&self) -> Vec<Fragment> {
        vec![Fragment::line(format!("using {};", self.namespace))]
    }
}

//! Project identifier discovery.

use std::path::{Path, PathBuf};

/// Finds the identifier of the project rooted at a directory.
///
/// Implemented for plain closures so callers can inject a fixed value.
pub trait ProjectLookup {
    fn project_identifier(&self, root: &Path) -> Option<String>;
}

impl<F> ProjectLookup for F
where
    F: Fn(&Path) -> Option<String>,
{
    fn project_identifier(&self, root: &Path) -> Option<String> {
        self(root)
    }
}

/// Reads the identifier from the C# project file in the project root.
///
/// Uses `<RootNamespace>` when declared, otherwise the `.csproj` file stem.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsprojLookup;

impl ProjectLookup for CsprojLookup {
    fn project_identifier(&self, root: &Path) -> Option<String> {
        let Some(csproj) = find_csproj(root) else {
            tracing::warn!(root = %root.display(), "no .csproj file in project root");
            return None;
        };

        let declared = match std::fs::read_to_string(&csproj) {
            Ok(content) => parse_root_namespace(&content),
            Err(e) => {
                tracing::warn!(path = %csproj.display(), error = %e, "failed to read .csproj");
                None
            }
        };

        declared.or_else(|| {
            csproj
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
    }
}

/// First `*.csproj` directly under `root`, by file name.
fn find_csproj(root: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(root).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csproj"))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Text of the first non-empty `<RootNamespace>` element.
pub fn parse_root_namespace(csproj: &str) -> Option<String> {
    const OPEN: &str = "<RootNamespace>";
    const CLOSE: &str = "</RootNamespace>";

    let start = csproj.find(OPEN)? + OPEN.len();
    let len = csproj[start..].find(CLOSE)?;
    let value = csproj[start..start + len].trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const CSPROJ: &str = r#"<Project Sdk="Godot.NET.Sdk/4.3.0">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <EnableDynamicLoading>true</EnableDynamicLoading>
    <RootNamespace>Studio.Platformer</RootNamespace>
  </PropertyGroup>
</Project>
"#;

    #[test]
    fn test_parse_root_namespace() {
        assert_eq!(
            parse_root_namespace(CSPROJ).as_deref(),
            Some("Studio.Platformer")
        );
        assert_eq!(parse_root_namespace("<Project></Project>"), None);
        assert_eq!(
            parse_root_namespace("<RootNamespace>  </RootNamespace>"),
            None
        );
    }

    #[test]
    fn test_lookup_uses_root_namespace() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Platformer.csproj"), CSPROJ).unwrap();

        assert_eq!(
            CsprojLookup.project_identifier(temp.path()).as_deref(),
            Some("Studio.Platformer")
        );
    }

    #[test]
    fn test_lookup_falls_back_to_file_stem() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("Platformer.csproj"),
            "<Project Sdk=\"Godot.NET.Sdk/4.3.0\"></Project>",
        )
        .unwrap();

        assert_eq!(
            CsprojLookup.project_identifier(temp.path()).as_deref(),
            Some("Platformer")
        );
    }

    #[test]
    fn test_lookup_without_csproj() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("project.godot"), "").unwrap();

        assert_eq!(CsprojLookup.project_identifier(temp.path()), None);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |_: &Path| Some("Fixed".to_string());
        assert_eq!(
            lookup.project_identifier(Path::new("/nowhere")).as_deref(),
            Some("Fixed")
        );
    }
}

use std::path::{Component, Path};

use crate::{Error, ProjectLookup, Result};

/// Derive the namespace generated classes are declared in.
///
/// A non-empty `namespace_override` wins verbatim. Otherwise the namespace is
/// `<project>.<relative.output.path>`, where `<project>` is
/// `configured_project_name` or, when that is empty, whatever `lookup`
/// discovers under `project_root`.
pub fn resolve_namespace(
    configured_project_name: &str,
    namespace_override: &str,
    output_dir: &Path,
    project_root: &Path,
    lookup: &dyn ProjectLookup,
) -> Result<String> {
    if !namespace_override.is_empty() {
        return Ok(namespace_override.to_string());
    }

    let project = if configured_project_name.is_empty() {
        lookup
            .project_identifier(project_root)
            .ok_or_else(|| {
                Box::new(Error::ProjectIdentifierNotFound {
                    root: project_root.to_path_buf(),
                })
            })?
    } else {
        configured_project_name.to_string()
    };

    let relative = dotted_relative_path(project_root, output_dir);
    if relative.is_empty() {
        Ok(project)
    } else {
        Ok(format!("{}.{}", project, relative))
    }
}

/// `output_dir` relative to `project_root`, with separators turned into dots
/// (e.g., "scripts/generated" -> "scripts.generated").
///
/// `.` and `..` segments are dropped.
pub fn dotted_relative_path(project_root: &Path, output_dir: &Path) -> String {
    let relative = output_dir.strip_prefix(project_root).unwrap_or(output_dir);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .flat_map(|part| {
            part.split(['/', '\\'])
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn no_lookup(_: &Path) -> Option<String> {
        None
    }

    #[test]
    fn test_override_is_verbatim() {
        let calls = Cell::new(0);
        let lookup = |_: &Path| -> Option<String> {
            calls.set(calls.get() + 1);
            None
        };

        let ns = resolve_namespace(
            "",
            "My.Custom.Ns",
            Path::new("/game/scripts/generated"),
            Path::new("/game"),
            &lookup,
        )
        .unwrap();

        assert_eq!(ns, "My.Custom.Ns");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_configured_project_name() {
        let ns = resolve_namespace(
            "Platformer",
            "",
            Path::new("/game/scripts/generated"),
            Path::new("/game"),
            &no_lookup,
        )
        .unwrap();

        assert_eq!(ns, "Platformer.scripts.generated");
    }

    #[test]
    fn test_discovered_project_name() {
        let ns = resolve_namespace(
            "",
            "",
            Path::new("/game/src/consts"),
            Path::new("/game"),
            &|_: &Path| Some("Studio.Game".to_string()),
        )
        .unwrap();

        assert_eq!(ns, "Studio.Game.src.consts");
    }

    #[test]
    fn test_missing_project_identifier() {
        let err = resolve_namespace(
            "",
            "",
            Path::new("/game/scripts/generated"),
            Path::new("/game"),
            &no_lookup,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::ProjectIdentifierNotFound { .. }));
    }

    #[test]
    fn test_output_at_project_root() {
        let ns =
            resolve_namespace("Game", "", Path::new("/game"), Path::new("/game"), &no_lookup)
                .unwrap();
        assert_eq!(ns, "Game");
    }

    #[test]
    fn test_dotted_relative_path() {
        assert_eq!(
            dotted_relative_path(Path::new("/game"), Path::new("/game/a/b/c")),
            "a.b.c"
        );
        assert_eq!(
            dotted_relative_path(Path::new("/game"), Path::new("/game/./gen")),
            "gen"
        );
        assert_eq!(
            dotted_relative_path(Path::new("/game"), Path::new("/game/scripts\\generated")),
            "scripts.generated"
        );
    }
}

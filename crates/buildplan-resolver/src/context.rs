//! Build context checks.
//!
//! Verifies that every `hostPath` a variant copies exists in the build
//! context. This is the only part of variant checking that touches the
//! filesystem, so it lives outside [`crate::resolve`].

use std::path::{Component, Path, PathBuf};

use buildplan_common::error::{BuildPlanError, Result};

use crate::variant::BuildVariant;

/// Checks that every source mount's host path exists under `context_dir`.
///
/// Host paths are always taken relative to the context, even when written
/// with a leading `/`, and may not climb above it with `..`.
///
/// # Errors
///
/// Returns `Parse` for a host path that escapes the context and
/// `NotFound` for the first missing host path.
pub fn check_context(variant: &BuildVariant, context_dir: &Path) -> Result<()> {
    tracing::info!(
        variant = %variant.name,
        context = %context_dir.display(),
        "checking build context"
    );
    for mount in &variant.source_mounts {
        let host = context_dir.join(within_context(&mount.host_path)?);
        tracing::debug!(path = %host.display(), "checking source mount");
        if !host.exists() {
            return Err(BuildPlanError::NotFound {
                kind: "source mount",
                id: format!("{} (in {})", mount.host_path, context_dir.display()),
            });
        }
    }
    Ok(())
}

/// Lexically normalizes a host path relative to the context root.
fn within_context(host_path: &str) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in Path::new(host_path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(BuildPlanError::Parse {
                        message: format!("source mount hostPath \"{host_path}\" escapes the build context"),
                    });
                }
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::VariantBuilder;

    #[test]
    fn existing_paths_pass() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("src/mcp_jira")).expect("mkdir");
        std::fs::write(dir.path().join("requirements.txt"), "fastmcp\n").expect("write");

        let variant = VariantBuilder::new("ctx")
            .mount("requirements.txt", "/app/requirements.txt")
            .mount("src", "/app/src")
            .mount(".", "/app")
            .build();
        assert!(check_context(&variant, dir.path()).is_ok());
    }

    #[test]
    fn missing_path_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("src")).expect("mkdir");

        let variant = VariantBuilder::new("ctx")
            .mount("src", "/src")
            .mount("src/mcp_common", "/src/mcp_common")
            .build();
        let err = check_context(&variant, dir.path()).unwrap_err();
        assert!(matches!(err, BuildPlanError::NotFound { .. }));
        assert!(err.to_string().contains("src/mcp_common"), "got: {err}");
    }

    #[test]
    fn leading_slash_stays_inside_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("src")).expect("mkdir");
        let variant = VariantBuilder::new("ctx").mount("/src", "/src").build();
        assert!(check_context(&variant, dir.path()).is_ok());
    }

    #[test]
    fn parent_segments_cannot_leave_context() {
        let root = tempfile::tempdir().expect("tempdir");
        let context = root.path().join("ctx");
        std::fs::create_dir_all(context.join("src")).expect("mkdir");
        std::fs::write(root.path().join("secret.txt"), "token\n").expect("write");

        for host in ["../secret.txt", "src/../../secret.txt", "/../secret.txt"] {
            let variant = VariantBuilder::new("ctx").mount(host, "/src/s").build();
            let err = check_context(&variant, &context).unwrap_err();
            assert!(matches!(err, BuildPlanError::Parse { .. }), "{host}: got {err}");
            assert!(err.to_string().contains("escapes the build context"));
        }
    }

    #[test]
    fn parent_segments_inside_context_are_normalized() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("src/mcp_jira")).expect("mkdir");
        let variant = VariantBuilder::new("ctx")
            .mount("src/mcp_jira/../mcp_jira", "/src/mcp_jira")
            .mount("./src/..", "/app")
            .build();
        assert!(check_context(&variant, dir.path()).is_ok());
    }
}

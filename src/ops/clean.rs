//! Implementation of `pbxgen clean`.
//!
//! Removes the generated `.xcodeproj` directories of every discovered
//! project and the root `.xcworkspace`. Source trees and build outputs
//! are untouched; only generator-owned files go.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::manifest::Manifest;
use crate::ops::generate::discover_projects;
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::GlobalContext;

/// Result of a clean pass.
#[derive(Debug)]
pub struct CleanResult {
    /// Directories that existed and were removed
    pub removed: Vec<PathBuf>,
}

/// Remove the generated files of the build rooted at the manifest found
/// from `ctx`.
pub fn clean(ctx: &GlobalContext) -> Result<CleanResult> {
    let manifest_path = ctx.find_manifest()?;
    let root = Manifest::load(&manifest_path)?;
    let workspace_dir = root.xcworkspace_dir();

    let discovery = discover_projects(root);

    let mut removed = Vec::new();
    for project in &discovery.projects {
        let dir = project.xcodeproj_dir();
        if dir.exists() {
            remove_dir_all_if_exists(&dir)?;
            removed.push(dir);
        }
    }
    if workspace_dir.exists() {
        remove_dir_all_if_exists(&workspace_dir)?;
        removed.push(workspace_dir);
    }

    Ok(CleanResult { removed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::generate::{generate, GenerateOptions};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_generated_trees() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("Sources")).unwrap();
        fs::write(tmp.path().join("Sources/main.swift"), "").unwrap();
        fs::write(
            tmp.path().join("Pbxgen.toml"),
            r#"
[project]
name = "app"

[components.App]
kind = "executable"
sources = ["Sources/**/*.swift"]
debug-binary = "build/debug/App"
release-binary = "build/release/App"
"#,
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        generate(&ctx, &GenerateOptions::default()).unwrap();
        assert!(tmp.path().join("app.xcodeproj").exists());

        let result = clean(&ctx).unwrap();
        assert_eq!(result.removed.len(), 2);
        assert!(!tmp.path().join("app.xcodeproj").exists());
        assert!(!tmp.path().join("app.xcworkspace").exists());
        assert!(tmp.path().join("Sources/main.swift").exists());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Pbxgen.toml"), "[project]\nname = \"app\"\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        let result = clean(&ctx).unwrap();
        assert!(result.removed.is_empty());
    }
}

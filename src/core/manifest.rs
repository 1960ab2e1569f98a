//! Pbxgen.toml manifest parsing and schema.
//!
//! The manifest is the seam to the host build engine: it declares the
//! native components of one project (and, at the root of a composite
//! build, the member projects) without saying anything about how they are
//! compiled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::component::{Component, ComponentKind, Language};
use crate::util::fs::glob_files;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Pbxgen.toml";

/// Errors locating or parsing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no Pbxgen.toml found in {} or any parent directory", dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read manifest: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Project name; also names the generated `.xcodeproj`
    pub name: String,

    /// Qualified project path in the composite build (defaults to
    /// `:<name>`); prefixes the build command templates
    #[serde(default)]
    pub path: Option<String>,

    /// Build command the IDE invokes (defaults to `make`)
    #[serde(default = "default_build_tool")]
    pub build_tool: String,
}

fn default_build_tool() -> String {
    "make".to_string()
}

/// `[workspace]` section (root of a composite build).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceConfig {
    /// Relative directories of member projects, each with its own manifest
    #[serde(default)]
    pub members: Vec<String>,
}

/// One `[components.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentConfig {
    /// What the component produces
    pub kind: ComponentKind,

    /// Source language (affects which search-path setting is emitted)
    #[serde(default)]
    pub language: Language,

    /// Source file patterns (globs, relative to the manifest directory)
    pub sources: Vec<String>,

    /// Header file patterns
    #[serde(default)]
    pub headers: Vec<String>,

    /// Debug binary output location
    #[serde(default)]
    pub debug_binary: Option<PathBuf>,

    /// Release binary output location
    #[serde(default)]
    pub release_binary: Option<PathBuf>,

    /// Built test bundle directory
    #[serde(default)]
    pub bundle_dir: Option<PathBuf>,

    /// Import/include search paths, in search order
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl ComponentConfig {
    /// Resolve the declaration into a component descriptor: expand the
    /// source/header patterns and anchor every path at the manifest
    /// directory.
    pub fn resolve(&self, name: &str, dir: &Path) -> anyhow::Result<Component> {
        let mut component = Component::new(name, self.kind)
            .with_lang(self.language)
            .with_sources(glob_files(dir, &self.sources)?)
            .with_headers(glob_files(dir, &self.headers)?)
            .with_search_paths(self.search_paths.iter().map(|p| dir.join(p)));

        if let (Some(debug), Some(release)) = (&self.debug_binary, &self.release_binary) {
            component = component.with_binaries(dir.join(debug), dir.join(release));
        }
        if let Some(bundle) = &self.bundle_dir {
            component = component.with_bundle_dir(dir.join(bundle));
        }

        Ok(component)
    }
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    project: ProjectConfig,
    #[serde(default)]
    workspace: Option<WorkspaceConfig>,
    #[serde(default)]
    components: BTreeMap<String, ComponentConfig>,
}

/// The parsed Pbxgen.toml manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectConfig,

    /// Workspace configuration (root of a composite build)
    pub workspace: Option<WorkspaceConfig>,

    /// Declared components, keyed by name (name order = target order)
    pub components: BTreeMap<String, ComponentConfig>,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: RawManifest =
            toml::from_str(&contents).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let manifest_dir = path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        Ok(Manifest {
            project: raw.project,
            workspace: raw.workspace,
            components: raw.components,
            manifest_dir,
        })
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.project.name
    }

    /// Qualified project path used in build command templates.
    pub fn qualified_path(&self) -> String {
        self.project
            .path
            .clone()
            .unwrap_or_else(|| format!(":{}", self.project.name))
    }

    /// Member directories of a composite build, in declaration order.
    pub fn member_dirs(&self) -> Vec<PathBuf> {
        self.workspace
            .as_ref()
            .map(|ws| ws.members.iter().map(|m| self.manifest_dir.join(m)).collect())
            .unwrap_or_default()
    }

    /// The manifest file path.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_dir.join(MANIFEST_NAME)
    }

    /// Location of the generated `.xcodeproj` directory.
    pub fn xcodeproj_dir(&self) -> PathBuf {
        self.manifest_dir
            .join(format!("{}.xcodeproj", self.project.name))
    }

    /// Location of the generated `.xcworkspace` directory (root only).
    pub fn xcworkspace_dir(&self) -> PathBuf {
        self.manifest_dir
            .join(format!("{}.xcworkspace", self.project.name))
    }
}

/// Check a single directory for a manifest file.
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let path = dir.join(MANIFEST_NAME);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[project]
name = "app"
build-tool = "./gradlew"

[workspace]
members = ["lib"]

[components.App]
kind = "executable"
sources = ["Sources/**/*.swift"]
debug-binary = "build/debug/App"
release-binary = "build/release/App"
search-paths = ["build/modules"]

[components.AppTests]
kind = "test-bundle"
sources = ["Tests/**/*.swift"]
bundle-dir = "build/bundle/AppTests.xctest"
"#;

    fn write_manifest(dir: &Path) -> PathBuf {
        let path = dir.join(MANIFEST_NAME);
        std::fs::write(&path, MANIFEST).unwrap();
        path
    }

    #[test]
    fn test_load_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(tmp.path());

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name(), "app");
        assert_eq!(manifest.qualified_path(), ":app");
        assert_eq!(manifest.project.build_tool, "./gradlew");
        assert_eq!(manifest.member_dirs(), vec![tmp.path().join("lib")]);
        assert_eq!(manifest.components.len(), 2);
        assert_eq!(
            manifest.components["App"].kind,
            ComponentKind::Executable
        );
        assert_eq!(
            manifest.components["AppTests"].kind,
            ComponentKind::TestBundle
        );
    }

    #[test]
    fn test_resolve_component_expands_globs() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path());
        std::fs::create_dir_all(tmp.path().join("Sources")).unwrap();
        std::fs::write(tmp.path().join("Sources/main.swift"), "").unwrap();
        std::fs::write(tmp.path().join("Sources/util.swift"), "").unwrap();

        let manifest = Manifest::load(&tmp.path().join(MANIFEST_NAME)).unwrap();
        let component = manifest.components["App"]
            .resolve("App", tmp.path())
            .unwrap();

        assert_eq!(component.sources.len(), 2);
        assert_eq!(
            component.debug_binary,
            Some(tmp.path().join("build/debug/App"))
        );
        assert_eq!(component.search_paths, vec![tmp.path().join("build/modules")]);
    }

    #[test]
    fn test_parse_error_carries_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&path, "project = nonsense").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_find_manifest() {
        let tmp = TempDir::new().unwrap();
        assert!(find_manifest(tmp.path()).is_err());
        write_manifest(tmp.path());
        assert_eq!(
            find_manifest(tmp.path()).unwrap(),
            tmp.path().join(MANIFEST_NAME)
        );
    }
}

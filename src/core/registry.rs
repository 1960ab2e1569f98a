//! Artifact registry - the seam to the host build engine.
//!
//! Each project publishes the location of its generated project file under
//! a well-known artifact key; the root of a composite build discovers
//! sibling projects by looking those artifacts up. Publication happens
//! before aggregation begins, so aggregation only ever reads.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Well-known artifact key for generated project files.
pub const XCODEPROJ_ARTIFACT: &str = "xcodeproj";

/// Identity of one project within a composite build.
///
/// The qualified path (e.g. `:app`) doubles as the prefix of the build
/// command templates handed to the IDE.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a project identity from its qualified path.
    pub fn new(path: impl Into<String>) -> Self {
        ProjectId(path.into())
    }

    /// The qualified path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published artifact: a name, its output location, and the build task
/// that produces it.
#[derive(Debug, Clone)]
pub struct ArtifactHandle {
    /// Artifact display name (project name for `xcodeproj` artifacts)
    pub name: String,

    /// Output location on disk
    pub location: PathBuf,

    /// Qualified task that produces the artifact (e.g. `:app:xcodeProject`);
    /// building the workspace depends on every referenced project's task
    pub built_by: String,
}

/// Read access to published artifacts.
///
/// Host build engines substitute their own artifact service here; the
/// aggregator only depends on this capability.
pub trait ArtifactSource {
    /// Look up an artifact published by a project, if any.
    ///
    /// A project that published nothing under the key returns `None`;
    /// that is not an error.
    fn lookup(&self, project: &ProjectId, key: &str) -> Option<ArtifactHandle>;
}

/// In-memory artifact registry.
///
/// Writes settle before the discovery phase reads begin, but reads may
/// come from worker threads, so the map sits behind a read-write lock.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    inner: RwLock<HashMap<(ProjectId, String), ArtifactHandle>>,
}

impl ArtifactRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ArtifactRegistry::default()
    }

    /// Publish an artifact for a project.
    pub fn register(&self, project: ProjectId, key: impl Into<String>, handle: ArtifactHandle) {
        let mut inner = self.inner.write().unwrap();
        inner.insert((project, key.into()), handle);
    }
}

impl ArtifactSource for ArtifactRegistry {
    fn lookup(&self, project: &ProjectId, key: &str) -> Option<ArtifactHandle> {
        let inner = self.inner.read().unwrap();
        inner.get(&(project.clone(), key.to_string())).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = ArtifactRegistry::new();
        let id = ProjectId::new(":app");
        registry.register(
            id.clone(),
            XCODEPROJ_ARTIFACT,
            ArtifactHandle {
                name: "app".to_string(),
                location: PathBuf::from("/work/app.xcodeproj"),
                built_by: ":app:xcodeProject".to_string(),
            },
        );

        let handle = registry.lookup(&id, XCODEPROJ_ARTIFACT).unwrap();
        assert_eq!(handle.name, "app");
        assert_eq!(handle.location, PathBuf::from("/work/app.xcodeproj"));
        assert_eq!(handle.built_by, ":app:xcodeProject");
    }

    #[test]
    fn test_missing_artifact_is_none() {
        let registry = ArtifactRegistry::new();
        assert!(registry
            .lookup(&ProjectId::new(":empty"), XCODEPROJ_ARTIFACT)
            .is_none());
    }
}

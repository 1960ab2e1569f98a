//! Workspace model - multi-project aggregation.
//!
//! The root of a composite build collects every constituent project that
//! published a project-file artifact and references them from a single
//! `.xcworkspace` so the whole build opens as one IDE session.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::util::fs::normalize_path;

/// A reference to one constituent project's output location plus the
/// build dependency that produces it.
#[derive(Debug, Clone)]
pub struct WorkspaceEntry {
    /// Project name (for display/logging)
    pub name: String,

    /// Location of the project's `.xcodeproj` directory
    pub location: PathBuf,

    /// Qualified task producing the project file; building the workspace
    /// transitively runs every entry's task first
    pub built_by: String,
}

/// The in-memory model of the workspace file.
#[derive(Debug)]
pub struct XcodeWorkspace {
    name: String,
    location_dir: PathBuf,
    entries: Vec<WorkspaceEntry>,
    seen: HashSet<PathBuf>,
}

impl XcodeWorkspace {
    /// Create an empty workspace rooted at the given `.xcworkspace`
    /// location directory.
    pub fn new(name: impl Into<String>, location_dir: impl Into<PathBuf>) -> Self {
        XcodeWorkspace {
            name: name.into(),
            location_dir: location_dir.into(),
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Workspace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `.xcworkspace` package directory.
    pub fn location_dir(&self) -> &Path {
        &self.location_dir
    }

    /// Add a project reference.
    ///
    /// Entries are deduplicated by resolved absolute path: a project
    /// discovered via two different registry paths is referenced once.
    /// Returns false if the location was already present.
    pub fn add_entry(
        &mut self,
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        built_by: impl Into<String>,
    ) -> bool {
        let location = location.into();
        if !self.seen.insert(normalize_path(&location)) {
            return false;
        }
        self.entries.push(WorkspaceEntry {
            name: name.into(),
            location,
            built_by: built_by.into(),
        });
        true
    }

    /// Entries in discovery order.
    pub fn entries(&self) -> &[WorkspaceEntry] {
        &self.entries
    }

    /// The synthetic dependency set: every entry's producing task, in
    /// discovery order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.built_by.as_str())
    }

    /// Path of the workspace contents file.
    pub fn contents_path(&self) -> PathBuf {
        self.location_dir.join("contents.xcworkspacedata")
    }

    /// Path of the workspace settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.location_dir
            .join("xcshareddata/WorkspaceSettings.xcsettings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entries_dedup_by_resolved_path() {
        let tmp = TempDir::new().unwrap();
        let proj = tmp.path().join("app.xcodeproj");
        std::fs::create_dir_all(&proj).unwrap();

        let mut ws = XcodeWorkspace::new("root", tmp.path().join("root.xcworkspace"));
        assert!(ws.add_entry("app", &proj, ":app:xcodeProject"));

        // Same location reached through a second, unnormalized path.
        let via_dot = tmp.path().join(".").join("app.xcodeproj");
        assert!(!ws.add_entry("app", via_dot, ":app:xcodeProject"));

        assert_eq!(ws.entries().len(), 1);
    }

    #[test]
    fn test_entries_keep_discovery_order() {
        let mut ws = XcodeWorkspace::new("root", "/work/root.xcworkspace");
        ws.add_entry("b", "/work/b/b.xcodeproj", ":b:xcodeProject");
        ws.add_entry("a", "/work/a/a.xcodeproj", ":a:xcodeProject");

        let names: Vec<_> = ws.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let deps: Vec<_> = ws.dependencies().collect();
        assert_eq!(deps, vec![":b:xcodeProject", ":a:xcodeProject"]);
    }

    #[test]
    fn test_file_paths() {
        let ws = XcodeWorkspace::new("root", "/work/root.xcworkspace");
        assert_eq!(
            ws.contents_path(),
            PathBuf::from("/work/root.xcworkspace/contents.xcworkspacedata")
        );
        assert_eq!(
            ws.settings_path(),
            PathBuf::from("/work/root.xcworkspace/xcshareddata/WorkspaceSettings.xcsettings")
        );
    }
}

//! Project model - the entity graph for one generated project.
//!
//! An [`XcodeProject`] aggregates the targets of one build project plus a
//! flat source list used for IDE indexing (distinct from per-target
//! sources). The location directory is fixed at creation; the target list
//! is append-only during one generation pass. The whole model is discarded
//! and rebuilt on every regeneration - only the ID function persists
//! identity across runs.

use std::path::{Path, PathBuf};

use crate::core::gid::{seed32, GidGenerator};
use crate::core::target::XcodeTarget;

/// A reference to one file shown in the IDE's project navigator.
#[derive(Debug, Clone)]
pub struct FileReference {
    /// Stable object ID
    pub id: String,

    /// Absolute file path
    pub path: PathBuf,
}

impl FileReference {
    /// The file name rendered in the navigator.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Identifier set for the project-level objects.
#[derive(Debug, Clone)]
pub struct ProjectGids {
    /// The root PBXProject object
    pub project: String,
    /// Main group holding the indexed sources
    pub main_group: String,
    /// Products group
    pub products_group: String,
    /// Project-level configuration list
    pub config_list: String,
    /// Project-level Debug configuration
    pub debug_config: String,
    /// Project-level Release configuration
    pub release_config: String,
}

/// The in-memory model of one generated project.
#[derive(Debug)]
pub struct XcodeProject {
    name: String,
    location_dir: PathBuf,
    gids_set: ProjectGids,
    targets: Vec<XcodeTarget>,
    sources: Vec<FileReference>,
}

impl XcodeProject {
    /// Create an empty project model rooted at the given `.xcodeproj`
    /// location directory.
    pub fn new(name: impl Into<String>, location_dir: impl Into<PathBuf>, gids: &GidGenerator) -> Self {
        let name = name.into();
        let gids_set = ProjectGids {
            project: gids.generate("PBXProject", seed32(&name)),
            main_group: gids.generate("PBXGroup", seed32(&format!("{name} mainGroup"))),
            products_group: gids.generate("PBXGroup", seed32(&format!("{name} Products"))),
            config_list: gids.generate("XCConfigurationList", seed32(&name)),
            debug_config: gids.generate("XCBuildConfiguration", seed32(&format!("{name} Debug"))),
            release_config: gids
                .generate("XCBuildConfiguration", seed32(&format!("{name} Release"))),
        };
        XcodeProject {
            name,
            location_dir: location_dir.into(),
            gids_set,
            targets: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `.xcodeproj` package directory.
    pub fn location_dir(&self) -> &Path {
        &self.location_dir
    }

    /// Project-level object IDs.
    pub fn gids(&self) -> &ProjectGids {
        &self.gids_set
    }

    /// Append a target. The list is append-only within a generation pass.
    pub fn add_target(&mut self, target: XcodeTarget) {
        self.targets.push(target);
    }

    /// Add a file to the flat indexing source list.
    ///
    /// Duplicates are ignored; insertion order is preserved for rendering.
    pub fn add_source(&mut self, path: PathBuf, gids: &GidGenerator) {
        if self.sources.iter().any(|f| f.path == path) {
            return;
        }
        let id = gids.generate("PBXFileReference", seed32(&path.to_string_lossy()));
        self.sources.push(FileReference { id, path });
    }

    /// Targets in insertion order.
    pub fn targets(&self) -> &[XcodeTarget] {
        &self.targets
    }

    /// Indexed source references in insertion order.
    pub fn sources(&self) -> &[FileReference] {
        &self.sources
    }

    /// Path of the project descriptor file.
    pub fn pbxproj_path(&self) -> PathBuf {
        self.location_dir.join("project.pbxproj")
    }

    /// Path of the per-project workspace settings file.
    pub fn workspace_settings_path(&self) -> PathBuf {
        self.location_dir
            .join("project.xcworkspace/xcshareddata/WorkspaceSettings.xcsettings")
    }

    /// Directory holding shared scheme files.
    pub fn schemes_dir(&self) -> PathBuf {
        self.location_dir.join("xcshareddata/xcschemes")
    }
}

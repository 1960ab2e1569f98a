//! Launch/build scheme entities.
//!
//! A scheme names one target and tells the IDE how to build, test, launch,
//! profile, analyze, and archive it. One scheme is written per buildable
//! target, under the project's shared-data directory.

use std::path::PathBuf;

use crate::core::project::XcodeProject;
use crate::core::target::{ProductType, XcodeTarget};

/// A named launch/build configuration referencing one target.
#[derive(Debug, Clone)]
pub struct Scheme {
    /// Scheme name; matches the target's display name
    pub name: String,

    /// The referenced target's stable ID
    pub target_id: String,

    /// The referenced target's display name
    pub target_name: String,

    /// Product name used for the buildable reference
    pub product_name: String,

    /// Whether the target's product can be launched directly
    pub runnable: bool,

    /// Container reference, relative to the workspace
    /// (e.g. `container:app.xcodeproj`)
    pub container: String,
}

impl Scheme {
    /// Build the scheme describing one of the project's targets.
    pub fn for_target(project: &XcodeProject, target: &XcodeTarget) -> Self {
        let container_name = project
            .location_dir()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.xcodeproj", project.name()));

        Scheme {
            name: target.name.clone(),
            target_id: target.id().to_string(),
            target_name: target.name.clone(),
            product_name: target.product_name.clone(),
            runnable: target.product_type == ProductType::Executable,
            container: format!("container:{container_name}"),
        }
    }

    /// Path of the scheme file under the project's shared data directory.
    pub fn output_path(&self, project: &XcodeProject) -> PathBuf {
        project.schemes_dir().join(format!("{}.xcscheme", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::Language;
    use crate::core::gid::GidGenerator;

    #[test]
    fn test_scheme_references_target() {
        let gids = GidGenerator::new();
        let project = XcodeProject::new("app", "/work/app.xcodeproj", &gids);
        let target = XcodeTarget::new(
            &gids,
            "App Executable",
            ProductType::Executable,
            "App",
            Language::Swift,
            PathBuf::from("debug/App"),
            PathBuf::from("release/App"),
            "make",
            ":app:link$(CONFIGURATION)",
        );

        let scheme = Scheme::for_target(&project, &target);
        assert_eq!(scheme.name, "App Executable");
        assert_eq!(scheme.target_id, target.id());
        assert_eq!(scheme.container, "container:app.xcodeproj");
        assert!(scheme.runnable);
        assert_eq!(
            scheme.output_path(&project),
            PathBuf::from("/work/app.xcodeproj/xcshareddata/xcschemes/App Executable.xcscheme")
        );
    }

    #[test]
    fn test_library_scheme_is_not_runnable() {
        let gids = GidGenerator::new();
        let project = XcodeProject::new("lib", "/work/lib.xcodeproj", &gids);
        let target = XcodeTarget::new(
            &gids,
            "Lib SharedLibrary",
            ProductType::SharedLibrary,
            "Lib",
            Language::Swift,
            PathBuf::from("debug/libLib.dylib"),
            PathBuf::from("release/libLib.dylib"),
            "make",
            ":lib:link$(CONFIGURATION)",
        );

        let scheme = Scheme::for_target(&project, &target);
        assert!(!scheme.runnable);
    }
}

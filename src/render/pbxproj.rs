//! `project.pbxproj` serialization.
//!
//! Emits the OpenStep-plist project descriptor the IDE reads. Objects are
//! grouped into sections by class, in a fixed section order; within a
//! section, model insertion order is kept. Together with
//! construction-time ID allocation this makes the output a pure function
//! of the model.

use std::path::Path;

use anyhow::Result;

use crate::core::component::Language;
use crate::core::project::XcodeProject;
use crate::core::target::XcodeTarget;
use crate::render::write_generated;

/// Serializes one project model to its descriptor file.
pub struct ProjectFileWriter<'a> {
    project: &'a XcodeProject,
}

impl<'a> ProjectFileWriter<'a> {
    /// Create a writer over a populated project model.
    pub fn new(project: &'a XcodeProject) -> Self {
        ProjectFileWriter { project }
    }

    /// Render the descriptor.
    pub fn render(&self) -> String {
        let p = self.project;
        let g = p.gids();
        let mut out = String::new();

        out.push_str("// !$*UTF8*$!\n{\n");
        out.push_str("\tarchiveVersion = 1;\n");
        out.push_str("\tclasses = {\n\t};\n");
        out.push_str("\tobjectVersion = 46;\n");
        out.push_str("\tobjects = {\n");

        self.file_reference_section(&mut out);
        self.group_section(&mut out);
        self.legacy_target_section(&mut out);
        self.project_section(&mut out);
        self.build_configuration_section(&mut out);
        self.configuration_list_section(&mut out);

        out.push_str("\t};\n");
        out.push_str(&format!(
            "\trootObject = {} /* Project object */;\n",
            g.project
        ));
        out.push_str("}\n");
        out
    }

    /// Render and write the descriptor to the given path.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_generated(path, &self.render())
    }

    fn file_reference_section(&self, out: &mut String) {
        let p = self.project;
        out.push_str("\n/* Begin PBXFileReference section */\n");
        for file in p.sources() {
            out.push_str(&format!(
                "\t\t{} /* {} */ = {{isa = PBXFileReference; name = {}; path = {}; sourceTree = \"<absolute>\"; }};\n",
                file.id,
                file.display_name(),
                quoted(&file.display_name()),
                quoted(&file.path.to_string_lossy()),
            ));
        }
        for target in p.targets() {
            out.push_str(&format!(
                "\t\t{} /* {} */ = {{isa = PBXFileReference; explicitFileType = {}; name = {}; path = {}; sourceTree = \"<absolute>\"; }};\n",
                target.gids.product_ref,
                target.product_name,
                quoted(target.product_type.file_type()),
                quoted(&target.product_name),
                quoted(&target.debug_output.to_string_lossy()),
            ));
        }
        out.push_str("/* End PBXFileReference section */\n");
    }

    fn group_section(&self, out: &mut String) {
        let p = self.project;
        let g = p.gids();

        out.push_str("\n/* Begin PBXGroup section */\n");
        out.push_str(&format!("\t\t{} = {{\n", g.main_group));
        out.push_str("\t\t\tisa = PBXGroup;\n");
        out.push_str("\t\t\tchildren = (\n");
        for file in p.sources() {
            out.push_str(&format!(
                "\t\t\t\t{} /* {} */,\n",
                file.id,
                file.display_name()
            ));
        }
        out.push_str(&format!("\t\t\t\t{} /* Products */,\n", g.products_group));
        out.push_str("\t\t\t);\n");
        out.push_str("\t\t\tsourceTree = \"<group>\";\n");
        out.push_str("\t\t};\n");

        out.push_str(&format!("\t\t{} /* Products */ = {{\n", g.products_group));
        out.push_str("\t\t\tisa = PBXGroup;\n");
        out.push_str("\t\t\tchildren = (\n");
        for target in p.targets() {
            out.push_str(&format!(
                "\t\t\t\t{} /* {} */,\n",
                target.gids.product_ref, target.product_name
            ));
        }
        out.push_str("\t\t\t);\n");
        out.push_str("\t\t\tname = Products;\n");
        out.push_str("\t\t\tsourceTree = \"<group>\";\n");
        out.push_str("\t\t};\n");
        out.push_str("/* End PBXGroup section */\n");
    }

    fn legacy_target_section(&self, out: &mut String) {
        let p = self.project;
        out.push_str("\n/* Begin PBXLegacyTarget section */\n");
        for target in p.targets() {
            out.push_str(&format!("\t\t{} /* {} */ = {{\n", target.gids.target, target.name));
            out.push_str("\t\t\tisa = PBXLegacyTarget;\n");
            out.push_str(&format!(
                "\t\t\tbuildArgumentsString = {};\n",
                quoted(&target.build_args_template)
            ));
            out.push_str(&format!(
                "\t\t\tbuildConfigurationList = {} /* Build configuration list for PBXLegacyTarget \"{}\" */;\n",
                target.gids.config_list, target.name
            ));
            out.push_str("\t\t\tbuildPhases = (\n\t\t\t);\n");
            out.push_str(&format!(
                "\t\t\tbuildToolPath = {};\n",
                quoted(&target.build_tool_path)
            ));
            out.push_str(&format!(
                "\t\t\tbuildWorkingDirectory = {};\n",
                quoted(&working_dir(p)),
            ));
            out.push_str("\t\t\tdependencies = (\n\t\t\t);\n");
            out.push_str(&format!("\t\t\tname = {};\n", quoted(&target.name)));
            // Required so the IDE's BUILT_PRODUCTS_DIR reaches the
            // redirected test-bundle build at invocation time.
            out.push_str("\t\t\tpassBuildSettingsInEnvironment = 1;\n");
            out.push_str(&format!(
                "\t\t\tproductName = {};\n",
                quoted(&target.product_name)
            ));
            out.push_str(&format!(
                "\t\t\tproductReference = {} /* {} */;\n",
                target.gids.product_ref, target.product_name
            ));
            out.push_str(&format!(
                "\t\t\tproductType = {};\n",
                quoted(target.product_type.identifier())
            ));
            out.push_str("\t\t};\n");
        }
        out.push_str("/* End PBXLegacyTarget section */\n");
    }

    fn project_section(&self, out: &mut String) {
        let p = self.project;
        let g = p.gids();
        out.push_str("\n/* Begin PBXProject section */\n");
        out.push_str(&format!("\t\t{} /* Project object */ = {{\n", g.project));
        out.push_str("\t\t\tisa = PBXProject;\n");
        out.push_str("\t\t\tattributes = {\n");
        out.push_str("\t\t\t\tLastUpgradeCheck = 0800;\n");
        out.push_str("\t\t\t};\n");
        out.push_str(&format!(
            "\t\t\tbuildConfigurationList = {} /* Build configuration list for PBXProject \"{}\" */;\n",
            g.config_list,
            p.name()
        ));
        out.push_str("\t\t\tcompatibilityVersion = \"Xcode 3.2\";\n");
        out.push_str(&format!("\t\t\tmainGroup = {};\n", g.main_group));
        out.push_str(&format!(
            "\t\t\tproductRefGroup = {} /* Products */;\n",
            g.products_group
        ));
        out.push_str("\t\t\tprojectDirPath = \"\";\n");
        out.push_str("\t\t\tprojectRoot = \"\";\n");
        out.push_str("\t\t\ttargets = (\n");
        for target in p.targets() {
            out.push_str(&format!(
                "\t\t\t\t{} /* {} */,\n",
                target.gids.target, target.name
            ));
        }
        out.push_str("\t\t\t);\n");
        out.push_str("\t\t};\n");
        out.push_str("/* End PBXProject section */\n");
    }

    fn build_configuration_section(&self, out: &mut String) {
        let p = self.project;
        let g = p.gids();
        out.push_str("\n/* Begin XCBuildConfiguration section */\n");

        for (gid, name) in [(&g.debug_config, "Debug"), (&g.release_config, "Release")] {
            out.push_str(&format!("\t\t{} /* {} */ = {{\n", gid, name));
            out.push_str("\t\t\tisa = XCBuildConfiguration;\n");
            out.push_str("\t\t\tbuildSettings = {\n\t\t\t};\n");
            out.push_str(&format!("\t\t\tname = {};\n", name));
            out.push_str("\t\t};\n");
        }

        for target in p.targets() {
            for (gid, name, output) in [
                (&target.gids.debug_config, "Debug", &target.debug_output),
                (&target.gids.release_config, "Release", &target.release_output),
            ] {
                out.push_str(&format!("\t\t{} /* {} */ = {{\n", gid, name));
                out.push_str("\t\t\tisa = XCBuildConfiguration;\n");
                out.push_str("\t\t\tbuildSettings = {\n");
                if let Some(dir) = output.parent() {
                    out.push_str(&format!(
                        "\t\t\t\tCONFIGURATION_BUILD_DIR = {};\n",
                        quoted(&dir.to_string_lossy())
                    ));
                }
                if !target.search_paths().is_empty() {
                    out.push_str(&format!(
                        "\t\t\t\t{} = {};\n",
                        search_paths_setting(target),
                        quoted(&joined_search_paths(target))
                    ));
                }
                out.push_str(&format!(
                    "\t\t\t\tPRODUCT_NAME = {};\n",
                    quoted(&target.product_name)
                ));
                out.push_str("\t\t\t};\n");
                out.push_str(&format!("\t\t\tname = {};\n", name));
                out.push_str("\t\t};\n");
            }
        }
        out.push_str("/* End XCBuildConfiguration section */\n");
    }

    fn configuration_list_section(&self, out: &mut String) {
        let p = self.project;
        let g = p.gids();
        out.push_str("\n/* Begin XCConfigurationList section */\n");

        self.configuration_list(
            out,
            &g.config_list,
            &format!("Build configuration list for PBXProject \"{}\"", p.name()),
            &g.debug_config,
            &g.release_config,
        );
        for target in p.targets() {
            self.configuration_list(
                out,
                &target.gids.config_list,
                &format!(
                    "Build configuration list for PBXLegacyTarget \"{}\"",
                    target.name
                ),
                &target.gids.debug_config,
                &target.gids.release_config,
            );
        }
        out.push_str("/* End XCConfigurationList section */\n");
    }

    fn configuration_list(
        &self,
        out: &mut String,
        gid: &str,
        comment: &str,
        debug: &str,
        release: &str,
    ) {
        out.push_str(&format!("\t\t{} /* {} */ = {{\n", gid, comment));
        out.push_str("\t\t\tisa = XCConfigurationList;\n");
        out.push_str("\t\t\tbuildConfigurations = (\n");
        out.push_str(&format!("\t\t\t\t{} /* Debug */,\n", debug));
        out.push_str(&format!("\t\t\t\t{} /* Release */,\n", release));
        out.push_str("\t\t\t);\n");
        out.push_str("\t\t\tdefaultConfigurationIsVisible = 0;\n");
        out.push_str("\t\t\tdefaultConfigurationName = Debug;\n");
        out.push_str("\t\t};\n");
    }
}

/// The build working directory is the project's parent, not the
/// `.xcodeproj` package itself.
fn working_dir(project: &XcodeProject) -> String {
    project
        .location_dir()
        .parent()
        .unwrap_or(project.location_dir())
        .to_string_lossy()
        .into_owned()
}

/// Which build setting the target's search paths render into.
fn search_paths_setting(target: &XcodeTarget) -> &'static str {
    match target.lang {
        Language::Swift => "SWIFT_INCLUDE_PATHS",
        Language::C | Language::Cpp => "HEADER_SEARCH_PATHS",
    }
}

/// Search paths joined in declaration order; order matters to the
/// compiler.
fn joined_search_paths(target: &XcodeTarget) -> String {
    target
        .search_paths()
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote a plist value unless it is a plain identifier-like token.
fn quoted(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'));
    if plain {
        s.to_string()
    } else {
        let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    }
}

//! `.xcscheme` serialization.
//!
//! A scheme file tells the IDE how to build, test, launch, profile,
//! analyze, and archive one target. Every action here references the same
//! target; the IDE picks the configuration name and substitutes it into
//! the legacy target's build command.

use std::path::Path;

use anyhow::Result;

use crate::core::scheme::Scheme;
use crate::render::{write_generated, xml_escape};

/// Serializes one scheme.
pub struct SchemeWriter<'a> {
    scheme: &'a Scheme,
}

impl<'a> SchemeWriter<'a> {
    /// Create a writer over a scheme.
    pub fn new(scheme: &'a Scheme) -> Self {
        SchemeWriter { scheme }
    }

    /// Render the scheme file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str("<Scheme\n   LastUpgradeVersion = \"0800\"\n   version = \"1.3\">\n");

        self.build_action(&mut out);
        self.test_action(&mut out);
        self.launch_action(&mut out);
        self.profile_action(&mut out);
        out.push_str("   <AnalyzeAction\n      buildConfiguration = \"Debug\">\n   </AnalyzeAction>\n");
        out.push_str("   <ArchiveAction\n      buildConfiguration = \"Release\"\n      revealArchiveInOrganizer = \"YES\">\n   </ArchiveAction>\n");

        out.push_str("</Scheme>\n");
        out
    }

    /// Render and write the scheme to the given path.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_generated(path, &self.render())
    }

    fn buildable_reference(&self, out: &mut String, indent: &str) {
        let s = self.scheme;
        out.push_str(&format!("{indent}<BuildableReference\n"));
        out.push_str(&format!("{indent}   BuildableIdentifier = \"primary\"\n"));
        out.push_str(&format!(
            "{indent}   BlueprintIdentifier = \"{}\"\n",
            xml_escape(&s.target_id)
        ));
        out.push_str(&format!(
            "{indent}   BuildableName = \"{}\"\n",
            xml_escape(&s.product_name)
        ));
        out.push_str(&format!(
            "{indent}   BlueprintName = \"{}\"\n",
            xml_escape(&s.target_name)
        ));
        out.push_str(&format!(
            "{indent}   ReferencedContainer = \"{}\">\n",
            xml_escape(&s.container)
        ));
        out.push_str(&format!("{indent}</BuildableReference>\n"));
    }

    fn build_action(&self, out: &mut String) {
        out.push_str("   <BuildAction\n      parallelizeBuildables = \"YES\"\n      buildImplicitDependencies = \"YES\">\n");
        out.push_str("      <BuildActionEntries>\n");
        out.push_str("         <BuildActionEntry\n");
        out.push_str("            buildForTesting = \"YES\"\n");
        out.push_str("            buildForRunning = \"YES\"\n");
        out.push_str("            buildForProfiling = \"YES\"\n");
        out.push_str("            buildForArchiving = \"YES\"\n");
        out.push_str("            buildForAnalyzing = \"YES\">\n");
        self.buildable_reference(out, "            ");
        out.push_str("         </BuildActionEntry>\n");
        out.push_str("      </BuildActionEntries>\n");
        out.push_str("   </BuildAction>\n");
    }

    fn test_action(&self, out: &mut String) {
        out.push_str("   <TestAction\n");
        out.push_str("      buildConfiguration = \"Debug\"\n");
        out.push_str("      selectedDebuggerIdentifier = \"Xcode.DebuggerFoundation.Debugger.LLDB\"\n");
        out.push_str("      selectedLauncherIdentifier = \"Xcode.DebuggerFoundation.Launcher.LLDB\"\n");
        out.push_str("      shouldUseLaunchSchemeArgsEnv = \"YES\">\n");
        out.push_str("      <Testables>\n      </Testables>\n");
        out.push_str("      <AdditionalOptions>\n      </AdditionalOptions>\n");
        out.push_str("   </TestAction>\n");
    }

    fn launch_action(&self, out: &mut String) {
        out.push_str("   <LaunchAction\n");
        out.push_str("      buildConfiguration = \"Debug\"\n");
        out.push_str("      selectedDebuggerIdentifier = \"Xcode.DebuggerFoundation.Debugger.LLDB\"\n");
        out.push_str("      selectedLauncherIdentifier = \"Xcode.DebuggerFoundation.Launcher.LLDB\"\n");
        out.push_str("      launchStyle = \"0\"\n");
        out.push_str("      useCustomWorkingDirectory = \"NO\"\n");
        out.push_str("      ignoresPersistentStateOnLaunch = \"NO\"\n");
        out.push_str("      debugDocumentVersioning = \"YES\"\n");
        out.push_str("      debugServiceExtension = \"internal\"\n");
        out.push_str("      allowLocationSimulation = \"YES\">\n");
        if self.scheme.runnable {
            out.push_str("      <BuildableProductRunnable\n         runnableDebuggingMode = \"0\">\n");
            self.buildable_reference(out, "         ");
            out.push_str("      </BuildableProductRunnable>\n");
        } else {
            out.push_str("      <MacroExpansion>\n");
            self.buildable_reference(out, "         ");
            out.push_str("      </MacroExpansion>\n");
        }
        out.push_str("      <AdditionalOptions>\n      </AdditionalOptions>\n");
        out.push_str("   </LaunchAction>\n");
    }

    fn profile_action(&self, out: &mut String) {
        out.push_str("   <ProfileAction\n");
        out.push_str("      buildConfiguration = \"Release\"\n");
        out.push_str("      shouldUseLaunchSchemeArgsEnv = \"YES\"\n");
        out.push_str("      savedToolIdentifier = \"\"\n");
        out.push_str("      useCustomWorkingDirectory = \"NO\"\n");
        out.push_str("      debugDocumentVersioning = \"YES\">\n");
        out.push_str("   </ProfileAction>\n");
    }
}

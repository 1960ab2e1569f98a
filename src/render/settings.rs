//! `WorkspaceSettings.xcsettings` serialization.
//!
//! The settings file turns off the IDE's automatic scheme creation: the
//! generator writes explicit schemes, and autocreated ones would shadow
//! them.

use std::path::Path;

use anyhow::Result;

use crate::render::write_generated;

/// Serializes the workspace settings plist.
pub struct WorkspaceSettingsWriter;

impl WorkspaceSettingsWriter {
    /// Render the settings file.
    pub fn render() -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(
            "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
        );
        out.push_str("<plist version=\"1.0\">\n");
        out.push_str("<dict>\n");
        out.push_str("\t<key>IDEWorkspaceSharedSettings_AutocreateContextsIfNeeded</key>\n");
        out.push_str("\t<false/>\n");
        out.push_str("</dict>\n");
        out.push_str("</plist>\n");
        out
    }

    /// Render and write the settings file to the given path.
    pub fn write(path: &Path) -> Result<()> {
        write_generated(path, &Self::render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_disables_autocreated_contexts() {
        let out = WorkspaceSettingsWriter::render();
        assert!(out.contains("IDEWorkspaceSharedSettings_AutocreateContextsIfNeeded"));
        assert!(out.contains("<false/>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(
            WorkspaceSettingsWriter::render(),
            WorkspaceSettingsWriter::render()
        );
    }
}

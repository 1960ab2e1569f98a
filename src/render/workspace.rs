//! `contents.xcworkspacedata` serialization.
//!
//! The workspace contents file references every constituent project of a
//! composite build by absolute location, in discovery order.

use std::path::Path;

use anyhow::Result;

use crate::core::workspace::XcodeWorkspace;
use crate::render::{write_generated, xml_escape};

/// Serializes the workspace contents file.
pub struct WorkspaceFileWriter<'a> {
    workspace: &'a XcodeWorkspace,
}

impl<'a> WorkspaceFileWriter<'a> {
    /// Create a writer over a populated workspace model.
    pub fn new(workspace: &'a XcodeWorkspace) -> Self {
        WorkspaceFileWriter { workspace }
    }

    /// Render the workspace contents file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str("<Workspace\n   version = \"1.0\">\n");
        for entry in self.workspace.entries() {
            out.push_str(&format!(
                "   <FileRef\n      location = \"absolute:{}\">\n   </FileRef>\n",
                xml_escape(&entry.location.to_string_lossy())
            ));
        }
        out.push_str("</Workspace>\n");
        out
    }

    /// Render and write the workspace contents file to the given path.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_generated(path, &self.render())
    }
}

//! Serialization of the entity graph to project, scheme, and workspace
//! files.
//!
//! Writers are pure: rendering a model produces a string, and rendering
//! an unchanged model twice produces the same bytes. The IDE and version
//! control diff these files, so any nondeterminism here shows up as
//! spurious churn.

pub mod pbxproj;
pub mod scheme;
pub mod settings;
pub mod workspace;

pub use pbxproj::ProjectFileWriter;
pub use scheme::SchemeWriter;
pub use settings::WorkspaceSettingsWriter;
pub use workspace::WorkspaceFileWriter;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::util::fs::ensure_dir;

/// Write rendered contents to an output path.
///
/// Parent directories are created; the file is written to a temporary
/// sibling and atomically renamed over the target so a crash never leaves
/// a half-written descriptor behind.
pub fn write_generated(path: &Path, contents: &str) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    ensure_dir(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

/// Escape a string for use in XML attribute values and text.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

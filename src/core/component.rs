//! Native component descriptors.
//!
//! A [`Component`] is the seam to the host build engine: one entry per
//! native executable, library, or test bundle, with its resolved source
//! files and binary output locations. The generator never inspects the
//! sources; it only needs enough shape to describe the component to the
//! IDE.

use std::path::PathBuf;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of native component being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// Executable binary
    #[serde(alias = "exe")]
    Executable,

    /// Shared/dynamic library
    #[serde(alias = "shared-library")]
    Library,

    /// Static library
    StaticLibrary,

    /// XCTest bundle
    TestBundle,
}

impl ComponentKind {
    /// Check if this kind produces a test bundle.
    pub fn is_test(&self) -> bool {
        matches!(self, ComponentKind::TestBundle)
    }

    /// Check if this kind requires debug and release binary locations.
    pub fn requires_binaries(&self) -> bool {
        !self.is_test()
    }
}

/// Source language of a component.
///
/// Only affects which build setting the search paths are rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Swift,
    C,
    #[serde(alias = "c++")]
    Cpp,
}

/// A native component as declared by the host build.
#[derive(Debug, Clone)]
pub struct Component {
    /// Module/product name (e.g. "App")
    pub name: String,

    /// What kind of artifact the component produces
    pub kind: ComponentKind,

    /// Source language
    pub lang: Language,

    /// Resolved source files, insertion order preserved
    pub sources: Vec<PathBuf>,

    /// Resolved header files (libraries, optional)
    pub headers: Vec<PathBuf>,

    /// Debug binary output location
    pub debug_binary: Option<PathBuf>,

    /// Release binary output location
    pub release_binary: Option<PathBuf>,

    /// Built bundle directory (test bundles)
    pub bundle_dir: Option<PathBuf>,

    /// Import/include search paths, search order matters
    pub search_paths: Vec<PathBuf>,
}

impl Component {
    /// Create a component with the given name and kind.
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Component {
            name: name.into(),
            kind,
            lang: Language::default(),
            sources: Vec::new(),
            headers: Vec::new(),
            debug_binary: None,
            release_binary: None,
            bundle_dir: None,
            search_paths: Vec::new(),
        }
    }

    /// Set the source language.
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Set the source files.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = PathBuf>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }

    /// Set the header files.
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = PathBuf>) -> Self {
        self.headers = headers.into_iter().collect();
        self
    }

    /// Set the debug and release binary locations.
    pub fn with_binaries(mut self, debug: impl Into<PathBuf>, release: impl Into<PathBuf>) -> Self {
        self.debug_binary = Some(debug.into());
        self.release_binary = Some(release.into());
        self
    }

    /// Set the built bundle directory.
    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = Some(dir.into());
        self
    }

    /// Set the search paths.
    pub fn with_search_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.search_paths = paths.into_iter().collect();
        self
    }
}

/// A component declaration that cannot be turned into a target.
///
/// Surfaced to the user immediately; aborts generation for the declaring
/// project only.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("component `{component}` has no source files")]
    #[diagnostic(
        code(pbxgen::config::no_sources),
        help("check that the `sources` patterns in Pbxgen.toml match existing files")
    )]
    EmptySources { component: String },

    #[error("component `{component}` has no {configuration} binary location")]
    #[diagnostic(
        code(pbxgen::config::missing_binary),
        help("set `debug-binary` and `release-binary` for executable and library components")
    )]
    MissingBinary {
        component: String,
        configuration: &'static str,
    },

    #[error("test bundle `{component}` has no bundle directory")]
    #[diagnostic(
        code(pbxgen::config::missing_bundle),
        help("set `bundle-dir` to the built .xctest bundle directory")
    )]
    MissingBundleDir { component: String },
}

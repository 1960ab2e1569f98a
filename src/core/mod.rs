//! Core data structures for pbxgen.
//!
//! This module contains the foundational types used throughout pbxgen:
//! - Stable object identifiers (GidGenerator)
//! - Component descriptors (the seam to the host build engine)
//! - The project/workspace entity graph
//! - The artifact registry for composite-build discovery

pub mod component;
pub mod gid;
pub mod manifest;
pub mod project;
pub mod registry;
pub mod scheme;
pub mod target;
pub mod workspace;

pub use component::{Component, ComponentKind, ConfigurationError, Language};
pub use gid::GidGenerator;
pub use manifest::{find_manifest, Manifest, ManifestError, MANIFEST_NAME};
pub use project::XcodeProject;
pub use registry::{ArtifactHandle, ArtifactRegistry, ArtifactSource, ProjectId};
pub use scheme::Scheme;
pub use target::{BundleSync, ProductType, XcodeTarget};
pub use workspace::XcodeWorkspace;

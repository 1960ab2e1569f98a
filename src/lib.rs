//! pbxgen - a deterministic Xcode project and workspace generator
//!
//! This crate maps native build components (executables, libraries, test
//! bundles) onto an IDE project description - targets, schemes, file
//! references - and aggregates a multi-project workspace for composite
//! builds. It describes builds; executing them stays with the host build
//! tool the generated targets shell out to.

pub mod adapter;
pub mod core;
pub mod ops;
pub mod render;
pub mod util;

pub use crate::adapter::ComponentAdapter;
pub use crate::core::{
    component::Component, gid::GidGenerator, manifest::Manifest, project::XcodeProject,
    registry::ArtifactRegistry, scheme::Scheme, target::XcodeTarget, workspace::XcodeWorkspace,
};
pub use crate::util::context::GlobalContext;

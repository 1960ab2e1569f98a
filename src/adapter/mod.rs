//! Component adaptation - mapping native components onto IDE targets.
//!
//! The adapter is the only place that knows how a component description
//! (kind, sources, binary locations) becomes an [`XcodeTarget`]: display
//! naming, build command templates, and the test-bundle sync indirection
//! all live here.

use crate::core::component::{Component, ConfigurationError};
use crate::core::gid::GidGenerator;
use crate::core::target::{BundleSync, ProductType, XcodeTarget};

/// Maps component descriptors onto targets for one project.
pub struct ComponentAdapter<'a> {
    gids: &'a GidGenerator,
    project_path: String,
    build_tool: String,
}

impl<'a> ComponentAdapter<'a> {
    /// Create an adapter for the project with the given qualified path
    /// (e.g. `:app`) and build tool.
    pub fn new(
        gids: &'a GidGenerator,
        project_path: impl Into<String>,
        build_tool: impl Into<String>,
    ) -> Self {
        ComponentAdapter {
            gids,
            project_path: project_path.into(),
            build_tool: build_tool.into(),
        }
    }

    /// Produce a target for the component.
    ///
    /// Fails with [`ConfigurationError`] if the source set is empty or
    /// the binary locations required by the kind are unset; no target is
    /// produced in that case.
    pub fn adapt(&self, component: &Component) -> Result<XcodeTarget, ConfigurationError> {
        if component.sources.is_empty() {
            return Err(ConfigurationError::EmptySources {
                component: component.name.clone(),
            });
        }

        let product_type = ProductType::from(component.kind);
        let name = display_name(&component.name, product_type);

        let (debug_output, release_output, bundle_sync, build_args) = if component.kind.is_test() {
            let bundle = component.bundle_dir.clone().ok_or_else(|| {
                ConfigurationError::MissingBundleDir {
                    component: component.name.clone(),
                }
            })?;
            // The IDE builds test bundles through a synthetic task whose
            // work is the bundle sync, not the bundle's own output layout.
            let args = format!(
                "{}:$(ACTION)Xcode{}Bundle",
                self.project_path, component.name
            );
            (
                bundle.clone(),
                bundle.clone(),
                Some(BundleSync::new(bundle)),
                args,
            )
        } else {
            let debug = component.debug_binary.clone().ok_or_else(|| {
                ConfigurationError::MissingBinary {
                    component: component.name.clone(),
                    configuration: "debug",
                }
            })?;
            let release = component.release_binary.clone().ok_or_else(|| {
                ConfigurationError::MissingBinary {
                    component: component.name.clone(),
                    configuration: "release",
                }
            })?;
            let args = format!("{}:link$(CONFIGURATION)", self.project_path);
            (debug, release, None, args)
        };

        let mut target = XcodeTarget::new(
            self.gids,
            name,
            product_type,
            component.name.clone(),
            component.lang,
            debug_output,
            release_output,
            self.build_tool.clone(),
            build_args,
        );
        target.bundle_sync = bundle_sync;

        for source in &component.sources {
            target.add_source(source.clone());
        }
        for path in &component.search_paths {
            target.add_search_path(path.clone());
        }

        Ok(target)
    }
}

/// Display name rule: `<ProductName> <ProductTypeLabel>`, with the label
/// omitted entirely for kinds that have none.
fn display_name(product_name: &str, product_type: ProductType) -> String {
    let label = product_type.label();
    if label.is_empty() {
        product_name.to_string()
    } else {
        format!("{product_name} {label}")
    }
}

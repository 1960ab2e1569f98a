//! IDE target entities.
//!
//! An [`XcodeTarget`] is one buildable/testable unit in the generated
//! project: a legacy (external build tool) target whose build action
//! shells back out to the host build command. Targets are immutable after
//! construction except for accumulating source and search-path entries
//! before serialization.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::component::{ComponentKind, Language};
use crate::core::gid::{seed32, GidGenerator};
use crate::util::fs::ensure_dir;

/// The kind of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    Executable,
    SharedLibrary,
    StaticLibrary,
    UnitTestBundle,
}

impl From<ComponentKind> for ProductType {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Executable => ProductType::Executable,
            ComponentKind::Library => ProductType::SharedLibrary,
            ComponentKind::StaticLibrary => ProductType::StaticLibrary,
            ComponentKind::TestBundle => ProductType::UnitTestBundle,
        }
    }
}

impl ProductType {
    /// Display label appended to target names.
    ///
    /// Kinds without a label render as the bare product name; that is an
    /// expected case, not an error.
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Executable => "Executable",
            ProductType::SharedLibrary => "SharedLibrary",
            ProductType::UnitTestBundle => "XCTestBundle",
            ProductType::StaticLibrary => "",
        }
    }

    /// The IDE's product-type identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            ProductType::Executable => "com.apple.product-type.tool",
            ProductType::SharedLibrary => "com.apple.product-type.library.dynamic",
            ProductType::StaticLibrary => "com.apple.product-type.library.static",
            ProductType::UnitTestBundle => "com.apple.product-type.bundle.unit-test",
        }
    }

    /// The IDE's file type for the produced artifact.
    pub fn file_type(&self) -> &'static str {
        match self {
            ProductType::Executable => "compiled.mach-o.executable",
            ProductType::SharedLibrary => "compiled.mach-o.dylib",
            _ => "compiled",
        }
    }

    /// Whether a launch/build scheme is written for this product type.
    ///
    /// Test bundles are driven through their synthetic build task and get
    /// no scheme; unlabeled kinds have no scheme either.
    pub fn has_scheme(&self) -> bool {
        matches!(self, ProductType::Executable | ProductType::SharedLibrary)
    }
}

/// Identifier set allocated for one target's project-file objects.
///
/// All IDs are allocated at construction so that serializing the same
/// model twice yields byte-identical output.
#[derive(Debug, Clone)]
pub struct TargetGids {
    /// The legacy target itself
    pub target: String,
    /// File reference for the built product
    pub product_ref: String,
    /// The target's configuration list
    pub config_list: String,
    /// Debug build configuration
    pub debug_config: String,
    /// Release build configuration
    pub release_config: String,
}

impl TargetGids {
    fn allocate(gids: &GidGenerator, name: &str) -> Self {
        TargetGids {
            target: gids.generate("PBXLegacyTarget", seed32(name)),
            product_ref: gids.generate("PBXFileReference", seed32(name)),
            config_list: gids.generate("XCConfigurationList", seed32(name)),
            debug_config: gids.generate("XCBuildConfiguration", seed32(&format!("{name} Debug"))),
            release_config: gids
                .generate("XCBuildConfiguration", seed32(&format!("{name} Release"))),
        }
    }
}

/// One buildable/testable unit in the generated project.
#[derive(Debug, Clone)]
pub struct XcodeTarget {
    /// Display name, unique within the workspace
    pub name: String,

    /// Stable object IDs for this target
    pub gids: TargetGids,

    /// What kind of artifact this target produces
    pub product_type: ProductType,

    /// Product (module) name
    pub product_name: String,

    /// Source language
    pub lang: Language,

    /// Debug build output location
    pub debug_output: PathBuf,

    /// Release build output location
    pub release_output: PathBuf,

    /// Path of the build tool the IDE invokes
    pub build_tool_path: String,

    /// Arguments handed to the build tool; contains the literal
    /// `$(CONFIGURATION)` (and for test bundles `$(ACTION)`) placeholder,
    /// substituted by the IDE at invocation time, never by the generator
    pub build_args_template: String,

    /// Bundle sync step (test bundles only)
    pub bundle_sync: Option<BundleSync>,

    sources: Vec<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl XcodeTarget {
    /// Create a target, allocating its stable IDs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gids: &GidGenerator,
        name: impl Into<String>,
        product_type: ProductType,
        product_name: impl Into<String>,
        lang: Language,
        debug_output: PathBuf,
        release_output: PathBuf,
        build_tool_path: impl Into<String>,
        build_args_template: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let target_gids = TargetGids::allocate(gids, &name);
        XcodeTarget {
            name,
            gids: target_gids,
            product_type,
            product_name: product_name.into(),
            lang,
            debug_output,
            release_output,
            build_tool_path: build_tool_path.into(),
            build_args_template: build_args_template.into(),
            bundle_sync: None,
            sources: Vec::new(),
            search_paths: Vec::new(),
        }
    }

    /// The target's stable ID.
    pub fn id(&self) -> &str {
        &self.gids.target
    }

    /// Record a source file. Insertion order is preserved for rendering.
    pub fn add_source(&mut self, path: PathBuf) {
        self.sources.push(path);
    }

    /// Record a search path. Search order matters.
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Source files in insertion order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Search paths in declaration order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

/// Outcome of running a [`BundleSync`] step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Bundle copied to the IDE's products directory
    Synced(PathBuf),
    /// Products directory not configured; nothing to do
    Skipped,
}

/// Copies a built test bundle into the IDE's designated products
/// directory so the IDE can run tests in place.
///
/// The destination is late-bound: the `BUILT_PRODUCTS_DIR` environment
/// variable and the destination name (the bundle directory's own file
/// name) are both read at invocation time, not when the model is built.
/// An absent variable disables the step; it is not an error.
#[derive(Debug, Clone)]
pub struct BundleSync {
    /// The built bundle directory (e.g. `.../AppTests.xctest`)
    pub bundle_dir: PathBuf,
}

/// Environment variable naming the IDE's build-products directory.
pub const BUILT_PRODUCTS_DIR: &str = "BUILT_PRODUCTS_DIR";

impl BundleSync {
    /// Create a sync step for the given bundle directory.
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        BundleSync {
            bundle_dir: bundle_dir.into(),
        }
    }

    /// Resolve the sync destination against an explicit products directory.
    pub fn destination_in(&self, products_dir: &Path) -> PathBuf {
        match self.bundle_dir.file_name() {
            Some(name) => products_dir.join(name),
            None => products_dir.to_path_buf(),
        }
    }

    /// Resolve the sync destination from the environment.
    ///
    /// Returns `None` when `BUILT_PRODUCTS_DIR` is unset. Re-reads the
    /// variable on every call.
    pub fn destination(&self) -> Option<PathBuf> {
        let products = std::env::var_os(BUILT_PRODUCTS_DIR)?;
        Some(self.destination_in(Path::new(&products)))
    }

    /// Copy the bundle into the products directory, if one is configured.
    pub fn run(&self) -> Result<SyncOutcome> {
        let Some(dest) = self.destination() else {
            return Ok(SyncOutcome::Skipped);
        };
        self.copy_bundle(&dest)?;
        Ok(SyncOutcome::Synced(dest))
    }

    fn copy_bundle(&self, dest: &Path) -> Result<()> {
        for entry in walkdir::WalkDir::new(&self.bundle_dir).sort_by_file_name() {
            let entry = entry.with_context(|| {
                format!("failed to walk bundle: {}", self.bundle_dir.display())
            })?;
            let rel = entry
                .path()
                .strip_prefix(&self.bundle_dir)
                .expect("walkdir yields paths under its root");
            let target = dest.join(rel);

            if entry.file_type().is_dir() {
                ensure_dir(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    ensure_dir(parent)?;
                }
                std::fs::copy(entry.path(), &target).with_context(|| {
                    format!(
                        "failed to copy {} to {}",
                        entry.path().display(),
                        target.display()
                    )
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn target(name: &str, product_type: ProductType) -> XcodeTarget {
        let gids = GidGenerator::new();
        XcodeTarget::new(
            &gids,
            name,
            product_type,
            "App",
            Language::Swift,
            PathBuf::from("build/debug/App"),
            PathBuf::from("build/release/App"),
            "make",
            ":app:link$(CONFIGURATION)",
        )
    }

    #[test]
    fn test_labels() {
        assert_eq!(ProductType::Executable.label(), "Executable");
        assert_eq!(ProductType::SharedLibrary.label(), "SharedLibrary");
        assert_eq!(ProductType::UnitTestBundle.label(), "XCTestBundle");
        assert_eq!(ProductType::StaticLibrary.label(), "");
    }

    #[test]
    fn test_target_ids_are_distinct() {
        let t = target("App Executable", ProductType::Executable);
        let ids = [
            &t.gids.target,
            &t.gids.product_ref,
            &t.gids.config_list,
            &t.gids.debug_config,
            &t.gids.release_config,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_source_insertion_order() {
        let mut t = target("App Executable", ProductType::Executable);
        t.add_source(PathBuf::from("b.swift"));
        t.add_source(PathBuf::from("a.swift"));
        assert_eq!(
            t.sources(),
            &[PathBuf::from("b.swift"), PathBuf::from("a.swift")]
        );
    }

    #[test]
    fn test_sync_destination_uses_bundle_name() {
        let sync = BundleSync::new("build/bundle/AppTests.xctest");
        assert_eq!(
            sync.destination_in(Path::new("/products")),
            PathBuf::from("/products/AppTests.xctest")
        );
    }

    #[test]
    fn test_sync_copies_bundle_tree() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("AppTests.xctest");
        std::fs::create_dir_all(bundle.join("Contents")).unwrap();
        std::fs::write(bundle.join("Contents/Info.plist"), "<plist/>").unwrap();

        let products = tmp.path().join("products");
        let sync = BundleSync::new(&bundle);
        let dest = sync.destination_in(&products);
        sync.copy_bundle(&dest).unwrap();

        assert_eq!(
            std::fs::read_to_string(products.join("AppTests.xctest/Contents/Info.plist")).unwrap(),
            "<plist/>"
        );
    }
}

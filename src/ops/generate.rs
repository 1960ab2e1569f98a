//! Implementation of `pbxgen generate`.
//!
//! One generation pass: discover the projects of the (possibly composite)
//! build, generate each project's files on worker threads, settle the
//! published artifacts into the registry, then aggregate the workspace at
//! the root. Each project exclusively owns its own output files; the only
//! state shared across projects is the ID generator (locked) and the
//! artifact registry (reads only during aggregation).

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::adapter::ComponentAdapter;
use crate::core::gid::GidGenerator;
use crate::core::manifest::{find_manifest, Manifest};
use crate::core::project::XcodeProject;
use crate::core::registry::{
    ArtifactHandle, ArtifactRegistry, ArtifactSource, ProjectId, XCODEPROJ_ARTIFACT,
};
use crate::core::scheme::Scheme;
use crate::core::workspace::XcodeWorkspace;
use crate::render::{
    ProjectFileWriter, SchemeWriter, WorkspaceFileWriter, WorkspaceSettingsWriter,
};
use crate::util::fs::normalize_path;
use crate::util::GlobalContext;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Number of parallel jobs (None = rayon default)
    pub jobs: Option<usize>,
}

/// Result of one generation pass.
#[derive(Debug)]
pub struct GenerateResult {
    /// Projects that produced a project file: (name, `.xcodeproj` location)
    pub generated: Vec<(String, PathBuf)>,

    /// Location of the workspace written at the root
    pub workspace: PathBuf,

    /// Projects that failed: (name, error text). Failures do not abort
    /// sibling projects; the workspace covers whatever generated.
    pub failed: Vec<(String, String)>,
}

/// The build tree as discovered from the root manifest.
#[derive(Debug)]
pub struct Discovery {
    /// Loaded project manifests, root first, depth-first declaration order
    pub projects: Vec<Manifest>,

    /// Member directories whose manifest could not be loaded
    pub failures: Vec<(String, String)>,
}

/// Walk the composite build from its root manifest.
///
/// Members may declare members of their own; directories are visited
/// depth-first in declaration order and deduplicated by resolved path, so
/// discovery order is deterministic for a fixed project tree. A member
/// whose manifest fails to load is recorded and skipped; its siblings are
/// unaffected.
pub fn discover_projects(root: Manifest) -> Discovery {
    let mut discovery = Discovery {
        projects: Vec::new(),
        failures: Vec::new(),
    };
    let mut seen = HashSet::new();

    fn visit(manifest: Manifest, seen: &mut HashSet<PathBuf>, discovery: &mut Discovery) {
        if !seen.insert(normalize_path(&manifest.manifest_dir)) {
            return;
        }
        let member_dirs = manifest.member_dirs();
        discovery.projects.push(manifest);

        for dir in member_dirs {
            match find_manifest(&dir).map_err(anyhow::Error::from).and_then(|path| {
                Manifest::load(&path).map_err(anyhow::Error::from)
            }) {
                Ok(member) => visit(member, seen, discovery),
                Err(e) => {
                    warn!("skipping member {}: {:#}", dir.display(), e);
                    discovery
                        .failures
                        .push((dir.display().to_string(), format!("{e:#}")));
                }
            }
        }
    }

    visit(root, &mut seen, &mut discovery);
    discovery
}

/// Run a full generation pass rooted at the manifest found from `ctx`.
pub fn generate(ctx: &GlobalContext, opts: &GenerateOptions) -> Result<GenerateResult> {
    let manifest_path = ctx.find_manifest()?;
    let root = Manifest::load(&manifest_path)?;
    let root_name = root.name().to_string();
    let workspace_dir = root.xcworkspace_dir();

    let discovery = discover_projects(root);
    let mut failed = discovery.failures;

    // One generator for the whole pass, shared across workers. Collision
    // counters are handed out in allocation order, so byte-stable output
    // relies on target and project names being unique across the
    // workspace (name-hashed seeds never collide then).
    let gids = GidGenerator::new();
    let registry = ArtifactRegistry::new();

    // Generate every project on worker threads. Workers return published
    // artifacts as values; the registry is populated afterwards, so
    // aggregation only ever performs reads.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.jobs.unwrap_or(0))
        .build()
        .context("failed to create worker pool")?;

    let outcomes: Vec<(String, ProjectId, Result<Option<ArtifactHandle>>)> = pool.install(|| {
        discovery
            .projects
            .par_iter()
            .map(|manifest| {
                let id = ProjectId::new(manifest.qualified_path());
                let outcome = generate_project(manifest, &gids);
                (manifest.name().to_string(), id, outcome)
            })
            .collect()
    });

    let mut generated = Vec::new();
    let mut project_order = Vec::new();
    for (name, id, outcome) in outcomes {
        project_order.push(id.clone());
        match outcome {
            Ok(Some(artifact)) => {
                generated.push((name, artifact.location.clone()));
                registry.register(id, XCODEPROJ_ARTIFACT, artifact);
            }
            Ok(None) => {
                debug!("project `{name}` declares no native components");
            }
            Err(e) => {
                warn!("generation failed for project `{name}`: {e:#}");
                failed.push((name, format!("{e:#}")));
            }
        }
    }

    // Aggregate the workspace at the root. A project that published no
    // project-file artifact contributes nothing; that is not an error.
    let mut workspace = XcodeWorkspace::new(root_name, &workspace_dir);
    for id in &project_order {
        match registry.lookup(id, XCODEPROJ_ARTIFACT) {
            Some(artifact) => {
                workspace.add_entry(artifact.name, artifact.location, artifact.built_by);
            }
            None => debug!("no project-file artifact published for {id}"),
        }
    }
    debug!(
        "workspace build depends on: {}",
        workspace.dependencies().collect::<Vec<_>>().join(", ")
    );

    WorkspaceFileWriter::new(&workspace).write(&workspace.contents_path())?;
    WorkspaceSettingsWriter::write(&workspace.settings_path())?;

    Ok(GenerateResult {
        generated,
        workspace: workspace_dir,
        failed,
    })
}

/// Generate the files of one project.
///
/// Returns the published artifact handle, or `None` when the project
/// declares no native components.
fn generate_project(manifest: &Manifest, gids: &GidGenerator) -> Result<Option<ArtifactHandle>> {
    if manifest.components.is_empty() {
        return Ok(None);
    }

    let location = manifest.xcodeproj_dir();
    let mut project = XcodeProject::new(manifest.name(), &location, gids);

    // The manifest itself is part of the indexed sources, like any other
    // file the user may want to open from the IDE.
    if manifest.manifest_path().is_file() {
        project.add_source(manifest.manifest_path(), gids);
    }

    let adapter = ComponentAdapter::new(
        gids,
        manifest.qualified_path(),
        manifest.project.build_tool.as_str(),
    );

    for (name, config) in &manifest.components {
        let component = config
            .resolve(name, &manifest.manifest_dir)
            .with_context(|| format!("failed to resolve component `{name}`"))?;
        let target = adapter.adapt(&component)?;

        for source in &component.sources {
            project.add_source(source.clone(), gids);
        }
        for header in &component.headers {
            project.add_source(header.clone(), gids);
        }
        project.add_target(target);
    }

    ProjectFileWriter::new(&project).write(&project.pbxproj_path())?;
    WorkspaceSettingsWriter::write(&project.workspace_settings_path())?;

    for target in project.targets() {
        if target.product_type.has_scheme() {
            let scheme = Scheme::for_target(&project, target);
            SchemeWriter::new(&scheme).write(&scheme.output_path(&project))?;
        }
    }

    Ok(Some(ArtifactHandle {
        name: manifest.name().to_string(),
        location,
        built_by: format!("{}:xcodeProject", manifest.qualified_path()),
    }))
}

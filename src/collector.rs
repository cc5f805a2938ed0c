//! Builds the [`Package`] tree for a project from its installed manifests.
//!
//! Each direct dependency gets its full transitive closure attached as a flat
//! list of children. Failures below the root are recorded as diagnostics and
//! the affected subtree is skipped.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{AuditError, AuditResult};
use crate::manifest::{read_manifest, Manifest};
use crate::models::{Diagnostic, DiagnosticKind, Package};
use crate::resolver::resolve;

/// Traversal and visibility policy for [`collect`].
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Also traverse the root's `devDependencies`.
    pub include_dev_dependencies: bool,
    /// Keep packages whose manifest sets `"private": true`.
    pub include_private: bool,
    /// Package names omitted anywhere in the tree.
    pub exclude_names: BTreeSet<String>,
    /// Deepest level that is still expanded; direct dependencies are level 1.
    pub max_depth: Option<usize>,
    /// Report license files with absolute paths instead of root-relative ones.
    pub absolute_license_file_paths: bool,
}

/// Result of a collection run.
#[derive(Debug, Clone)]
pub struct Collection {
    pub root: Package,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collect the dependency tree rooted at `root_dir`.
///
/// Fails only when the root manifest itself cannot be read.
pub fn collect(root_dir: &Path, options: &CollectOptions) -> AuditResult<Collection> {
    let root_manifest = read_manifest(root_dir, root_dir, options.absolute_license_file_paths)?;
    tracing::debug!(
        root = %root_manifest.package.id(),
        dependencies = root_manifest.dependencies.len(),
        dev_dependencies = root_manifest.dev_dependencies.len(),
        "collecting dependency tree"
    );

    let mut collector = Collector {
        root_dir,
        options,
        diagnostics: Vec::new(),
    };

    let mut root = root_manifest.package;
    root.dependencies = collector.collect_direct(&root_manifest.dependencies, &root);
    if options.include_dev_dependencies {
        root.dev_dependencies = collector.collect_direct(&root_manifest.dev_dependencies, &root);
    }

    Ok(Collection {
        root,
        diagnostics: collector.diagnostics,
    })
}

struct Collector<'a> {
    root_dir: &'a Path,
    options: &'a CollectOptions,
    diagnostics: Vec<Diagnostic>,
}

impl Collector<'_> {
    fn collect_direct(&mut self, deps: &IndexMap<String, String>, root: &Package) -> Vec<Package> {
        let mut packages: Vec<Package> = Vec::new();

        for name in deps.keys() {
            if self.options.exclude_names.contains(name) {
                continue;
            }
            let Some(manifest) = self.load(name, self.root_dir, root) else {
                continue;
            };
            let mut package = manifest.package;
            if self.is_excluded(&package) || packages.iter().any(|p| p.name == package.name) {
                continue;
            }

            if self.expands(1) {
                // a cycle back to the direct dependency must not re-add it
                let mut visited: HashSet<String> = HashSet::from([name.clone(), package.name.clone()]);
                let mut closure = Vec::new();
                self.collect_closure(&manifest.dependencies, &package, 2, &mut visited, &mut closure);
                package.dependencies = closure;
            } else {
                self.depth_limited(&package, manifest.dependencies.len());
            }

            tracing::debug!(
                package = %package.id(),
                transitive = package.dependencies.len(),
                "collected direct dependency"
            );
            packages.push(package);
        }

        packages
    }

    /// Resolve every not-yet-visited name in `deps` below `parent`, appending
    /// the packages to `out` in discovery order.
    fn collect_closure(
        &mut self,
        deps: &IndexMap<String, String>,
        parent: &Package,
        depth: usize,
        visited: &mut HashSet<String>,
        out: &mut Vec<Package>,
    ) {
        for name in deps.keys() {
            if visited.contains(name) {
                continue;
            }
            if self.options.exclude_names.contains(name) {
                visited.insert(name.clone());
                continue;
            }
            // a failed lookup stays open for later parents with their own install
            let Some(Manifest {
                package,
                dependencies,
                ..
            }) = self.load(name, &parent.path, parent)
            else {
                continue;
            };
            visited.insert(name.clone());
            if self.is_excluded(&package) || out.iter().any(|p| p.name == package.name) {
                continue;
            }
            visited.insert(package.name.clone());

            let expand = self.expands(depth);
            if !expand {
                self.depth_limited(&package, dependencies.len());
            }
            out.push(package.clone());
            if expand {
                self.collect_closure(&dependencies, &package, depth + 1, visited, out);
            }
        }
    }

    /// Resolve and read `name` from `from_dir`, recording a diagnostic on failure.
    fn load(&mut self, name: &str, from_dir: &Path, parent: &Package) -> Option<Manifest> {
        let result = resolve(name, from_dir).and_then(|dir| {
            read_manifest(&dir, self.root_dir, self.options.absolute_license_file_paths)
        });

        match result {
            Ok(mut manifest) => {
                if manifest.package.name.is_empty() {
                    manifest.package.name = name.to_string();
                }
                Some(manifest)
            }
            Err(err) => {
                tracing::warn!(dependency = name, parent = %parent.id(), %err, "skipping dependency");
                self.diagnostics.push(failure_diagnostic(name, parent, err));
                None
            }
        }
    }

    fn is_excluded(&self, package: &Package) -> bool {
        (package.private && !self.options.include_private)
            || self.options.exclude_names.contains(&package.name)
    }

    fn expands(&self, depth: usize) -> bool {
        self.options
            .max_depth
            .map_or(true, |max| depth < max.max(1))
    }

    fn depth_limited(&mut self, package: &Package, cut: usize) {
        if cut == 0 {
            return;
        }
        self.diagnostics.push(Diagnostic::info(
            DiagnosticKind::DepthLimit,
            format!(
                "\n# depth limit reached, {} dependencies not collected\n  {}",
                cut,
                package.id()
            ),
        ));
    }
}

fn failure_diagnostic(name: &str, parent: &Package, err: AuditError) -> Diagnostic {
    let target = format!("\n  required by {}", parent.id());
    match err {
        AuditError::DependencyNotFound { searched, .. } => {
            let paths: Vec<String> = searched
                .iter()
                .map(|p| format!("\n  - {}", p.display()))
                .collect();
            Diagnostic::error(
                DiagnosticKind::DependencyNotFound,
                format!("\n# not found package.json for {}{}{}", name, target, paths.concat()),
            )
        }
        AuditError::MalformedManifest { path, source } => Diagnostic::error(
            DiagnosticKind::MalformedManifest,
            format!(
                "\n# malformed package.json for {}{}\n  - {}: {}",
                name,
                target,
                path.display(),
                source
            ),
        ),
        other => Diagnostic::error(
            DiagnosticKind::DependencyNotFound,
            format!("\n# not read package.json for {}{}\n  - {}", name, target, other),
        ),
    }
}

use dashmap::DashMap;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use modsweep_core::{Conventions, Resolution, Specifier, imports_for, resolve};

/// The import graph of a scanned source tree.
///
/// Keys are exactly the scanned modules, and every edge target is
/// itself a key: edges whose resolution failed, or whose target lies
/// outside the scanned set, are dropped at construction time, so a
/// traversal never sees a dangling reference. The graph is built once
/// per run and never mutated afterwards.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    pub(crate) edges: HashMap<PathBuf, HashSet<PathBuf>>,
}

impl DependencyGraph {
    /// Every scanned module.
    pub fn modules(&self) -> impl Iterator<Item = &PathBuf> {
        self.edges.keys()
    }

    /// Direct dependencies of one module, if it was scanned.
    pub fn dependencies(&self, module: &Path) -> Option<&HashSet<PathBuf>> {
        self.edges.get(module)
    }

    pub fn contains(&self, module: &Path) -> bool {
        self.edges.contains_key(module)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Builds the dependency graph for the scanned `files`.
///
/// Parsing runs in parallel; the graph is a pure function of the tree
/// contents and does not depend on visit order. A module that cannot be
/// read becomes a zero-edge node rather than aborting the scan.
pub(crate) fn build_graph(
    conventions: &Conventions,
    files: &[PathBuf],
    import_cache: &DashMap<PathBuf, Vec<Specifier>>,
    resolve_cache: &DashMap<(PathBuf, String), Resolution>,
) -> DependencyGraph {
    let scanned: HashSet<PathBuf> = files.iter().cloned().collect();

    let edges: HashMap<PathBuf, HashSet<PathBuf>> = files
        .par_iter()
        .map(|file| {
            let specs = match imports_for(file, import_cache) {
                Ok(specs) => specs,
                Err(e) => {
                    warn!("Treating {} as a leaf, could not read it: {}", file.display(), e);
                    Vec::new()
                }
            };
            trace!("Module {} has {} specifiers", file.display(), specs.len());

            let mut deps: HashSet<PathBuf> = HashSet::new();
            for spec in specs {
                match resolve(conventions, file, &spec.request, resolve_cache) {
                    Resolution::Resolved(target) => {
                        if scanned.contains(&target) {
                            deps.insert(target);
                        } else {
                            trace!("Dropping edge to unscanned module {}", target.display());
                        }
                    }
                    Resolution::OutOfScope => {
                        trace!("Skipping non-relative specifier '{}'", spec.request);
                    }
                    Resolution::NotFound => {
                        debug!(
                            "Unresolved specifier '{}' in {}",
                            spec.request,
                            file.display()
                        );
                    }
                }
            }
            (file.clone(), deps)
        })
        .collect();

    debug!("Built dependency graph with {} modules", edges.len());
    DependencyGraph { edges }
}

use anyhow::Result;
use dashmap::DashMap;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use modsweep_core::{Resolution, Specifier, collect_modules};

use crate::{
    config::Config, graph::build_graph, reachability::reachable_modules, roots::find_roots,
    types::CheckResult,
};

/// Runs the unused-files analysis end to end: scan the tree, build the
/// graph, traverse from the roots, report the complement.
///
/// Zero unused modules is an ordinary outcome. The only hard failure is
/// an inaccessible scan root; every per-file problem is absorbed during
/// the scan.
pub fn run_unused_files_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting unused files check");

    cfg.initialize()?;
    let root = cfg.root()?.clone();
    let tree = cfg.tree()?;

    debug!("Collecting source modules under {}", tree.display());
    let files = collect_modules(&tree, &cfg.conventions)?;
    info!("Scanned {} source modules", files.len());

    // Thread-safe caches shared by the parallel parse pass
    let import_cache: DashMap<PathBuf, Vec<Specifier>> = DashMap::new();
    let resolve_cache: DashMap<(PathBuf, String), Resolution> = DashMap::new();

    let graph = build_graph(&cfg.conventions, &files, &import_cache, &resolve_cache);

    let scanned: HashSet<PathBuf> = files.iter().cloned().collect();
    let roots = find_roots(&tree, &cfg.entry, &cfg.tests_dir, &scanned);
    if roots.is_empty() {
        warn!("No roots found, every scanned module will be reported unused");
    }
    info!("Using {} roots", roots.len());

    let reachable = reachable_modules(&graph, &roots);
    debug!("{} modules reachable from the roots", reachable.len());

    let mut unused: Vec<String> =
        scanned.difference(&reachable).map(|p| relative_to(p, &root)).collect();
    unused.sort();

    let mut root_paths: Vec<String> = roots.iter().map(|p| relative_to(p, &root)).collect();
    root_paths.sort();

    info!("Unused files check complete: {} unused candidates", unused.len());

    Ok(CheckResult {
        roots: root_paths,
        reachable_count: reachable.len(),
        unused,
        files_scanned: files.len(),
    })
}

fn relative_to(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().to_string()
}

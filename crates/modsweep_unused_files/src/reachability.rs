use log::trace;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::graph::DependencyGraph;

/// Computes every module transitively reachable from `roots`.
///
/// Frontier-based forward traversal: pop an unvisited module, mark it,
/// push its unvisited dependencies, stop when the frontier drains.
/// Visit order does not affect the result. Edge targets missing from
/// the graph cannot occur - the builder drops those edges - so the
/// loop never has to handle an absent key.
///
/// Reachability is about incoming paths only: a module with outgoing
/// edges of its own is still unused when nothing reaches it, and a
/// cycle is reachable iff some path from a root enters it.
pub fn reachable_modules(graph: &DependencyGraph, roots: &[PathBuf]) -> HashSet<PathBuf> {
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut frontier: Vec<PathBuf> = roots.to_vec();

    while let Some(cur) = frontier.pop() {
        if visited.contains(&cur) {
            continue;
        }
        trace!("Visiting module: {}", cur.display());
        visited.insert(cur.clone());

        if let Some(deps) = graph.dependencies(&cur) {
            for dep in deps {
                if !visited.contains(dep) {
                    frontier.push(dep.clone());
                }
            }
        }
    }

    visited
}

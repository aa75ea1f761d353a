use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Enumerates the root set: the entry-point module, if it was scanned,
/// plus every scanned module under the tests directory. Test files are
/// roots so helpers used only by tests are retained rather than flagged
/// unused.
pub(crate) fn find_roots(
    tree: &Path,
    entry: &Path,
    tests_dir: &Path,
    scanned: &HashSet<PathBuf>,
) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();

    let entry_path = tree.join(entry);
    let entry_path = entry_path.canonicalize().unwrap_or(entry_path);
    if scanned.contains(&entry_path) {
        debug!("Using entry point root: {}", entry_path.display());
        roots.push(entry_path);
    } else {
        warn!("Entry point {} was not scanned, skipping it as a root", entry_path.display());
    }

    let tests_path = tree.join(tests_dir);
    let tests_path = tests_path.canonicalize().unwrap_or(tests_path);
    let mut test_roots: Vec<PathBuf> =
        scanned.iter().filter(|p| p.starts_with(&tests_path)).cloned().collect();
    test_roots.sort();
    debug!("Found {} test roots under {}", test_roots.len(), tests_path.display());
    roots.extend(test_roots);

    roots
}

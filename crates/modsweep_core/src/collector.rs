use anyhow::{Result, anyhow};
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::config::Conventions;

/// Enumerates every source module beneath `tree`.
///
/// Paths come back canonicalized so identities compare equal no matter
/// how the walk spelled them. An inaccessible tree root is fatal; an
/// unreadable entry further down is skipped with a warning.
pub fn collect_modules(tree: &Path, conventions: &Conventions) -> Result<Vec<PathBuf>> {
    if !tree.is_dir() {
        return Err(anyhow!("Source tree {} is not an accessible directory", tree.display()));
    }

    debug!("Walking directory tree from {}", tree.display());
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(tree).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        if conventions.is_source_file(p) {
            trace!("Found source module: {}", p.display());
            files.push(p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));
        }
    }
    debug!("Collected {} source modules under {}", files.len(), tree.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_collects_source_modules_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "main.ts", "");
        create_test_file(root, "ui/hud.tsx", "");
        create_test_file(root, "audio/index.ts", "");
        create_test_file(root, "legacy/boot.mjs", "");
        create_test_file(root, "globals.d.ts", "");

        let files = collect_modules(root, &Conventions::default()).unwrap();
        assert_eq!(files.len(), 5);
    }

    #[test]
    fn test_skips_non_source_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "main.ts", "");
        create_test_file(root, "style.css", "");
        create_test_file(root, "data.json", "{}");
        create_test_file(root, "README.md", "");

        let files = collect_modules(root, &Conventions::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.ts"));
    }

    #[test]
    fn test_test_files_are_collected_too() {
        // Test files are graph nodes (and later roots), never skipped.
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "main.ts", "");
        create_test_file(root, "__tests__/match.flow.test.ts", "");

        let files = collect_modules(root, &Conventions::default()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no-such-dir");
        assert!(collect_modules(&missing, &Conventions::default()).is_err());
    }

    #[test]
    fn test_paths_are_canonical() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let file = create_test_file(root, "main.ts", "");

        let files = collect_modules(root, &Conventions::default()).unwrap();
        assert_eq!(files, vec![file.canonicalize().unwrap()]);
    }
}

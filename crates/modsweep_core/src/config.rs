use anyhow::{Result, anyhow};
use log::{debug, trace};
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::constants::{INDEX_FILES, RESOLVE_EXTENSIONS, SOURCE_EXTENSIONS};

/// Resolution conventions for a source tree.
///
/// The extension priority list and index-file convention are fixed for
/// the duration of a run so resolution stays reproducible, but they are
/// data, not code: trees with different conventions override the
/// defaults.
#[derive(Debug, Clone)]
pub struct Conventions {
    /// Extensions that classify a file as a source module.
    pub source_extensions: Vec<String>,
    /// Extensions appended to an extensionless specifier, in priority order.
    pub resolve_extensions: Vec<String>,
    /// Index file names tried when a specifier names a directory, in priority order.
    pub index_files: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions {
            source_extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            resolve_extensions: RESOLVE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            index_files: INDEX_FILES.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Conventions {
    /// True if `path` names a source module under these conventions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }
}

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        let git_dir = current_dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        // Try to move up to parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_source_file_by_extension() {
        let conventions = Conventions::default();
        assert!(conventions.is_source_file(Path::new("src/app.ts")));
        assert!(conventions.is_source_file(Path::new("src/view.tsx")));
        assert!(conventions.is_source_file(Path::new("lib/util.js")));
        assert!(conventions.is_source_file(Path::new("lib/util.mjs")));
        assert!(conventions.is_source_file(Path::new("types/global.d.ts")));
        assert!(!conventions.is_source_file(Path::new("style.css")));
        assert!(!conventions.is_source_file(Path::new("data.json")));
        assert!(!conventions.is_source_file(Path::new("Makefile")));
    }

    #[test]
    fn test_overridden_conventions() {
        let conventions = Conventions {
            source_extensions: vec!["coffee".to_string()],
            resolve_extensions: vec!["coffee".to_string()],
            index_files: vec!["index.coffee".to_string()],
        };
        assert!(conventions.is_source_file(Path::new("app.coffee")));
        assert!(!conventions.is_source_file(Path::new("app.ts")));
    }

    #[test]
    fn test_find_git_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join(".git")).unwrap();
        let subdir = root.join("src").join("app");
        fs::create_dir_all(&subdir).unwrap();

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&subdir).unwrap();

        let git_root = find_git_root().unwrap();
        // canonicalize can add /private on macOS
        assert_eq!(git_root.canonicalize().unwrap(), root.canonicalize().unwrap());

        env::set_current_dir(original_dir).unwrap();
    }
}

use dashmap::DashMap;
use log::{debug, trace};
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::config::Conventions;
use crate::types::Resolution;

/// Resolves a raw specifier against the module that imports it.
///
/// Only explicitly relative specifiers (`./`, `../`) are eligible;
/// package-style specifiers are out of scope for the local tree. The
/// candidate ladder is fixed so resolution is reproducible across runs:
/// exact file, then appended extensions in priority order, then index
/// files inside a directory.
pub fn resolve(
    conventions: &Conventions,
    from_file: &Path,
    request: &str,
    cache: &DashMap<(PathBuf, String), Resolution>,
) -> Resolution {
    let key = (from_file.to_path_buf(), request.to_string());
    if let Some(v) = cache.get(&key) {
        trace!("Cache hit for resolve: '{}' from {}", request, from_file.display());
        return v.clone();
    }
    trace!("Resolving: '{}' from {}", request, from_file.display());

    let resolved = if request.starts_with("./") || request.starts_with("../") {
        let base = from_file.parent().unwrap_or_else(|| Path::new("."));
        let joined = clean(base.join(request));
        match resolve_file(conventions, &joined) {
            Some(path) => {
                trace!("Resolved relative import '{}' to {}", request, path.display());
                Resolution::Resolved(path)
            }
            None => {
                debug!(
                    "Failed to resolve relative import '{}' from {}",
                    request,
                    from_file.display()
                );
                Resolution::NotFound
            }
        }
    } else {
        trace!("Specifier '{}' is not relative, out of scope", request);
        Resolution::OutOfScope
    };

    cache.insert(key, resolved.clone());
    resolved
}

fn resolve_file(conventions: &Conventions, p: &Path) -> Option<PathBuf> {
    // Try exact path first
    if p.is_file() {
        return Some(p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));
    }

    // Try adding extensions
    for ext in &conventions.resolve_extensions {
        let candidate = PathBuf::from(format!("{}.{}", p.display(), ext));
        if candidate.is_file() {
            return Some(candidate.canonicalize().unwrap_or(candidate));
        }
    }

    // Try index files
    if p.is_dir() {
        for index_file in &conventions.index_files {
            let candidate = p.join(index_file);
            if candidate.is_file() {
                return Some(candidate.canonicalize().unwrap_or(candidate));
            }
        }
    }

    None
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

    fn resolved(r: Resolution) -> PathBuf {
        match r {
            Resolution::Resolved(p) => p,
            other => panic!("expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_path_with_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "");
        let target = create_test_file(root, "a.ts", "");

        let cache = DashMap::new();
        let r = resolve(&Conventions::default(), &main, "./a.ts", &cache);
        assert_eq!(resolved(r), target.canonicalize().unwrap());
    }

    #[test]
    fn test_extension_appended_in_priority_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "");
        let ts = create_test_file(root, "util.ts", "");
        create_test_file(root, "util.js", "");

        let cache = DashMap::new();
        let r = resolve(&Conventions::default(), &main, "./util", &cache);
        assert_eq!(resolved(r), ts.canonicalize().unwrap());
    }

    #[test]
    fn test_file_preferred_over_index() {
        // `./x` with both x.ts and x/index.ts present must always pick
        // the extension form.
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "");
        let file_form = create_test_file(root, "x.ts", "");
        create_test_file(root, "x/index.ts", "");

        let cache = DashMap::new();
        let r = resolve(&Conventions::default(), &main, "./x", &cache);
        assert_eq!(resolved(r), file_form.canonicalize().unwrap());
    }

    #[test]
    fn test_directory_index_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "");
        let index = create_test_file(root, "audio/index.ts", "");

        let cache = DashMap::new();
        let r = resolve(&Conventions::default(), &main, "./audio", &cache);
        assert_eq!(resolved(r), index.canonicalize().unwrap());
    }

    #[test]
    fn test_parent_directory_specifier() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = create_test_file(root, "app/systems/spawn.ts", "");
        let target = create_test_file(root, "app/game.ts", "");

        let cache = DashMap::new();
        let r = resolve(&Conventions::default(), &nested, "../game", &cache);
        assert_eq!(resolved(r), target.canonicalize().unwrap());
    }

    #[test]
    fn test_declaration_file_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "");
        let decl = create_test_file(root, "globals.d.ts", "");

        let cache = DashMap::new();
        let r = resolve(&Conventions::default(), &main, "./globals", &cache);
        assert_eq!(resolved(r), decl.canonicalize().unwrap());
    }

    #[test]
    fn test_bare_specifier_out_of_scope() {
        let temp_dir = TempDir::new().unwrap();
        let main = create_test_file(temp_dir.path(), "main.ts", "");

        let cache = DashMap::new();
        assert_eq!(resolve(&Conventions::default(), &main, "some-lib", &cache), Resolution::OutOfScope);
        assert_eq!(resolve(&Conventions::default(), &main, "@scope/ui", &cache), Resolution::OutOfScope);
        assert_eq!(resolve(&Conventions::default(), &main, "/abs/path", &cache), Resolution::OutOfScope);
    }

    #[test]
    fn test_missing_target_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let main = create_test_file(temp_dir.path(), "main.ts", "");

        let cache = DashMap::new();
        assert_eq!(resolve(&Conventions::default(), &main, "./util", &cache), Resolution::NotFound);
    }

    #[test]
    fn test_cache_behavior() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "");
        create_test_file(root, "a.ts", "");

        let cache = DashMap::new();
        let first = resolve(&Conventions::default(), &main, "./a", &cache);
        let second = resolve(&Conventions::default(), &main, "./a", &cache);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }
}

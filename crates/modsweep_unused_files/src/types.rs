use serde::Serialize;

/// Result of one unused-files run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Root modules used for the traversal, relative to the project root, sorted.
    pub roots: Vec<String>,
    /// Number of modules reachable from the roots.
    pub reachable_count: usize,
    /// Unused-candidate modules, relative to the project root, sorted.
    pub unused: Vec<String>,
    /// Number of source modules scanned.
    pub files_scanned: usize,
}

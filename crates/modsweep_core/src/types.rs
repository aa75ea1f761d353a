use std::path::PathBuf;

/// A raw import target as written in source text, before resolution.
#[derive(Debug, Clone)]
pub struct Specifier {
    pub request: String,
    pub kind: SpecKind,
}

/// Which static declaration form produced a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// `import ... from "spec"`, including bare `import "spec"`.
    Import,
    /// `export * from "spec"`.
    ReexportAll,
}

/// Outcome of resolving one specifier from one module.
///
/// Out-of-scope and not-found are ordinary outcomes, not errors: the
/// caller omits the edge and keeps scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier names this file on disk.
    Resolved(PathBuf),
    /// Not a relative specifier; the local tree cannot resolve it.
    OutOfScope,
    /// Relative, but no file, extension candidate, or index matched.
    NotFound,
}

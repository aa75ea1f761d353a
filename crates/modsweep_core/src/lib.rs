//! Core utilities for modsweep tools.
//!
//! This crate provides shared functionality for analyzing module-based
//! JavaScript/TypeScript source trees, including:
//! - Extracting static import/re-export specifiers from modules
//! - Resolving relative specifiers to on-disk module identities
//! - Collecting the set of source modules under a tree
//! - Conventions (extension priority, index files) as overridable data

mod collector;
mod config;
mod constants;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use collector::collect_modules;
pub use config::{Conventions, find_git_root};
pub use constants::{INDEX_FILES, RESOLVE_EXTENSIONS, SOURCE_EXTENSIONS};
pub use parser::imports_for;
pub use resolver::resolve;
pub use types::{Resolution, SpecKind, Specifier};

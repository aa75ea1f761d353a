//! Default conventions for file extensions and module resolution.
//!
//! These lists back [`crate::Conventions::default`]; real trees vary,
//! so callers override the struct instead of editing this module.
//!
//! ## Supported Extensions
//!
//! - **TypeScript**: `.ts`, `.tsx`
//! - **JavaScript**: `.js`, `.mjs` (ES module)
//! - **Type declarations**: `.d.ts` files are graph nodes too; their
//!   `.ts` suffix already classifies them as source modules

/// File extensions that classify a file as a source module.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript (covers .d.ts declarations as well)
    "tsx", // TypeScript with JSX
    "js",  // JavaScript
    "mjs", // JavaScript module
];

/// Extensions to try when resolving extensionless specifiers (in priority order)
pub const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "mjs", "d.ts"];

/// Index file names to try when a specifier names a directory (in priority order)
pub const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.mjs", "index.d.ts"];

//! Unused module detection for JavaScript/TypeScript source trees.
//!
//! This crate builds the import graph of a source tree once, then
//! reports every module that no entry point (the app root or a test
//! file) transitively imports. The result lists removal candidates,
//! not proof: dynamically computed imports are invisible to the scan,
//! so treat the output as a safe first pass over whole files rather
//! than a license to delete.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use modsweep_unused_files::{Config, run_unused_files_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     source_dir: "src".into(),
//!     entry: "main.ts".into(),
//!     tests_dir: "__tests__".into(),
//!     json: false,
//!     conventions: Default::default(),
//! };
//!
//! let result = run_unused_files_check(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! if result.unused.is_empty() {
//!     modsweep_unused_files::print_all_used_message(&mut stdout, &result)?;
//! } else {
//!     modsweep_unused_files::print_unused_report(&mut stdout, &result)?;
//! }
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod graph;
mod reachability;
mod reporter;
mod roots;
mod types;

// Re-export public API
pub use checker::run_unused_files_check;
pub use config::Config;
pub use graph::DependencyGraph;
pub use reachability::reachable_modules;
pub use reporter::{print_all_used_message, print_json, print_unused_report};
pub use types::CheckResult;

//! Summary-sheet generation for simulator telemetry exports.
//!
//! The simulator writes one CSV per table per session. This crate
//! aggregates those exports - weapon effectiveness, first-hit timing,
//! buff/debuff usage, ammo-bin cycling, match durations - into a
//! directory of LibreOffice-ready summary sheets that can be re-built
//! any time fresh CSVs land.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use modsweep_sim_report::{Config, run_sim_report};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     in_dir: Some(std::path::PathBuf::from("/path/to/csvs")),
//!     out_dir: std::path::PathBuf::from("/path/to/report"),
//!     bin_cycles: None,
//!     damage_timeline: None,
//!     first_hits: None,
//!     matches: None,
//!     mods_agg: None,
//!     weapon_agg: None,
//! };
//!
//! let result = run_sim_report(cfg)?;
//! println!("{} sheets written", result.sheets.len());
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod reporter;
mod summary;
mod table;
mod types;

// Re-export public API
pub use checker::run_sim_report;
pub use config::{Config, TABLES};
pub use reporter::print_report_written;
pub use table::Table;
pub use types::ReportResult;

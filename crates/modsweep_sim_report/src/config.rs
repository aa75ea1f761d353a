use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, trace};
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Names of the simulator export tables the report consumes.
pub const TABLES: &[&str] =
    &["bin_cycles", "damage_timeline", "first_hits", "matches", "mods_agg", "weapon_agg"];

#[derive(Debug, Clone, Parser)]
#[command(name = "sim-report")]
#[command(about = "Aggregate simulator telemetry CSVs into LibreOffice-ready summary sheets")]
pub struct Config {
    /// Directory containing the session CSV exports
    #[arg(long)]
    pub in_dir: Option<PathBuf>,

    /// Output directory for the summary sheets
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Explicit bin_cycles CSV, overriding the in-dir lookup
    #[arg(long)]
    pub bin_cycles: Option<PathBuf>,

    /// Explicit damage_timeline CSV, overriding the in-dir lookup
    #[arg(long)]
    pub damage_timeline: Option<PathBuf>,

    /// Explicit first_hits CSV, overriding the in-dir lookup
    #[arg(long)]
    pub first_hits: Option<PathBuf>,

    /// Explicit matches CSV, overriding the in-dir lookup
    #[arg(long)]
    pub matches: Option<PathBuf>,

    /// Explicit mods_agg CSV, overriding the in-dir lookup
    #[arg(long)]
    pub mods_agg: Option<PathBuf>,

    /// Explicit weapon_agg CSV, overriding the in-dir lookup
    #[arg(long)]
    pub weapon_agg: Option<PathBuf>,
}

impl Config {
    fn override_for(&self, table: &str) -> Option<&PathBuf> {
        match table {
            "bin_cycles" => self.bin_cycles.as_ref(),
            "damage_timeline" => self.damage_timeline.as_ref(),
            "first_hits" => self.first_hits.as_ref(),
            "matches" => self.matches.as_ref(),
            "mods_agg" => self.mods_agg.as_ref(),
            "weapon_agg" => self.weapon_agg.as_ref(),
            _ => None,
        }
    }

    /// Locates the input CSV for every table: the explicit flag if
    /// given, else the newest `*-<table>.csv` in the input directory
    /// (export names carry a session stamp). A table with no match is
    /// fatal; the aggregation is meaningless on partial inputs.
    pub fn resolve_inputs(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut inputs = Vec::new();
        for table in TABLES {
            let path = if let Some(p) = self.override_for(table) {
                if !p.is_file() {
                    return Err(anyhow!("File not found: {}", p.display()));
                }
                p.clone()
            } else {
                let dir = self.in_dir.as_ref().ok_or_else(|| {
                    anyhow!(
                        "Missing path for {}; provide --in-dir or --{}",
                        table,
                        table.replace('_', "-")
                    )
                })?;
                newest_match(dir, table)?
            };
            trace!("Input for {}: {}", table, path.display());
            inputs.push((table.to_string(), path));
        }
        debug!("Resolved {} input tables", inputs.len());
        Ok(inputs)
    }
}

fn newest_match(dir: &Path, table: &str) -> Result<PathBuf> {
    let suffix = format!("-{}.csv", table);
    let plain = format!("{}.csv", table);
    let mut best: Option<(SystemTime, PathBuf)> = None;

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || !(name.ends_with(&suffix) || name == plain) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if best.as_ref().map_or(true, |(t, _)| modified > *t) {
            best = Some((modified, path));
        }
    }

    best.map(|(_, p)| p)
        .ok_or_else(|| anyhow!("No files match *-{}.csv under {}", table, dir.display()))
}

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};

use crate::{config::Config, summary, table::Table, types::ReportResult};

/// Builds the report end to end: load the session CSVs, aggregate,
/// write one sheet per raw table and per summary into the output
/// directory.
pub fn run_sim_report(cfg: Config) -> Result<ReportResult> {
    info!("Starting sim report build");

    let inputs = cfg.resolve_inputs()?;

    let mut tables: HashMap<String, Table> = HashMap::new();
    for (name, path) in &inputs {
        debug!("Loading {} from {}", name, path.display());
        tables.insert(name.clone(), Table::read_csv(path)?);
    }

    let mut sheets: Vec<(String, Table)> = Vec::new();
    for (name, _) in &inputs {
        sheets.push((format!("raw_{}", name), tables[name].clone()));
    }

    let weapon_agg = &tables["weapon_agg"];
    sheets.push(("per_side".to_string(), summary::per_side(weapon_agg)?));
    sheets.push(("by_weapon".to_string(), summary::by_weapon(weapon_agg)?));
    sheets.push((
        "first_hit_summary".to_string(),
        summary::first_hit_summary(&tables["first_hits"])?,
    ));
    sheets.push((
        "damage_over_time".to_string(),
        summary::damage_over_time(&tables["damage_timeline"])?,
    ));
    sheets.push(("mods_by_kind".to_string(), summary::mods_by_kind(&tables["mods_agg"])?));
    sheets.push((
        "mods_by_side_kind".to_string(),
        summary::mods_by_side_kind(&tables["mods_agg"])?,
    ));
    sheets.push(("bin_summary".to_string(), summary::bin_summary(&tables["bin_cycles"])?));
    sheets.push(("matches_summary".to_string(), summary::matches_summary(&tables["matches"])?));
    sheets.push((
        "match_duration_hist".to_string(),
        summary::match_duration_hist(&tables["matches"])?,
    ));

    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("Failed to create {}", cfg.out_dir.display()))?;

    let mut written: Vec<String> = Vec::new();
    for (name, table) in &sheets {
        let file_name = format!("{}.csv", name);
        let path = cfg.out_dir.join(&file_name);
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        table.write_csv(&mut writer)?;
        writer.flush()?;
        debug!("Wrote sheet {}", path.display());
        written.push(file_name);
    }

    info!("Report written to {} ({} sheets)", cfg.out_dir.display(), written.len());
    Ok(ReportResult { out_dir: cfg.out_dir, sheets: written })
}

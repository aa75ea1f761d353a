use anyhow::{Context, Result, anyhow};
use log::trace;
use std::collections::{BTreeMap, HashMap};

use crate::table::Table;

/// How one numeric column is folded within a group.
#[derive(Clone, Copy)]
enum Agg {
    Sum,
    Mean,
}

/// Groups rows by the key columns and folds each aggregate column.
/// Groups come back in key order so the sheets are diffable run to run.
fn group_by(
    table: &Table,
    key_cols: &[&str],
    agg_cols: &[(&str, Agg)],
) -> Result<Vec<(Vec<String>, Vec<f64>)>> {
    let key_idx: Vec<usize> =
        key_cols.iter().map(|c| table.column(c)).collect::<Result<_>>()?;
    let agg_idx: Vec<usize> =
        agg_cols.iter().map(|(c, _)| table.column(c)).collect::<Result<_>>()?;

    let mut groups: BTreeMap<Vec<String>, (usize, Vec<f64>)> = BTreeMap::new();
    for row in &table.rows {
        let key: Vec<String> = key_idx.iter().map(|&i| row[i].clone()).collect();
        let entry = groups.entry(key).or_insert_with(|| (0, vec![0.0; agg_idx.len()]));
        entry.0 += 1;
        for (slot, &i) in agg_idx.iter().enumerate() {
            let v = row[i].trim().parse::<f64>().with_context(|| {
                format!("Non-numeric value '{}' in column '{}'", row[i], agg_cols[slot].0)
            })?;
            entry.1[slot] += v;
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, (n, sums))| {
            let values = sums
                .iter()
                .zip(agg_cols)
                .map(|(sum, (_, agg))| match agg {
                    Agg::Sum => *sum,
                    Agg::Mean => sum / n as f64,
                })
                .collect();
            (key, values)
        })
        .collect())
}

/// Formats an aggregate so whole numbers stay whole in the sheets.
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Linear-interpolated quantile over sorted, non-empty samples.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    if frac == 0.0 || lo + 1 == sorted.len() {
        sorted[lo]
    } else {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    }
}

/// Weapon effectiveness per (side, weapon): volumes summed, rates averaged.
pub(crate) fn per_side(weapon_agg: &Table) -> Result<Table> {
    trace!("Summarizing weapon_agg per side");
    let grouped = group_by(
        weapon_agg,
        &["side", "weapon"],
        &[
            ("shots", Agg::Sum),
            ("hits", Agg::Sum),
            ("misses", Agg::Sum),
            ("hitRate", Agg::Mean),
            ("missPct", Agg::Mean),
            ("dmgShield", Agg::Sum),
            ("dmgSeg", Agg::Sum),
            ("dmgCenter", Agg::Sum),
            ("coreHitRate", Agg::Mean),
            ("coreDmgPerShot", Agg::Mean),
        ],
    )?;

    let mut out = Table::new(&[
        "side",
        "weapon",
        "shots",
        "hits",
        "misses",
        "hitRate",
        "missPct",
        "dmgShield",
        "dmgSeg",
        "dmgCenter",
        "coreHitRate",
        "coreDmgPerShot",
        "totalDamage",
    ]);
    for (key, vals) in grouped {
        let total = vals[5] + vals[6] + vals[7];
        let mut row = key;
        row.extend(vals.iter().map(|v| fmt_num(*v)));
        row.push(fmt_num(total));
        out.push_row(row);
    }
    Ok(out)
}

/// Weapon effectiveness with both sides combined.
pub(crate) fn by_weapon(weapon_agg: &Table) -> Result<Table> {
    trace!("Summarizing weapon_agg by weapon");
    let grouped = group_by(
        weapon_agg,
        &["weapon"],
        &[
            ("shots", Agg::Sum),
            ("hits", Agg::Sum),
            ("misses", Agg::Sum),
            ("hitRate", Agg::Mean),
            ("dmgShield", Agg::Sum),
            ("dmgSeg", Agg::Sum),
            ("dmgCenter", Agg::Sum),
            ("coreHitRate", Agg::Mean),
            ("coreDmgPerShot", Agg::Mean),
        ],
    )?;

    let mut out = Table::new(&[
        "weapon",
        "shots",
        "hits",
        "misses",
        "hitRate",
        "dmgShield",
        "dmgSeg",
        "dmgCenter",
        "coreHitRate",
        "coreDmgPerShot",
        "totalDamage",
    ]);
    for (key, vals) in grouped {
        let total = vals[4] + vals[5] + vals[6];
        let mut row = key;
        row.extend(vals.iter().map(|v| fmt_num(*v)));
        row.push(fmt_num(total));
        out.push_row(row);
    }
    Ok(out)
}

/// Time-to-first-hit distribution per weapon, fastest median first.
pub(crate) fn first_hit_summary(first_hits: &Table) -> Result<Table> {
    trace!("Summarizing first_hits");
    let weapon_idx = first_hits.column("weapon")?;
    let ms_idx = first_hits.column("msToFirstHit")?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in &first_hits.rows {
        let v = row[ms_idx].trim().parse::<f64>().with_context(|| {
            format!("Non-numeric value '{}' in column 'msToFirstHit'", row[ms_idx])
        })?;
        groups.entry(row[weapon_idx].clone()).or_default().push(v);
    }

    let mut entries: Vec<(String, Vec<f64>)> = groups.into_iter().collect();
    for (_, vs) in &mut entries {
        vs.sort_by(f64::total_cmp);
    }
    entries.sort_by(|a, b| quantile(&a.1, 0.5).total_cmp(&quantile(&b.1, 0.5)));

    let mut out = Table::new(&["weapon", "count", "mean", "median", "p25", "p75"]);
    for (weapon, vs) in entries {
        let mean = vs.iter().sum::<f64>() / vs.len() as f64;
        out.push_row(vec![
            weapon,
            fmt_num(vs.len() as f64),
            fmt_num(mean),
            fmt_num(quantile(&vs, 0.5)),
            fmt_num(quantile(&vs, 0.25)),
            fmt_num(quantile(&vs, 0.75)),
        ]);
    }
    Ok(out)
}

/// Cumulative damage per weapon over the session timeline.
pub(crate) fn damage_over_time(damage_timeline: &Table) -> Result<Table> {
    trace!("Summarizing damage_timeline");
    let t_idx = damage_timeline.column("tSec")?;
    let w_idx = damage_timeline.column("weapon")?;
    let shield_idx = damage_timeline.column("dmgShield")?;
    let seg_idx = damage_timeline.column("dmgSeg")?;
    let center_idx = damage_timeline.column("dmgCenter")?;

    let mut groups: BTreeMap<String, HashMap<String, f64>> = BTreeMap::new();
    for row in &damage_timeline.rows {
        let mut total = 0.0;
        for &i in &[shield_idx, seg_idx, center_idx] {
            total += row[i].trim().parse::<f64>().with_context(|| {
                format!("Non-numeric value '{}' in damage_timeline", row[i])
            })?;
        }
        *groups
            .entry(row[w_idx].clone())
            .or_default()
            .entry(row[t_idx].trim().to_string())
            .or_insert(0.0) += total;
    }

    let mut out = Table::new(&["tSec", "weapon", "totalDamage", "cumDamage"]);
    for (weapon, by_t) in groups {
        let mut times: Vec<(f64, String, f64)> = by_t
            .into_iter()
            .map(|(t, dmg)| {
                let sec = t
                    .parse::<f64>()
                    .with_context(|| format!("Non-numeric value '{}' in column 'tSec'", t))?;
                Ok((sec, t, dmg))
            })
            .collect::<Result<_>>()?;
        times.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut cum = 0.0;
        for (_, t, dmg) in times {
            cum += dmg;
            out.push_row(vec![t, weapon.clone(), fmt_num(dmg), fmt_num(cum)]);
        }
    }
    Ok(out)
}

/// Buff/debuff usage totals per kind, most used first.
pub(crate) fn mods_by_kind(mods_agg: &Table) -> Result<Table> {
    trace!("Summarizing mods_agg by kind");
    let mut grouped = group_by(mods_agg, &["kind"], &[("count", Agg::Sum)])?;
    grouped.sort_by(|a, b| b.1[0].total_cmp(&a.1[0]));

    let mut out = Table::new(&["kind", "count"]);
    for (key, vals) in grouped {
        let mut row = key;
        row.push(fmt_num(vals[0]));
        out.push_row(row);
    }
    Ok(out)
}

/// Buff/debuff usage totals per (side, kind).
pub(crate) fn mods_by_side_kind(mods_agg: &Table) -> Result<Table> {
    trace!("Summarizing mods_agg by side and kind");
    let grouped = group_by(mods_agg, &["side", "kind"], &[("count", Agg::Sum)])?;

    let mut out = Table::new(&["side", "kind", "count"]);
    for (key, vals) in grouped {
        let mut row = key;
        row.push(fmt_num(vals[0]));
        out.push_row(row);
    }
    Ok(out)
}

/// Ammo-bin cycling per bin, quickest average cycle first.
pub(crate) fn bin_summary(bin_cycles: &Table) -> Result<Table> {
    trace!("Summarizing bin_cycles");
    let mut grouped = group_by(
        bin_cycles,
        &["bin"],
        &[
            ("avgMs", Agg::Mean),
            ("cycles", Agg::Sum),
            ("totalDeposits", Agg::Sum),
            ("totalAmount", Agg::Sum),
        ],
    )?;
    grouped.sort_by(|a, b| a.1[0].total_cmp(&b.1[0]));

    let mut out =
        Table::new(&["bin", "avgCycleMs", "cycles", "totalDeposits", "totalAmount"]);
    for (key, vals) in grouped {
        let mut row = key;
        row.extend(vals.iter().map(|v| fmt_num(*v)));
        out.push_row(row);
    }
    Ok(out)
}

/// One-row duration digest of the matches table.
pub(crate) fn matches_summary(matches: &Table) -> Result<Table> {
    trace!("Summarizing matches");
    let mut durations = matches.numbers("durationMs")?;
    if durations.is_empty() {
        return Err(anyhow!("matches table has no rows"));
    }
    durations.sort_by(f64::total_cmp);

    let count = durations.len();
    let mean = durations.iter().sum::<f64>() / count as f64;

    let mut out = Table::new(&[
        "count",
        "meanDurationMs",
        "medianDurationMs",
        "minDurationMs",
        "maxDurationMs",
    ]);
    out.push_row(vec![
        fmt_num(count as f64),
        fmt_num(mean),
        fmt_num(quantile(&durations, 0.5)),
        fmt_num(durations[0]),
        fmt_num(durations[count - 1]),
    ]);
    Ok(out)
}

/// Ten-bin histogram of match durations; the top edge is inclusive.
pub(crate) fn match_duration_hist(matches: &Table) -> Result<Table> {
    trace!("Building match duration histogram");
    let durations = matches.numbers("durationMs")?;
    if durations.is_empty() {
        return Err(anyhow!("matches table has no rows"));
    }

    let mut lo = durations.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut hi = durations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        // Degenerate range: widen by half a unit each way
        lo -= 0.5;
        hi += 0.5;
    }
    let bins = 10usize;
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &durations {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let mut out = Table::new(&["bin_start", "bin_end", "count"]);
    for (i, count) in counts.iter().enumerate() {
        out.push_row(vec![
            fmt_num(lo + i as f64 * width),
            fmt_num(lo + (i + 1) as f64 * width),
            fmt_num(*count as f64),
        ]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon_agg_fixture() -> Table {
        let mut t = Table::new(&[
            "side",
            "weapon",
            "shots",
            "hits",
            "misses",
            "hitRate",
            "missPct",
            "dmgShield",
            "dmgSeg",
            "dmgCenter",
            "coreHitRate",
            "coreDmgPerShot",
        ]);
        for row in [
            ["L", "cannon", "10", "4", "6", "0.4", "0.6", "100", "50", "25", "0.1", "2"],
            ["R", "cannon", "20", "10", "10", "0.5", "0.5", "200", "100", "75", "0.3", "4"],
            ["L", "laser", "8", "8", "0", "1", "0", "10", "20", "30", "0.5", "5"],
        ] {
            t.push_row(row.iter().map(|s| s.to_string()).collect());
        }
        t
    }

    #[test]
    fn test_by_weapon_sums_and_means() {
        let out = by_weapon(&weapon_agg_fixture()).unwrap();
        assert_eq!(out.columns.len(), 11);
        // BTreeMap ordering: cannon before laser
        let cannon = &out.rows[0];
        assert_eq!(cannon[0], "cannon");
        assert_eq!(cannon[1], "30"); // shots summed
        assert_eq!(cannon[4], "0.45"); // hitRate averaged
        assert_eq!(cannon[10], "550"); // totalDamage = 300 + 150 + 100
        let laser = &out.rows[1];
        assert_eq!(laser[0], "laser");
        assert_eq!(laser[10], "60");
    }

    #[test]
    fn test_per_side_keeps_sides_apart() {
        let out = per_side(&weapon_agg_fixture()).unwrap();
        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[0][0], "L");
        assert_eq!(out.rows[0][1], "cannon");
        assert_eq!(out.rows[0][12], "175"); // L cannon total damage
    }

    #[test]
    fn test_first_hit_summary_quantiles() {
        let mut t = Table::new(&["weapon", "msToFirstHit"]);
        for v in ["100", "200", "300", "400"] {
            t.push_row(vec!["cannon".to_string(), v.to_string()]);
        }
        t.push_row(vec!["laser".to_string(), "50".to_string()]);

        let out = first_hit_summary(&t).unwrap();
        // laser (median 50) sorts before cannon (median 250)
        assert_eq!(out.rows[0][0], "laser");
        let cannon = &out.rows[1];
        assert_eq!(cannon[1], "4"); // count
        assert_eq!(cannon[2], "250"); // mean
        assert_eq!(cannon[3], "250"); // median
        assert_eq!(cannon[4], "175"); // p25
        assert_eq!(cannon[5], "325"); // p75
    }

    #[test]
    fn test_damage_over_time_accumulates() {
        let mut t =
            Table::new(&["tSec", "weapon", "dmgShield", "dmgSeg", "dmgCenter"]);
        for row in [
            ["10", "cannon", "1", "2", "3"],
            ["5", "cannon", "10", "0", "0"],
            ["5", "cannon", "0", "5", "0"],
        ] {
            t.push_row(row.iter().map(|s| s.to_string()).collect());
        }

        let out = damage_over_time(&t).unwrap();
        assert_eq!(out.rows.len(), 2);
        // t=5 first (numeric sort), both rows at t=5 merged
        assert_eq!(out.rows[0], vec!["5", "cannon", "15", "15"]);
        assert_eq!(out.rows[1], vec!["10", "cannon", "6", "21"]);
    }

    #[test]
    fn test_mods_by_kind_sorted_descending() {
        let mut t = Table::new(&["side", "kind", "count"]);
        for row in [["L", "buff", "2"], ["R", "buff", "5"], ["L", "debuff", "4"]] {
            t.push_row(row.iter().map(|s| s.to_string()).collect());
        }

        let out = mods_by_kind(&t).unwrap();
        assert_eq!(out.rows[0], vec!["buff", "7"]);
        assert_eq!(out.rows[1], vec!["debuff", "4"]);
    }

    #[test]
    fn test_bin_summary_sorted_by_cycle_time() {
        let mut t =
            Table::new(&["bin", "avgMs", "cycles", "totalDeposits", "totalAmount"]);
        for row in [
            ["shield", "400", "3", "12", "120"],
            ["cannon", "100", "5", "20", "200"],
            ["cannon", "300", "1", "4", "40"],
        ] {
            t.push_row(row.iter().map(|s| s.to_string()).collect());
        }

        let out = bin_summary(&t).unwrap();
        assert_eq!(out.rows[0][0], "cannon"); // mean 200 beats 400
        assert_eq!(out.rows[0][1], "200");
        assert_eq!(out.rows[0][2], "6"); // cycles summed
    }

    #[test]
    fn test_matches_summary_digest() {
        let mut t = Table::new(&["matchId", "durationMs"]);
        for (id, d) in [("1", "1000"), ("2", "3000"), ("3", "2000")] {
            t.push_row(vec![id.to_string(), d.to_string()]);
        }

        let out = matches_summary(&t).unwrap();
        assert_eq!(out.rows[0], vec!["3", "2000", "2000", "1000", "3000"]);
    }

    #[test]
    fn test_match_duration_hist_bins() {
        let mut t = Table::new(&["durationMs"]);
        for v in 0..100 {
            t.push_row(vec![(v * 10).to_string()]);
        }

        let out = match_duration_hist(&t).unwrap();
        assert_eq!(out.rows.len(), 10);
        // 100 values spread evenly over 10 bins; the max lands in the
        // last bin because the top edge is inclusive
        for row in &out.rows {
            assert_eq!(row[2], "10");
        }
        assert_eq!(out.rows[0][0], "0");
        assert_eq!(out.rows[9][1], "990");
    }

    #[test]
    fn test_empty_matches_is_an_error() {
        let t = Table::new(&["durationMs"]);
        assert!(matches_summary(&t).is_err());
        assert!(match_duration_hist(&t).is_err());
    }
}

use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::CheckResult;

/// Prints the text report: roots used, reachable count, then the sorted
/// removal candidates.
pub fn print_unused_report<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing unused files report for {} candidates", result.unused.len());

    writeln!(writer, "Roots:")?;
    for root in &result.roots {
        writeln!(writer, "  {}", root.blue())?;
    }
    writeln!(writer)?;

    writeln!(writer, "Reachable (kept): {}", result.reachable_count.to_string().green())?;
    writeln!(
        writer,
        "Unused candidates: {}",
        result.unused.len().to_string().red().bold()
    )?;
    for path in &result.unused {
        writeln!(writer, "{}", path.yellow())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_all_used_message<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("No unused modules detected");
    writeln!(
        writer,
        "{} No unused modules. {} modules reachable from {} roots.",
        "✓".green().bold(),
        result.reachable_count.to_string().cyan(),
        result.roots.len().to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}

/// Machine-readable variant for CI consumption.
pub fn print_json<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::ReportResult;

/// Prints where the report landed and which sheets it holds.
pub fn print_report_written<W: Write>(writer: &mut W, result: &ReportResult) -> io::Result<()> {
    debug!("Printing report summary for {} sheets", result.sheets.len());
    writeln!(
        writer,
        "{} Report written to {}",
        "✓".green().bold(),
        result.out_dir.display().to_string().cyan()
    )?;
    for sheet in &result.sheets {
        writeln!(writer, "  {}", sheet.dimmed())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_report_message_lists_sheets() {
        let result = ReportResult {
            out_dir: PathBuf::from("/tmp/report"),
            sheets: vec!["raw_matches.csv".to_string(), "by_weapon.csv".to_string()],
        };
        let mut out = Vec::new();
        print_report_written(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("/tmp/report"));
        assert!(text.contains("by_weapon.csv"));
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "modsweep")]
#[command(about = "A collection of tools for keeping source trees and their telemetry tidy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find source files unreachable from the app entry point and tests
    UnusedFiles(modsweep_unused_files::Config),
    /// Aggregate simulator telemetry CSVs into summary sheets
    SimReport(modsweep_sim_report::Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::UnusedFiles(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running unused files check (using {} threads)", num_threads);
            debug!(
                "Config: root={:?}, source_dir={:?}, entry={:?}, tests_dir={:?}",
                cfg.root, cfg.source_dir, cfg.entry, cfg.tests_dir
            );

            let result = modsweep_unused_files::run_unused_files_check(cfg.clone())?;

            if cfg.json {
                modsweep_unused_files::print_json(&mut stdout, &result)?;
                stdout.flush()?;
                return Ok(());
            }

            if result.unused.is_empty() {
                info!("No unused modules detected");
                modsweep_unused_files::print_all_used_message(&mut stdout, &result)?;
            } else {
                modsweep_unused_files::print_unused_report(&mut stdout, &result)?;
            }

            let elapsed_ms = start.elapsed().as_millis();
            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.files_scanned.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            // Unused candidates are advisory, never an error exit
            Ok(())
        }
        Commands::SimReport(cfg) => {
            info!("Building sim report");
            let result = modsweep_sim_report::run_sim_report(cfg)?;
            modsweep_sim_report::print_report_written(&mut stdout, &result)?;

            let elapsed_ms = start.elapsed().as_millis();
            writeln!(
                stdout,
                "\n{} Finished in {}ms, {} sheets written.",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.sheets.len().to_string().cyan()
            )?;
            stdout.flush()?;

            Ok(())
        }
    }
}

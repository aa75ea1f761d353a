use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use modsweep_core::Conventions;

#[derive(Debug, Clone, Parser)]
#[command(name = "unused-files")]
#[command(about = "Find source files unreachable from the app entry point and tests")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Source tree to scan, relative to the root
    #[arg(long, default_value = "src")]
    pub source_dir: PathBuf,

    /// Entry-point file, relative to the source tree
    #[arg(long, default_value = "main.ts")]
    pub entry: PathBuf,

    /// Test directory whose files all count as roots, relative to the source tree
    #[arg(long, default_value = "__tests__")]
    pub tests_dir: PathBuf,

    /// Emit the result as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    #[clap(skip)]
    pub conventions: Conventions,
}

impl Config {
    /// Resolve the root directory (explicit flag or enclosing git root).
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            modsweep_core::find_git_root()?
        };
        info!("Using root directory: {}", root.display());
        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// Absolute path of the source tree to scan.
    pub fn tree(&self) -> Result<PathBuf> {
        Ok(self.root()?.join(&self.source_dir))
    }
}

use std::path::PathBuf;

/// Result of one report build.
#[derive(Debug, Clone)]
pub struct ReportResult {
    /// Directory the sheets were written into.
    pub out_dir: PathBuf,
    /// Sheet file names written, in write order.
    pub sheets: Vec<String>,
}

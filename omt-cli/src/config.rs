//! Configuration loading
//!
//! Reads the scan file from disk and prepares the output directory before
//! anything is scheduled. Every failure here aborts the run.

use std::path::Path;

use anyhow::{Context, Result};
use omt_core::dto::scan_file::ScanFile;
use tracing::debug;

/// Loads and parses the JSON scan file at `path`
pub fn load_scan_file(path: &Path) -> Result<ScanFile> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let scan_file = ScanFile::from_json(&source)
        .with_context(|| format!("Failed to load JSON from {}", path.display()))?;

    debug!(
        "Loaded {} scan entries from {}",
        scan_file.scans.len(),
        path.display()
    );
    Ok(scan_file)
}

/// Creates the output directory and any missing parents
pub fn prepare_output_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create output directory {}", path.display()))
}

//! Output file naming
//!
//! Each job writes `<name>_<timestamp>.{xml,nmap,gnmap}` and, on success,
//! refreshes `<name>_latest.xml`.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};
use tracing::debug;

/// Launch timestamp format used in output stems
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Hands out per-job output stems
///
/// Stems are unique for the lifetime of the namer; two launches of the
/// same job name within one second get a numeric suffix instead of
/// sharing files.
#[derive(Debug, Default)]
pub struct OutputNamer {
    issued: Mutex<HashSet<String>>,
}

impl OutputNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the stem for job `name` launched at `launched_at`
    pub fn reserve(&self, name: &str, launched_at: DateTime<Local>) -> String {
        let base = format!("{}_{}", name, launched_at.format(TIMESTAMP_FORMAT));
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);

        if issued.insert(base.clone()) {
            return base;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", base, n);
            if issued.insert(candidate.clone()) {
                debug!("Stem {} already issued, using {}", base, candidate);
                return candidate;
            }
            n += 1;
        }
    }
}

/// The XML file the tool writes for output stem `stem_path`
pub fn xml_path(stem_path: &Path) -> PathBuf {
    let mut path = stem_path.as_os_str().to_owned();
    path.push(".xml");
    PathBuf::from(path)
}

/// Stable location of the most recent XML result for job `name`
pub fn latest_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}_latest.xml", name))
}

/// Copies the XML result at `xml` over the job's latest copy
///
/// Writes to a private temporary file first and renames it into place, so
/// concurrent writers for the same name leave one complete file behind.
pub async fn publish_latest(
    xml: &Path,
    output_dir: &Path,
    name: &str,
    stem: &str,
) -> io::Result<PathBuf> {
    let latest = latest_path(output_dir, name);
    let staging = output_dir.join(format!(".{}.latest.tmp", stem));

    tokio::fs::copy(xml, &staging).await?;

    if let Err(e) = tokio::fs::rename(&staging, &latest).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e);
    }

    debug!("Updated {} from {}", latest.display(), xml.display());
    Ok(latest)
}

//! Result sink
//!
//! Sorts the accumulated set and writes it to `subdomains_<domain>.txt`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::engine::AccumulatedResults;
use crate::error::{Result, SubsaggError};

/// File name the results for `domain` are written to
pub fn output_file_name(domain: &str) -> String {
    format!("subdomains_{}.txt", domain)
}

/// Full output path inside `dir`
pub fn output_path(dir: &Path, domain: &str) -> PathBuf {
    dir.join(output_file_name(domain))
}

/// Newline-joined, lexicographically sorted results, without a trailing newline
pub fn render(results: &AccumulatedResults) -> String {
    results.sorted().join("\n")
}

/// Write the sorted results for `domain` into `dir`, returning the written path
pub fn persist(results: &AccumulatedResults, domain: &str, dir: &Path) -> Result<PathBuf> {
    let path = output_path(dir, domain);
    fs::write(&path, render(results))
        .map_err(|e| SubsaggError::Persistence(format!("failed to write {}: {}", path.display(), e)))?;
    info!("Saved {} unique subdomains to {}", results.len(), path.display());
    Ok(path)
}

/// Like [`persist`], but on failure the sorted results are written to
/// `fallback` one per line before the persistence error is returned.
pub fn persist_or_dump<W: Write>(
    results: &AccumulatedResults,
    domain: &str,
    dir: &Path,
    fallback: &mut W,
) -> Result<PathBuf> {
    match persist(results, domain, dir) {
        Ok(path) => Ok(path),
        Err(e) => {
            for sub in results.sorted() {
                writeln!(fallback, "{}", sub)?;
            }
            fallback.flush()?;
            Err(e)
        }
    }
}

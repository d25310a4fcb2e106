use super::types::LighthouseReport;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ReportReader;

impl ReportReader {
    /// Load every `*.json` artifact in a directory, sorted by file name
    ///
    /// Files whose top-level value is not a JSON object (LHCI also drops
    /// manifests and assertion lists in the same folder) are skipped.
    /// An empty result is an error.
    pub fn from_dir(dir: &Path) -> Result<Vec<LighthouseReport>> {
        tracing::debug!("Loading Lighthouse reports from: {}", dir.display());

        if !dir.is_dir() {
            return Err(Error::MissingDirectory(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.ends_with(".json"))
            })
            .collect();
        paths.sort();

        let mut reports = Vec::with_capacity(paths.len());
        for path in &paths {
            match Self::from_file(path)? {
                Some(report) => reports.push(report),
                None => tracing::warn!("Skipping {}: not a report object", path.display()),
            }
        }

        if reports.is_empty() {
            return Err(Error::NoReports(dir.to_path_buf()));
        }

        tracing::info!("Loaded {} Lighthouse reports", reports.len());
        Ok(reports)
    }

    /// Read a single artifact; `Ok(None)` when the file is valid JSON but
    /// not an object
    pub fn from_file(path: &Path) -> Result<Option<LighthouseReport>> {
        tracing::debug!("Reading report: {}", path.display());

        let content = fs::read_to_string(path)?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| Error::InvalidReport {
                path: path.to_path_buf(),
                source,
            })?;

        if !value.is_object() {
            return Ok(None);
        }

        let report = serde_json::from_value(value).map_err(|source| Error::InvalidReport {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(report))
    }

    /// Parse an artifact from a JSON string
    pub fn from_str(content: &str) -> Result<LighthouseReport> {
        Ok(serde_json::from_str(content)?)
    }
}

use super::SiteAudit;
use super::page::PageScan;
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use url::Url;
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Base URL used to resolve relative links; enables link checking
    pub base_url: Option<Url>,
}

pub struct SiteScanner {
    options: ScanOptions,
}

impl SiteScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Walk `root` recursively and fold every `*.html` page into a
    /// [`SiteAudit`]
    ///
    /// Pages are visited in file-name order within each directory.
    pub fn scan(&self, root: &Path) -> Result<SiteAudit> {
        if !root.is_dir() {
            return Err(Error::MissingDirectory(root.to_path_buf()));
        }

        tracing::info!("Starting scan of {}", root.display());

        let audit = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".html")
            })
            .try_fold(SiteAudit::new(root), |audit, entry| {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_string_lossy()
                    .into_owned();
                let scan = self.scan_file(entry.path(), &relative)?;
                Ok::<_, Error>(audit.absorb(scan))
            })?;

        tracing::info!(
            "Scanned {} pages, collected {} links",
            audit.pages.len(),
            audit.links.len()
        );

        Ok(audit)
    }

    pub fn scan_file(&self, path: &Path, relative: &str) -> Result<PageScan> {
        tracing::debug!("Scanning {}", relative);

        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(PageScan::parse(
            relative,
            &content,
            bytes.len(),
            self.options.base_url.as_ref(),
        ))
    }
}

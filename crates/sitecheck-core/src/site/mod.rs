mod html;
mod issues;
mod links;
mod page;
mod scanner;

pub use html::HtmlReport;
pub use issues::*;
pub use links::{
    BrokenLink, CollectedLinks, LinkCheckReport, LinkEdge, LinkStatus, collect_links,
    is_absolute_http,
};
pub use page::{PageRecord, PageScan};
pub use scanner::{ScanOptions, SiteScanner};

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Accumulated findings for a whole site
///
/// Per-page issue lists stay attributed to the page that produced them;
/// only links and external links are merged across pages.
#[derive(Debug, Clone, Serialize)]
pub struct SiteAudit {
    pub root: PathBuf,
    /// In scan order
    pub pages: Vec<PageRecord>,
    pub meta_issues: Vec<PageIssues>,
    pub heading_issues: Vec<PageIssues>,
    pub images_without_alt: Vec<MissingAlt>,
    pub large_pages: Vec<LargePage>,
    pub links: BTreeSet<LinkEdge>,
    pub external_links: BTreeSet<String>,
}

impl SiteAudit {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            pages: Vec::new(),
            meta_issues: Vec::new(),
            heading_issues: Vec::new(),
            images_without_alt: Vec::new(),
            large_pages: Vec::new(),
            links: BTreeSet::new(),
            external_links: BTreeSet::new(),
        }
    }

    /// Fold one page's findings into the audit
    pub fn absorb(mut self, scan: PageScan) -> Self {
        let path = scan.record.path.clone();

        if !scan.meta_issues.is_empty() {
            self.meta_issues.push(PageIssues {
                path: path.clone(),
                issues: scan.meta_issues,
            });
        }
        if !scan.heading_issues.is_empty() {
            self.heading_issues.push(PageIssues {
                path,
                issues: scan.heading_issues,
            });
        }
        self.images_without_alt.extend(scan.images_without_alt);
        self.large_pages.extend(scan.large_page);
        self.links.extend(scan.links.edges);
        self.external_links.extend(scan.links.external);
        self.pages.push(scan.record);
        self
    }
}

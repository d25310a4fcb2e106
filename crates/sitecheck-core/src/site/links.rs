use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A link found on a page: `(url, source page)`
///
/// Edges are deduplicated on the pair, so the same URL on two pages is two
/// edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkEdge {
    pub url: String,
    pub source: String,
}

impl LinkEdge {
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Only http(s) links are probed
    pub fn is_checkable(&self) -> bool {
        is_absolute_http(&self.url)
    }
}

/// Outcome recorded for a broken link: an HTTP status (≥400) or the text
/// of a transport error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkStatus {
    Http(u16),
    Error(String),
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Http(code) => write!(f, "{}", code),
            LinkStatus::Error(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub link: String,
    pub source: String,
    pub status: LinkStatus,
}

/// Totals of one link-checking pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkCheckReport {
    pub total: usize,
    pub checked: usize,
    pub skipped: usize,
    /// In completion order
    pub broken: Vec<BrokenLink>,
}

pub fn is_absolute_http(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Links extracted from a single page
#[derive(Debug, Default)]
pub struct CollectedLinks {
    pub edges: Vec<LinkEdge>,
    pub external: Vec<String>,
}

/// Turn raw anchor hrefs into link edges and external links
///
/// Fragment-only and `javascript:` hrefs are dropped. With a base URL every
/// href is resolved against it, and absolute hrefs not mentioning the base
/// host count as external. Without one, hrefs are kept verbatim and every
/// absolute http(s) href is external.
pub fn collect_links<'a>(
    hrefs: impl IntoIterator<Item = &'a str>,
    page: &str,
    base_url: Option<&Url>,
) -> CollectedLinks {
    let base_host = base_url.map(netloc);
    let mut collected = CollectedLinks::default();

    for href in hrefs {
        if href.starts_with('#') || href.starts_with("javascript:") {
            continue;
        }

        let is_external = is_absolute_http(href);

        match (base_url, base_host.as_deref()) {
            (Some(base), Some(host)) => {
                let full = base
                    .join(href)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| href.to_string());
                collected.edges.push(LinkEdge::new(full, page));

                if is_external && !href.contains(host) {
                    tracing::debug!("Found external link: {} on page {}", href, page);
                    collected.external.push(href.to_string());
                }
            }
            _ => {
                collected.edges.push(LinkEdge::new(href, page));
                if is_external {
                    tracing::debug!("Found external link: {} on page {}", href, page);
                    collected.external.push(href.to_string());
                }
            }
        }
    }

    collected
}

/// `host[:port]` of a URL
fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

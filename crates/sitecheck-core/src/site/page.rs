use super::issues::{
    Issue, LARGE_PAGE_KB, LargePage, MissingAlt, description_issue, heading_issues, title_issue,
};
use super::links::{CollectedLinks, collect_links};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref META_DESCRIPTION: Selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    static ref META_VIEWPORT: Selector = Selector::parse(r#"meta[name="viewport"]"#).unwrap();
    static ref CANONICAL: Selector = Selector::parse(r#"link[rel~="canonical"]"#).unwrap();
    static ref H1: Selector = Selector::parse("h1").unwrap();
    static ref H2: Selector = Selector::parse("h2").unwrap();
    static ref H3: Selector = Selector::parse("h3").unwrap();
    static ref IMG: Selector = Selector::parse("img").unwrap();
    static ref ANCHOR: Selector = Selector::parse("a").unwrap();
    static ref ANCHOR_WITH_HREF: Selector = Selector::parse("a[href]").unwrap();
}

/// Structural facts about one scanned HTML file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    /// Path relative to the scan root
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub size_kb: f64,
    pub image_count: usize,
    pub link_count: usize,
}

/// Everything learned from a single parse of one page
#[derive(Debug)]
pub struct PageScan {
    pub record: PageRecord,
    pub meta_issues: Vec<Issue>,
    pub heading_issues: Vec<Issue>,
    pub images_without_alt: Vec<MissingAlt>,
    pub large_page: Option<LargePage>,
    pub links: CollectedLinks,
}

impl PageScan {
    /// Parse `content` (the page found at `path`) and evaluate every rule
    ///
    /// `size_bytes` is the on-disk size; it is passed separately so lossy
    /// UTF-8 decoding does not skew it.
    pub fn parse(path: &str, content: &str, size_bytes: usize, base_url: Option<&Url>) -> Self {
        let document = Html::parse_document(content);

        let title = document
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>())
            .filter(|t| !t.is_empty());
        let description = document
            .select(&META_DESCRIPTION)
            .next()
            .and_then(|el| el.value().attr("content"))
            .filter(|d| !d.is_empty())
            .map(String::from);

        let h1_count = document.select(&H1).count();
        let h2_count = document.select(&H2).count();
        let h3_count = document.select(&H3).count();
        let size_kb = size_bytes as f64 / 1024.0;

        let mut meta_issues = Vec::new();
        meta_issues.extend(title_issue(title.as_deref()));
        meta_issues.extend(description_issue(description.as_deref()));
        if document.select(&CANONICAL).next().is_none() {
            meta_issues.push(Issue::MissingCanonical);
        }
        if document.select(&META_VIEWPORT).next().is_none() {
            meta_issues.push(Issue::MissingViewport);
        }

        let images_without_alt: Vec<MissingAlt> = document
            .select(&IMG)
            .filter(|img| img.value().attr("alt").is_none_or(str::is_empty))
            .map(|img| MissingAlt {
                path: path.to_string(),
                src: img.value().attr("src").unwrap_or("unknown").to_string(),
            })
            .collect();

        let large_page = (size_kb > LARGE_PAGE_KB).then(|| LargePage {
            path: path.to_string(),
            size_kb,
        });

        let hrefs = document
            .select(&ANCHOR_WITH_HREF)
            .filter_map(|a| a.value().attr("href"));
        let links = collect_links(hrefs, path, base_url);

        let record = PageRecord {
            path: path.to_string(),
            title,
            description,
            h1_count,
            h2_count,
            h3_count,
            size_kb,
            image_count: document.select(&IMG).count(),
            link_count: document.select(&ANCHOR).count(),
        };

        Self {
            record,
            meta_issues,
            heading_issues: heading_issues(h1_count, h2_count, h3_count),
            images_without_alt,
            large_page,
            links,
        }
    }
}

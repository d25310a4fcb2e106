use crate::AuditFormat;
use crate::output::{ConsoleFormatter, simple_table};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use sitecheck_core::site::{
    BrokenLink, HtmlReport, LinkCheckReport, ScanOptions, SiteAudit, SiteScanner,
};
use sitecheck_core::text::truncate_with_ellipsis;
use sitecheck_links::{DEFAULT_TIMEOUT, HttpProbe, LinkChecker};
use std::path::{Path, PathBuf};
use url::Url;

/// Rows shown per table before collapsing into "...and N more"
const CONSOLE_ROW_LIMIT: usize = 10;

/// Options of one `seo` run
#[derive(Debug, Clone)]
pub struct SeoOptions {
    pub dir: PathBuf,
    pub base_url: Option<String>,
    pub html_output: Option<PathBuf>,
    pub threads: i64,
    pub format: AuditFormat,
}

/// Scan results plus the link check, when one ran
#[derive(Debug, Serialize)]
pub struct SiteReport {
    #[serde(flatten)]
    pub audit: SiteAudit,
    pub link_check: Option<LinkCheckReport>,
}

impl SiteReport {
    pub fn broken_links(&self) -> &[BrokenLink] {
        self.link_check
            .as_ref()
            .map(|r| r.broken.as_slice())
            .unwrap_or_default()
    }
}

/// Thread counts below 1 fall back to 1 with a warning
pub fn effective_threads(requested: i64, fmt: &ConsoleFormatter) -> usize {
    if requested < 1 {
        tracing::debug!("Coercing thread count {} to 1", requested);
        eprintln!(
            "{}",
            fmt.warning(&format!(
                "Warning: Invalid thread count ({}), using 1 thread",
                requested
            ))
        );
        return 1;
    }
    usize::try_from(requested).unwrap_or(usize::MAX)
}

/// Scan `dir` and, when a base URL is given, check every collected link
pub fn audit_site(
    dir: &Path,
    base_url: Option<Url>,
    threads: usize,
    fmt: &ConsoleFormatter,
    chatty: bool,
) -> Result<SiteReport> {
    if chatty {
        println!("{}", fmt.heading(&format!("Starting scan of {}...", dir.display())));
    }

    let options = ScanOptions {
        base_url: base_url.clone(),
    };
    let audit = SiteScanner::new(options).scan(dir)?;

    let link_check = match base_url {
        Some(_) => check_links(&audit, threads, fmt, chatty)?,
        None => None,
    };

    Ok(SiteReport { audit, link_check })
}

fn check_links(
    audit: &SiteAudit,
    threads: usize,
    fmt: &ConsoleFormatter,
    chatty: bool,
) -> Result<Option<LinkCheckReport>> {
    let total = audit.links.len();
    if chatty {
        println!("{}", fmt.heading("Checking for broken links..."));
    }

    if total == 0 {
        if chatty {
            println!("  {}", fmt.error("No links to check"));
        }
        return Ok(None);
    }

    if chatty {
        println!(
            "  {}",
            fmt.success(&format!(
                "Found {} links to check using {} thread(s)",
                total, threads
            ))
        );
    }

    let bar = ProgressBar::new(total as u64);
    if chatty {
        bar.set_style(
            ProgressStyle::with_template("  Checking links: {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
    } else {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    let probe = HttpProbe::new(DEFAULT_TIMEOUT)?;
    let checker = LinkChecker::new(threads);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report = runtime.block_on(checker.check(&probe, audit.links.iter().cloned(), |p| {
        bar.set_position(p.completed as u64)
    }));
    bar.finish_and_clear();

    if chatty {
        println!("  Found {} broken links", report.broken.len());
    }

    Ok(Some(report))
}

pub fn execute(options: &SeoOptions, fmt: &ConsoleFormatter) -> Result<()> {
    tracing::debug!(
        "Auditing {} (format: {})",
        options.dir.display(),
        options.format.as_str()
    );

    let threads = effective_threads(options.threads, fmt);
    let base_url = options
        .base_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("Invalid --base-url")?;

    let chatty = options.format == AuditFormat::Pretty;
    let report = audit_site(&options.dir, base_url, threads, fmt, chatty)?;

    match options.format {
        AuditFormat::Pretty => print_report(&report, fmt),
        AuditFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &options.html_output {
        HtmlReport::new(env!("CARGO_PKG_VERSION")).write_to(
            &report.audit,
            report.broken_links(),
            path,
        )?;
        if chatty {
            println!(
                "{}",
                fmt.success(&format!("HTML report saved to {}", path.display()))
            );
        }
    }

    Ok(())
}

/// Console rendering of a finished audit
pub fn print_report(report: &SiteReport, fmt: &ConsoleFormatter) {
    let audit = &report.audit;
    let broken = report.broken_links();

    println!("\n{}\n", fmt.title("=== SEO Report ==="));

    println!("{}", fmt.heading("Summary:"));
    println!("Pages scanned: {}", audit.pages.len());
    println!("Pages with meta issues: {}", audit.meta_issues.len());
    println!("Pages with heading issues: {}", audit.heading_issues.len());
    println!("Images without alt text: {}", audit.images_without_alt.len());
    println!("Broken links: {}", broken.len());
    println!("Large pages (>500KB): {}", audit.large_pages.len());
    println!("External links: {}", audit.external_links.len());
    println!();

    for (heading, pages) in [
        ("Pages with Meta Tag Issues:", &audit.meta_issues),
        ("Pages with Heading Issues:", &audit.heading_issues),
    ] {
        if pages.is_empty() {
            continue;
        }
        println!("\n{}", fmt.warning(heading));
        for page in pages {
            println!("  {}", page.path);
            for issue in &page.issues {
                println!("    - {}", issue);
            }
        }
    }

    if !audit.images_without_alt.is_empty() {
        println!("\n{}", fmt.warning("Images Without Alt Text:"));
        let rows: Vec<Vec<String>> = audit
            .images_without_alt
            .iter()
            .take(CONSOLE_ROW_LIMIT)
            .map(|img| vec![img.path.clone(), img.src.clone()])
            .collect();
        println!("{}", simple_table(&["Page", "Image Source"], &rows));
        print_overflow(audit.images_without_alt.len(), "more");
    }

    if !broken.is_empty() {
        println!("\n{}", fmt.error("Broken Links:"));
        let rows: Vec<Vec<String>> = broken
            .iter()
            .take(CONSOLE_ROW_LIMIT)
            .map(|l| vec![l.source.clone(), l.link.clone(), l.status.to_string()])
            .collect();
        println!("{}", simple_table(&["Source Page", "Link", "Status"], &rows));
        print_overflow(broken.len(), "more");
    }

    if !audit.large_pages.is_empty() {
        println!("\n{}", fmt.warning("Large Pages (>500KB):"));
        let rows: Vec<Vec<String>> = audit
            .large_pages
            .iter()
            .map(|p| vec![p.path.clone(), format!("{:.2} KB", p.size_kb)])
            .collect();
        println!("{}", simple_table(&["Page", "Size"], &rows));
    }

    println!("\n{}", fmt.heading("Page Titles and Descriptions:"));
    let rows: Vec<Vec<String>> = audit
        .pages
        .iter()
        .take(CONSOLE_ROW_LIMIT)
        .map(|page| {
            let title = page.title.clone().unwrap_or_else(|| "MISSING".to_string());
            let description = match page.description.as_deref() {
                None => "MISSING".to_string(),
                Some(d) => short_description(d),
            };
            vec![page.path.clone(), title, description]
        })
        .collect();
    println!("{}", simple_table(&["Page", "Title", "Description"], &rows));
    print_overflow(audit.pages.len(), "more pages");
}

fn print_overflow(total: usize, noun: &str) {
    if total > CONSOLE_ROW_LIMIT {
        println!("  ...and {} {}", total - CONSOLE_ROW_LIMIT, noun);
    }
}

/// Descriptions over 50 characters are cut to 47 plus `...`
fn short_description(description: &str) -> String {
    if description.chars().count() > 50 {
        truncate_with_ellipsis(description, 47)
    } else {
        description.to_string()
    }
}

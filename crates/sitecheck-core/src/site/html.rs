use super::issues::{
    DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, PageIssues, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
    length_out_of_range,
};
use super::links::BrokenLink;
use super::SiteAudit;
use crate::Result;
use crate::text::escape_html;
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::fs;
use std::path::Path;

const STYLESHEET: &str = r#"
    :root {
        --primary: #2563eb;
        --primary-dark: #1d4ed8;
        --secondary: #475569;
        --error: #ef4444;
        --warning: #f59e0b;
        --success: #10b981;
        --light: #f8fafc;
        --dark: #1e293b;
        --rule: #e2e8f0;
    }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
        line-height: 1.6;
        color: var(--dark);
        background: var(--light);
        margin: 0;
        padding: 20px;
    }
    .container {
        max-width: 1200px;
        margin: 0 auto;
        background: white;
        padding: 20px;
        border-radius: 8px;
        box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
    }
    header { margin-bottom: 30px; border-bottom: 1px solid var(--rule); padding-bottom: 20px; }
    h1, h2, h3 { color: var(--primary-dark); margin-top: 1.5em; }
    h1 { font-size: 2em; margin-top: 0; }
    .summary-cards {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
        gap: 20px;
        margin: 20px 0;
    }
    .card {
        border-radius: 8px;
        padding: 15px;
        box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
        border-left: 5px solid var(--primary);
    }
    .card.warning { border-left-color: var(--warning); }
    .card.error { border-left-color: var(--error); }
    .card.success { border-left-color: var(--success); }
    .card h3 { margin-top: 0; font-size: 1.1em; color: var(--secondary); }
    .card p { font-size: 1.8em; font-weight: bold; margin: 10px 0 0; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; font-size: 0.9em; }
    th { background: var(--primary); color: white; text-align: left; padding: 12px; }
    td { padding: 10px 12px; border-top: 1px solid var(--rule); }
    tr:nth-child(even) { background: var(--light); }
    .issue-list { margin-left: 20px; color: var(--error); }
    .status-warning { color: var(--warning); }
    .status-error { color: var(--error); }
    .meta {
        color: var(--secondary);
        font-size: 0.8em;
        margin-top: 50px;
        border-top: 1px solid var(--rule);
        padding-top: 20px;
    }
    .expandable { cursor: pointer; }
    .expandable::after { content: " +"; font-weight: bold; color: var(--primary); }
    .expandable.expanded::after { content: " -"; }
    .content { display: none; padding: 10px; background: var(--light); border-radius: 4px; }
    .content.show { display: block; }
    @media (max-width: 768px) {
        .summary-cards { grid-template-columns: 1fr; }
        table { font-size: 0.8em; }
    }
"#;

const TOGGLE_SCRIPT: &str = r#"
    document.addEventListener('DOMContentLoaded', function () {
        document.querySelectorAll('.expandable').forEach(function (item) {
            item.addEventListener('click', function () {
                item.classList.toggle('expanded');
                item.nextElementSibling.classList.toggle('show');
            });
        });
    });
"#;

/// Self-contained HTML rendering of a site audit
pub struct HtmlReport {
    generated_at: DateTime<Local>,
    tool_version: String,
}

impl HtmlReport {
    pub fn new(tool_version: impl Into<String>) -> Self {
        Self {
            generated_at: Local::now(),
            tool_version: tool_version.into(),
        }
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn write_to(&self, audit: &SiteAudit, broken: &[BrokenLink], path: &Path) -> Result<()> {
        tracing::debug!("Writing HTML report to: {}", path.display());
        fs::write(path, self.render(audit, broken)?)?;
        tracing::info!("HTML report saved to {}", path.display());
        Ok(())
    }

    pub fn render(&self, audit: &SiteAudit, broken: &[BrokenLink]) -> Result<String> {
        let timestamp = self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let site_dir = std::path::absolute(&audit.root).unwrap_or_else(|_| audit.root.clone());
        let site_dir = escape_html(&site_dir.display().to_string());

        let mut html = String::new();
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">\n<head>")?;
        writeln!(html, "<meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "<title>SEO Report - {}</title>", site_dir)?;
        writeln!(html, "<style>{}</style>", STYLESHEET)?;
        writeln!(html, "<script>{}</script>", TOGGLE_SCRIPT)?;
        writeln!(html, "</head>\n<body>\n<div class=\"container\">")?;

        writeln!(html, "<header>")?;
        writeln!(html, "<h1>SEO and Website Health Report</h1>")?;
        writeln!(html, "<p>Analysis of <strong>{}</strong></p>", site_dir)?;
        writeln!(html, "<p>Generated on <em>{}</em></p>", timestamp)?;
        writeln!(html, "</header>")?;

        writeln!(html, "<h2>Summary</h2>\n<div class=\"summary-cards\">")?;
        summary_card(&mut html, "Pages Scanned", audit.pages.len(), None)?;
        summary_card(&mut html, "Meta Tag Issues", audit.meta_issues.len(), Some("warning"))?;
        summary_card(&mut html, "Heading Issues", audit.heading_issues.len(), Some("warning"))?;
        summary_card(
            &mut html,
            "Images Without Alt",
            audit.images_without_alt.len(),
            Some("warning"),
        )?;
        summary_card(&mut html, "Broken Links", broken.len(), Some("error"))?;
        summary_card(&mut html, "Large Pages", audit.large_pages.len(), Some("warning"))?;
        summary_card(&mut html, "External Links", audit.external_links.len(), None)?;
        writeln!(html, "</div>")?;

        if !audit.meta_issues.is_empty() {
            issue_table(&mut html, "Pages with Meta Tag Issues", &audit.meta_issues)?;
        }
        if !audit.heading_issues.is_empty() {
            issue_table(
                &mut html,
                "Pages with Heading Structure Issues",
                &audit.heading_issues,
            )?;
        }

        if !audit.images_without_alt.is_empty() {
            writeln!(html, "<h2>Images Without Alt Text</h2>")?;
            writeln!(
                html,
                "<p>Alternative text is essential for accessibility and SEO.</p>"
            )?;
            writeln!(html, "<table>\n<thead><tr><th>Page</th><th>Image Source</th></tr></thead>\n<tbody>")?;
            for img in &audit.images_without_alt {
                writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape_html(&img.path),
                    escape_html(&img.src)
                )?;
            }
            writeln!(html, "</tbody>\n</table>")?;
        }

        if !broken.is_empty() {
            writeln!(html, "<h2>Broken Links</h2>")?;
            writeln!(
                html,
                "<p class=\"status-error\">These links returned errors and should be fixed.</p>"
            )?;
            writeln!(html, "<table>\n<thead><tr><th>Source Page</th><th>Link</th><th>Status</th></tr></thead>\n<tbody>")?;
            for link in broken {
                writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td class=\"status-error\">{}</td></tr>",
                    escape_html(&link.source),
                    escape_html(&link.link),
                    escape_html(&link.status.to_string())
                )?;
            }
            writeln!(html, "</tbody>\n</table>")?;
        }

        if !audit.large_pages.is_empty() {
            writeln!(html, "<h2>Large Pages (&gt;500KB)</h2>")?;
            writeln!(
                html,
                "<p class=\"status-warning\">These pages may load slowly, especially on mobile devices.</p>"
            )?;
            writeln!(html, "<table>\n<thead><tr><th>Page</th><th>Size</th></tr></thead>\n<tbody>")?;
            for page in &audit.large_pages {
                writeln!(
                    html,
                    "<tr><td>{}</td><td class=\"status-warning\">{:.2} KB</td></tr>",
                    escape_html(&page.path),
                    page.size_kb
                )?;
            }
            writeln!(html, "</tbody>\n</table>")?;
        }

        writeln!(html, "<h2>Page Titles and Descriptions</h2>")?;
        writeln!(html, "<div class=\"expandable\">Click to view all pages</div>")?;
        writeln!(html, "<div class=\"content\">")?;
        writeln!(html, "<table>\n<thead><tr><th>Page</th><th>Title</th><th>Description</th></tr></thead>\n<tbody>")?;
        for page in &audit.pages {
            writeln!(
                html,
                "<tr><td>{}</td>{}{}</tr>",
                escape_html(&page.path),
                length_cell(page.title.as_deref(), TITLE_MIN_CHARS, TITLE_MAX_CHARS),
                length_cell(
                    page.description.as_deref(),
                    DESCRIPTION_MIN_CHARS,
                    DESCRIPTION_MAX_CHARS
                )
            )?;
        }
        writeln!(html, "</tbody>\n</table>\n</div>")?;

        if !audit.external_links.is_empty() {
            writeln!(html, "<h2>External Links</h2>")?;
            writeln!(
                html,
                "<div class=\"expandable\">Click to view all external links</div>"
            )?;
            writeln!(html, "<div class=\"content\">")?;
            writeln!(html, "<table>\n<thead><tr><th>URL</th></tr></thead>\n<tbody>")?;
            for link in &audit.external_links {
                let link = escape_html(link);
                writeln!(
                    html,
                    "<tr><td><a href=\"{}\" target=\"_blank\">{}</a></td></tr>",
                    link, link
                )?;
            }
            writeln!(html, "</tbody>\n</table>\n</div>")?;
        }

        writeln!(html, "<div class=\"meta\">")?;
        writeln!(html, "<p>Report generated on {}</p>", timestamp)?;
        writeln!(
            html,
            "<p>Analyzed {} pages in {}</p>",
            audit.pages.len(),
            site_dir
        )?;
        writeln!(
            html,
            "<p>Ran on sitecheck version {}, {}</p>",
            escape_html(&self.tool_version),
            std::env::consts::OS
        )?;
        writeln!(html, "</div>\n</div>\n</body>\n</html>")?;

        Ok(html)
    }
}

/// Cards with a `tone` turn green when the count is zero
fn summary_card(html: &mut String, label: &str, count: usize, tone: Option<&str>) -> Result<()> {
    let class = match tone {
        Some(tone) if count > 0 => format!("card {}", tone),
        Some(_) => "card success".to_string(),
        None => "card".to_string(),
    };
    writeln!(
        html,
        "<div class=\"{}\"><h3>{}</h3><p>{}</p></div>",
        class, label, count
    )?;
    Ok(())
}

fn issue_table(html: &mut String, heading: &str, pages: &[PageIssues]) -> Result<()> {
    writeln!(html, "<h2>{}</h2>", heading)?;
    writeln!(html, "<table>\n<thead><tr><th>Page</th><th>Issues</th></tr></thead>\n<tbody>")?;
    for page in pages {
        write!(html, "<tr><td>{}</td><td><ul class=\"issue-list\">", escape_html(&page.path))?;
        for issue in &page.issues {
            write!(html, "<li>{}</li>", issue)?;
        }
        writeln!(html, "</ul></td></tr>")?;
    }
    writeln!(html, "</tbody>\n</table>")?;
    Ok(())
}

fn length_cell(value: Option<&str>, min: usize, max: usize) -> String {
    match value {
        None => "<td><span class=\"status-error\">MISSING</span></td>".to_string(),
        Some(text) if length_out_of_range(text.chars().count(), min, max) => {
            format!("<td class=\"status-warning\">{}</td>", escape_html(text))
        }
        Some(text) => format!("<td>{}</td>", escape_html(text)),
    }
}

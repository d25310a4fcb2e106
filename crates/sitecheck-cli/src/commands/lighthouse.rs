use crate::SummaryFormat;
use anyhow::Result;
use sitecheck_core::lighthouse::{
    LighthouseSummary, MarkdownRenderer, RenderContext, ReportReader,
};
use std::path::Path;
use std::process::Command;

/// Load every report in `dir` and aggregate it
pub fn summarize(dir: &Path) -> Result<LighthouseSummary> {
    tracing::debug!("Summarizing Lighthouse reports in: {}", dir.display());

    let reports = ReportReader::from_dir(dir)?;
    Ok(LighthouseSummary::from_reports(&reports))
}

pub fn execute(dir: &Path, format: SummaryFormat) -> Result<()> {
    let summary = summarize(dir)?;

    match format {
        SummaryFormat::Markdown => {
            let commit = git_short_commit().unwrap_or_else(|| "unknown".to_string());
            let ctx = RenderContext::new(commit);
            print!("{}", MarkdownRenderer::default().render(&summary, &ctx)?);
        }
        SummaryFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// First 8 characters of `git rev-parse HEAD`, if git is available and the
/// working directory is inside a repository
pub fn git_short_commit() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        tracing::debug!("git rev-parse HEAD exited with {}", output.status);
        return None;
    }

    let hash: String = String::from_utf8_lossy(&output.stdout)
        .trim()
        .chars()
        .take(8)
        .collect();
    (!hash.is_empty()).then_some(hash)
}

use super::{Indicator, LighthouseSummary, recommendation, status_label};
use crate::Result;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Values stamped into the report that do not come from the artifacts
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub generated_at: DateTime<Utc>,
    /// Short commit hash, or `unknown`
    pub commit: String,
}

impl RenderContext {
    pub fn new(commit: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            commit: commit.into(),
        }
    }
}

/// Renders a [`LighthouseSummary`] as a Markdown document suitable for a PR
/// comment
pub struct MarkdownRenderer {
    top_opportunities: usize,
}

impl MarkdownRenderer {
    pub fn new(top_opportunities: usize) -> Self {
        Self { top_opportunities }
    }

    pub fn render(&self, summary: &LighthouseSummary, ctx: &RenderContext) -> Result<String> {
        let mut md = String::new();
        let runs = summary.reports_analyzed;
        let timestamp = ctx.generated_at.format("%Y-%m-%d %H:%M:%S");

        writeln!(
            md,
            "# 🚦 Lighthouse Report Summary ({} run{})\n",
            runs,
            if runs > 1 { "s" } else { "" }
        )?;
        writeln!(md, "**Generated:** {} UTC", timestamp)?;
        writeln!(md, "**Reports analyzed:** {}\n", runs)?;

        let overall = summary.scores.overall();
        writeln!(
            md,
            "## {} Overall Performance: {}%\n",
            Indicator::for_overall(overall).emoji(),
            (overall * 100.0).round() as i64
        )?;

        writeln!(md, "## 📊 Detailed Scores\n")?;
        writeln!(md, "| Category       | Score | Status | Range | Recommendation |")?;
        writeln!(md, "| -------------- | -----:| ------ | ----- | -------------- |")?;
        for category in &summary.scores.categories {
            writeln!(
                md,
                "| {:14} | {} {}% | {} | {} | {} |",
                category.category.label(),
                Indicator::for_category(category.average).emoji(),
                category.percent(),
                status_label(category.average),
                category.range_label(),
                recommendation(category.category, category.average)
            )?;
        }

        writeln!(md, "\n![Lighthouse Scores]({})\n", summary.chart_url)?;

        writeln!(md, "## 🔍 Performance Insights\n")?;
        for insight in &summary.insights {
            writeln!(md, "- {}", insight)?;
        }

        writeln!(md, "\n## 📈 Key Metrics\n")?;
        writeln!(md, "| Metric | Average | Best | Worst |")?;
        writeln!(md, "| ------ | -------:| ----:| -----:|")?;
        for metric in &summary.metrics {
            if let Some(stats) = &metric.stats {
                writeln!(
                    md,
                    "| {} | {:.1} | {:.1} | {:.1} |",
                    metric.label, stats.average, stats.best, stats.worst
                )?;
            }
        }

        writeln!(md, "\n## 🎯 Top Opportunities\n")?;
        for (i, opportunity) in summary
            .opportunities
            .iter()
            .take(self.top_opportunities)
            .enumerate()
        {
            writeln!(
                md,
                "{}. **{}** - Potential savings: {:.0}ms",
                i + 1,
                opportunity.title,
                opportunity.average_savings_ms()
            )?;
            writeln!(md, "   {}\n", opportunity.short_description())?;
        }

        writeln!(md, "\n---")?;
        writeln!(md, "*Generated by sitecheck at {}*", timestamp)?;
        writeln!(md, "*Commit: `{}`*", ctx.commit)?;

        Ok(md)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(5)
    }
}

mod chart;
mod markdown;
mod metrics;
mod opportunities;
mod reader;
mod scores;
mod types;

pub use chart::{ChartUrlBuilder, QUICKCHART_ENDPOINT};
pub use markdown::{MarkdownRenderer, RenderContext};
pub use metrics::{MetricDefinition, MetricExtractor, MetricStats, MetricSummary, KEY_METRICS};
pub use opportunities::{Opportunity, OpportunityRanker, DESCRIPTION_LIMIT};
pub use reader::ReportReader;
pub use scores::{
    CategorySummary, Indicator, ScoreAggregator, ScoreSummary, insights, recommendation,
    status_label,
};
pub use types::*;

use serde::Serialize;

/// Everything the Lighthouse summary renders, computed in one pass
#[derive(Debug, Clone, Serialize)]
pub struct LighthouseSummary {
    pub reports_analyzed: usize,
    pub scores: ScoreSummary,
    pub metrics: Vec<MetricSummary>,
    pub opportunities: Vec<Opportunity>,
    pub insights: Vec<String>,
    pub chart_url: String,
}

impl LighthouseSummary {
    pub fn from_reports(reports: &[LighthouseReport]) -> Self {
        let scores = ScoreAggregator.aggregate(reports);
        let metrics = MetricExtractor::default().aggregate(reports);
        let opportunities = OpportunityRanker.aggregate(reports);
        let insights = insights(&scores);
        let chart_url = ChartUrlBuilder::default().pie_chart(&scores);

        tracing::info!(
            "Aggregated {} reports: overall {:.0}%, {} opportunities",
            reports.len(),
            scores.overall() * 100.0,
            opportunities.len()
        );

        Self {
            reports_analyzed: reports.len(),
            scores,
            metrics,
            opportunities,
            insights,
            chart_url,
        }
    }
}

/// A pass over a set of Lighthouse artifacts producing one derived value
pub trait Aggregator {
    type Output;

    fn aggregate(&self, reports: &[LighthouseReport]) -> Self::Output;
}

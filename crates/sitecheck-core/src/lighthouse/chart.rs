use super::{Indicator, ScoreSummary};
use serde_json::json;
use url::form_urlencoded;

pub const QUICKCHART_ENDPOINT: &str = "https://quickchart.io/chart";

/// Encodes category averages as a chart-service request URL
///
/// The chart config travels as compact JSON in the `c` query parameter.
pub struct ChartUrlBuilder {
    endpoint: String,
}

impl ChartUrlBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn pie_chart(&self, scores: &ScoreSummary) -> String {
        let labels: Vec<&str> = scores.categories.iter().map(|c| c.category.label()).collect();
        let values: Vec<i64> = scores.categories.iter().map(|c| c.percent()).collect();
        let colors: Vec<String> = scores
            .categories
            .iter()
            .map(|c| format!("#{}", Indicator::for_category(c.average).hex()))
            .collect();

        let config = json!({
            "type": "pie",
            "data": {
                "labels": labels,
                "datasets": [{
                    "data": values,
                    "backgroundColor": colors,
                }],
            },
        });

        let encoded: String = form_urlencoded::byte_serialize(config.to_string().as_bytes()).collect();
        format!("{}?c={}", self.endpoint, encoded)
    }
}

impl Default for ChartUrlBuilder {
    fn default() -> Self {
        Self::new(QUICKCHART_ENDPOINT)
    }
}

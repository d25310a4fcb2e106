use super::{Aggregator, LighthouseReport};
use serde::Serialize;

/// A numeric audit surfaced in the key-metrics table
#[derive(Debug, Clone, Copy)]
pub struct MetricDefinition {
    pub label: &'static str,
    pub audit_id: &'static str,
    /// `numericValue` is divided by this before aggregation
    pub divisor: f64,
}

pub const KEY_METRICS: [MetricDefinition; 5] = [
    MetricDefinition {
        label: "First Contentful Paint (s)",
        audit_id: "first-contentful-paint",
        divisor: 1000.0,
    },
    MetricDefinition {
        label: "Largest Contentful Paint (s)",
        audit_id: "largest-contentful-paint",
        divisor: 1000.0,
    },
    MetricDefinition {
        label: "Total Blocking Time (ms)",
        audit_id: "total-blocking-time",
        divisor: 1.0,
    },
    MetricDefinition {
        label: "Cumulative Layout Shift",
        audit_id: "cumulative-layout-shift",
        divisor: 1.0,
    },
    MetricDefinition {
        label: "Speed Index",
        audit_id: "speed-index",
        divisor: 1000.0,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStats {
    pub average: f64,
    pub best: f64,
    pub worst: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub label: String,
    pub audit_id: String,
    /// `None` when no report carried a value for this metric
    pub stats: Option<MetricStats>,
}

pub struct MetricExtractor {
    metrics: Vec<MetricDefinition>,
}

impl MetricExtractor {
    pub fn new(metrics: Vec<MetricDefinition>) -> Self {
        Self { metrics }
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new(KEY_METRICS.to_vec())
    }
}

impl Aggregator for MetricExtractor {
    type Output = Vec<MetricSummary>;

    fn aggregate(&self, reports: &[LighthouseReport]) -> Vec<MetricSummary> {
        self.metrics
            .iter()
            .map(|metric| {
                let values: Vec<f64> = reports
                    .iter()
                    .filter_map(|r| r.numeric_value(metric.audit_id))
                    .map(|v| v / metric.divisor)
                    .collect();

                let stats = if values.is_empty() {
                    None
                } else {
                    Some(MetricStats {
                        average: values.iter().sum::<f64>() / values.len() as f64,
                        best: values.iter().copied().fold(f64::INFINITY, f64::min),
                        worst: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                        samples: values.len(),
                    })
                };

                MetricSummary {
                    label: metric.label.to_string(),
                    audit_id: metric.audit_id.to_string(),
                    stats,
                }
            })
            .collect()
    }
}

use super::{Aggregator, CategoryKey, LighthouseReport};
use serde::Serialize;

/// Average and spread of one category across all reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: CategoryKey,
    /// Mean of the present scores, or 0 when no report supplies one
    pub average: f64,
    /// Lowest observed score, in percent
    pub min_percent: Option<f64>,
    /// Highest observed score, in percent
    pub max_percent: Option<f64>,
    pub samples: usize,
}

impl CategorySummary {
    pub fn percent(&self) -> i64 {
        (self.average * 100.0).round() as i64
    }

    /// `"<min>%-<max>%"`, or `N/A` without samples
    pub fn range_label(&self) -> String {
        match (self.min_percent, self.max_percent) {
            (Some(min), Some(max)) => format!("{:.0}%-{:.0}%", min, max),
            _ => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub categories: Vec<CategorySummary>,
}

impl ScoreSummary {
    pub fn get(&self, category: CategoryKey) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn average(&self, category: CategoryKey) -> f64 {
        self.get(category).map(|c| c.average).unwrap_or(0.0)
    }

    /// Mean of the category averages; categories without data count as 0
    pub fn overall(&self) -> f64 {
        if self.categories.is_empty() {
            return 0.0;
        }
        self.categories.iter().map(|c| c.average).sum::<f64>() / self.categories.len() as f64
    }
}

pub struct ScoreAggregator;

impl Aggregator for ScoreAggregator {
    type Output = ScoreSummary;

    fn aggregate(&self, reports: &[LighthouseReport]) -> ScoreSummary {
        let categories = CategoryKey::ALL
            .iter()
            .map(|&category| {
                let scores: Vec<f64> = reports
                    .iter()
                    .filter_map(|r| r.category_score(category))
                    .collect();

                let average = if scores.is_empty() {
                    0.0
                } else {
                    scores.iter().sum::<f64>() / scores.len() as f64
                };
                let min_percent = scores.iter().copied().reduce(f64::min).map(|s| s * 100.0);
                let max_percent = scores.iter().copied().reduce(f64::max).map(|s| s * 100.0);

                tracing::debug!(
                    "Category {}: avg={:.3} over {} samples",
                    category,
                    average,
                    scores.len()
                );

                CategorySummary {
                    category,
                    average,
                    min_percent,
                    max_percent,
                    samples: scores.len(),
                }
            })
            .collect();

        ScoreSummary { categories }
    }
}

/// Traffic-light indicator for a score
///
/// The per-category rows and the chart colours break at 0.9/0.5, while the
/// overall headline breaks at 0.9/0.7. Both boundaries are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Orange,
    Red,
}

impl Indicator {
    pub fn for_category(score: f64) -> Self {
        if score >= 0.9 {
            Indicator::Green
        } else if score >= 0.5 {
            Indicator::Orange
        } else {
            Indicator::Red
        }
    }

    pub fn for_overall(score: f64) -> Self {
        if score >= 0.9 {
            Indicator::Green
        } else if score >= 0.7 {
            Indicator::Orange
        } else {
            Indicator::Red
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Indicator::Green => "🟢",
            Indicator::Orange => "🟠",
            Indicator::Red => "🔴",
        }
    }

    /// Hex colour without the leading `#`
    pub fn hex(&self) -> &'static str {
        match self {
            Indicator::Green => "4CAF50",
            Indicator::Orange => "FF9800",
            Indicator::Red => "F44336",
        }
    }
}

/// Status word for the detailed scores table
pub fn status_label(score: f64) -> &'static str {
    if score >= 0.9 {
        "Excellent"
    } else if score >= 0.7 {
        "Good"
    } else if score >= 0.5 {
        "Needs Improvement"
    } else {
        "Poor"
    }
}

pub fn recommendation(category: CategoryKey, score: f64) -> &'static str {
    match category {
        CategoryKey::Performance => {
            if score < 0.5 {
                "Optimize images, reduce JS bundles, enable caching"
            } else if score < 0.9 {
                "Fine-tune resource loading, consider lazy loading"
            } else {
                "Maintain current optimizations"
            }
        }
        CategoryKey::Accessibility => {
            if score < 0.9 {
                "Add alt text, improve color contrast, enhance keyboard navigation"
            } else {
                "Excellent accessibility standards maintained"
            }
        }
        CategoryKey::BestPractices => {
            if score < 0.9 {
                "Update dependencies, fix console errors, use HTTPS"
            } else {
                "Following web best practices well"
            }
        }
        CategoryKey::Seo => {
            if score < 0.9 {
                "Add meta descriptions, improve structured data"
            } else {
                "SEO optimization is excellent"
            }
        }
    }
}

/// Qualitative one-liners derived from the category averages
pub fn insights(scores: &ScoreSummary) -> Vec<String> {
    let mut insights = Vec::new();

    let performance = scores.average(CategoryKey::Performance);
    if performance >= 0.9 {
        insights.push("🚀 Excellent performance! Your site loads quickly for users.");
    } else if performance >= 0.7 {
        insights.push("⚡ Good performance with room for optimization.");
    } else {
        insights.push("🐌 Performance needs attention - users may experience slow loading.");
    }

    let accessibility = scores.average(CategoryKey::Accessibility);
    if accessibility >= 0.95 {
        insights.push("♿ Outstanding accessibility - inclusive for all users!");
    } else if accessibility < 0.8 {
        insights.push("⚠️ Accessibility improvements needed for better user inclusion.");
    }

    let seo = scores.average(CategoryKey::Seo);
    if seo >= 0.9 {
        insights.push("🔍 SEO optimized - search engines can easily discover your content.");
    } else if seo < 0.8 {
        insights.push("📈 SEO improvements could boost search visibility.");
    }

    if scores.average(CategoryKey::BestPractices) < 0.8 {
        insights.push("🛡️ Security and best practices need attention.");
    }

    insights.into_iter().map(String::from).collect()
}

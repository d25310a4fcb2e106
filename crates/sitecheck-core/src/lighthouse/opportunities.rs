use super::{Aggregator, LighthouseReport};
use crate::text::truncate_with_ellipsis;
use serde::Serialize;
use std::collections::HashMap;

/// Rendered opportunity descriptions are cut to this many characters
pub const DESCRIPTION_LIMIT: usize = 100;

/// A failing audit with estimated time savings, merged across reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub audit_id: String,
    pub title: String,
    pub description: String,
    pub total_savings_ms: f64,
    pub count: usize,
}

impl Opportunity {
    pub fn average_savings_ms(&self) -> f64 {
        self.total_savings_ms / self.count as f64
    }

    pub fn short_description(&self) -> String {
        truncate_with_ellipsis(&self.description, DESCRIPTION_LIMIT)
    }
}

/// Merges opportunities by audit id and ranks them by average savings
pub struct OpportunityRanker;

impl Aggregator for OpportunityRanker {
    type Output = Vec<Opportunity>;

    fn aggregate(&self, reports: &[LighthouseReport]) -> Vec<Opportunity> {
        let mut ranked: Vec<Opportunity> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for report in reports {
            for (audit_id, audit) in &report.audits {
                let Some(score) = audit.score else { continue };
                let savings = audit.savings_ms().unwrap_or(0.0);
                if score >= 1.0 || savings <= 0.0 {
                    continue;
                }

                match index.get(audit_id.as_str()) {
                    Some(&i) => {
                        ranked[i].total_savings_ms += savings;
                        ranked[i].count += 1;
                    }
                    None => {
                        index.insert(audit_id.as_str(), ranked.len());
                        ranked.push(Opportunity {
                            audit_id: audit_id.clone(),
                            title: audit.title.clone().unwrap_or_else(|| audit_id.clone()),
                            description: audit.description.clone().unwrap_or_default(),
                            total_savings_ms: savings,
                            count: 1,
                        });
                    }
                }
            }
        }

        // stable: equal averages keep first-seen order
        ranked.sort_by(|a, b| b.average_savings_ms().total_cmp(&a.average_savings_ms()));

        tracing::debug!("Found {} distinct opportunities", ranked.len());
        ranked
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One Lighthouse result (LHR) artifact
///
/// Only the fields the aggregators read are modelled; everything else in the
/// artifact is ignored on deserialization. Audits keep the order they
/// appear in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LighthouseReport {
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryResult>,
    #[serde(default)]
    pub audits: IndexMap<String, AuditResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryResult {
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<AuditDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditDetails {
    #[serde(default)]
    pub overall_savings_ms: Option<f64>,
}

impl LighthouseReport {
    /// Score of a category, if the artifact supplies a non-null one
    pub fn category_score(&self, category: CategoryKey) -> Option<f64> {
        self.categories
            .get(category.as_str())
            .and_then(|c| c.score)
    }

    pub fn numeric_value(&self, audit_id: &str) -> Option<f64> {
        self.audits.get(audit_id).and_then(|a| a.numeric_value)
    }
}

impl AuditResult {
    pub fn savings_ms(&self) -> Option<f64> {
        self.details.as_ref().and_then(|d| d.overall_savings_ms)
    }
}

/// The four top-level Lighthouse categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKey {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 4] = [
        CategoryKey::Performance,
        CategoryKey::Accessibility,
        CategoryKey::BestPractices,
        CategoryKey::Seo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Performance => "performance",
            CategoryKey::Accessibility => "accessibility",
            CategoryKey::BestPractices => "best-practices",
            CategoryKey::Seo => "seo",
        }
    }

    /// Display label: first letter upper-cased, rest lower-cased
    pub fn label(&self) -> &'static str {
        match self {
            CategoryKey::Performance => "Performance",
            CategoryKey::Accessibility => "Accessibility",
            CategoryKey::BestPractices => "Best-practices",
            CategoryKey::Seo => "Seo",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

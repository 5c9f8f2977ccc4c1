// Downstream notification models
use super::diagnosis::IssueCategory;
use super::schedule::Priority;
use serde::Serialize;

/// Ordered alert strings from the anomaly monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnomalyReport {
    pub alerts: Vec<String>,
}

impl AnomalyReport {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityFlag {
    Investigate,
    Monitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendedAction {
    #[serde(rename = "pre-stock parts")]
    PreStockParts,
    #[serde(rename = "standard-prep")]
    StandardPrep,
}

/// Recommendation sent back to the manufacturer's quality team
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OemFeedback {
    pub oem_quality_flag: QualityFlag,
    pub recommended_action: RecommendedAction,
}

/// Flat record for analytics ingestion. Keep the shape stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsRecord {
    pub customer_id: String,
    pub issue_category: IssueCategory,
    pub risk_score: f64,
    pub priority: Priority,
    pub center_id: String,
}

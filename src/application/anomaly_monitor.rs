// Anomaly monitor - Cross-checks the voice signal against the risk score
use crate::domain::diagnosis::RiskAssessment;
use crate::domain::feedback::AnomalyReport;
use crate::domain::voice::{Intent, SymptomProfile};

pub const HIGH_RISK_WITHOUT_INTENT: &str = "High risk without explicit service intent";
pub const SEVERITY_RISK_MISMATCH: &str = "Mismatched high severity vs low model risk";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyMonitor;

impl AnomalyMonitor {
    /// Both rules are independent; output order is fixed.
    pub fn monitor(&self, profile: &SymptomProfile, risk: &RiskAssessment) -> AnomalyReport {
        let mut alerts = Vec::new();
        if profile.intent != Intent::ServiceRequest && risk.risk_score > 0.8 {
            alerts.push(HIGH_RISK_WITHOUT_INTENT.to_string());
        }
        if profile.severity > 0.9 && risk.risk_score < 0.3 {
            alerts.push(SEVERITY_RISK_MISMATCH.to_string());
        }
        AnomalyReport { alerts }
    }
}

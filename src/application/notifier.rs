// Notifier - OEM feedback and analytics aggregation
use crate::domain::diagnosis::{IssueCategory, RiskAssessment};
use crate::domain::feedback::{AnalyticsRecord, OemFeedback, QualityFlag, RecommendedAction};
use crate::domain::schedule::{Appointment, Priority};
use crate::domain::voice::VoiceSummary;

#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier;

impl Notifier {
    pub fn summarize(&self, risk: &RiskAssessment, appointment: &Appointment) -> OemFeedback {
        let oem_quality_flag = match risk.issue_category {
            IssueCategory::LubricationOilPressure | IssueCategory::CoolingOverheat => {
                QualityFlag::Investigate
            }
            _ => QualityFlag::Monitor,
        };
        let recommended_action = match appointment.priority {
            Priority::Urgent => RecommendedAction::PreStockParts,
            Priority::Normal => RecommendedAction::StandardPrep,
        };
        OemFeedback {
            oem_quality_flag,
            recommended_action,
        }
    }

    pub fn aggregate(
        &self,
        voice: &VoiceSummary,
        risk: &RiskAssessment,
        appointment: &Appointment,
    ) -> AnalyticsRecord {
        AnalyticsRecord {
            customer_id: voice.customer_id.clone(),
            issue_category: risk.issue_category,
            risk_score: risk.risk_score,
            priority: appointment.priority,
            center_id: appointment.center_id.clone(),
        }
    }
}

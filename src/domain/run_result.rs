// Aggregate result of one pipeline run
use super::diagnosis::RiskAssessment;
use super::feedback::{AnalyticsRecord, AnomalyReport, OemFeedback};
use super::schedule::Appointment;
use super::telemetry::NormalizedTelemetry;
use super::voice::VoiceSummary;
use serde::Serialize;

/// Everything a caller gets back. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub voice_summary: VoiceSummary,
    pub telemetry_features: NormalizedTelemetry,
    pub diagnosis: RiskAssessment,
    pub schedule: Appointment,
    pub security_alerts: AnomalyReport,
    pub oem_feedback: OemFeedback,
    pub analytics: AnalyticsRecord,
}

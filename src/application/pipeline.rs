// Pipeline - Runs the six stages in order for one request
use crate::application::anomaly_monitor::AnomalyMonitor;
use crate::application::learned_model::LearnedModel;
use crate::application::notifier::Notifier;
use crate::application::risk_classifier::RiskClassifier;
use crate::application::run_request::{Customer, RawTelemetryMap, reading_from_raw};
use crate::application::scheduler::{Clock, Scheduler};
use crate::application::symptom_extractor::SymptomExtractor;
use crate::application::telemetry_normalizer::TelemetryNormalizer;
use crate::domain::error::PipelineError;
use crate::domain::run_result::RunResult;
use crate::domain::telemetry::{GeoPoint, TelemetryReading};
use crate::domain::voice::{VoiceCall, VoiceSummary};
use std::sync::Arc;

/// Holds only immutable stage configuration, so one instance can serve
/// concurrent requests.
#[derive(Clone)]
pub struct Pipeline {
    extractor: SymptomExtractor,
    normalizer: TelemetryNormalizer,
    classifier: RiskClassifier,
    scheduler: Scheduler,
    monitor: AnomalyMonitor,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
    default_location: GeoPoint,
}

impl Pipeline {
    pub fn new(
        model: Option<Arc<dyn LearnedModel>>,
        clock: Arc<dyn Clock>,
        default_location: GeoPoint,
    ) -> Self {
        Self {
            extractor: SymptomExtractor::default(),
            normalizer: TelemetryNormalizer,
            classifier: RiskClassifier::new(model),
            scheduler: Scheduler::new(clock.clone()),
            monitor: AnomalyMonitor,
            notifier: Notifier,
            clock,
            default_location,
        }
    }

    pub fn uses_learned_model(&self) -> bool {
        self.classifier.uses_learned_model()
    }

    pub fn run(
        &self,
        voice_text: &str,
        telemetry: &RawTelemetryMap,
        customer: &Customer,
    ) -> Result<RunResult, PipelineError> {
        let (call, reading) = self.prepare(voice_text, telemetry, customer)?;
        self.run_call(&call, &reading)
    }

    /// Validates the raw inputs into the typed call and reading
    pub fn prepare(
        &self,
        voice_text: &str,
        telemetry: &RawTelemetryMap,
        customer: &Customer,
    ) -> Result<(VoiceCall, TelemetryReading), PipelineError> {
        let location = customer.location.unwrap_or(self.default_location);
        let call = VoiceCall {
            customer_id: customer.id.clone(),
            text: voice_text.to_string(),
            captured_at: self.clock.now(),
            location,
        };
        let reading = reading_from_raw(telemetry, location).inspect_err(|e| {
            tracing::warn!(customer_id = %customer.id, error = %e, "Rejected telemetry");
        })?;
        Ok((call, reading))
    }

    pub fn run_call(
        &self,
        call: &VoiceCall,
        reading: &TelemetryReading,
    ) -> Result<RunResult, PipelineError> {
        let profile = self.extractor.extract(&call.text);
        tracing::debug!(
            symptoms = profile.symptoms.len(),
            severity = profile.severity,
            "Extracted symptoms"
        );

        let features = self.normalizer.normalize(reading)?;
        tracing::debug!(error_codes = features.error_code_count, "Normalized telemetry");

        let diagnosis = self
            .classifier
            .classify(&profile, &features)
            .inspect_err(|e| tracing::warn!(customer_id = %call.customer_id, error = %e, "Classification failed"))?;
        tracing::debug!(
            risk_score = diagnosis.risk_score,
            category = %diagnosis.issue_category,
            "Classified risk"
        );

        let schedule = self.scheduler.schedule(call.location, &diagnosis);
        tracing::debug!(center = %schedule.center_id, eta_minutes = schedule.eta_minutes, "Scheduled");

        let security_alerts = self.monitor.monitor(&profile, &diagnosis);
        if !security_alerts.is_empty() {
            tracing::debug!(customer_id = %call.customer_id, alerts = ?security_alerts.alerts, "Anomalies flagged");
        }

        let voice_summary = VoiceSummary {
            customer_id: call.customer_id.clone(),
            profile,
        };
        let oem_feedback = self.notifier.summarize(&diagnosis, &schedule);
        let analytics = self.notifier.aggregate(&voice_summary, &diagnosis, &schedule);

        tracing::info!(
            customer_id = %call.customer_id,
            captured_at = %call.captured_at,
            risk_score = diagnosis.risk_score,
            category = %diagnosis.issue_category,
            center = %schedule.center_id,
            alerts = security_alerts.alerts.len(),
            "Pipeline run complete"
        );

        Ok(RunResult {
            voice_summary,
            telemetry_features: features,
            diagnosis,
            schedule,
            security_alerts,
            oem_feedback,
            analytics,
        })
    }
}

// Risk classifier - Fuses symptom severity and telemetry into a risk assessment
use crate::application::learned_model::LearnedModel;
use crate::domain::diagnosis::{IssueCategory, RiskAssessment, round_to};
use crate::domain::error::PipelineError;
use crate::domain::telemetry::NormalizedTelemetry;
use crate::domain::voice::{SymptomProfile, SymptomTag};
use std::collections::BTreeMap;
use std::sync::Arc;

const W_ENGINE: f64 = 0.6;
const W_BATTERY: f64 = 0.5;
const W_OIL: f64 = 0.4;
const W_VIBRATION: f64 = 0.3;
const W_ERROR_CODES: f64 = 0.25;
const W_ODOMETER: f64 = 0.2;
const W_VOICE: f64 = 0.5;
const ERROR_CODE_SATURATION: f64 = 5.0;
const LOGISTIC_GAIN: f64 = 3.0;
const LOGISTIC_MIDPOINT: f64 = 0.6;

/// One row of the category decision list
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: IssueCategory,
    pub symptom: SymptomTag,
    pub feature: fn(&NormalizedTelemetry) -> f64,
    pub threshold: f64,
}

impl CategoryRule {
    pub fn matches(&self, profile: &SymptomProfile, features: &NormalizedTelemetry) -> bool {
        profile.has(self.symptom) || (self.feature)(features) > self.threshold
    }
}

/// Evaluated top to bottom, first match wins. Order is the tie-break policy.
pub const CATEGORY_RULES: [CategoryRule; 4] = [
    CategoryRule {
        category: IssueCategory::ElectricalBattery,
        symptom: SymptomTag::Battery,
        feature: |f: &NormalizedTelemetry| f.battery_drop_norm,
        threshold: 0.6,
    },
    CategoryRule {
        category: IssueCategory::CoolingOverheat,
        symptom: SymptomTag::Overheat,
        feature: |f: &NormalizedTelemetry| f.engine_temp_norm,
        threshold: 0.7,
    },
    CategoryRule {
        category: IssueCategory::LubricationOilPressure,
        symptom: SymptomTag::Oil,
        feature: |f: &NormalizedTelemetry| f.oil_pressure_low_norm,
        threshold: 0.6,
    },
    CategoryRule {
        category: IssueCategory::DrivetrainVibration,
        symptom: SymptomTag::Vibration,
        feature: |f: &NormalizedTelemetry| f.vibration_norm,
        threshold: 0.6,
    },
];

pub fn categorize(profile: &SymptomProfile, features: &NormalizedTelemetry) -> IssueCategory {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(profile, features))
        .map(|rule| rule.category)
        .unwrap_or(IssueCategory::GeneralInspection)
}

/// Fixed weighted-logistic fallback used when no model is configured
pub fn heuristic_risk(severity: f64, f: &NormalizedTelemetry) -> f64 {
    let linear = W_ENGINE * f.engine_temp_norm
        + W_BATTERY * f.battery_drop_norm
        + W_OIL * f.oil_pressure_low_norm
        + W_VIBRATION * f.vibration_norm
        + W_ERROR_CODES * (f.error_code_count / ERROR_CODE_SATURATION)
        + W_ODOMETER * f.odometer_norm
        + W_VOICE * severity;
    let risk = 1.0 / (1.0 + (-LOGISTIC_GAIN * (linear - LOGISTIC_MIDPOINT)).exp());
    risk.clamp(0.0, 1.0)
}

#[derive(Clone, Default)]
pub struct RiskClassifier {
    model: Option<Arc<dyn LearnedModel>>,
}

impl RiskClassifier {
    /// `None` selects the heuristic formula
    pub fn new(model: Option<Arc<dyn LearnedModel>>) -> Self {
        Self { model }
    }

    pub fn uses_learned_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn classify(
        &self,
        profile: &SymptomProfile,
        features: &NormalizedTelemetry,
    ) -> Result<RiskAssessment, PipelineError> {
        let risk = match &self.model {
            Some(model) => {
                let raw = features.to_raw_features();
                let p = model
                    .predict(&raw)
                    .map_err(|e| PipelineError::ClassifierFailure(format!("{e:#}")))?;
                if !p.is_finite() {
                    return Err(PipelineError::ClassifierFailure(format!(
                        "model returned non-finite probability {p}"
                    )));
                }
                p.clamp(0.0, 1.0)
            }
            None => heuristic_risk(profile.severity, features),
        };

        let mut signals: BTreeMap<String, f64> = features
            .entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        signals.insert("voice_severity".to_string(), profile.severity);

        Ok(RiskAssessment {
            risk_score: round_to(risk, 3),
            issue_category: categorize(profile, features),
            signals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::RawFeatureVector;
    use crate::domain::voice::Intent;
    use std::sync::Mutex;

    fn profile(tags: &[SymptomTag], severity: f64) -> SymptomProfile {
        SymptomProfile {
            symptoms: tags.iter().copied().collect(),
            severity,
            intent: Intent::ServiceRequest,
        }
    }

    fn features() -> NormalizedTelemetry {
        NormalizedTelemetry {
            engine_temp_norm: 0.65,
            battery_drop_norm: 0.2,
            oil_pressure_low_norm: 0.3,
            vibration_norm: 0.425,
            speed_norm: 25.0 / 180.0,
            odometer_norm: 0.6,
            error_code_count: 2.0,
        }
    }

    fn calm() -> NormalizedTelemetry {
        NormalizedTelemetry {
            engine_temp_norm: 0.0,
            battery_drop_norm: 0.0,
            oil_pressure_low_norm: 0.0,
            vibration_norm: 0.0,
            speed_norm: 0.0,
            odometer_norm: 0.0,
            error_code_count: 0.0,
        }
    }

    #[test]
    fn test_heuristic_reference_score() {
        let assessment = RiskClassifier::default()
            .classify(&profile(&[SymptomTag::Overheat], 0.8), &features())
            .unwrap();
        assert_eq!(assessment.risk_score, 0.907);
        assert_eq!(assessment.issue_category, IssueCategory::CoolingOverheat);
    }

    #[test]
    fn test_heuristic_stays_in_unit_interval() {
        let low = heuristic_risk(0.0, &calm());
        assert!(low > 0.0 && low < 0.2);

        let mut extreme = calm();
        extreme.engine_temp_norm = 1.0;
        extreme.battery_drop_norm = 1.0;
        extreme.oil_pressure_low_norm = 1.0;
        extreme.vibration_norm = 1.0;
        extreme.odometer_norm = 1.0;
        extreme.error_code_count = 500.0;
        let high = heuristic_risk(1.0, &extreme);
        assert!(high <= 1.0 && high > 0.99);
    }

    #[test]
    fn test_signals_include_all_features_and_voice_severity() {
        let assessment = RiskClassifier::default()
            .classify(&profile(&[], 0.25), &features())
            .unwrap();
        for (name, value) in features().entries() {
            assert_eq!(assessment.signals.get(name), Some(&value));
        }
        assert_eq!(assessment.signals.get("voice_severity"), Some(&0.25));
        assert_eq!(assessment.signals.len(), 8);
    }

    #[test]
    fn test_battery_rule_outranks_overheat_threshold() {
        let mut f = calm();
        f.battery_drop_norm = 0.7;
        f.engine_temp_norm = 0.9;
        assert_eq!(categorize(&profile(&[], 0.0), &f), IssueCategory::ElectricalBattery);
    }

    #[test]
    fn test_rule_order_and_thresholds() {
        let mut f = calm();
        assert_eq!(categorize(&profile(&[], 0.0), &f), IssueCategory::GeneralInspection);

        f.vibration_norm = 0.61;
        assert_eq!(categorize(&profile(&[], 0.0), &f), IssueCategory::DrivetrainVibration);

        f.oil_pressure_low_norm = 0.61;
        assert_eq!(categorize(&profile(&[], 0.0), &f), IssueCategory::LubricationOilPressure);

        // Thresholds are strict
        f.engine_temp_norm = 0.7;
        assert_eq!(categorize(&profile(&[], 0.0), &f), IssueCategory::LubricationOilPressure);

        assert_eq!(
            categorize(&profile(&[SymptomTag::Overheat], 0.0), &f),
            IssueCategory::CoolingOverheat
        );
        assert_eq!(
            categorize(&profile(&[SymptomTag::Battery, SymptomTag::Overheat], 0.0), &calm()),
            IssueCategory::ElectricalBattery
        );
    }

    #[test]
    fn test_stall_and_brake_fall_through_to_general() {
        assert_eq!(
            categorize(&profile(&[SymptomTag::Stall, SymptomTag::Brake], 0.5), &calm()),
            IssueCategory::GeneralInspection
        );
    }

    struct RecordingModel {
        seen: Mutex<Option<RawFeatureVector>>,
        output: f64,
    }

    impl LearnedModel for RecordingModel {
        fn predict(&self, features: &RawFeatureVector) -> anyhow::Result<f64> {
            *self.seen.lock().unwrap() = Some(*features);
            Ok(self.output)
        }
    }

    #[test]
    fn test_learned_path_receives_raw_units() {
        let model = Arc::new(RecordingModel { seen: Mutex::new(None), output: 0.42424 });
        let classifier = RiskClassifier::new(Some(model.clone()));
        assert!(classifier.uses_learned_model());

        let assessment = classifier.classify(&profile(&[], 0.0), &features()).unwrap();
        assert_eq!(assessment.risk_score, 0.424);

        let raw = model.seen.lock().unwrap().unwrap();
        assert!((raw.engine_temp_c - 102.5).abs() < 1e-9);
        assert!((raw.battery_voltage - 11.9).abs() < 1e-9);
        assert!((raw.oil_pressure_psi - 28.0).abs() < 1e-9);
        assert!((raw.vibration_g - 0.85).abs() < 1e-9);
        assert!((raw.speed_kph - 25.0).abs() < 1e-9);
        assert!((raw.odometer_km - 120_000.0).abs() < 1e-6);
        assert_eq!(raw.error_code_count, 2.0);
    }

    #[test]
    fn test_learned_output_is_clamped() {
        let model = Arc::new(RecordingModel { seen: Mutex::new(None), output: 1.7 });
        let assessment = RiskClassifier::new(Some(model))
            .classify(&profile(&[], 0.0), &features())
            .unwrap();
        assert_eq!(assessment.risk_score, 1.0);
    }

    struct BrokenModel;

    impl LearnedModel for BrokenModel {
        fn predict(&self, _features: &RawFeatureVector) -> anyhow::Result<f64> {
            anyhow::bail!("weights not loaded")
        }
    }

    #[test]
    fn test_model_error_is_not_masked() {
        let err = RiskClassifier::new(Some(Arc::new(BrokenModel)))
            .classify(&profile(&[], 0.0), &features())
            .unwrap_err();
        assert_eq!(err, PipelineError::ClassifierFailure("weights not loaded".to_string()));
    }

    #[test]
    fn test_nan_probability_is_a_failure() {
        let model = Arc::new(RecordingModel { seen: Mutex::new(None), output: f64::NAN });
        let err = RiskClassifier::new(Some(model))
            .classify(&profile(&[], 0.0), &features())
            .unwrap_err();
        assert!(matches!(err, PipelineError::ClassifierFailure(_)));
    }
}

// Voice call domain models
use super::telemetry::GeoPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// A transcribed customer call
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCall {
    pub customer_id: String,
    pub text: String,
    pub captured_at: DateTime<Utc>,
    pub location: GeoPoint,
}

/// Fixed symptom taxonomy. Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomTag {
    Overheat,
    Battery,
    Vibration,
    Oil,
    Stall,
    Brake,
}

impl SymptomTag {
    pub const ALL: [SymptomTag; 6] = [
        SymptomTag::Overheat,
        SymptomTag::Battery,
        SymptomTag::Vibration,
        SymptomTag::Oil,
        SymptomTag::Stall,
        SymptomTag::Brake,
    ];

    /// Substrings that fire this tag
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            SymptomTag::Overheat => &["overheat", "hot", "temperature", "smell burning"],
            SymptomTag::Battery => &["battery", "won't start", "no power", "low voltage"],
            SymptomTag::Vibration => &["vibration", "shaking", "rattle", "noise"],
            SymptomTag::Oil => &["oil", "leak", "pressure"],
            SymptomTag::Stall => &["stall", "engine stopped", "cut off"],
            SymptomTag::Brake => &["brake", "squeak", "soft pedal"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ServiceRequest,
    GeneralInquiry,
}

/// What the extractor read out of a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomProfile {
    pub symptoms: BTreeSet<SymptomTag>,
    pub severity: f64,
    pub intent: Intent,
}

impl SymptomProfile {
    pub fn has(&self, tag: SymptomTag) -> bool {
        self.symptoms.contains(&tag)
    }
}

/// Symptom profile attributed to the calling customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSummary {
    pub customer_id: String,
    #[serde(flatten)]
    pub profile: SymptomProfile,
}

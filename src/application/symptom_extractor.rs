// Text symptom extractor - Keyword matching over call transcripts
use crate::domain::diagnosis::round_to;
use crate::domain::voice::{Intent, SymptomProfile, SymptomTag};
use std::collections::BTreeSet;
use std::sync::Arc;

const URGENCY_PHRASES: [&str; 4] = ["urgent", "immediately", "breakdown", "won't start"];
const SERVICE_PHRASES: [&str; 2] = ["service", "appointment"];
const URGENT_SEVERITY_FLOOR: f64 = 0.8;
const SYMPTOMS_FOR_FULL_SEVERITY: f64 = 4.0;

/// Decides whether a phrase occurs in already lower-cased text
pub trait SymptomMatcher: Send + Sync {
    fn contains(&self, text: &str, phrase: &str) -> bool;
}

/// Plain substring test.
///
/// Known false positives: triggers fire inside longer words
/// ("hot" in "photo", "oil" in "toil").
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl SymptomMatcher for SubstringMatcher {
    fn contains(&self, text: &str, phrase: &str) -> bool {
        text.contains(phrase)
    }
}

#[derive(Clone)]
pub struct SymptomExtractor {
    matcher: Arc<dyn SymptomMatcher>,
}

impl Default for SymptomExtractor {
    fn default() -> Self {
        Self::new(Arc::new(SubstringMatcher))
    }
}

impl SymptomExtractor {
    pub fn new(matcher: Arc<dyn SymptomMatcher>) -> Self {
        Self { matcher }
    }

    pub fn extract(&self, text: &str) -> SymptomProfile {
        let text = text.to_lowercase();

        let symptoms: BTreeSet<SymptomTag> = SymptomTag::ALL
            .into_iter()
            .filter(|tag| tag.triggers().iter().any(|t| self.matcher.contains(&text, t)))
            .collect();

        let mut severity = (symptoms.len() as f64 / SYMPTOMS_FOR_FULL_SEVERITY).min(1.0);
        if self.any_phrase(&text, &URGENCY_PHRASES) {
            severity = severity.max(URGENT_SEVERITY_FLOOR);
        }

        let intent = if self.any_phrase(&text, &SERVICE_PHRASES) || !symptoms.is_empty() {
            Intent::ServiceRequest
        } else {
            Intent::GeneralInquiry
        };

        SymptomProfile {
            symptoms,
            severity: round_to(severity, 2),
            intent,
        }
    }

    fn any_phrase(&self, text: &str, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.matcher.contains(text, p))
    }
}

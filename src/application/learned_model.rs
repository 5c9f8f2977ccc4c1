// Learned model capability used by the risk classifier
use crate::domain::telemetry::RawFeatureVector;

/// A trained risk model. Implementations must be immutable after loading;
/// one instance is shared by reference across concurrent runs.
pub trait LearnedModel: Send + Sync {
    /// Probability of a maintenance issue, expected in [0, 1]
    fn predict(&self, features: &RawFeatureVector) -> anyhow::Result<f64>;
}

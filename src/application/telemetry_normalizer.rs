// Telemetry normalizer - Raw sensor readings to bounded features
use crate::domain::error::PipelineError;
use crate::domain::telemetry::{NormalizedTelemetry, TelemetryReading};

#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryNormalizer;

impl TelemetryNormalizer {
    /// Out-of-range values are clamped; only non-finite values are rejected.
    pub fn normalize(&self, reading: &TelemetryReading) -> Result<NormalizedTelemetry, PipelineError> {
        if let Some((name, value)) = reading.sensors().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(PipelineError::InvalidTelemetry(format!(
                "{name} must be finite, got {value}"
            )));
        }
        Ok(NormalizedTelemetry::from_reading(reading))
    }
}

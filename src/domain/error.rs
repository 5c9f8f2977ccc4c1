// Pipeline error taxonomy
use thiserror::Error;

/// Terminal failures for a single pipeline run. No partial results are produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid telemetry: {0}")]
    InvalidTelemetry(String),

    #[error("classifier failure: {0}")]
    ClassifierFailure(String),
}

impl PipelineError {
    /// Stable machine-readable kind, used in error response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "invalid_input",
            PipelineError::InvalidTelemetry(_) => "invalid_telemetry",
            PipelineError::ClassifierFailure(_) => "classifier_failure",
        }
    }
}

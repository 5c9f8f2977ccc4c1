// Domain layer - Pure data models and the rules that derive them
pub mod diagnosis;
pub mod error;
pub mod feedback;
pub mod run_result;
pub mod schedule;
pub mod telemetry;
pub mod voice;

// Application layer - Pipeline stages and use cases
pub mod anomaly_monitor;
pub mod learned_model;
pub mod notifier;
pub mod pipeline;
pub mod risk_classifier;
pub mod run_request;
pub mod scheduler;
pub mod simulation_service;
pub mod symptom_extractor;
pub mod telemetry_normalizer;

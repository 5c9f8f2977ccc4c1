// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::learned_model::LearnedModel;
use crate::application::pipeline::Pipeline;
use crate::application::scheduler::SystemClock;
use crate::application::simulation_service::SimulationService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::logistic_model::LogisticModel;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Learned model is optional; without one the heuristic classifier is used
    let model: Option<Arc<dyn LearnedModel>> = match &app_config.model.path {
        Some(path) => {
            let model = LogisticModel::load(path)?;
            tracing::info!(path = %path, features = model.feature_count(), "Loaded learned model");
            Some(Arc::new(model))
        }
        None => {
            tracing::info!("No learned model configured, using heuristic classifier");
            None
        }
    };

    // Create services (application layer)
    let pipeline = Pipeline::new(
        model,
        Arc::new(SystemClock),
        app_config.pipeline.default_location(),
    );
    tracing::info!(learned_model = pipeline.uses_learned_model(), "Pipeline ready");
    let simulation_service =
        SimulationService::new(pipeline.clone(), app_config.simulation.settings());

    // Create application state
    let state = Arc::new(AppState {
        pipeline,
        simulation_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = app_config.server.socket_addr()?;
    tracing::info!("Starting voiceguard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

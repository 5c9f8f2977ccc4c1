// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_service_centers, predict, simulate};
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Browser dashboards on other origins call the API directly
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Responses are compressed in the handlers, so no CompressionLayer here
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/service-centers", get(list_service_centers))
        .route("/api/predict", post(predict))
        .route("/api/simulate", post(simulate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

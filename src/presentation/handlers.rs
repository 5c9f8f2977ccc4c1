// HTTP request handlers
use crate::application::run_request::RunRequest;
use crate::application::simulation_service::MAX_SIMULATION_TICKS;
use crate::domain::error::PipelineError;
use crate::domain::schedule::SERVICE_CENTERS;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, error_response, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the reference service centers
pub async fn list_service_centers(headers: HeaderMap) -> Response {
    match json_response(StatusCode::OK, &SERVICE_CENTERS, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

fn parse_payload(body: &[u8]) -> Result<Value, PipelineError> {
    serde_json::from_slice(body).map_err(|e| PipelineError::InvalidInput(format!("invalid JSON: {e}")))
}

/// Run the full pipeline once
pub async fn predict(headers: HeaderMap, State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let compress = accepts_brotli(&headers);

    let result = parse_payload(&body)
        .and_then(|payload| RunRequest::from_json(&payload))
        .and_then(|req| state.pipeline.run(&req.voice_text, &req.telemetry, &req.customer));

    match result {
        Ok(run) => match json_response(StatusCode::OK, &run, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => error_response(&e).await,
    }
}

fn parse_ticks(payload: &Value) -> Result<Option<u32>, PipelineError> {
    match payload.get("ticks") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) if (1..=u64::from(MAX_SIMULATION_TICKS)).contains(&n) => Ok(Some(n as u32)),
            _ => Err(PipelineError::InvalidInput(format!(
                "ticks must be an integer in 1..={MAX_SIMULATION_TICKS}, got {v}"
            ))),
        },
    }
}

/// Stream pipeline results over jittered telemetry (live mode)
pub async fn simulate(headers: HeaderMap, State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let compress = accepts_brotli(&headers);

    let prepared = parse_payload(&body).and_then(|payload| {
        let ticks = parse_ticks(&payload)?;
        let req = RunRequest::from_json(&payload)?;
        let (call, reading) =
            state
                .simulation_service
                .pipeline()
                .prepare(&req.voice_text, &req.telemetry, &req.customer)?;
        Ok((call, reading, ticks))
    });

    match prepared {
        Ok((call, reading, ticks)) => {
            let rx = state.simulation_service.stream(call, reading, ticks);
            stream_from_receiver(rx, compress).await.into_response()
        }
        Err(e) => error_response(&e).await,
    }
}

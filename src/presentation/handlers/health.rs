use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

fn status(status: &'static str) -> impl IntoResponse {
    (StatusCode::OK, Json(StatusResponse { status }))
}

pub async fn root_handler() -> impl IntoResponse {
    status("running")
}

pub async fn health_handler() -> impl IntoResponse {
    status("healthy")
}

pub async fn ping_handler() -> impl IntoResponse {
    tracing::debug!("Ping");
    status("pong")
}

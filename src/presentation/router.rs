use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter, VectorStore};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ask_handler, extract_handler, health_handler, ping_handler, root_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, L, V, T>(state: AppState<F, L, V, T>, max_upload_bytes: usize) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
    T: TextSplitter + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .route("/upload", post(upload_handler::<F, L, V, T>))
        .route("/ask", post(ask_handler::<F, L, V, T>))
        .route("/extract", post(extract_handler::<F, L, V, T>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

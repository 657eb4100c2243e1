use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter, VectorStore};
use crate::domain::QaQuery;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state, query))]
pub async fn ask_handler<F, L, V, T>(
    State(state): State<AppState<F, L, V, T>>,
    Json(query): Json<QaQuery>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
    T: TextSplitter + 'static + ?Sized,
{
    tracing::debug!(question = %sanitize_prompt(&query.question), "Processing question");

    let answer = state.qa_service.answer(&query).await;
    tracing::info!(
        confidence = answer.confidence_score,
        sources_count = answer.sources.len(),
        "Question answered"
    );

    (StatusCode::OK, Json(answer))
}

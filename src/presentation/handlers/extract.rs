use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter, VectorStore};
use crate::application::services::IngestionError;
use crate::presentation::state::AppState;

use super::error::error_response;
use super::multipart_files::read_files;

#[tracing::instrument(skip(state, multipart))]
pub async fn extract_handler<F, L, V, T>(
    State(state): State<AppState<F, L, V, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
    T: TextSplitter + 'static + ?Sized,
{
    let file = match read_files(&mut multipart, Some(1)).await {
        Ok(mut files) => files.remove(0),
        Err(response) => return response,
    };
    let filename = file.filename.as_str();

    let chunks = match state
        .ingestion_service
        .process_file(&file.data, filename)
        .await
    {
        Ok(chunks) => chunks,
        Err(e @ IngestionError::UnsupportedFileType(_)) => {
            tracing::warn!(filename, error = %e, "Extraction rejected");
            return error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string());
        }
        Err(e) => {
            tracing::error!(filename, error = %e, "Extraction failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error during extraction.",
            );
        }
    };

    let full_text = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if full_text.is_empty() {
        tracing::warn!(filename, "No text extracted, returning empty record");
    }

    let response = state.extraction_service.extract(&full_text, filename).await;
    (StatusCode::OK, Json(response)).into_response()
}

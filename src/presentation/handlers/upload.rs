use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter, VectorStore};
use crate::presentation::state::AppState;

use super::multipart_files::read_files;

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<F, L, V, T>(
    State(state): State<AppState<F, L, V, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
    T: TextSplitter + 'static + ?Sized,
{
    let files = match read_files(&mut multipart, None).await {
        Ok(files) => files,
        Err(response) => return response,
    };

    tracing::info!(files = files.len(), "Received upload request");
    let report = state.upload_service.upload(files).await;
    tracing::info!(
        errors = report.errors.len(),
        extractions = report.extractions.len(),
        "Upload finished"
    );

    (StatusCode::OK, Json(report)).into_response()
}

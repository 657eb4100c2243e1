use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::Response;

use crate::application::services::UploadedFile;

use super::error::error_response;

/// Collects file fields (fields carrying a filename), stopping after `limit` files.
pub async fn read_files(
    multipart: &mut Multipart,
    limit: Option<usize>,
) -> Result<Vec<UploadedFile>, Response> {
    let mut files = Vec::new();

    loop {
        if limit.is_some_and(|limit| files.len() >= limit) {
            break;
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {e}"),
                ));
            }
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, filename = %filename, "Failed to read file bytes");
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read file {filename}: {e}"),
            )
        })?;

        tracing::debug!(filename = %filename, bytes = data.len(), "File received");
        files.push(UploadedFile {
            filename,
            data: data.to_vec(),
        });
    }

    if files.is_empty() {
        tracing::warn!("Request carried no file");
        return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
    }

    Ok(files)
}

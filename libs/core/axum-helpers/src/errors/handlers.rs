use axum::{
    extract::OriginalUri,
    response::{IntoResponse, Response},
};

use super::{AppError, ErrorDetail};

/// Fallback for unmatched routes.
///
/// Echoes the requested path (with query string) back in the error envelope.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    AppError::NotFound(ErrorDetail::new(
        path.clone(),
        format!("A rota {} não existe nesta API!", path),
        "invalid route",
    ))
    .into_response()
}

//! Write-body extractor accepting JSON or urlencoded forms, with rejections
//! rendered through the API error envelope.

use crate::errors::AppError;
use axum::{
    Form,
    extract::{FromRequest, Json, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Reads the body as [`axum::Form`] when the request declares
/// `application/x-www-form-urlencoded`, and as [`axum::Json`] otherwise.
///
/// Form fields always arrive as text, so `T` must accept strings wherever a
/// JSON client could send a number. A malformed body is answered with a 400
/// `{"errors": [...]}` response instead of axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// async fn create(JsonOrForm(payload): JsonOrForm<EventPayload>) -> impl IntoResponse {
///     // payload is deserialized; field rules still have to run
/// }
/// ```
pub struct JsonOrForm<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(data) = Form::<T>::from_request(req, state).await?;
            return Ok(JsonOrForm(data));
        }

        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonOrForm(data))
    }
}

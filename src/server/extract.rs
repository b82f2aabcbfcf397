use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use crate::server::response::ApiError;

/// `Json` body extractor whose rejections use the API's `{"error": ...}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

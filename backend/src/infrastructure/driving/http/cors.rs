use axum::extract::Request;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::MessageResponse;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use crate::infrastructure::driving::http::error::ApiError;

pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

/// Decorates actual cross-origin requests. Preflights are answered by
/// [`answer_preflight`] and never reach this layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any)
}

/// Sets `name` on every response the CORS layer did not already decorate.
pub fn default_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

/// Every OPTIONS request, on any path, is answered here with 200.
pub async fn answer_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, Json(MessageResponse::new("CORS preflight"))).into_response();
    }
    next.run(request).await
}

pub async fn endpoint_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("Endpoint not found: {} {}", method, uri.path()),
    )
}

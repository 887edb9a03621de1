use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const FETCH_PRODUCTS_FAILED: &str = "Failed to fetch products";
pub const FETCH_PRODUCT_FAILED: &str = "Failed to fetch product";
pub const CREATE_PRODUCT_FAILED: &str = "Failed to create product";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const INVALID_PRODUCT_PAYLOAD: &str = "Invalid product payload";

/// Error reply with a fixed client-facing message.
///
/// Details of the underlying failure are logged by the handler and never
/// included in the body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub const fn internal(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use service::product::{NewProduct, Product, ProductFilter};
use tracing::{debug, error, warn};

use crate::errors::{
    ApiError, CREATE_PRODUCT_FAILED, FETCH_PRODUCTS_FAILED, FETCH_PRODUCT_FAILED,
    INVALID_PRODUCT_PAYLOAD, PRODUCT_NOT_FOUND,
};
use crate::routes::ServerState;

/// `GET /?category=&search=`
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    match state.store.list(&filter).await {
        Ok(products) => {
            debug!(count = products.len(), "list products");
            Ok(Json(products))
        }
        Err(e) => {
            error!(err = %e, "fetch products failed");
            Err(ApiError::internal(FETCH_PRODUCTS_FAILED))
        }
    }
}

/// `GET /:id`
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match state.store.get(&id).await {
        Ok(product) => Ok(Json(product)),
        Err(e) if e.is_not_found() => Err(ApiError::new(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND)),
        Err(e) => {
            error!(err = %e, %id, "fetch product failed");
            Err(ApiError::internal(FETCH_PRODUCT_FAILED))
        }
    }
}

/// `POST /` with `{name, price, category, stock, description?}`
///
/// Only a body that is not a JSON object is refused here; field values are
/// coerced by `NewProduct` and otherwise left to the store.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = payload.map_err(|e| {
        warn!(err = %e, "rejected product payload");
        ApiError::new(StatusCode::BAD_REQUEST, INVALID_PRODUCT_PAYLOAD)
    })?;

    match state.store.create(input).await {
        Ok(product) => Ok((StatusCode::CREATED, Json(product))),
        Err(e) => {
            error!(err = %e, "create product failed");
            Err(ApiError::internal(CREATE_PRODUCT_FAILED))
        }
    }
}

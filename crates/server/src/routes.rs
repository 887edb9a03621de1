use axum::{extract::State, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::product::ProductStore;

pub mod products;

/// State shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub store: ProductStore,
}

pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health { status: "ok", backend: state.store.backend().as_str() })
}

/// Build the product router: list and create on `/`, fetch on `/:id`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/health", get(health))
        .route("/:id", get(products::get))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}

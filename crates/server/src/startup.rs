use std::future::Future;

use axum::Router;
use configs::AppConfig;
use service::product::ProductStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already chosen product store.
pub fn build_app(store: ProductStore) -> Router {
    routes::build_router(ServerState { store }, build_cors())
}

/// Pick the product backend, bind and serve until `shutdown` resolves.
///
/// In-flight requests are allowed to finish once `shutdown` fires.
pub async fn run_with_config<S>(cfg: AppConfig, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let store = ProductStore::connect(&cfg.database).await;
    let backend = store.backend();
    let app = build_app(store);

    // host may be a name such as `localhost`, so let tokio resolve it
    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, %backend, "starting product service");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::debug;

/// Open the product database and make sure it answers.
///
/// The pool is capped by `max_connections`, which defaults to a single
/// connection shared by every request.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.connection_url()?);
    let timeout = Duration::from_secs(cfg.connect_timeout_secs.max(1));
    opt.max_connections(cfg.pool_size())
        .min_connections(1)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(cfg.sqlx_logging);

    debug!(host = %cfg.host, port = cfg.port, database = %cfg.name, "connecting to product database");
    let db = Database::connect(opt).await?;
    db.ping().await?;
    Ok(db)
}

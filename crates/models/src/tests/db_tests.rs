use crate::db::connect;
use configs::DatabaseConfig;
use std::time::{Duration, Instant};

/// Nothing listens on port 1; the attempt must fail instead of hanging.
#[tokio::test]
async fn connect_to_unreachable_host_fails() {
    let cfg = DatabaseConfig {
        host: "127.0.0.1".into(),
        port: 1,
        connect_timeout_secs: 1,
        ..DatabaseConfig::default()
    };
    let start = Instant::now();
    let res = connect(&cfg).await;
    assert!(res.is_err());
    assert!(start.elapsed() < Duration::from_secs(15), "took {:?}", start.elapsed());
}

/// Runs only against a real database named by `DATABASE_URL`.
#[tokio::test]
async fn connect_with_database_url() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL missing; skip live connection test");
        return Ok(());
    };
    let cfg = DatabaseConfig { url: Some(url), ..DatabaseConfig::default() };
    let db = connect(&cfg).await?;
    db.ping().await?;
    Ok(())
}

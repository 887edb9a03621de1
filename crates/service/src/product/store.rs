use std::sync::Arc;

use configs::DatabaseConfig;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product, ProductFilter};
use crate::product::repo::{memory::InMemoryProductRepository, seaorm::SeaOrmProductRepository};
use crate::product::repository::{Backend, ProductRepository};

/// Handle through which every product call goes.
///
/// The backend is fixed when the store is built; a failed database connection
/// means the in-memory catalog serves the rest of the process lifetime.
#[derive(Clone)]
pub struct ProductStore {
    repo: Arc<dyn ProductRepository>,
}

impl ProductStore {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    /// Store backed by the seeded in-memory catalog.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::seeded()))
    }

    /// Try the database once; fall back to memory if it cannot be reached.
    pub async fn connect(cfg: &DatabaseConfig) -> Self {
        match models::db::connect(cfg).await {
            Ok(db) => {
                info!(event = "database_connected", backend = %Backend::MySql, host = %cfg.host, database = %cfg.name, "product database connected");
                Self::new(Arc::new(SeaOrmProductRepository::new(db)))
            }
            Err(e) => {
                warn!(event = "database_unavailable", backend = %Backend::Memory, error = %e, "product database connection failed; using in-memory catalog");
                Self::in_memory()
            }
        }
    }

    pub fn backend(&self) -> Backend { self.repo.backend() }

    #[instrument(skip(self), fields(backend = %self.backend()))]
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
        self.repo.list(filter).await
    }

    /// Look up by the textual id taken from a request path.
    ///
    /// The leading integer of the text is used (`"1.5"` is 1, `"12abc"` is 12).
    /// Text without one cannot name a product and is reported as not found.
    #[instrument(skip(self), fields(backend = %self.backend()))]
    pub async fn get(&self, raw_id: &str) -> Result<Product, ServiceError> {
        let Some(id) = parse_id(raw_id) else {
            return Err(ServiceError::not_found("product"));
        };
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    #[instrument(skip(self, input), fields(backend = %self.backend()))]
    pub async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let created = self.repo.create(input).await?;
        info!(id = created.id, name = %created.name, "product created");
        Ok(created)
    }
}

/// Leading whitespace, an optional sign, then as many digits as follow.
fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

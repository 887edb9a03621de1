use std::fmt;

use async_trait::async_trait;

use super::domain::{NewProduct, Product, ProductFilter};
use crate::errors::ServiceError;

/// Which kind of storage answers product calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::MySql => "mysql",
            Backend::Memory => "memory",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence contract shared by the database and in-memory backends.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    fn backend(&self) -> Backend;

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError>;

    /// `Ok(None)` when no record has this id.
    async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError>;

    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError>;
}

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::warn;

use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product, ProductFilter};
use crate::product::repository::{Backend, ProductRepository};

/// Process-local product list used when the database is unreachable.
///
/// Records keep insertion order. Creates take the write lock, so id
/// generation and append happen as one step.
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    /// Start from the built-in sample catalog.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self { Self::seeded() }
}

pub fn seed_products() -> Vec<Product> {
    vec![
        NewProduct::new("Laptop", Decimal::new(99999, 2), "Electronics", 50).into_product(1),
        NewProduct::new("Phone", Decimal::new(69999, 2), "Electronics", 100).into_product(2),
        NewProduct::new("Book", Decimal::new(1999, 2), "Books", 200).into_product(3),
    ]
}

/// Millisecond timestamp, bumped past the current maximum if already taken.
fn next_id(products: &[Product]) -> i64 {
    let candidate = Utc::now().timestamp_millis();
    if !products.iter().any(|p| p.id == candidate) {
        return candidate;
    }
    let bumped = products.iter().map(|p| p.id).max().unwrap_or(candidate) + 1;
    warn!(candidate, bumped, "timestamp product id already taken");
    bumped
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    fn backend(&self) -> Backend { Backend::Memory }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let mut products = self.products.write().await;
        let product = input.into_product(next_id(&products));
        products.push(product.clone());
        Ok(product)
    }
}

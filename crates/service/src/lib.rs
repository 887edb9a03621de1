//! Service layer for the product catalog.
//! - `ProductRepository` is the seam between request handling and storage.
//! - `ProductStore` chooses the database or the in-memory catalog once at startup.

pub mod errors;
pub mod product;

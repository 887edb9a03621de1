//! Product catalog: domain types, the repository seam and its two backends,
//! and the store that picks one at startup.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod store;

pub use domain::{NewProduct, Product, ProductFilter};
pub use repository::{Backend, ProductRepository};
pub use store::ProductStore;

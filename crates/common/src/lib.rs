//! Shared pieces used by the binary and the HTTP server crate.

pub mod types;
pub mod utils;

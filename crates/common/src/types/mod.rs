use serde::Serialize;

/// Body of `GET /health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    /// Which product backend is serving requests.
    pub backend: &'static str,
}

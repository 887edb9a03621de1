use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3002, worker_threads: Some(4) }
    }
}

/// Settings for the product database.
///
/// `url` wins when present; otherwise a `mysql://` URL is assembled from the
/// individual parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".into(),
            user: "root".into(),
            password: "password".into(),
            name: "ecommerce".into(),
            port: 3306,
            max_connections: 1,
            connect_timeout_secs: 10,
            sqlx_logging: false,
        }
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let cfg: AppConfig = toml::from_str(&content).with_context(|| format!("parsing {path}"))?;
    Ok(cfg)
}

/// Read a variable through `lookup`, treating empty values as unset.
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Process environment on top of the config file on top of defaults.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Layered load through an arbitrary variable source.
    ///
    /// The file named by `CONFIG_PATH` (default `config.toml`) is optional;
    /// when it exists it must parse. Variables from `lookup` then override
    /// whatever the file or the defaults set.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = non_empty(&lookup, "CONFIG_PATH").unwrap_or_else(|| "config.toml".to_string());
        let mut cfg = if Path::new(&path).exists() { load_from_file(&path)? } else { Self::default() };
        cfg.apply_overrides(&lookup);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Defaults with environment overrides only, no file and no validation.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        cfg.apply_overrides(&lookup);
        cfg
    }

    /// Replace each setting whose variable is present, non-empty and parsable.
    pub fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = &mut self.server;
        if let Some(host) = non_empty(lookup, "SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = non_empty(lookup, "SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            server.port = port;
        }
        if let Some(w) = non_empty(lookup, "TOKIO_WORKER_THREADS").and_then(|w| w.parse::<usize>().ok()) {
            server.worker_threads = Some(w);
        }

        let database = &mut self.database;
        if let Some(url) = non_empty(lookup, "DATABASE_URL") {
            database.url = Some(url);
        }
        if let Some(host) = non_empty(lookup, "DB_HOST") {
            database.host = host;
        }
        if let Some(user) = non_empty(lookup, "DB_USER") {
            database.user = user;
        }
        if let Some(password) = non_empty(lookup, "DB_PASSWORD") {
            database.password = password;
        }
        if let Some(name) = non_empty(lookup, "DB_NAME") {
            database.name = name;
        }
        if let Some(port) = non_empty(lookup, "DB_PORT").and_then(|p| p.parse::<u16>().ok()) {
            database.port = port;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// A blank `url` from the file counts as unset.
    fn normalize(&mut self) {
        if self.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            self.url = None;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(raw) = &self.url {
            let url = Url::parse(raw).context("database.url is not a valid URL")?;
            if url.scheme() != "mysql" {
                return Err(anyhow!("database.url must start with mysql://"));
            }
        }
        if self.port == 0 {
            return Err(anyhow!("database.port must be within 1..=65535"));
        }
        Ok(())
    }

    /// Connection URL handed to the driver.
    ///
    /// Without an explicit `url`, one is assembled from the parts; `Url`
    /// percent-encodes the credentials.
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        let mut url = Url::parse(&format!("mysql://{}:{}/{}", self.host, self.port, self.name))
            .with_context(|| format!("cannot build a database URL for host {:?}", self.host))?;
        url.set_username(&self.user)
            .and_then(|_| url.set_password(Some(&self.password)))
            .map_err(|_| anyhow!("database URL for host {:?} cannot carry credentials", self.host))?;
        Ok(url.into())
    }

    /// Pool size, never below one connection.
    pub fn pool_size(&self) -> u32 {
        self.max_connections.max(1)
    }
}

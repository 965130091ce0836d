//! Runtime configuration.
//!
//! Every setting can come from an environment variable (a `.env` file is
//! loaded first by the binary) and be overridden by a command-line flag.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::api::middleware::CorsPolicy;
use crate::db::{self, Database};
use crate::store::{MemoryStore, SharedStore};

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";

/// Which [`crate::store::HabitStore`] backend to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Process memory; everything is lost on restart.
    Memory,
    /// SQLite database at `database_url`.
    Sqlite,
}

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP API
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Storage backend
    #[arg(long, env = "HABITS_STORE", value_enum, default_value_t = StoreKind::Sqlite)]
    pub store: StoreKind,

    /// SQLite path or `:memory:` (defaults to the platform data directory)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Comma-separated CORS origins, or `*`
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ALLOWED_ORIGINS)]
    pub allowed_origins: String,
}

impl Config {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    pub fn cors_policy(&self) -> CorsPolicy {
        CorsPolicy::parse(&self.allowed_origins)
    }

    /// Open the configured store. For SQLite this also creates the `habits`
    /// table if it is missing.
    pub fn open_store(&self) -> Result<SharedStore> {
        match self.store {
            StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreKind::Sqlite => {
                let db = match &self.database_url {
                    Some(url) => Database::open_url(url)?,
                    None => Database::open_default()?,
                };
                db.ensure_schema()?;
                Ok(Arc::new(db))
            }
        }
    }

    /// Human readable summary for `check-config`.
    pub fn describe(&self) -> String {
        let database = match (&self.store, &self.database_url) {
            (StoreKind::Memory, _) => "(not used)".to_string(),
            (StoreKind::Sqlite, Some(url)) => url.clone(),
            (StoreKind::Sqlite, None) => db::default_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|e| format!("<unavailable: {e}>")),
        };

        format!(
            "listen:          {}:{}\nstore:           {:?}\ndatabase:        {}\nallowed origins: {}",
            self.host, self.port, self.store, database, self.allowed_origins
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    fn parse(args: &[&str]) -> Config {
        TestCli::try_parse_from(std::iter::once("habits").chain(args.iter().copied()))
            .unwrap()
            .config
    }

    #[test]
    fn flags_override_everything() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--store",
            "memory",
            "--allowed-origins",
            "http://a.test, http://b.test",
        ]);

        assert_eq!(config.port, 9090);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(
            config.bind_addr().unwrap(),
            "127.0.0.1:9090".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            config.cors_policy(),
            CorsPolicy::List(vec!["http://a.test".into(), "http://b.test".into()])
        );
    }

    #[test]
    fn rejects_unknown_store() {
        let result = TestCli::try_parse_from(["habits", "--store", "postgres"]);
        assert!(result.is_err());
    }

    #[test]
    fn memory_store_ignores_database_url() {
        let config = parse(&["--store", "memory", "--database-url", "/nope/habits.db"]);
        let store = config.open_store().unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(config.describe().contains("(not used)"));
    }

    #[test]
    fn sqlite_store_opens_in_memory_url() {
        let config = parse(&["--store", "sqlite", "--database-url", ":memory:"]);
        let store = config.open_store().unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}

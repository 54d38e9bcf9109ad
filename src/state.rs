use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::{AppConfig, JwtConfig};
use crate::store::{MemoryUserStore, PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to Postgres and build the state. The eager connect makes the
    /// process fail to come up when the database is unreachable.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("run migrations")?;

        let store = Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>;
        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State over the in-memory store, for tests and database-less runs.
    pub fn in_memory(secret: &str) -> Self {
        let config = Arc::new(AppConfig {
            database_url: "postgres://unused".into(),
            jwt: JwtConfig {
                secret: secret.into(),
                ttl_hours: 24,
            },
        });
        let store = Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>;
        Self { store, config }
    }
}

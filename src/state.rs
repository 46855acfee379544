use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::users::PgUserDao;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(config.db.max_connections)
            .acquire_timeout(config.db.acquire_timeout())
            .connect(&config.db.url)
            .await
            .context("connect to database")?;
        Ok(Self { db, config })
    }

    /// User data access bound to this state's pool.
    pub fn users(&self) -> PgUserDao {
        PgUserDao::new(self.db.clone())
    }
}

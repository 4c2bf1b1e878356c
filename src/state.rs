use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;

        Ok(Self {
            db,
            config,
            http: reqwest::Client::new(),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            config,
            http: reqwest::Client::new(),
            clock,
        }
    }
}

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database};
use std::time::Duration;
use tracing::info;

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://takeahike.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Connect to the database and build the shared handler state
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    info!("Connecting to database: {}", database_url);

    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .max_connections(10)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    Ok(AppState { db })
}

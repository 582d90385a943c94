use anyhow::Result;
use sea_orm::Database;
use tracing::{debug, error, info, trace};

use super::initdb::run_migrations;
use super::serve::serve;

pub async fn migrate_and_serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    let db = match Database::connect(database_url).await {
        Ok(connection) => {
            debug!("Database connection established");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    run_migrations(&db).await?;
    db.close().await?;

    serve(database_url, bind_address).await
}

use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use medsync_api::config::ApiConfig;
use medsync_core::store::ClinicStore;
use medsync_db::{MemoryStore, PgStore, create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Pick the store: PostgreSQL when configured, in-memory otherwise
    let store: Arc<dyn ClinicStore> = match &config.database_url {
        Some(database_url) => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgStore::new(db_pool))
        }
        None => Arc::new(MemoryStore::new()),
    };

    // Start API server
    medsync_api::start_server(config, store).await?;

    Ok(())
}

use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use medsync_db::schema::initialize_database;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;
    tracing_subscriber::fmt().init();

    // Load environment variables
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL must be set to run migrations")?;

    info!("Connecting to database...");
    let db_pool = medsync_db::create_pool(&database_url).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}

use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::{config::ApiConfig, service::SchedulingService};
use slotbook_db::{create_pool, schema::initialize_database, MemoryStore, PgStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize logging
    slotbook_api::init_tracing(config.log_level)?;

    let service = if config.uses_memory_store() {
        warn!("Using the in-memory store; data will not survive a restart");
        SchedulingService::with_store(Arc::new(MemoryStore::new()), config.input_offset)
    } else {
        // Create database connection pool
        let db_pool = create_pool(&config.database_url).await?;

        // Initialize database schema
        initialize_database(&db_pool).await?;

        SchedulingService::with_store(Arc::new(PgStore::new(db_pool)), config.input_offset)
    };

    info!("Reading submitted times at UTC{}", config.input_offset);

    // Start API server
    slotbook_api::start_server(config, service).await?;

    Ok(())
}

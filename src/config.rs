use anyhow::Result;
use sea_orm::Database;

use crate::schemas::AppState;

/// Initialize application configuration and state
pub async fn initialize_app_state() -> Result<AppState> {
    // Load configuration
    dotenvy::dotenv().ok();
    let database_url = database_url();

    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(&database_url).await?;

    Ok(AppState { db })
}

/// Get database URL from environment or use the local SQLite default
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://fxdesk.db".to_string())
}

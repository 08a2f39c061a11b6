use anyhow::Result;
use tracing::{error, info};

use crate::config::initialize_app_state;

pub async fn status() -> Result<()> {
    let state = initialize_app_state().await?;

    match state.db.ping().await {
        Ok(()) => {
            info!("Database connection ok");
            println!("database: connected");
            Ok(())
        }
        Err(e) => {
            error!("Database ping failed: {}", e);
            println!("database: disconnected");
            Err(e.into())
        }
    }
}

//! Database connection setup.

use log::info;
use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::Config;

/// Connect to MongoDB and verify the connection with a ping.
pub async fn connect(config: &Config) -> Result<Database, mongodb::error::Error> {
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&config.mongodb_uri).await?;
    let db = client.database(&config.database_name);

    db.run_command(doc! { "ping": 1 }).await?;
    info!("Connected to MongoDB successfully!");

    Ok(db)
}

//! Database Connection Management
//!
//! Utilities for creating and checking the MongoDB connection.

use mongodb::bson::doc;
use mongodb::{Client, Database};

use super::config::DatabaseConfig;

/// Connect to MongoDB and make sure the server answers
pub async fn connect(config: &DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(&config.uri).await?;
    let database = client.database(&config.name);

    database.run_command(doc! { "ping": 1 }, None).await?;
    tracing::debug!(database = %config.name, "MongoDB ping succeeded");

    Ok(database)
}

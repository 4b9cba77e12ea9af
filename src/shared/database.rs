use mongodb::{Client, Collection, Database};

use super::config::Config;
use crate::users::model::user::User;

#[derive(Clone)]
pub struct MongoDatabase {
  pub mongo_client: Client,
  pub database: Database,
}

impl MongoDatabase {
  pub async fn connect(config: &Config) -> Result<Self, mongodb::error::Error> {
    let mongo_client = Client::with_uri_str(&config.mongodb_uri).await?;
    let database = mongo_client.database(&config.mongodb_database);
    tracing::info!(database = %config.mongodb_database, "connected to MongoDB");
    Ok(Self {
      mongo_client,
      database,
    })
  }

  pub fn users(&self) -> Collection<User> {
    self.database.collection("users")
  }

  /// Waits for in-flight operations and closes every pooled connection.
  pub async fn disconnect(self) {
    self.mongo_client.shutdown().await;
    tracing::info!("disconnected from MongoDB");
  }
}

//! Database operations

use super::MochowClient;
use crate::error::Result;
use crate::models::{CommonResponse, ListDatabaseResponse};
use serde_json::json;
use tracing::debug;

const DATABASE_PATH: &str = "/database";

impl MochowClient {
    pub async fn list_databases(&self) -> Result<ListDatabaseResponse> {
        debug!("Listing databases");
        self.post(DATABASE_PATH, "list", json!({})).await
    }

    pub async fn create_database(&self, database: &str) -> Result<CommonResponse> {
        debug!("Creating database: {}", database);
        self.post(DATABASE_PATH, "create", json!({ "database": database })).await
    }

    /// The service refuses to drop a database that still has tables
    pub async fn drop_database(&self, database: &str) -> Result<CommonResponse> {
        debug!("Dropping database: {}", database);
        self.delete(DATABASE_PATH, json!({ "database": database })).await
    }
}

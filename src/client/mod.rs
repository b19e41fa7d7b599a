//! Mochow client
//!
//! `MochowClient` holds a [`Transport`] and exposes one group of operations
//! per resource, each in its own module.

pub mod database;
pub mod row;
pub mod search;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Client for a Mochow instance
#[derive(Clone)]
pub struct MochowClient {
    transport: Arc<dyn Transport>,
}

impl MochowClient {
    /// Create a client talking HTTP to `config.endpoint`
    pub fn new(config: ClientConfig) -> Result<Self> {
        info!("Connecting to Mochow at {}", config.endpoint);
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str, action: &str, body: Value) -> Result<T> {
        let response = self.transport.post(path, Some(action), body).await?;
        log_service_error(path, action, &response);
        Ok(serde_json::from_value(response)?)
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        let response = self.transport.delete(path, None, body).await?;
        log_service_error(path, "delete", &response);
        Ok(serde_json::from_value(response)?)
    }
}

fn log_service_error(path: &str, action: &str, response: &Value) {
    let code = response.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code != 0 {
        let msg = response.get("msg").and_then(Value::as_str).unwrap_or_default();
        warn!("{}?{} returned code {}: {}", path, action, code, msg);
    }
}

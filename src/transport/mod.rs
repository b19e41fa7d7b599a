//! Transport abstraction the client APIs are written against

pub mod http;

pub use http::HttpTransport;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The two verbs the service is driven with.
///
/// `path` is relative to the versioned base URL (e.g. `/row`), `action` is
/// sent as an empty-valued query parameter (`?search=`), and the parsed JSON
/// response body is returned as is, including non-zero service codes.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, path: &str, action: Option<&str>, body: Value) -> Result<Value>;

    async fn delete(&self, path: &str, action: Option<&str>, body: Value) -> Result<Value>;
}

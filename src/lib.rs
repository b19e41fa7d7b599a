//! Mochow Client - vector, full-text and hybrid search against a Mochow vector database
//!
//! This library talks to a Mochow instance over its HTTP+JSON protocol and
//! focuses on building search requests: top-k, distance-range and batch
//! vector search, BM25 full-text search, and weighted hybrid search.
//!
//! ## Features
//!
//! - **Typed search requests**: one type per search kind, closed under [`search::SearchRequest`]
//! - **Minimal request bodies**: only the options you set are sent
//! - **Retrying transport**: exponential backoff on network and gateway failures
//! - **Pluggable transport**: implement [`transport::Transport`] to swap out HTTP
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mochow_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_file("config.toml")?;
//!     let client = MochowClient::new(config.client)?;
//!
//!     let request = VectorTopkSearchRequest::new("vector", vec![0.3123f32, 0.43, 0.213], 5)?
//!         .filter("bookName='三国演义'")
//!         .config(VectorSearchConfig::new().ef(200));
//!
//!     let result = client.vector_search("book", "book_segments", request).await?;
//!     if !result.status().is_ok() {
//!         eprintln!("search failed: {}", result.status().msg);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod transport;

pub use client::MochowClient;
pub use config::Config;
pub use error::{MochowError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::MochowClient;
    pub use crate::config::{ClientConfig, Config};
    pub use crate::error::{MochowError, RequestError, Result, ServerErrCode};
    pub use crate::models::{ReadConsistency, SearchResult};
    pub use crate::search::{
        Bm25SearchRequest, DistanceRange, HybridSearchRequest, SearchPayload, SearchRequest, Vector,
        VectorBatchSearchRequest, VectorRangeSearchRequest, VectorSearchConfig, VectorTopkSearchRequest,
    };
    pub use crate::transport::Transport;
}

//! Search request composition
//!
//! Every search kind renders itself into the JSON body the service expects
//! for `POST /v1/row?search` or `POST /v1/row?batchSearch`. Optional fields
//! are `Option`s and are only written when the caller set them, so the
//! service applies its own defaults for everything else.
//!
//! ```
//! use mochow_client::search::{SearchPayload, VectorSearchConfig, VectorTopkSearchRequest};
//!
//! # fn main() -> Result<(), mochow_client::error::RequestError> {
//! let request = VectorTopkSearchRequest::new("vector", vec![0.3123f32, 0.43, 0.213], 5)?
//!     .filter("bookName='三国演义'")
//!     .config(VectorSearchConfig::new().ef(200));
//!
//! let body = request.to_map();
//! assert_eq!(body["anns"]["params"]["ef"], 200);
//! assert!(body.get("limit").is_none());
//! # Ok(())
//! # }
//! ```

pub mod bm25;
pub mod dispatch;
pub mod fields;
pub mod hybrid;
pub mod vector;

pub use bm25::Bm25SearchRequest;
pub use dispatch::{PreparedSearch, SearchRequest};
pub use fields::{DistanceRange, SearchCommonFields, Vector, VectorSearchConfig};
pub use hybrid::{HybridSearchRequest, HybridVectorRequest};
pub use vector::{VectorBatchSearchRequest, VectorRangeSearchRequest, VectorSearchRequest, VectorTopkSearchRequest};

use serde_json::{Map, Value};
use std::fmt;

/// Query action a search is sent with, e.g. `?search=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Search,
    BatchSearch,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Search => "search",
            RequestType::BatchSearch => "batchSearch",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search that can be rendered into a request body
pub trait SearchPayload {
    /// Query action the request is sent with
    fn request_type(&self) -> RequestType;

    /// Whether the service answers with one result set per query vector.
    /// Always agrees with [`request_type`](Self::request_type).
    fn is_batch(&self) -> bool {
        self.request_type() == RequestType::BatchSearch
    }

    /// Render the body, without `database`/`table`.
    ///
    /// Pure: rendering the same request twice yields identical maps.
    fn to_map(&self) -> Map<String, Value>;
}

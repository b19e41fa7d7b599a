//! Closed set of search kinds and the routing of a composed search

use super::bm25::Bm25SearchRequest;
use super::hybrid::HybridSearchRequest;
use super::vector::{VectorBatchSearchRequest, VectorRangeSearchRequest, VectorSearchRequest, VectorTopkSearchRequest};
use super::{RequestType, SearchPayload};
use serde_json::{Map, Value};

/// Any search the service accepts
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    TopK(VectorTopkSearchRequest),
    Range(VectorRangeSearchRequest),
    Batch(VectorBatchSearchRequest),
    Bm25(Bm25SearchRequest),
    Hybrid(HybridSearchRequest),
}

impl SearchPayload for SearchRequest {
    fn request_type(&self) -> RequestType {
        match self {
            SearchRequest::Batch(_) => RequestType::BatchSearch,
            SearchRequest::TopK(_)
            | SearchRequest::Range(_)
            | SearchRequest::Bm25(_)
            | SearchRequest::Hybrid(_) => RequestType::Search,
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        match self {
            SearchRequest::TopK(req) => req.to_map(),
            SearchRequest::Range(req) => req.to_map(),
            SearchRequest::Batch(req) => req.to_map(),
            SearchRequest::Bm25(req) => req.to_map(),
            SearchRequest::Hybrid(req) => req.to_map(),
        }
    }
}

impl From<VectorSearchRequest> for SearchRequest {
    fn from(req: VectorSearchRequest) -> Self {
        match req {
            VectorSearchRequest::TopK(req) => SearchRequest::TopK(req),
            VectorSearchRequest::Range(req) => SearchRequest::Range(req),
            VectorSearchRequest::Batch(req) => SearchRequest::Batch(req),
        }
    }
}

impl From<VectorTopkSearchRequest> for SearchRequest {
    fn from(req: VectorTopkSearchRequest) -> Self {
        SearchRequest::TopK(req)
    }
}

impl From<VectorRangeSearchRequest> for SearchRequest {
    fn from(req: VectorRangeSearchRequest) -> Self {
        SearchRequest::Range(req)
    }
}

impl From<VectorBatchSearchRequest> for SearchRequest {
    fn from(req: VectorBatchSearchRequest) -> Self {
        SearchRequest::Batch(req)
    }
}

impl From<Bm25SearchRequest> for SearchRequest {
    fn from(req: Bm25SearchRequest) -> Self {
        SearchRequest::Bm25(req)
    }
}

impl From<HybridSearchRequest> for SearchRequest {
    fn from(req: HybridSearchRequest) -> Self {
        SearchRequest::Hybrid(req)
    }
}

/// A search ready to send: query action, full body and expected response shape
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSearch {
    pub action: RequestType,
    pub body: Value,
    pub batch: bool,
}

impl PreparedSearch {
    /// Compose `request` and address it to `database`.`table`
    pub fn new(database: &str, table: &str, request: &SearchRequest) -> Self {
        let mut body = request.to_map();
        body.insert("database".to_string(), Value::String(database.to_string()));
        body.insert("table".to_string(), Value::String(table.to_string()));

        Self {
            action: request.request_type(),
            body: Value::Object(body),
            batch: request.is_batch(),
        }
    }
}

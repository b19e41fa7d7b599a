//! Weighted fusion of one vector search and one BM25 search

use super::bm25::{Bm25SearchRequest, BM25_PARAMS_KEY};
use super::fields::{search_common_setters, SearchCommonFields};
use super::vector::{VectorRangeSearchRequest, VectorSearchRequest, VectorTopkSearchRequest};
use super::{RequestType, SearchPayload};
use crate::error::RequestError;
use serde_json::{Map, Value};

/// Vector half of a hybrid search. Batch searches are not accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum HybridVectorRequest {
    TopK(VectorTopkSearchRequest),
    Range(VectorRangeSearchRequest),
}

impl HybridVectorRequest {
    fn to_map(&self) -> Map<String, Value> {
        match self {
            HybridVectorRequest::TopK(req) => req.to_map(),
            HybridVectorRequest::Range(req) => req.to_map(),
        }
    }
}

impl From<VectorTopkSearchRequest> for HybridVectorRequest {
    fn from(req: VectorTopkSearchRequest) -> Self {
        HybridVectorRequest::TopK(req)
    }
}

impl From<VectorRangeSearchRequest> for HybridVectorRequest {
    fn from(req: VectorRangeSearchRequest) -> Self {
        HybridVectorRequest::Range(req)
    }
}

impl TryFrom<VectorSearchRequest> for HybridVectorRequest {
    type Error = RequestError;

    fn try_from(req: VectorSearchRequest) -> Result<Self, Self::Error> {
        match req {
            VectorSearchRequest::TopK(req) => Ok(HybridVectorRequest::TopK(req)),
            VectorSearchRequest::Range(req) => Ok(HybridVectorRequest::Range(req)),
            VectorSearchRequest::Batch(_) => Err(RequestError::BatchVectorInHybrid),
        }
    }
}

/// Hybrid search scoring rows by `vector_weight * vector + bm25_weight * bm25`.
///
/// `limit` and `filter` set here apply to both halves and replace any
/// `limit`/`filter` set on the sub-requests. Sub-request values only survive
/// when the hybrid request leaves the field unset.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridSearchRequest {
    vector: HybridVectorRequest,
    bm25: Bm25SearchRequest,
    vector_weight: f64,
    bm25_weight: f64,
    common: SearchCommonFields,
}

impl HybridSearchRequest {
    /// Fails if either weight is NaN or infinite
    pub fn new(
        vector: impl Into<HybridVectorRequest>,
        bm25: Bm25SearchRequest,
        vector_weight: f64,
        bm25_weight: f64,
    ) -> Result<Self, RequestError> {
        if !vector_weight.is_finite() || !bm25_weight.is_finite() {
            return Err(RequestError::InvalidWeight {
                vector: vector_weight,
                bm25: bm25_weight,
            });
        }
        Ok(Self {
            vector: vector.into(),
            bm25,
            vector_weight,
            bm25_weight,
            common: SearchCommonFields::default(),
        })
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.common.limit = Some(limit);
        self
    }

    pub fn vector_weight(&self) -> f64 {
        self.vector_weight
    }

    pub fn bm25_weight(&self) -> f64 {
        self.bm25_weight
    }

    pub fn common(&self) -> &SearchCommonFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SearchCommonFields {
        &mut self.common
    }

    /// Remove the per-part copies of `filter`/`limit` that the global
    /// settings replace. The BM25 copies sit at the top level and are
    /// overwritten by the overlay, so only `anns` needs clearing.
    fn drop_superseded(&self, fields: &mut Map<String, Value>) {
        let Some(Value::Object(anns)) = fields.get_mut("anns") else {
            return;
        };
        if self.common.filter.is_some() {
            anns.remove("filter");
        }
        if self.common.limit.is_some() {
            let now_empty = match anns.get_mut("params") {
                Some(Value::Object(params)) => {
                    params.remove("limit");
                    params.is_empty()
                }
                _ => false,
            };
            if now_empty {
                anns.remove("params");
            }
        }
    }
}

search_common_setters!(HybridSearchRequest);

impl SearchPayload for HybridSearchRequest {
    fn request_type(&self) -> RequestType {
        RequestType::Search
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut fields = self.bm25.to_map();
        // vector keys win on collision
        fields.extend(self.vector.to_map());

        self.drop_superseded(&mut fields);
        self.common.fill(&mut fields);

        if let Some(Value::Object(anns)) = fields.get_mut("anns") {
            anns.insert("weight".to_string(), Value::from(self.vector_weight));
        }
        if let Some(Value::Object(params)) = fields.get_mut(BM25_PARAMS_KEY) {
            params.insert("weight".to_string(), Value::from(self.bm25_weight));
        }
        fields
    }
}

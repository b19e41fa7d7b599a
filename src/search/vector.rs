//! Vector similarity search requests: top-k, distance range and batch

use super::fields::{search_common_setters, DistanceRange, SearchCommonFields, Vector, VectorSearchConfig, VECTOR_FLOATS_KEY};
use super::{RequestType, SearchPayload};
use crate::error::RequestError;
use serde_json::{Map, Value};

/// State shared by the three vector search kinds. The query vector(s) and
/// any distance range belong to the request type itself.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VectorSearchFields {
    vector_field: String,
    config: Option<VectorSearchConfig>,
    common: SearchCommonFields,
}

impl VectorSearchFields {
    fn new(vector_field: String) -> Self {
        Self {
            vector_field,
            config: None,
            common: SearchCommonFields::default(),
        }
    }

    /// Render the `anns` block plus the scope fields.
    ///
    /// `filter` and `limit` live only inside `anns`; they are never repeated
    /// at the top level.
    fn to_map(&self, floats: Value, range: Option<&DistanceRange>) -> Map<String, Value> {
        let mut anns = Map::new();
        anns.insert("vectorField".to_string(), Value::String(self.vector_field.clone()));
        anns.insert(VECTOR_FLOATS_KEY.to_string(), floats);
        if let Some(filter) = &self.common.filter {
            anns.insert("filter".to_string(), Value::String(filter.clone()));
        }

        let mut params = Map::new();
        if let Some(config) = &self.config {
            for (key, value) in config.params() {
                params.insert(key.clone(), value.clone());
            }
        }
        if let Some(range) = range {
            range.fill(&mut params);
        }
        if let Some(limit) = self.common.limit {
            params.insert("limit".to_string(), Value::from(limit));
        }
        if !params.is_empty() {
            anns.insert("params".to_string(), Value::Object(params));
        }

        let mut fields = Map::new();
        fields.insert("anns".to_string(), Value::Object(anns));
        self.common.fill_scope_fields(&mut fields);
        fields
    }
}

/// Nearest-neighbour search returning the `limit` closest rows
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTopkSearchRequest {
    vector: Vector,
    fields: VectorSearchFields,
}

impl VectorTopkSearchRequest {
    /// Fails if the vector has a NaN or infinite component
    pub fn new(vector_field: impl Into<String>, vector: impl Into<Vector>, limit: u32) -> Result<Self, RequestError> {
        let vector = vector.into();
        vector.check_finite()?;
        let mut fields = VectorSearchFields::new(vector_field.into());
        fields.common.limit = Some(limit);
        Ok(Self { vector, fields })
    }

    pub fn config(mut self, config: VectorSearchConfig) -> Self {
        self.fields.config = Some(config);
        self
    }

    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    pub fn common(&self) -> &SearchCommonFields {
        &self.fields.common
    }

    fn common_mut(&mut self) -> &mut SearchCommonFields {
        &mut self.fields.common
    }
}

search_common_setters!(VectorTopkSearchRequest);

impl SearchPayload for VectorTopkSearchRequest {
    fn request_type(&self) -> RequestType {
        RequestType::Search
    }

    fn to_map(&self) -> Map<String, Value> {
        self.fields.to_map(self.vector.to_value(), None)
    }
}

/// Search for every row whose distance falls inside a [`DistanceRange`]
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRangeSearchRequest {
    vector: Vector,
    range: DistanceRange,
    fields: VectorSearchFields,
}

impl VectorRangeSearchRequest {
    /// Fails if the vector has a NaN or infinite component
    pub fn new(
        vector_field: impl Into<String>,
        vector: impl Into<Vector>,
        range: DistanceRange,
    ) -> Result<Self, RequestError> {
        let vector = vector.into();
        vector.check_finite()?;
        Ok(Self {
            vector,
            range,
            fields: VectorSearchFields::new(vector_field.into()),
        })
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.fields.common.limit = Some(limit);
        self
    }

    pub fn config(mut self, config: VectorSearchConfig) -> Self {
        self.fields.config = Some(config);
        self
    }

    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    pub fn distance_range(&self) -> DistanceRange {
        self.range
    }

    pub fn common(&self) -> &SearchCommonFields {
        &self.fields.common
    }

    fn common_mut(&mut self) -> &mut SearchCommonFields {
        &mut self.fields.common
    }
}

search_common_setters!(VectorRangeSearchRequest);

impl SearchPayload for VectorRangeSearchRequest {
    fn request_type(&self) -> RequestType {
        RequestType::Search
    }

    fn to_map(&self) -> Map<String, Value> {
        self.fields.to_map(self.vector.to_value(), Some(&self.range))
    }
}

/// Several independent top-k or range searches in one call, answered with
/// one result set per query vector
#[derive(Debug, Clone, PartialEq)]
pub struct VectorBatchSearchRequest {
    vectors: Vec<Vector>,
    range: Option<DistanceRange>,
    fields: VectorSearchFields,
}

impl VectorBatchSearchRequest {
    /// Fails on an empty batch or on a NaN or infinite component
    pub fn new<I, V>(vector_field: impl Into<String>, vectors: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Vector>,
    {
        let vectors: Vec<Vector> = vectors.into_iter().map(Into::into).collect();
        if vectors.is_empty() {
            return Err(RequestError::EmptyBatch);
        }
        for vector in &vectors {
            vector.check_finite()?;
        }
        Ok(Self {
            vectors,
            range: None,
            fields: VectorSearchFields::new(vector_field.into()),
        })
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.fields.common.limit = Some(limit);
        self
    }

    /// Turn every query of the batch into a range search
    pub fn distance_range(mut self, range: DistanceRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn config(mut self, config: VectorSearchConfig) -> Self {
        self.fields.config = Some(config);
        self
    }

    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    pub fn num_vectors(&self) -> usize {
        self.vectors.len()
    }

    pub fn common(&self) -> &SearchCommonFields {
        &self.fields.common
    }

    fn common_mut(&mut self) -> &mut SearchCommonFields {
        &mut self.fields.common
    }
}

search_common_setters!(VectorBatchSearchRequest);

impl SearchPayload for VectorBatchSearchRequest {
    fn request_type(&self) -> RequestType {
        RequestType::BatchSearch
    }

    fn to_map(&self) -> Map<String, Value> {
        let floats = Value::Array(self.vectors.iter().map(Vector::to_value).collect());
        self.fields.to_map(floats, self.range.as_ref())
    }
}

/// Any vector search, as accepted by `MochowClient::vector_search`
#[derive(Debug, Clone, PartialEq)]
pub enum VectorSearchRequest {
    TopK(VectorTopkSearchRequest),
    Range(VectorRangeSearchRequest),
    Batch(VectorBatchSearchRequest),
}

impl SearchPayload for VectorSearchRequest {
    fn request_type(&self) -> RequestType {
        match self {
            VectorSearchRequest::TopK(req) => req.request_type(),
            VectorSearchRequest::Range(req) => req.request_type(),
            VectorSearchRequest::Batch(req) => req.request_type(),
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        match self {
            VectorSearchRequest::TopK(req) => req.to_map(),
            VectorSearchRequest::Range(req) => req.to_map(),
            VectorSearchRequest::Batch(req) => req.to_map(),
        }
    }
}

impl From<VectorTopkSearchRequest> for VectorSearchRequest {
    fn from(req: VectorTopkSearchRequest) -> Self {
        VectorSearchRequest::TopK(req)
    }
}

impl From<VectorRangeSearchRequest> for VectorSearchRequest {
    fn from(req: VectorRangeSearchRequest) -> Self {
        VectorSearchRequest::Range(req)
    }
}

impl From<VectorBatchSearchRequest> for VectorSearchRequest {
    fn from(req: VectorBatchSearchRequest) -> Self {
        VectorSearchRequest::Batch(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadConsistency;
    use serde_json::json;

    fn topk() -> VectorTopkSearchRequest {
        VectorTopkSearchRequest::new("v", vec![0.1f32, 0.2], 5).unwrap()
    }

    #[test]
    fn test_topk_minimal_body() {
        let body = Value::Object(topk().to_map());
        assert_eq!(
            body,
            json!({
                "anns": {
                    "vectorField": "v",
                    "vectorFloats": [0.1, 0.2],
                    "params": { "limit": 5 }
                }
            })
        );
        assert!(body.get("limit").is_none());
        assert!(body.get("filter").is_none());
    }

    #[test]
    fn test_topk_filter_and_config_go_into_anns() {
        let body = topk()
            .filter("x=1")
            .config(VectorSearchConfig::new().ef(200))
            .to_map();

        assert_eq!(body["anns"]["filter"], json!("x=1"));
        assert_eq!(body["anns"]["params"]["ef"], json!(200));
        assert_eq!(body["anns"]["params"]["limit"], json!(5));
        assert!(!body.contains_key("filter"));
    }

    #[test]
    fn test_topk_without_filter_has_no_filter_key() {
        let body = topk().config(VectorSearchConfig::new().ef(200)).to_map();
        assert!(body["anns"].get("filter").is_none());
    }

    #[test]
    fn test_scope_fields_stay_top_level() {
        let pk = json!({ "id": "0001" }).as_object().cloned().unwrap();
        let body = topk()
            .partition_key(pk)
            .projections(["id", "bookName"])
            .read_consistency(ReadConsistency::Strong)
            .to_map();

        assert_eq!(body["partitionKey"], json!({ "id": "0001" }));
        assert_eq!(body["projections"], json!(["id", "bookName"]));
        assert_eq!(body["readConsistency"], json!("STRONG"));
        assert!(body["anns"].get("partitionKey").is_none());
    }

    #[test]
    fn test_range_emits_both_bounds() {
        let range = DistanceRange::new(0.0, 20.0).unwrap();
        let req = VectorRangeSearchRequest::new("v", vec![0.3f32, 0.4], range).unwrap();
        let body = req.to_map();

        assert_eq!(body["anns"]["params"], json!({ "distanceNear": 0.0, "distanceFar": 20.0 }));
        assert_eq!(req.distance_range(), range);

        let limited = req.limit(15).to_map();
        assert_eq!(limited["anns"]["params"]["limit"], json!(15));
        assert_eq!(limited["anns"]["params"]["distanceNear"], json!(0.0));
        assert_eq!(limited["anns"]["params"]["distanceFar"], json!(20.0));
    }

    #[test]
    fn test_batch_emits_nested_vectors() {
        let req = VectorBatchSearchRequest::new("v", vec![vec![0.1f32, 0.2], vec![0.3f32, 0.4]])
            .unwrap()
            .limit(10);
        let body = req.to_map();

        assert_eq!(req.num_vectors(), 2);
        assert_eq!(req.request_type(), RequestType::BatchSearch);
        assert_eq!(body["anns"]["vectorFloats"], json!([[0.1, 0.2], [0.3, 0.4]]));
        assert_eq!(body["anns"]["params"], json!({ "limit": 10 }));
    }

    #[test]
    fn test_batch_range_applies_to_every_query() {
        let req = VectorBatchSearchRequest::new("v", vec![vec![0.5f32]])
            .unwrap()
            .distance_range(DistanceRange::new(0.5, 1.0).unwrap());
        assert_eq!(
            req.to_map()["anns"]["params"],
            json!({ "distanceNear": 0.5, "distanceFar": 1.0 })
        );
    }

    #[test]
    fn test_batch_without_limit_has_no_params() {
        let req = VectorBatchSearchRequest::new("v", vec![vec![0.1f32]]).unwrap();
        assert!(req.to_map()["anns"].get("params").is_none());
    }

    #[test]
    fn test_empty_batch_rejected() {
        let result = VectorBatchSearchRequest::new("v", Vec::<Vector>::new());
        assert_eq!(result.unwrap_err(), RequestError::EmptyBatch);
    }

    #[test]
    fn test_non_finite_components_rejected() {
        assert!(matches!(
            VectorTopkSearchRequest::new("v", vec![f32::NAN, 0.1], 5),
            Err(RequestError::InvalidVector { position: 0, .. })
        ));

        let range = DistanceRange::new(0.0, 1.0).unwrap();
        assert!(matches!(
            VectorRangeSearchRequest::new("v", vec![0.1f32, f32::INFINITY], range),
            Err(RequestError::InvalidVector { position: 1, .. })
        ));

        assert!(matches!(
            VectorBatchSearchRequest::new("v", vec![vec![0.1f32], vec![f32::NEG_INFINITY]]),
            Err(RequestError::InvalidVector { position: 0, .. })
        ));
    }

    #[test]
    fn test_composition_is_repeatable() {
        let req = topk().filter("x=1").config(VectorSearchConfig::new().ef(64).pruning(true));
        let first = serde_json::to_string(&Value::Object(req.to_map())).unwrap();
        let second = serde_json::to_string(&Value::Object(req.to_map())).unwrap();
        assert_eq!(first, second);
    }
}

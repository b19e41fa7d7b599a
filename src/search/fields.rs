//! Building blocks shared by every search request

use crate::error::RequestError;
use crate::models::{PartitionKey, ReadConsistency};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// Key the query vector(s) are sent under
pub(crate) const VECTOR_FLOATS_KEY: &str = "vectorFloats";

/// A dense query vector
///
/// Components are written with their shortest `f32` decimal form, so `0.1`
/// goes on the wire as `0.1` rather than its widened `f64` value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector(Vec<f32>);

impl Vector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject NaN and infinite components, which JSON cannot carry
    pub(crate) fn check_finite(&self) -> Result<(), RequestError> {
        match self.0.iter().position(|v| !v.is_finite()) {
            Some(position) => Err(RequestError::InvalidVector {
                position,
                value: self.0[position],
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Array(self.0.iter().map(|&v| component_value(v)).collect())
    }
}

fn component_value(v: f32) -> Value {
    v.to_string()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

impl From<Vec<f32>> for Vector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl From<&[f32]> for Vector {
    fn from(values: &[f32]) -> Self {
        Self(values.to_vec())
    }
}

/// Distance window of a range search, sent as `distanceNear`/`distanceFar`
///
/// Bounds are not reordered: for similarity metrics the near bound is the
/// larger value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    min: f64,
    max: f64,
}

impl DistanceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, RequestError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RequestError::InvalidDistanceRange { near: min, far: max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub(crate) fn fill(&self, params: &mut Map<String, Value>) {
        params.insert("distanceNear".to_string(), Value::from(self.min));
        params.insert("distanceFar".to_string(), Value::from(self.max));
    }
}

/// Engine-specific search knobs, copied verbatim into `anns.params`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorSearchConfig {
    params: IndexMap<String, Value>,
}

impl VectorSearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// HNSW search breadth
    pub fn ef(self, ef: u32) -> Self {
        self.param("ef", ef)
    }

    /// PUCK/HNSW pruning switch
    pub fn pruning(self, pruning: bool) -> Self {
        self.param("pruning", pruning)
    }

    /// PUCK coarse cluster count
    pub fn search_coarse_count(self, count: u32) -> Self {
        self.param("searchCoarseCount", count)
    }

    /// Any other engine parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn params(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Optional fields common to all search kinds
///
/// Each field is `None` until its setter is called, and `None` fields are
/// never written to the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCommonFields {
    pub(crate) partition_key: Option<PartitionKey>,
    pub(crate) projections: Option<Vec<String>>,
    pub(crate) read_consistency: Option<ReadConsistency>,
    pub(crate) filter: Option<String>,
    pub(crate) limit: Option<u32>,
}

impl SearchCommonFields {
    pub fn partition_key(&self) -> Option<&PartitionKey> {
        self.partition_key.as_ref()
    }

    pub fn projections(&self) -> Option<&[String]> {
        self.projections.as_deref()
    }

    pub fn read_consistency(&self) -> Option<ReadConsistency> {
        self.read_consistency
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Write every set field at the top level of `fields`
    pub(crate) fn fill(&self, fields: &mut Map<String, Value>) {
        self.fill_scope_fields(fields);
        if let Some(filter) = &self.filter {
            fields.insert("filter".to_string(), Value::String(filter.clone()));
        }
        if let Some(limit) = self.limit {
            fields.insert("limit".to_string(), Value::from(limit));
        }
    }

    /// Write only the fields that scope a search (partition, projections,
    /// consistency), leaving `filter` and `limit` to the caller
    pub(crate) fn fill_scope_fields(&self, fields: &mut Map<String, Value>) {
        if let Some(partition_key) = &self.partition_key {
            fields.insert("partitionKey".to_string(), Value::Object(partition_key.clone()));
        }
        if let Some(projections) = &self.projections {
            fields.insert(
                "projections".to_string(),
                Value::Array(projections.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(read_consistency) = self.read_consistency {
            fields.insert(
                "readConsistency".to_string(),
                Value::String(read_consistency.as_str().to_string()),
            );
        }
    }
}

/// Setters for the common fields, generated for each request type.
///
/// The type must provide `fn common_mut(&mut self) -> &mut SearchCommonFields`.
macro_rules! search_common_setters {
    ($ty:ty) => {
        impl $ty {
            pub fn partition_key(mut self, partition_key: $crate::models::PartitionKey) -> Self {
                self.common_mut().partition_key = Some(partition_key);
                self
            }

            pub fn read_consistency(mut self, read_consistency: $crate::models::ReadConsistency) -> Self {
                self.common_mut().read_consistency = Some(read_consistency);
                self
            }

            pub fn projections<I, S>(mut self, projections: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.common_mut().projections = Some(projections.into_iter().map(Into::into).collect());
                self
            }

            /// Server-side boolean expression, e.g. `bookName='三国演义'`
            pub fn filter(mut self, filter: impl Into<String>) -> Self {
                self.common_mut().filter = Some(filter.into());
                self
            }
        }
    };
}

pub(crate) use search_common_setters;

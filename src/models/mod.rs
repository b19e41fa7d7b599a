//! Wire models shared by the client APIs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod row;

pub use row::{DeleteRowsArgs, QueryRowArgs, SelectRowsArgs, UpdateRowArgs};

use crate::error::ServerErrCode;

/// A row as a field-name to value map
pub type Row = Map<String, Value>;
pub type PrimaryKey = Map<String, Value>;
pub type PartitionKey = Map<String, Value>;
pub type UpdateFields = Map<String, Value>;
/// Opaque pagination cursor returned by `select`
pub type Marker = Map<String, Value>;

/// Read consistency level for queries and searches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadConsistency {
    #[default]
    Eventual,
    Strong,
}

impl ReadConsistency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadConsistency::Eventual => "EVENTUAL",
            ReadConsistency::Strong => "STRONG",
        }
    }
}

/// Fields present in every service response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommonResponse {
    #[serde(default)]
    pub code: i32,

    #[serde(default)]
    pub msg: String,
}

impl CommonResponse {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    /// Known error code, if the service returned one
    pub fn err_code(&self) -> Option<ServerErrCode> {
        ServerErrCode::from_code(self.code)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDatabaseResponse {
    #[serde(flatten)]
    pub status: CommonResponse,

    #[serde(default)]
    pub databases: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedRowsResponse {
    #[serde(flatten)]
    pub status: CommonResponse,

    #[serde(default)]
    pub affected_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRowResponse {
    #[serde(flatten)]
    pub status: CommonResponse,

    #[serde(default)]
    pub row: Row,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRowsResponse {
    #[serde(flatten)]
    pub status: CommonResponse,

    #[serde(default)]
    pub is_truncated: bool,

    #[serde(default)]
    pub next_marker: Marker,

    #[serde(default)]
    pub rows: Vec<Row>,
}

/// One hit of a search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RowResult {
    pub row: Row,

    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub score: f64,
}

/// Hits for one query vector
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRowResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_vector_floats: Option<Vec<f32>>,

    #[serde(default)]
    pub rows: Vec<RowResult>,
}

/// Response of a single-result search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRowResponse {
    #[serde(flatten)]
    pub status: CommonResponse,

    #[serde(flatten)]
    pub result: SearchRowResult,
}

/// Response of a batch search, one result set per query vector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSearchRowResponse {
    #[serde(flatten)]
    pub status: CommonResponse,

    #[serde(default)]
    pub results: Vec<SearchRowResult>,
}

/// Search response, shaped by the batch-ness of the request
#[derive(Debug, Clone)]
pub enum SearchResult {
    Single(SearchRowResponse),
    Batch(BatchSearchRowResponse),
}

impl SearchResult {
    pub fn is_batch(&self) -> bool {
        matches!(self, SearchResult::Batch(_))
    }

    pub fn status(&self) -> &CommonResponse {
        match self {
            SearchResult::Single(resp) => &resp.status,
            SearchResult::Batch(resp) => &resp.status,
        }
    }

    pub fn into_single(self) -> Option<SearchRowResponse> {
        match self {
            SearchResult::Single(resp) => Some(resp),
            SearchResult::Batch(_) => None,
        }
    }

    pub fn into_batch(self) -> Option<BatchSearchRowResponse> {
        match self {
            SearchResult::Batch(resp) => Some(resp),
            SearchResult::Single(_) => None,
        }
    }
}

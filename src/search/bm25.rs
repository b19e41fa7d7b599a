//! Full-text relevance search against an inverted index

use super::fields::{search_common_setters, SearchCommonFields};
use super::{RequestType, SearchPayload};
use serde_json::{Map, Value};

pub(crate) const BM25_PARAMS_KEY: &str = "BM25SearchParams";

/// BM25 search over the fields covered by `index_name`
#[derive(Debug, Clone, PartialEq)]
pub struct Bm25SearchRequest {
    index_name: String,
    search_text: String,
    common: SearchCommonFields,
}

impl Bm25SearchRequest {
    pub fn new(index_name: impl Into<String>, search_text: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            search_text: search_text.into(),
            common: SearchCommonFields::default(),
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.common.limit = Some(limit);
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn common(&self) -> &SearchCommonFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SearchCommonFields {
        &mut self.common
    }
}

search_common_setters!(Bm25SearchRequest);

impl SearchPayload for Bm25SearchRequest {
    fn request_type(&self) -> RequestType {
        RequestType::Search
    }

    /// Unlike vector search, `filter` and `limit` stay at the top level.
    fn to_map(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        self.common.fill(&mut fields);

        let mut params = Map::new();
        params.insert("indexName".to_string(), Value::String(self.index_name.clone()));
        params.insert("searchText".to_string(), Value::String(self.search_text.clone()));
        fields.insert(BM25_PARAMS_KEY.to_string(), Value::Object(params));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadConsistency;
    use serde_json::json;

    #[test]
    fn test_minimal_body() {
        let body = Value::Object(Bm25SearchRequest::new("segment_idx", "吕布").to_map());
        assert_eq!(
            body,
            json!({ "BM25SearchParams": { "indexName": "segment_idx", "searchText": "吕布" } })
        );
    }

    #[test]
    fn test_common_fields_at_top_level() {
        let body = Bm25SearchRequest::new("segment_idx", "吕布")
            .filter("bookName='三国演义'")
            .limit(10)
            .projections(["id", "vector"])
            .read_consistency(ReadConsistency::Strong)
            .to_map();

        assert_eq!(body["filter"], json!("bookName='三国演义'"));
        assert_eq!(body["limit"], json!(10));
        assert_eq!(body["projections"], json!(["id", "vector"]));
        assert_eq!(body["readConsistency"], json!("STRONG"));
        assert!(body["BM25SearchParams"].get("filter").is_none());
    }

    #[test]
    fn test_later_projections_replace_earlier() {
        let req = Bm25SearchRequest::new("idx", "text")
            .projections(["id", "bookName"])
            .projections(["id"]);
        assert_eq!(req.common().projections(), Some(&["id".to_string()][..]));
    }
}

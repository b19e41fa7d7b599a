//! Search operations

use super::row::ROW_PATH;
use super::MochowClient;
use crate::error::Result;
use crate::models::SearchResult;
use crate::search::{Bm25SearchRequest, HybridSearchRequest, PreparedSearch, SearchRequest, VectorSearchRequest};
use tracing::debug;

impl MochowClient {
    /// Send any search; the response shape follows the request's batch-ness
    pub async fn search(&self, database: &str, table: &str, request: impl Into<SearchRequest>) -> Result<SearchResult> {
        let request = request.into();
        let prepared = PreparedSearch::new(database, table, &request);
        debug!("Sending {} to {}.{}", prepared.action, database, table);

        if prepared.batch {
            let resp = self.post(ROW_PATH, prepared.action.as_str(), prepared.body).await?;
            Ok(SearchResult::Batch(resp))
        } else {
            let resp = self.post(ROW_PATH, prepared.action.as_str(), prepared.body).await?;
            Ok(SearchResult::Single(resp))
        }
    }

    /// Top-k, range or batch vector search
    pub async fn vector_search(&self, database: &str, table: &str, request: impl Into<VectorSearchRequest>) -> Result<SearchResult> {
        self.search(database, table, SearchRequest::from(request.into())).await
    }

    pub async fn bm25_search(&self, database: &str, table: &str, request: Bm25SearchRequest) -> Result<SearchResult> {
        self.search(database, table, request).await
    }

    pub async fn hybrid_search(&self, database: &str, table: &str, request: HybridSearchRequest) -> Result<SearchResult> {
        self.search(database, table, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::RecordingTransport;
    use crate::search::{VectorBatchSearchRequest, VectorTopkSearchRequest};
    use serde_json::json;

    #[tokio::test]
    async fn test_single_search_response() {
        let transport = RecordingTransport::new(json!({
            "code": 0,
            "msg": "Success",
            "rows": [{ "row": { "id": "0003" }, "distance": 0.05, "score": 0.95 }]
        }));
        let client = MochowClient::with_transport(transport.clone());

        let request = VectorTopkSearchRequest::new("vector", vec![0.3123f32, 0.43, 0.213], 5).unwrap();
        let result = client.vector_search("book", "book_segments", request).await.unwrap();

        assert!(!result.is_batch());
        let resp = result.into_single().unwrap();
        assert_eq!(resp.result.rows[0].row["id"], json!("0003"));

        let call = &transport.calls()[0];
        assert_eq!(call.path, "/row");
        assert_eq!(call.action.as_deref(), Some("search"));
        assert_eq!(call.body["database"], json!("book"));
    }

    #[tokio::test]
    async fn test_batch_search_response() {
        let transport = RecordingTransport::new(json!({
            "code": 0,
            "msg": "Success",
            "results": [
                { "rows": [{ "row": { "id": "0001" }, "distance": 0.1, "score": 0.0 }] },
                { "rows": [] }
            ]
        }));
        let client = MochowClient::with_transport(transport.clone());

        let request = VectorBatchSearchRequest::new("vector", vec![vec![0.1f32, 0.2], vec![0.3f32, 0.4]]).unwrap();
        let result = client.vector_search("book", "book_segments", request).await.unwrap();

        let resp = result.into_batch().unwrap();
        assert_eq!(resp.results.len(), 2);
        assert!(resp.results[1].rows.is_empty());
        assert_eq!(transport.calls()[0].action.as_deref(), Some("batchSearch"));
    }

    #[tokio::test]
    async fn test_bm25_search_uses_search_action() {
        let transport = RecordingTransport::new(json!({ "code": 0, "msg": "Success", "rows": [] }));
        let client = MochowClient::with_transport(transport.clone());

        let result = client
            .bm25_search("book", "book_segments", Bm25SearchRequest::new("idx", "吕布"))
            .await
            .unwrap();

        assert!(result.status().is_ok());
        let call = &transport.calls()[0];
        assert_eq!(call.action.as_deref(), Some("search"));
        assert_eq!(call.body["BM25SearchParams"]["searchText"], json!("吕布"));
    }
}

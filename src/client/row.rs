//! Row operations

use super::MochowClient;
use crate::error::Result;
use crate::models::{
    AffectedRowsResponse, CommonResponse, DeleteRowsArgs, QueryRowArgs, QueryRowResponse, Row,
    SelectRowsArgs, SelectRowsResponse, UpdateRowArgs,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

pub(crate) const ROW_PATH: &str = "/row";

/// Serialize `args` and add the target database and table
fn namespaced<T: Serialize>(database: &str, table: &str, args: &T) -> Result<Value> {
    let mut body = serde_json::to_value(args)?;
    if let Value::Object(map) = &mut body {
        map.insert("database".to_string(), Value::String(database.to_string()));
        map.insert("table".to_string(), Value::String(table.to_string()));
    }
    Ok(body)
}

impl MochowClient {
    pub async fn insert_rows(&self, database: &str, table: &str, rows: Vec<Row>) -> Result<AffectedRowsResponse> {
        debug!("Inserting {} rows into {}.{}", rows.len(), database, table);
        let body = json!({ "database": database, "table": table, "rows": rows });
        self.post(ROW_PATH, "insert", body).await
    }

    /// Insert rows, replacing any with the same primary key
    pub async fn upsert_rows(&self, database: &str, table: &str, rows: Vec<Row>) -> Result<AffectedRowsResponse> {
        debug!("Upserting {} rows into {}.{}", rows.len(), database, table);
        let body = json!({ "database": database, "table": table, "rows": rows });
        self.post(ROW_PATH, "upsert", body).await
    }

    pub async fn delete_rows(&self, database: &str, table: &str, args: &DeleteRowsArgs) -> Result<CommonResponse> {
        debug!("Deleting rows from {}.{}", database, table);
        self.post(ROW_PATH, "delete", namespaced(database, table, args)?).await
    }

    pub async fn query_row(&self, database: &str, table: &str, args: &QueryRowArgs) -> Result<QueryRowResponse> {
        debug!("Querying row from {}.{}", database, table);
        self.post(ROW_PATH, "query", namespaced(database, table, args)?).await
    }

    /// Scan rows page by page; pass `next_marker` back to continue
    pub async fn select_rows(&self, database: &str, table: &str, args: &SelectRowsArgs) -> Result<SelectRowsResponse> {
        debug!("Selecting up to {} rows from {}.{}", args.limit, database, table);
        self.post(ROW_PATH, "select", namespaced(database, table, args)?).await
    }

    pub async fn update_row(&self, database: &str, table: &str, args: &UpdateRowArgs) -> Result<CommonResponse> {
        debug!("Updating row in {}.{}", database, table);
        self.post(ROW_PATH, "update", namespaced(database, table, args)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::RecordingTransport;
    use crate::models::PrimaryKey;

    fn pk(id: &str) -> PrimaryKey {
        json!({ "id": id }).as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_rows() {
        let transport = RecordingTransport::new(json!({ "code": 0, "msg": "Success", "affectedCount": 2 }));
        let client = MochowClient::with_transport(transport.clone());

        let rows = vec![pk("0001"), pk("0002")];
        let resp = client.insert_rows("book", "book_segments", rows).await.unwrap();
        assert_eq!(resp.affected_count, 2);

        let call = &transport.calls()[0];
        assert_eq!(call.action.as_deref(), Some("insert"));
        assert_eq!(call.body["rows"], json!([{ "id": "0001" }, { "id": "0002" }]));
        assert_eq!(call.body["table"], json!("book_segments"));
    }

    #[tokio::test]
    async fn test_update_row_body() {
        let transport = RecordingTransport::new(json!({ "code": 0, "msg": "Success" }));
        let client = MochowClient::with_transport(transport.clone());

        let update = json!({ "bookName": "红楼梦", "page": 100 }).as_object().cloned().unwrap();
        client
            .update_row("book", "book_segments", &UpdateRowArgs::new(pk("0001"), update))
            .await
            .unwrap();

        assert_eq!(
            transport.calls()[0].body,
            json!({
                "database": "book",
                "table": "book_segments",
                "primaryKey": { "id": "0001" },
                "update": { "bookName": "红楼梦", "page": 100 }
            })
        );
    }

    #[tokio::test]
    async fn test_select_rows_pagination() {
        let transport = RecordingTransport::new(json!({
            "code": 0,
            "msg": "Success",
            "isTruncated": true,
            "nextMarker": { "id": "0002" },
            "rows": [{ "id": "0001" }]
        }));
        let client = MochowClient::with_transport(transport.clone());

        let resp = client
            .select_rows("book", "book_segments", &SelectRowsArgs::default().limit(1))
            .await
            .unwrap();

        assert!(resp.is_truncated);
        assert_eq!(resp.next_marker, pk("0002"));
        assert_eq!(resp.rows.len(), 1);
        assert_eq!(transport.calls()[0].body["limit"], json!(1));
    }

    #[tokio::test]
    async fn test_delete_rows_by_filter() {
        let transport = RecordingTransport::new(json!({ "code": 0, "msg": "Success" }));
        let client = MochowClient::with_transport(transport.clone());

        client
            .delete_rows("book", "book_segments", &DeleteRowsArgs::by_filter("page > 23"))
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, "POST");
        assert_eq!(call.action.as_deref(), Some("delete"));
        assert!(call.body.get("primaryKey").is_none());
    }
}

//! Mochow Client Example
//!
//! Walks through the row and search operations against a running instance.
//! Expects database `book` with table `book_segments` (id, bookName, author,
//! page, vector of dimension 3, segment) and an inverted index
//! `book_segment_inverted_idx` on `segment`.

use anyhow::Context;
use mochow_client::{
    config::{Config, LoggingConfig},
    models::{DeleteRowsArgs, PrimaryKey, QueryRowArgs, Row, SelectRowsArgs, UpdateRowArgs},
    prelude::*,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DATABASE: &str = "book";
const TABLE: &str = "book_segments";

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_env_filter(filter)
                .init();
        }
    }
}

fn object(value: Value) -> anyhow::Result<Row> {
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a JSON object, got {}", other),
    }
}

fn sample_rows() -> anyhow::Result<Vec<Row>> {
    [
        json!({ "id": "0001", "bookName": "西游记", "author": "吴承恩", "page": 21,
                "vector": [0.2123, 0.21, 0.213], "segment": "富贵功名，前缘分定，为人切莫欺心。" }),
        json!({ "id": "0002", "bookName": "西游记", "author": "吴承恩", "page": 22,
                "vector": [0.2123, 0.22, 0.213], "segment": "正大光明，忠良善果弥深。些些狂妄天加谴，眼前不遇待时临。" }),
        json!({ "id": "0003", "bookName": "三国演义", "author": "罗贯中", "page": 23,
                "vector": [0.2123, 0.23, 0.213], "segment": "细作探知这个消息，飞报吕布。" }),
        json!({ "id": "0004", "bookName": "三国演义", "author": "罗贯中", "page": 24,
                "vector": [0.2123, 0.24, 0.213], "segment": "布大惊，与陈宫商议。宫曰：“闻刘玄德新领徐州，可往投之。” 布从其言，竟投徐州来。有人报知玄德。" }),
        json!({ "id": "0005", "bookName": "三国演义", "author": "罗贯中", "page": 25,
                "vector": [0.2123, 0.24, 0.213], "segment": "玄德曰：“布乃当今英勇之士，可出迎之。”糜竺曰：“吕布乃虎狼之徒，不可收留；收则伤人矣。" }),
    ]
    .into_iter()
    .map(object)
    .collect()
}

fn report(operation: &str, result: &SearchResult) -> anyhow::Result<()> {
    let status = result.status();
    if !status.is_ok() {
        warn!("{} failed with code {}: {}", operation, status.code, status.msg);
        return Ok(());
    }
    let rendered = match result {
        SearchResult::Single(resp) => serde_json::to_string_pretty(&resp.result)?,
        SearchResult::Batch(resp) => serde_json::to_string_pretty(&resp.results)?,
    };
    info!("{} result: {}", operation, rendered);
    Ok(())
}

async fn run_searches(client: &MochowClient) -> anyhow::Result<()> {
    let query = vec![0.3123f32, 0.43, 0.213];

    let topk = VectorTopkSearchRequest::new("vector", query.clone(), 5)?
        .filter("bookName='三国演义'")
        .config(VectorSearchConfig::new().ef(200));
    report("topk search", &client.vector_search(DATABASE, TABLE, topk).await?)?;

    let range = VectorRangeSearchRequest::new("vector", query.clone(), DistanceRange::new(0.0, 20.0)?)?
        .filter("bookName='三国演义'")
        .limit(15)
        .config(VectorSearchConfig::new().ef(200));
    report("range search", &client.vector_search(DATABASE, TABLE, range).await?)?;

    let batch = VectorBatchSearchRequest::new("vector", vec![query.clone(), vec![0.5512, 0.33, 0.43]])?
        .filter("bookName='三国演义'")
        .limit(10)
        .config(VectorSearchConfig::new().ef(200))
        .projections(["id", "bookName", "author", "page"]);
    report("batch search", &client.vector_search(DATABASE, TABLE, batch).await?)?;

    let bm25 = Bm25SearchRequest::new("book_segment_inverted_idx", "吕布")
        .filter("bookName='三国演义'")
        .limit(10)
        .read_consistency(ReadConsistency::Strong)
        .projections(["id", "vector"]);
    report("bm25 search", &client.bm25_search(DATABASE, TABLE, bm25).await?)?;

    let hybrid = HybridSearchRequest::new(
        VectorTopkSearchRequest::new("vector", query, 15)?,
        Bm25SearchRequest::new("book_segment_inverted_idx", "吕布"),
        0.4,
        0.6,
    )?
    .filter("bookName='三国演义'")
    .limit(15)
    .projections(["id", "bookName", "segment"]);
    report("hybrid search", &client.hybrid_search(DATABASE, TABLE, hybrid).await?)?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::from_file_with_env(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    init_tracing(&config.logging);
    info!("Configuration loaded and validated from {}", config_path);

    let client = MochowClient::new(config.client)?;

    let resp = client.create_database(DATABASE).await?;
    if resp.is_ok() || resp.err_code() == Some(ServerErrCode::DbAlreadyExist) {
        info!("Database {} ready", DATABASE);
    } else {
        anyhow::bail!("create database failed with code {}: {}", resp.code, resp.msg);
    }

    let resp = client.upsert_rows(DATABASE, TABLE, sample_rows()?).await?;
    if !resp.status.is_ok() {
        anyhow::bail!("upsert failed with code {}: {}", resp.status.code, resp.status.msg);
    }
    info!("Upserted {} rows", resp.affected_count);

    let pk: PrimaryKey = object(json!({ "id": "0001" }))?;
    let resp = client
        .query_row(DATABASE, TABLE, &QueryRowArgs::new(pk.clone()).projections(["id", "bookName"]))
        .await?;
    info!("Query result: {}", serde_json::to_string_pretty(&resp.row)?);

    let resp = client
        .select_rows(DATABASE, TABLE, &SelectRowsArgs::default().projections(["id", "bookName"]).limit(1))
        .await?;
    info!("Select returned {} rows, truncated={}", resp.rows.len(), resp.is_truncated);

    let update = object(json!({
        "bookName": "红楼梦",
        "author": "曹雪芹",
        "page": 100,
        "segment": "满纸荒唐言，一把辛酸泪",
    }))?;
    let resp = client.update_row(DATABASE, TABLE, &UpdateRowArgs::new(pk, update)).await?;
    if !resp.is_ok() {
        warn!("Update failed with code {}: {}", resp.code, resp.msg);
    }

    run_searches(&client).await?;

    let resp = client
        .delete_rows(DATABASE, TABLE, &DeleteRowsArgs::by_filter("page > 24"))
        .await?;
    if !resp.is_ok() {
        warn!("Delete failed with code {}: {}", resp.code, resp.msg);
    }

    info!("Example finished");
    Ok(())
}

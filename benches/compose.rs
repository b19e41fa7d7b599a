use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mochow_client::search::{
    Bm25SearchRequest, HybridSearchRequest, PreparedSearch, SearchRequest, VectorBatchSearchRequest,
    VectorSearchConfig, VectorTopkSearchRequest,
};

fn query(dim: usize) -> Vec<f32> {
    (0..dim).map(|i| i as f32 / dim as f32).collect()
}

fn bench_compose(c: &mut Criterion) {
    let topk: SearchRequest = VectorTopkSearchRequest::new("vector", query(768), 10)
        .expect("finite query")
        .filter("page > 10")
        .config(VectorSearchConfig::new().ef(200))
        .into();

    let batch: SearchRequest = VectorBatchSearchRequest::new("vector", (0..16).map(|_| query(768)))
        .expect("non-empty batch")
        .limit(10)
        .into();

    let hybrid: SearchRequest = HybridSearchRequest::new(
        VectorTopkSearchRequest::new("vector", query(768), 10).expect("finite query"),
        Bm25SearchRequest::new("segment_idx", "吕布"),
        0.4,
        0.6,
    )
    .expect("finite weights")
    .limit(20)
    .into();

    c.bench_function("compose_topk_768", |b| {
        b.iter(|| PreparedSearch::new("book", "segments", black_box(&topk)))
    });
    c.bench_function("compose_batch_16x768", |b| {
        b.iter(|| PreparedSearch::new("book", "segments", black_box(&batch)))
    });
    c.bench_function("compose_hybrid_768", |b| {
        b.iter(|| PreparedSearch::new("book", "segments", black_box(&hybrid)))
    });
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);

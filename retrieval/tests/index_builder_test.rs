//! Integration tests for [`retrieval::IndexBuilder`].
//!
//! Covers idempotent population, pre-existing collections, per-record
//! failure tolerance, and the empty-catalogue error.

mod common;

use std::sync::Arc;

use common::{empty_knowledge_fixture, knowledge_fixture, KeywordEmbedding};
use retrieval::IndexBuilder;
use vector_index::{InMemoryVectorIndex, VectorIndex};

#[tokio::test]
async fn ensure_index_populates_all_records() {
    let (knowledge, _file) = knowledge_fixture();
    let embedding = Arc::new(KeywordEmbedding::new());
    let index = Arc::new(InMemoryVectorIndex::new());

    let builder = IndexBuilder::new(knowledge, embedding.clone(), index.clone());
    builder.ensure_index().await.unwrap();

    assert!(index.collection_exists(builder.collection()).await.unwrap());
    assert_eq!(index.len(builder.collection()).await, 3);
    assert_eq!(embedding.calls(), 3);
}

#[tokio::test]
async fn second_call_is_a_no_op() {
    let (knowledge, _file) = knowledge_fixture();
    let embedding = Arc::new(KeywordEmbedding::new());
    let index = Arc::new(InMemoryVectorIndex::new());

    let builder = IndexBuilder::new(knowledge, embedding.clone(), index.clone());
    builder.ensure_index().await.unwrap();
    builder.ensure_index().await.unwrap();

    // Population work ran at most once.
    assert_eq!(embedding.calls(), 3);
    assert_eq!(index.len(builder.collection()).await, 3);
}

#[tokio::test]
async fn existing_collection_is_authoritative() {
    let (knowledge, _file) = knowledge_fixture();
    let embedding = Arc::new(KeywordEmbedding::new());
    let index = Arc::new(InMemoryVectorIndex::new());

    // A fresh builder in the same process sees the pre-existing collection
    // and must not re-embed.
    index.ensure_collection("plant_knowledge_base").await.unwrap();

    let builder = IndexBuilder::new(knowledge, embedding.clone(), index.clone());
    builder.ensure_index().await.unwrap();

    assert_eq!(embedding.calls(), 0);
    assert_eq!(index.len(builder.collection()).await, 0);
}

#[tokio::test]
async fn empty_catalogue_is_fatal_for_bootstrap() {
    let (knowledge, _file) = empty_knowledge_fixture();
    let embedding = Arc::new(KeywordEmbedding::new());
    let index = Arc::new(InMemoryVectorIndex::new());

    let builder = IndexBuilder::new(knowledge, embedding, index);
    assert!(builder.ensure_index().await.is_err());
}

#[tokio::test]
async fn embedding_failure_skips_record_not_bootstrap() {
    let (knowledge, _file) = knowledge_fixture();
    let embedding = Arc::new(common::FailingEmbedding);
    let index = Arc::new(InMemoryVectorIndex::new());

    let builder = IndexBuilder::new(knowledge, embedding, index.clone());
    // Every record fails to embed; ensure_index still succeeds with an
    // empty collection (partial load is tolerated, not escalated).
    builder.ensure_index().await.unwrap();
    assert_eq!(index.len(builder.collection()).await, 0);
}

#[tokio::test]
async fn concurrent_first_calls_populate_once() {
    let (knowledge, _file) = knowledge_fixture();
    let embedding = Arc::new(KeywordEmbedding::new());
    let index = Arc::new(InMemoryVectorIndex::new());

    let builder = Arc::new(IndexBuilder::new(knowledge, embedding.clone(), index.clone()));

    let a = {
        let b = builder.clone();
        tokio::spawn(async move { b.ensure_index().await })
    };
    let b = {
        let b = builder.clone();
        tokio::spawn(async move { b.ensure_index().await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    assert_eq!(embedding.calls(), 3);
    assert_eq!(index.len(builder.collection()).await, 3);
}

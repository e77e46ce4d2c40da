// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use es_client::*;
use es_model::*;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::tests::es_client_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn books_index() -> Index {
    let folding: Analyzer = CustomAnalyzer::new("folding", Tokenizer::standard())
        .with_filter(TokenFilter::lowercase())
        .with_filter(TokenFilter::asciifolding())
        .into();

    Index::new("books")
        .with_settings(IndexSettings::new(1, 0))
        .with_property("title", TextMapping::default().with_analyzer(folding))
        .with_property("year", Mapping::numeric(NumericType::Integer))
}

/// `GET /{index}` answer for an index created from `create_body`
fn fetched(concrete_name: &str, create_body: &Value) -> Value {
    json!({
        concrete_name: {
            "aliases": {},
            "mappings": create_body["mappings"],
            "settings": {
                "index": {
                    "number_of_shards": "1",
                    "number_of_replicas": "0",
                    "provided_name": concrete_name,
                    "uuid": "c0ZyqNfyTq2N8bm2x7cYEw",
                    "analysis": create_body["settings"]["analysis"],
                }
            },
        }
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_index() {
    let index = books_index();
    let body = index.encode_create_body().unwrap();

    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::PUT,
        "/test-books",
        Some(body),
        Ok(Some(json!({
            "acknowledged": true,
            "shards_acknowledged": true,
            "index": "test-books",
        }))),
    );
    let client = client_with(transport);

    let response = client.create_index(&index).await.unwrap();

    assert_eq!(
        response,
        CreateIndexResponse {
            acknowledged: true,
            shards_acknowledged: true,
            index: "test-books".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_index_with_conflicting_analysis_is_not_sent() {
    let whitespace: Analyzer = CustomAnalyzer::new("folding", Tokenizer::whitespace()).into();
    let index =
        books_index().with_property("summary", TextMapping::default().with_analyzer(whitespace));

    let client = client_with(MockTransport::new());

    let err = client.create_index(&index).await.unwrap_err();

    assert!(
        matches!(
            &err,
            ElasticsearchError::Codec(CodecError::ConflictingDefinition { name, .. })
                if name == "folding"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_fetch_index() {
    let original = books_index();
    let body = original.encode_create_body().unwrap();

    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/test-books",
        None,
        Ok(Some(fetched("test-books", &body))),
    );
    expect_request(&mut transport, Method::GET, "/test-authors", None, Ok(None));
    let client = client_with(transport);

    let index = client.fetch_index("books").await.unwrap().unwrap();

    assert_eq!(index.name(), "books");
    assert_eq!(index.properties(), original.properties());
    assert_eq!(index.settings().uuid(), Some("c0ZyqNfyTq2N8bm2x7cYEw"));
    assert_eq!(index.analysis().analyzers().len(), 1);
    assert!(!index.properties_drifted().unwrap());

    assert!(client.fetch_index("authors").await.unwrap().is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_fetch_index_reports_drift() {
    let mut body = books_index().encode_create_body().unwrap();
    body["mappings"]["properties"]["isbn"] = json!({ "type": "keyword" });

    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/test-books",
        None,
        Ok(Some(fetched("test-books", &body))),
    );
    let client = client_with(transport);

    let index = client.fetch_index("books").await.unwrap().unwrap();

    assert!(index.properties_drifted().unwrap());
    assert!(index.properties().contains("isbn"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_fetch_index_with_unknown_mapping_type() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/test-vectors",
        None,
        Ok(Some(json!({
            "test-vectors": {
                "mappings": {
                    "properties": { "embedding": { "type": "dense_vector", "dims": 3 } }
                },
                "settings": { "index": { "number_of_shards": "1", "number_of_replicas": "1" } },
            }
        }))),
    );
    let client = client_with(transport);

    let err = client.fetch_index("vectors").await.unwrap_err();

    assert!(
        matches!(
            &err,
            ElasticsearchError::Codec(CodecError::UnknownVariantKind { kind, path, .. })
                if kind == "dense_vector" && path == "vectors.mappings.properties.embedding"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_exists() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/test-books",
        None,
        Ok(Some(fetched(
            "test-books",
            &books_index().encode_create_body().unwrap(),
        ))),
    );
    expect_request(&mut transport, Method::GET, "/test-authors", None, Ok(None));
    let client = client_with(transport);

    assert!(client.index_exists("books").await.unwrap());
    assert!(!client.index_exists("authors").await.unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_index() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::DELETE,
        "/test-books",
        None,
        Ok(Some(json!({ "acknowledged": true }))),
    );
    expect_request(&mut transport, Method::DELETE, "/test-authors", None, Ok(None));
    let client = client_with(transport);

    assert!(client.delete_index("books").await.unwrap());
    assert!(!client.delete_index("authors").await.unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_health() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/_cluster/health",
        None,
        Ok(Some(json!({
            "cluster_name": "docker-cluster",
            "status": "yellow",
            "timed_out": false,
            "number_of_nodes": 1,
            "number_of_data_nodes": 1,
            "active_primary_shards": 5,
            "active_shards": 5,
            "relocating_shards": 0,
            "initializing_shards": 0,
            "unassigned_shards": 1,
            "delayed_unassigned_shards": 0,
            "active_shards_percent_as_number": 83.3,
        }))),
    );
    let client = client_with(transport);

    let health = client.health().await.unwrap();

    assert_eq!(health.cluster_name, "docker-cluster");
    assert_eq!(health.status, HealthStatus::Yellow);
    assert!(health.is_available());
    assert_eq!(health.extra.get("delayed_unassigned_shards"), Some(&json!(0)));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unreachable_cluster() {
    let mut transport = MockTransport::new();
    transport.expect_send().times(1).return_once(|_, _, _| {
        Err(ElasticsearchError::ConnectionFailed {
            url: "http://localhost:9200/".to_string(),
            source: "connection refused".into(),
        })
    });
    let client = client_with(transport);

    let err = client.health().await.unwrap_err();

    assert!(matches!(err, ElasticsearchError::ConnectionFailed { .. }), "{err:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

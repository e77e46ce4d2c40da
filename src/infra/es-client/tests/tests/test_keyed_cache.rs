// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use es_client::*;
use es_model::*;
use http::Method;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::tests::es_client_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    visits: u32,
}

const CACHE_INDEX: &str = "/test-elasticsearch-cache";

fn cache_create_body() -> Value {
    Index::new("elasticsearch-cache")
        .with_dynamic(DynamicMapping::True)
        .with_enabled(false)
        .encode_create_body()
        .unwrap()
}

fn cache_with(transport: MockTransport) -> KeyedCache {
    let config = client_config().with_keyed_cache(KeyedCacheConfig::enabled());
    let client = ElasticsearchClient::new(Arc::new(config), Arc::new(transport));
    KeyedCache::from_config(Arc::new(client)).unwrap()
}

fn write_response(id: &str, result: &str) -> Value {
    json!({
        "_index": "test-elasticsearch-cache",
        "_id": id,
        "_version": 1,
        "result": result,
        "_seq_no": 0,
        "_primary_term": 1,
    })
}

fn expect_index_missing_then_created(transport: &mut MockTransport) {
    expect_request(transport, Method::GET, CACHE_INDEX, None, Ok(None));
    expect_request(
        transport,
        Method::PUT,
        CACHE_INDEX,
        Some(cache_create_body()),
        Ok(Some(json!({
            "acknowledged": true,
            "shards_acknowledged": true,
            "index": "test-elasticsearch-cache",
        }))),
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_cache_index_mapping() {
    let body = cache_create_body();

    assert_eq!(body["mappings"]["dynamic"], json!(true));
    assert_eq!(body["mappings"]["enabled"], json!(false));
    assert_eq!(body["mappings"]["properties"], json!({}));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_disabled_cache() {
    let client = ElasticsearchClient::new(
        Arc::new(client_config()),
        Arc::new(MockTransport::new()),
    );

    assert!(KeyedCache::from_config(Arc::new(client)).is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_then_get() {
    let session = Session {
        user: "alice".to_string(),
        visits: 3,
    };

    let mut transport = MockTransport::new();
    expect_index_missing_then_created(&mut transport);
    expect_request(
        &mut transport,
        Method::PUT,
        "/test-elasticsearch-cache/_doc/session%3Aalice",
        Some(json!({ "value": { "user": "alice", "visits": 3 } })),
        Ok(Some(write_response("session:alice", "created"))),
    );
    expect_request(
        &mut transport,
        Method::GET,
        "/test-elasticsearch-cache/_doc/session%3Aalice",
        None,
        Ok(Some(json!({
            "_index": "test-elasticsearch-cache",
            "_id": "session:alice",
            "_version": 1,
            "found": true,
            "_source": { "value": { "user": "alice", "visits": 3 } },
        }))),
    );
    expect_request(
        &mut transport,
        Method::GET,
        "/test-elasticsearch-cache/_doc/session%3Abob",
        None,
        Ok(None),
    );
    let cache = cache_with(transport);

    // The index is checked and created only by the first call
    cache.set("session:alice", &session).await.unwrap();

    assert_eq!(cache.get::<Session>("session:alice").await.unwrap(), Some(session));
    assert_eq!(cache.get::<Session>("session:bob").await.unwrap(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_concurrently_created_index_is_accepted() {
    let mut transport = MockTransport::new();
    expect_request(&mut transport, Method::GET, CACHE_INDEX, None, Ok(None));
    expect_request(
        &mut transport,
        Method::PUT,
        CACHE_INDEX,
        Some(cache_create_body()),
        Err(remote_error(
            400,
            "resource_already_exists_exception",
            "index [test-elasticsearch-cache/Xb1] already exists",
        )),
    );
    expect_request(
        &mut transport,
        Method::PUT,
        "/test-elasticsearch-cache/_doc/counter",
        Some(json!({ "value": 42 })),
        Ok(Some(write_response("counter", "created"))),
    );
    let cache = cache_with(transport);

    cache.ensure_index().await.unwrap();
    cache.set("counter", &42).await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_failed_ensure_is_retried() {
    let mut transport = MockTransport::new();
    expect_request(&mut transport, Method::GET, CACHE_INDEX, None, Ok(None));
    expect_request(
        &mut transport,
        Method::PUT,
        CACHE_INDEX,
        Some(cache_create_body()),
        Err(remote_error(
            403,
            "security_exception",
            "action [indices:admin/create] is unauthorized",
        )),
    );
    expect_request(&mut transport, Method::GET, CACHE_INDEX, None, Ok(Some(json!({}))));
    let cache = cache_with(transport);

    let err = cache.ensure_index().await.unwrap_err();
    assert_eq!(err.remote_error_type(), Some("security_exception"));

    // Someone else created it in the meantime
    cache.ensure_index().await.unwrap();
    cache.ensure_index().await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_remove() {
    let mut transport = MockTransport::new();
    expect_request(&mut transport, Method::GET, CACHE_INDEX, None, Ok(Some(json!({}))));
    expect_request(
        &mut transport,
        Method::DELETE,
        "/test-elasticsearch-cache/_doc/counter",
        None,
        Ok(Some(write_response("counter", "deleted"))),
    );
    expect_request(
        &mut transport,
        Method::DELETE,
        "/test-elasticsearch-cache/_doc/counter",
        None,
        Ok(None),
    );
    let cache = cache_with(transport);

    assert!(cache.remove("counter").await.unwrap());
    // Missing keys are not an error
    assert!(!cache.remove("counter").await.unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

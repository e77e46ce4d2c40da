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
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tests::es_client_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Book {
    title: String,
    year: u32,
}

fn hobbit() -> Book {
    Book {
        title: "The Hobbit".to_string(),
        year: 1937,
    }
}

fn write_response(id: &str, result: &str, version: u64) -> serde_json::Value {
    json!({
        "_index": "test-books",
        "_id": id,
        "_version": version,
        "result": result,
        "_shards": { "total": 2, "successful": 1, "failed": 0 },
        "_seq_no": 0,
        "_primary_term": 1,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_found() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/test-books/_doc/1?routing=tenant-1&realtime=false",
        None,
        Ok(Some(json!({
            "_index": "test-books",
            "_id": "1",
            "_version": 4,
            "_seq_no": 10,
            "_primary_term": 1,
            "_routing": "tenant-1",
            "found": true,
            "_source": { "title": "The Hobbit", "year": 1937 },
        }))),
    );
    let client = client_with(transport);

    let response = client
        .get::<Book>(
            "books",
            "1",
            &RequestOptions::new()
                .with_realtime(false)
                .with_routing("tenant-1"),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.version, Some(4));
    assert_eq!(response.routing.as_deref(), Some("tenant-1"));
    assert_eq!(response.into_source(), Some(hobbit()));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_missing_is_absent() {
    let mut transport = MockTransport::new();
    expect_request(&mut transport, Method::GET, "/test-books/_doc/404", None, Ok(None));
    let client = client_with(transport);

    let response = client
        .get::<Book>("books", "404", &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(response, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_rejected_id_is_remote_error() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::GET,
        "/test-books/_doc/_bad",
        None,
        Err(remote_error(400, "illegal_argument_exception", "id [_bad] is reserved")),
    );
    let client = client_with(transport);

    let err = client
        .get::<Book>("books", "_bad", &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(
        matches!(
            &err,
            ElasticsearchError::RemoteError(e)
                if e.status == 400 && e.reason == "id [_bad] is reserved"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_empty_id_never_reaches_transport() {
    // No expectations: any call would fail the test
    let client = client_with(MockTransport::new());

    let err = client
        .get::<Book>("books", "", &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ElasticsearchError::UrlConstruction(_)), "{err:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_document() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::PUT,
        "/test-books/_doc/1?refresh=wait_for",
        Some(json!({ "title": "The Hobbit", "year": 1937 })),
        Ok(Some(write_response("1", "created", 1))),
    );
    expect_request(
        &mut transport,
        Method::POST,
        "/test-books/_doc",
        Some(json!({ "title": "The Hobbit", "year": 1937 })),
        Ok(Some(write_response("kXh3", "created", 1))),
    );
    let client = client_with(transport);

    let response = client
        .index_document(
            "books",
            Some("1"),
            &hobbit(),
            &RequestOptions::new().with_refresh(Refresh::WaitFor),
        )
        .await
        .unwrap();
    assert_eq!(response.result, WriteResult::Created);
    assert_eq!(response.id, "1");

    // Cluster-assigned id
    let response = client
        .index_document("books", None, &hobbit(), &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(response.id, "kXh3");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_document_conflict() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::PUT,
        "/test-books/_create/1",
        Some(json!({ "title": "The Hobbit", "year": 1937 })),
        Err(remote_error(
            409,
            "version_conflict_engine_exception",
            "[1]: version conflict, document already exists (current version [1])",
        )),
    );
    let client = client_with(transport);

    let err = client
        .create_document("books", "1", &hobbit(), &RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.remote_error_type(), Some("version_conflict_engine_exception"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_document() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::POST,
        "/test-books/_update/1?version=4",
        Some(json!({ "doc": { "year": 1938 } })),
        Ok(Some(write_response("1", "updated", 5))),
    );
    expect_request(
        &mut transport,
        Method::POST,
        "/test-books/_update/2",
        Some(json!({ "doc": { "year": 1938 } })),
        Ok(None),
    );
    let client = client_with(transport);

    let response = client
        .update_document(
            "books",
            "1",
            &json!({ "year": 1938 }),
            &RequestOptions::new().with_version(4),
        )
        .await
        .unwrap();
    assert_eq!(response.result, WriteResult::Updated);
    assert_eq!(response.version, Some(5));

    let err = client
        .update_document("books", "2", &json!({ "year": 1938 }), &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(
        matches!(
            &err,
            ElasticsearchError::DocumentNotFound { index, id } if index == "books" && id == "2"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_document() {
    let mut transport = MockTransport::new();
    expect_request(
        &mut transport,
        Method::DELETE,
        "/test-books/_doc/1",
        None,
        Ok(Some(write_response("1", "deleted", 6))),
    );
    expect_request(&mut transport, Method::DELETE, "/test-books/_doc/1", None, Ok(None));
    let client = client_with(transport);

    let response = client
        .delete_document("books", "1", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(response.result, WriteResult::Deleted);

    // Deleting what is not there is reported
    let err = client
        .delete_document("books", "1", &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ElasticsearchError::DocumentNotFound { .. }), "{err:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use bytes::Bytes;
use es_client::*;
use http::Method;
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

mockall::mock! {
    pub Transport {}

    #[async_trait::async_trait]
    impl Transport for Transport {
        async fn send(
            &self,
            method: Method,
            path: &str,
            body: Option<Bytes>,
        ) -> Result<Option<Bytes>, ElasticsearchError>;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const TEST_INDEX_PREFIX: &str = "test-";

/// Expects exactly one request and answers it. `None` stands for a `404`.
pub fn expect_request(
    transport: &mut MockTransport,
    method: Method,
    path: &str,
    body: Option<Value>,
    response: Result<Option<Value>, ElasticsearchError>,
) {
    let path = path.to_string();
    transport
        .expect_send()
        .withf(move |m, p, b| {
            let sent = b
                .as_ref()
                .map(|b| serde_json::from_slice::<Value>(b).unwrap());
            *m == method && p.to_string() == path && sent == body
        })
        .times(1)
        .return_once(move |_, _, _| response.map(|r| r.map(|v| Bytes::from(v.to_string()))));
}

pub fn remote_error(status: u16, error_type: &str, reason: &str) -> ElasticsearchError {
    RemoteError {
        status,
        error_type: Some(error_type.to_string()),
        reason: reason.to_string(),
    }
    .into()
}

pub fn client_config() -> ElasticsearchClientConfig {
    ElasticsearchClientConfig::default().with_index_prefix(TEST_INDEX_PREFIX)
}

pub fn client_with(transport: MockTransport) -> ElasticsearchClient {
    ElasticsearchClient::new(Arc::new(client_config()), Arc::new(transport))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

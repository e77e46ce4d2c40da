// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use bytes::Bytes;
use http::{Method, StatusCode};
use serde_json::Value;

use crate::{ElasticsearchError, RemoteError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Sends one request to the cluster and returns the response body.
///
/// `path` is relative to the configured base URL and already carries its query
/// string. Bodies are JSON. A `404 Not Found` yields `Ok(None)`, any other
/// error status is reported as an error (see [`interpret_response`]).
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Option<Bytes>, ElasticsearchError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Hook that sees every exchange with the cluster
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _method: &Method, _path: &str, _body: Option<&[u8]>) {}

    fn on_response(&self, _method: &Method, _path: &str, _status: StatusCode, _body: &[u8]) {}
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maps a raw HTTP response onto the transport contract
pub fn interpret_response(
    status: StatusCode,
    body: Bytes,
) -> Result<Option<Bytes>, ElasticsearchError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if status.is_client_error() || status.is_server_error() {
        if body.is_empty() {
            return Err(ElasticsearchError::EmptyResponse {
                status: status.as_u16(),
            });
        }

        let error_body: Value =
            serde_json::from_slice(&body).map_err(ElasticsearchError::InvalidResponse)?;

        let error = RemoteError::from_body(status.as_u16(), &error_body);
        tracing::warn!(
            status = error.status,
            error_type = ?error.error_type,
            reason = %error.reason,
            "Elasticsearch request failed",
        );
        return Err(error.into());
    }

    if body.is_empty() {
        return Err(ElasticsearchError::EmptyResponse {
            status: status.as_u16(),
        });
    }

    Ok(Some(body))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use es_model::{CodecError, ResponseDecodeError};
use internal_error::{BoxedError, InternalError};
use serde_json::Value;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ElasticsearchError {
    #[error("Failed to reach Elasticsearch at {url}")]
    ConnectionFailed {
        url: String,
        #[source]
        source: BoxedError,
    },

    #[error("Elasticsearch returned an empty body with status {status}")]
    EmptyResponse { status: u16 },

    #[error("Elasticsearch returned a body that could not be parsed")]
    InvalidResponse(#[source] serde_json::Error),

    #[error(transparent)]
    RemoteError(#[from] RemoteError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    UrlConstruction(#[from] UrlConstructionError),

    #[error("Document '{id}' not found in index '{index}'")]
    DocumentNotFound { index: String, id: String },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<ResponseDecodeError> for ElasticsearchError {
    fn from(value: ResponseDecodeError) -> Self {
        match value {
            ResponseDecodeError::Json(e) => Self::InvalidResponse(e),
            ResponseDecodeError::Codec(e) => Self::Codec(e),
        }
    }
}

impl ElasticsearchError {
    /// Type of the remote failure, e.g. `resource_already_exists_exception`
    pub fn remote_error_type(&self) -> Option<&str> {
        match self {
            Self::RemoteError(e) => e.error_type.as_deref(),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Failure reported by the cluster in an error body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Elasticsearch request failed with status {status}: {reason}")]
pub struct RemoteError {
    pub status: u16,
    pub error_type: Option<String>,
    pub reason: String,
}

impl RemoteError {
    /// Builds the error from a parsed error body. The body is either
    /// `{"error": {"type", "reason", "root_cause": [...]}}` or, for older
    /// endpoints, `{"error": "<description>"}`.
    pub fn from_body(status: u16, body: &Value) -> Self {
        match body.get("error") {
            Some(Value::Object(error)) => {
                let error_type = error.get("type").and_then(Value::as_str).map(str::to_string);

                let reason = error
                    .get("reason")
                    .and_then(Value::as_str)
                    .or_else(|| {
                        error
                            .get("root_cause")
                            .and_then(|c| c.get(0))
                            .and_then(|c| c.get("reason"))
                            .and_then(Value::as_str)
                    })
                    .map(str::to_string)
                    .unwrap_or_else(|| Value::Object(error.clone()).to_string());

                Self {
                    status,
                    error_type,
                    reason,
                }
            }
            Some(Value::String(reason)) => Self {
                status,
                error_type: None,
                reason: reason.clone(),
            },
            _ => Self {
                status,
                error_type: None,
                reason: body.to_string(),
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot build request path: {reason}")]
pub struct UrlConstructionError {
    pub reason: String,
}

impl UrlConstructionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

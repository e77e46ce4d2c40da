// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use serde::de::DeserializeOwned;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Response of `GET /{index}/_doc/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct GetResponse<T> {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    pub found: bool,

    #[serde(rename = "_source", default = "Option::default")]
    pub source: Option<T>,

    #[serde(rename = "_version", default)]
    pub version: Option<u64>,

    #[serde(rename = "_seq_no", default)]
    pub seq_no: Option<u64>,

    #[serde(rename = "_primary_term", default)]
    pub primary_term: Option<u64>,

    #[serde(rename = "_routing", default)]
    pub routing: Option<String>,
}

impl<T> GetResponse<T> {
    /// Source of a found document
    pub fn into_source(self) -> Option<T> {
        if self.found { self.source } else { None }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

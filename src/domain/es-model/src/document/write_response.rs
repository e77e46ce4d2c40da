// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

use crate::ShardsInfo;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WriteResult {
    Created,
    Updated,
    Deleted,
    NotFound,
    Noop,
}

/// Response of the index, create, update and delete document calls
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WriteResponse {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_version", default)]
    pub version: Option<u64>,

    pub result: WriteResult,

    #[serde(rename = "_seq_no", default)]
    pub seq_no: Option<u64>,

    #[serde(rename = "_primary_term", default)]
    pub primary_term: Option<u64>,

    #[serde(rename = "_shards", default)]
    pub shards: Option<ShardsInfo>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

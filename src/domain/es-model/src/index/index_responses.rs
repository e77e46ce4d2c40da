// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Response of `PUT /{index}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateIndexResponse {
    pub acknowledged: bool,
    #[serde(default)]
    pub shards_acknowledged: bool,
    pub index: String,
}

/// Response of calls that only confirm the change, such as `DELETE /{index}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AcknowledgedResponse {
    pub acknowledged: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

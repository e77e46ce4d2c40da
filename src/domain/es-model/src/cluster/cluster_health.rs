// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

use crate::codec::JsonMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    Red,
    Yellow,
    Green,
}

/// Response of `GET /_cluster/health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClusterHealth {
    pub cluster_name: String,
    pub status: HealthStatus,
    #[serde(default)]
    pub timed_out: bool,
    pub number_of_nodes: u32,
    pub number_of_data_nodes: u32,
    pub active_primary_shards: u32,
    pub active_shards: u32,
    pub relocating_shards: u32,
    pub initializing_shards: u32,
    pub unassigned_shards: u32,
    /// Counters this model does not name
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl ClusterHealth {
    /// All primary shards are allocated
    pub fn is_available(&self) -> bool {
        self.status >= HealthStatus::Yellow
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

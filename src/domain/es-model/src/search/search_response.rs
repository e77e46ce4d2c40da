// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::codec::*;
use crate::{AggregationResolver, AggregationResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ResponseDecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShardsInfo {
    pub total: u32,
    pub successful: u32,
    #[serde(default)]
    pub skipped: u32,
    pub failed: u32,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TotalRelation {
    #[serde(rename = "eq")]
    Eq,
    /// Counting stopped at the `track_total_hits` threshold
    #[serde(rename = "gte")]
    Gte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitsTotal {
    pub value: u64,
    pub relation: TotalRelation,
}

impl<'de> Deserialize<'de> for HitsTotal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            // Pre-7.0 servers and `rest_total_hits_as_int`
            Count(u64),
            Object { value: u64, relation: TotalRelation },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Count(value) => Self {
                value,
                relation: TotalRelation::Eq,
            },
            Repr::Object { value, relation } => Self { value, relation },
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct SearchHit<T> {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// Absent when `_source` was disabled for the search
    #[serde(rename = "_source", default = "Option::default")]
    pub source: Option<T>,
    #[serde(rename = "_routing", default)]
    pub routing: Option<String>,
    #[serde(default)]
    pub sort: Vec<Value>,
    #[serde(default)]
    pub highlight: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct HitsContainer<T> {
    /// Absent when `track_total_hits` is `false`
    #[serde(default)]
    pub total: Option<HitsTotal>,
    #[serde(default)]
    pub max_score: Option<f64>,
    pub hits: Vec<SearchHit<T>>,
}

impl<T> HitsContainer<T> {
    /// Sources of the hits that carry one, in hit order
    pub fn sources(&self) -> impl Iterator<Item = &T> {
        self.hits.iter().filter_map(|hit| hit.source.as_ref())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Decoded `_search` response
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse<T> {
    pub took: u64,
    pub timed_out: bool,
    pub shards: Option<ShardsInfo>,
    pub hits: HitsContainer<T>,
    pub aggregations: NamedTable<AggregationResponse<T>>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct SearchResponseBody<T> {
    #[serde(default)]
    took: u64,
    #[serde(default)]
    timed_out: bool,
    #[serde(rename = "_shards", default)]
    shards: Option<ShardsInfo>,
    hits: HitsContainer<T>,
    #[serde(default)]
    aggregations: Option<Value>,
}

impl<T: DeserializeOwned> SearchResponse<T> {
    pub fn from_slice(
        bytes: &[u8],
        resolver: &AggregationResolver,
    ) -> Result<Self, ResponseDecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value, resolver)
    }

    /// Decodes a response body, resolving aggregation results through the
    /// resolver of the request that produced it
    pub fn from_value(
        value: Value,
        resolver: &AggregationResolver,
    ) -> Result<Self, ResponseDecodeError> {
        let body: SearchResponseBody<T> = serde_json::from_value(value)?;

        let aggregations = match &body.aggregations {
            None => NamedTable::new(),
            Some(aggregations) => resolver.decode("aggregations", aggregations)?,
        };

        Ok(Self {
            took: body.took,
            timed_out: body.timed_out,
            shards: body.shards,
            hits: body.hits,
            aggregations,
        })
    }
}

impl<T> SearchResponse<T> {
    pub fn total_hits(&self) -> Option<u64> {
        self.hits.total.map(|t| t.value)
    }

    pub fn aggregation(&self, name: &str) -> Option<&AggregationResponse<T>> {
        self.aggregations.get(name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

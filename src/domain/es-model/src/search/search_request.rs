// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::*;
use crate::codec::*;
use crate::{Aggregation, AggregationResolver, Query, decode_aggregations, encode_aggregations};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Whether and how far hits are counted exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackTotalHits {
    Enabled(bool),
    UpTo(u64),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Body and routing of a `_search` call.
///
/// Built once with the `with_*` methods and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    query: Option<Query>,
    aggs: Vec<Aggregation>,
    from: Option<u64>,
    size: Option<u64>,
    sort: Vec<SortSpec>,
    source: Option<SourceFilter>,
    track_total_hits: Option<TrackTotalHits>,
    routing: Option<String>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(self, query: impl Into<Query>) -> Self {
        Self {
            query: Some(query.into()),
            ..self
        }
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggs.push(aggregation);
        self
    }

    pub fn with_page(self, from: u64, size: u64) -> Self {
        Self {
            from: Some(from),
            size: Some(size),
            ..self
        }
    }

    pub fn with_size(self, size: u64) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn with_source(self, source: SourceFilter) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    pub fn with_track_total_hits(self, track_total_hits: TrackTotalHits) -> Self {
        Self {
            track_total_hits: Some(track_total_hits),
            ..self
        }
    }

    /// Routing value, sent as a query parameter rather than in the body
    pub fn with_routing(self, routing: impl Into<String>) -> Self {
        Self {
            routing: Some(routing.into()),
            ..self
        }
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn aggregations(&self) -> &[Aggregation] {
        &self.aggs
    }

    pub fn from(&self) -> Option<u64> {
        self.from
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn sort(&self) -> &[SortSpec] {
        &self.sort
    }

    pub fn source(&self) -> Option<&SourceFilter> {
        self.source.as_ref()
    }

    pub fn track_total_hits(&self) -> Option<TrackTotalHits> {
        self.track_total_hits
    }

    pub fn routing(&self) -> Option<&str> {
        self.routing.as_deref()
    }

    /// Side-table for decoding the `aggregations` of the response
    pub fn aggregation_resolver(&self, registries: &Registries) -> AggregationResolver {
        AggregationResolver::from_request(&self.aggs, registries)
    }

    pub fn encode(&self) -> Value {
        let mut out = JsonMap::new();
        if let Some(query) = &self.query {
            put_value(&mut out, "query", query.encode());
        }
        if !self.aggs.is_empty() {
            put_value(&mut out, "aggs", encode_aggregations(&self.aggs));
        }
        put(&mut out, "from", &self.from);
        put(&mut out, "size", &self.size);
        if !self.sort.is_empty() {
            put_value(
                &mut out,
                "sort",
                self.sort.iter().map(SortSpec::encode).collect::<Vec<_>>(),
            );
        }
        put(&mut out, "_source", &self.source);
        put(&mut out, "track_total_hits", &self.track_total_hits);
        Value::Object(out)
    }

    /// Reads a search body. Routing is not part of the body and stays unset.
    pub fn decode(value: &Value, registries: &Registries) -> Result<Self, CodecError> {
        let Value::Object(fields) = value else {
            return Err(CodecError::malformed(
                VariantFamily::Query,
                "search",
                "",
                "search body must be an object",
            ));
        };

        let ctx = DecodeContext::new(registries);
        let mut reader = FieldReader::new(VariantFamily::Query, "search", "", "", fields);

        let query = match reader.raw("query") {
            None => None,
            Some(query) => Some(Query::decode("query", query, &ctx)?),
        };

        let aggs_key = if reader.has("aggs") { "aggs" } else { "aggregations" };
        let aggs = match reader.raw(aggs_key) {
            None => Vec::new(),
            Some(aggs) => decode_aggregations(aggs_key, aggs, &ctx)?,
        };

        let sort = match reader.raw("sort") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| SortSpec::decode(&format!("sort[{i}]"), item))
                .collect::<Result<_, _>>()?,
            Some(single) => vec![SortSpec::decode("sort", single)?],
        };

        Ok(Self {
            query,
            aggs,
            from: reader.optional("from")?,
            size: reader.optional("size")?,
            sort,
            source: reader.optional("_source")?,
            track_total_hits: reader.optional("track_total_hits")?,
            routing: None,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

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
use serde_json::Value;

use super::*;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Request aggregation kind to response shape mapping.
///
/// Kinds registered in [`Registries::aggregations`] for plugins or
/// aggregations without a typed model need an entry here as well, usually
/// [`AggregationResponseKind::Raw`].
#[derive(Debug, Clone, Default)]
pub struct AggregationResponseRegistry {
    shapes: HashMap<String, AggregationResponseKind>,
}

impl AggregationResponseRegistry {
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        shape: AggregationResponseKind,
    ) -> &mut Self {
        self.shapes.insert(kind.into(), shape);
        self
    }

    pub fn shape_of(&self, kind: &str) -> Option<AggregationResponseKind> {
        self.shapes.get(kind).copied()
    }

    pub fn register_builtins(&mut self) {
        for kind in <MetricKind as strum::IntoEnumIterator>::iter() {
            self.register(<&'static str>::from(kind), AggregationResponseKind::SingleValue);
        }

        self.register("stats", AggregationResponseKind::Stats)
            .register("extended_stats", AggregationResponseKind::ExtendedStats)
            .register("histogram", AggregationResponseKind::Histogram)
            .register("date_histogram", AggregationResponseKind::DateHistogram)
            .register("terms", AggregationResponseKind::Terms)
            .register("geo_bounds", AggregationResponseKind::GeoBounds)
            .register("geo_centroid", AggregationResponseKind::GeoCentroid)
            .register("top_hits", AggregationResponseKind::TopHits);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Side-table of the aggregations of a request, used to decode the
/// `aggregations` of its response.
///
/// Response bodies carry no kind: which shape `"avg_price": {...}` has is only
/// known from the request that named it. Resolution is lazy, so building a
/// resolver never fails; an aggregation whose kind has no response shape fails
/// only if its result actually shows up in a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResolver {
    entries: HashMap<String, ResolvedAggregation>,
}

#[derive(Debug, Clone, PartialEq)]
struct ResolvedAggregation {
    kind: String,
    shape: Option<AggregationResponseKind>,
    children: AggregationResolver,
}

impl AggregationResolver {
    pub fn from_request(aggregations: &[Aggregation], registries: &Registries) -> Self {
        let entries = aggregations
            .iter()
            .map(|agg| {
                let kind = agg.kind.kind().to_string();
                let shape = registries.aggregation_responses.shape_of(&kind);
                if shape.is_none() {
                    tracing::debug!(
                        name = %agg.name,
                        %kind,
                        "Aggregation kind has no response shape"
                    );
                }

                let resolved = ResolvedAggregation {
                    kind,
                    shape,
                    children: Self::from_request(&agg.aggs, registries),
                };
                (agg.name.clone(), resolved)
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Request kind of a top-level aggregation
    pub fn kind_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.kind.as_str())
    }

    /// Resolver of the sub-aggregations of a top-level aggregation
    pub fn children_of(&self, name: &str) -> Option<&AggregationResolver> {
        self.entries.get(name).map(|e| &e.children)
    }

    /// Decodes an `aggregations` object found at `path`
    pub fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        value: &Value,
    ) -> Result<NamedTable<AggregationResponse<T>>, CodecError> {
        let Value::Object(results) = value else {
            return Err(CodecError::malformed(
                VariantFamily::Aggregation,
                "",
                path,
                "expected an object of named results",
            ));
        };
        self.decode_map(path, results)
    }

    pub(crate) fn decode_map<T: DeserializeOwned>(
        &self,
        path: &str,
        results: &JsonMap,
    ) -> Result<NamedTable<AggregationResponse<T>>, CodecError> {
        results
            .iter()
            .map(|(name, value)| {
                let response = self.decode_one(name, &join_path(path, name), value)?;
                Ok((name.clone(), response))
            })
            .collect()
    }

    fn decode_one<T: DeserializeOwned>(
        &self,
        name: &str,
        path: &str,
        value: &Value,
    ) -> Result<AggregationResponse<T>, CodecError> {
        let Some(entry) = self.entries.get(name) else {
            return Err(CodecError::UnresolvedAggregationKind {
                name: name.to_string(),
                kind: None,
            });
        };

        let Some(shape) = entry.shape else {
            return Err(CodecError::UnresolvedAggregationKind {
                name: name.to_string(),
                kind: Some(entry.kind.clone()),
            });
        };

        shape.decode(name, &entry.kind, path, value, &entry.children)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

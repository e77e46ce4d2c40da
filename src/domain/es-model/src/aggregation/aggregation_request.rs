// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

use super::*;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Named aggregation of a search request.
///
/// On the wire the name is the key of the enclosing `aggs` object and the
/// kind is the single key of the body next to the optional `aggs` and `meta`:
/// `{"<name>": {"<kind>": {...}, "aggs": {...}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub name: String,
    pub kind: AggregationKind,
    pub aggs: Vec<Aggregation>,
    pub meta: Option<JsonMap>,
}

impl Aggregation {
    pub fn new(name: impl Into<String>, kind: impl Into<AggregationKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            aggs: Vec::new(),
            meta: None,
        }
    }

    pub fn with_sub_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggs.push(aggregation);
        self
    }

    pub fn encode(&self) -> Value {
        let mut out = JsonMap::new();
        out.insert(
            self.kind.kind().to_string(),
            Value::Object(self.kind.encode_body()),
        );
        if !self.aggs.is_empty() {
            out.insert("aggs".to_string(), encode_aggregations(&self.aggs));
        }
        put(&mut out, "meta", &self.meta);
        Value::Object(out)
    }

    pub fn decode(
        name: &str,
        path: &str,
        value: &Value,
        ctx: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        let malformed = |reason: &str| {
            CodecError::malformed(VariantFamily::Aggregation, "", path, reason)
        };

        let Value::Object(fields) = value else {
            return Err(malformed("expected an object"));
        };

        let mut kind_entry = None;
        let mut aggs = Vec::new();
        let mut meta = None;

        for (key, value) in fields {
            match key.as_str() {
                "aggs" | "aggregations" => {
                    aggs = decode_aggregations(&join_path(path, key), value, ctx)?;
                }
                "meta" => {
                    let Value::Object(m) = value else {
                        return Err(malformed("meta must be an object"));
                    };
                    meta = Some(m.clone());
                }
                _ => {
                    if let Some((first, _)) = kind_entry {
                        return Err(malformed(&format!(
                            "expected exactly one kind key, found '{first}' and '{key}'"
                        )));
                    }
                    kind_entry = Some((key.as_str(), value));
                }
            }
        }

        let Some((kind, body)) = kind_entry else {
            return Err(malformed("missing aggregation kind"));
        };

        Ok(Self {
            name: name.to_string(),
            kind: decode_keyed_body(kind, name, &join_path(path, kind), body, ctx)?,
            aggs,
            meta,
        })
    }
}

/// Encodes an `aggs` object
pub fn encode_aggregations(aggregations: &[Aggregation]) -> Value {
    encode_named(
        aggregations.iter().map(|agg| (agg.name.as_str(), agg)),
        Aggregation::encode,
    )
}

pub fn decode_aggregations(
    path: &str,
    value: &Value,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<Aggregation>, CodecError> {
    let entries = decode_named(VariantFamily::Aggregation, path, value, |name, path, value| {
        Aggregation::decode(name, path, value, ctx)
    })?;
    Ok(entries.into_iter().map(|(_, agg)| agg).collect())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Kind and settings of an aggregation
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationKind {
    Metric(MetricAggregation),
    Stats(StatsAggregation),
    ExtendedStats(ExtendedStatsAggregation),
    Histogram(HistogramAggregation),
    DateHistogram(DateHistogramAggregation),
    Terms(TermsAggregation),
    GeoBounds(GeoBoundsAggregation),
    GeoCentroid(GeoCentroidAggregation),
    TopHits(TopHitsAggregation),
    Extension(ExtensionVariant),
}

impl AggregationKind {
    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        for kind in <MetricKind as strum::IntoEnumIterator>::iter() {
            registry.register(<&'static str>::from(kind), MetricAggregation::decode);
        }

        registry
            .register("stats", StatsAggregation::decode)
            .register("extended_stats", ExtendedStatsAggregation::decode)
            .register("histogram", HistogramAggregation::decode)
            .register("date_histogram", DateHistogramAggregation::decode)
            .register("terms", TermsAggregation::decode)
            .register("geo_bounds", GeoBoundsAggregation::decode)
            .register("geo_centroid", GeoCentroidAggregation::decode)
            .register("top_hits", TopHitsAggregation::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }
}

impl KeyedVariant for AggregationKind {
    const FAMILY: VariantFamily = VariantFamily::Aggregation;

    fn kind(&self) -> &str {
        match self {
            Self::Metric(v) => <&'static str>::from(v.kind),
            Self::Stats(_) => "stats",
            Self::ExtendedStats(_) => "extended_stats",
            Self::Histogram(_) => "histogram",
            Self::DateHistogram(_) => "date_histogram",
            Self::Terms(_) => "terms",
            Self::GeoBounds(_) => "geo_bounds",
            Self::GeoCentroid(_) => "geo_centroid",
            Self::TopHits(_) => "top_hits",
            Self::Extension(v) => &v.kind,
        }
    }

    fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        match self {
            Self::Metric(v) => v.encode_fields(&mut out),
            Self::Stats(v) => v.encode_fields(&mut out),
            Self::ExtendedStats(v) => v.encode_fields(&mut out),
            Self::Histogram(v) => v.encode_fields(&mut out),
            Self::DateHistogram(v) => v.encode_fields(&mut out),
            Self::Terms(v) => v.encode_fields(&mut out),
            Self::GeoBounds(v) => v.encode_fields(&mut out),
            Self::GeoCentroid(v) => v.encode_fields(&mut out),
            Self::TopHits(v) => v.encode_fields(&mut out),
            Self::Extension(v) => v.encode_fields(&mut out),
        }
        out
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.aggregations
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

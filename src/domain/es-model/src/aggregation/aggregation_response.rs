// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::AggregationResolver;
use crate::HitsContainer;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Decoded result of one named aggregation. `T` is the document type of the
/// search, used by hit lists at any nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationResponse<T> {
    SingleValue(SingleValueResponse),
    Stats(StatsResponse),
    ExtendedStats(ExtendedStatsResponse),
    Histogram(HistogramResponse<T>),
    DateHistogram(DateHistogramResponse<T>),
    Terms(TermsResponse<T>),
    GeoBounds(GeoBoundsResponse),
    GeoCentroid(GeoCentroidResponse),
    TopHits(TopHitsResponse<T>),
    Raw(RawAggregationResponse),
}

impl<T> AggregationResponse<T> {
    pub fn name(&self) -> &str {
        match self {
            Self::SingleValue(v) => &v.name,
            Self::Stats(v) => &v.name,
            Self::ExtendedStats(v) => &v.name,
            Self::Histogram(v) => &v.name,
            Self::DateHistogram(v) => &v.name,
            Self::Terms(v) => &v.name,
            Self::GeoBounds(v) => &v.name,
            Self::GeoCentroid(v) => &v.name,
            Self::TopHits(v) => &v.name,
            Self::Raw(v) => &v.name,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleValueResponse {
    #[serde(skip)]
    pub name: String,
    /// Absent when no document had a value
    pub value: Option<f64>,
    #[serde(default)]
    pub value_as_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsResponse {
    #[serde(skip)]
    pub name: String,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub sum: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StdDeviationBounds {
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtendedStatsResponse {
    #[serde(skip)]
    pub name: String,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub sum: f64,
    pub sum_of_squares: Option<f64>,
    pub variance: Option<f64>,
    pub std_deviation: Option<f64>,
    #[serde(default)]
    pub std_deviation_bounds: Option<StdDeviationBounds>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoBounds {
    pub top_left: GeoPoint,
    pub bottom_right: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoBoundsResponse {
    #[serde(skip)]
    pub name: String,
    /// Absent when no document had a location
    #[serde(default)]
    pub bounds: Option<GeoBounds>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoCentroidResponse {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopHitsResponse<T> {
    pub name: String,
    pub hits: HitsContainer<T>,
}

/// Response of an aggregation kind registered without a typed shape
#[derive(Debug, Clone, PartialEq)]
pub struct RawAggregationResponse {
    pub name: String,
    pub kind: String,
    pub body: Value,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket<T> {
    pub key: f64,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
    pub aggregations: NamedTable<AggregationResponse<T>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramResponse<T> {
    pub name: String,
    pub buckets: Vec<HistogramBucket<T>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateHistogramBucket<T> {
    /// Bucket start in epoch milliseconds
    pub key: i64,
    pub date: DateTime<Utc>,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
    pub aggregations: NamedTable<AggregationResponse<T>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateHistogramResponse<T> {
    pub name: String,
    pub buckets: Vec<DateHistogramBucket<T>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermsBucket<T> {
    /// Numeric keys are kept in their decimal form
    pub key: String,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
    pub doc_count_error_upper_bound: Option<u64>,
    pub aggregations: NamedTable<AggregationResponse<T>>,
}

impl<T> TermsBucket<T> {
    /// Hit list of a `top_hits` sub-aggregation
    pub fn hits(&self, aggregation: &str) -> Option<&HitsContainer<T>> {
        match self.aggregations.get(aggregation)? {
            AggregationResponse::TopHits(v) => Some(&v.hits),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermsResponse<T> {
    pub name: String,
    pub doc_count_error_upper_bound: Option<u64>,
    pub sum_other_doc_count: Option<u64>,
    pub buckets: Vec<TermsBucket<T>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Shape of the response body an aggregation kind produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationResponseKind {
    SingleValue,
    Stats,
    ExtendedStats,
    Histogram,
    DateHistogram,
    Terms,
    GeoBounds,
    GeoCentroid,
    TopHits,
    /// Body kept as JSON
    Raw,
}

impl AggregationResponseKind {
    pub(crate) fn decode<T: DeserializeOwned>(
        self,
        name: &str,
        kind: &str,
        path: &str,
        value: &Value,
        children: &AggregationResolver,
    ) -> Result<AggregationResponse<T>, CodecError> {
        let response = match self {
            Self::SingleValue => AggregationResponse::SingleValue(SingleValueResponse {
                name: name.to_string(),
                ..parse(kind, path, value)?
            }),
            Self::Stats => AggregationResponse::Stats(StatsResponse {
                name: name.to_string(),
                ..parse(kind, path, value)?
            }),
            Self::ExtendedStats => AggregationResponse::ExtendedStats(ExtendedStatsResponse {
                name: name.to_string(),
                ..parse(kind, path, value)?
            }),
            Self::GeoBounds => AggregationResponse::GeoBounds(GeoBoundsResponse {
                name: name.to_string(),
                ..parse(kind, path, value)?
            }),
            Self::GeoCentroid => AggregationResponse::GeoCentroid(GeoCentroidResponse {
                name: name.to_string(),
                ..parse(kind, path, value)?
            }),
            Self::TopHits => {
                let hits = value
                    .get("hits")
                    .ok_or_else(|| malformed(kind, path, "missing 'hits'"))?;
                AggregationResponse::TopHits(TopHitsResponse {
                    name: name.to_string(),
                    hits: parse(kind, &join_path(path, "hits"), hits)?,
                })
            }
            Self::Histogram => AggregationResponse::Histogram(HistogramResponse {
                name: name.to_string(),
                buckets: decode_buckets(name, kind, path, value, |mut reader| {
                    let key = reader.required("key")?;
                    let key_as_string = reader.optional("key_as_string")?;
                    let doc_count = reader.required("doc_count")?;
                    Ok(HistogramBucket {
                        key,
                        key_as_string,
                        doc_count,
                        aggregations: decode_sub_aggregations(reader, children)?,
                    })
                })?,
            }),
            Self::DateHistogram => AggregationResponse::DateHistogram(DateHistogramResponse {
                name: name.to_string(),
                buckets: decode_buckets(name, kind, path, value, |mut reader| {
                    let key: i64 = reader.required("key")?;
                    let date = DateTime::<Utc>::from_timestamp_millis(key)
                        .ok_or_else(|| reader.malformed("key", "timestamp out of range"))?;
                    let key_as_string = reader.optional("key_as_string")?;
                    let doc_count = reader.required("doc_count")?;
                    Ok(DateHistogramBucket {
                        key,
                        date,
                        key_as_string,
                        doc_count,
                        aggregations: decode_sub_aggregations(reader, children)?,
                    })
                })?,
            }),
            Self::Terms => {
                let Value::Object(fields) = value else {
                    return Err(malformed(kind, path, "expected an object"));
                };
                let mut reader =
                    FieldReader::new(VariantFamily::Aggregation, kind, name, path, fields);
                AggregationResponse::Terms(TermsResponse {
                    name: name.to_string(),
                    doc_count_error_upper_bound: reader.optional("doc_count_error_upper_bound")?,
                    sum_other_doc_count: reader.optional("sum_other_doc_count")?,
                    buckets: decode_buckets(name, kind, path, value, |mut reader| {
                        let key = match reader.raw("key") {
                            Some(Value::String(s)) => s.clone(),
                            Some(Value::Number(n)) => n.to_string(),
                            Some(Value::Bool(b)) => b.to_string(),
                            _ => {
                                return Err(
                                    reader.malformed("key", "expected a string or a number")
                                );
                            }
                        };
                        let key_as_string = reader.optional("key_as_string")?;
                        let doc_count = reader.required("doc_count")?;
                        let doc_count_error_upper_bound =
                            reader.optional("doc_count_error_upper_bound")?;
                        Ok(TermsBucket {
                            key,
                            key_as_string,
                            doc_count,
                            doc_count_error_upper_bound,
                            aggregations: decode_sub_aggregations(reader, children)?,
                        })
                    })?,
                })
            }
            Self::Raw => AggregationResponse::Raw(RawAggregationResponse {
                name: name.to_string(),
                kind: kind.to_string(),
                body: value.clone(),
            }),
        };
        Ok(response)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn malformed(kind: &str, path: &str, reason: impl std::fmt::Display) -> CodecError {
    CodecError::malformed(VariantFamily::Aggregation, kind, path, reason)
}

fn parse<R: DeserializeOwned>(kind: &str, path: &str, value: &Value) -> Result<R, CodecError> {
    R::deserialize(value).map_err(|e| malformed(kind, path, e))
}

fn decode_buckets<B>(
    name: &str,
    kind: &str,
    path: &str,
    value: &Value,
    mut decode_bucket: impl FnMut(FieldReader<'_>) -> Result<B, CodecError>,
) -> Result<Vec<B>, CodecError> {
    let buckets_path = join_path(path, "buckets");
    let Some(Value::Array(buckets)) = value.get("buckets") else {
        return Err(malformed(kind, &buckets_path, "expected a list of buckets"));
    };

    let mut decoded = Vec::with_capacity(buckets.len());
    for (i, bucket) in buckets.iter().enumerate() {
        let bucket_path = format!("{buckets_path}[{i}]");
        let Value::Object(fields) = bucket else {
            return Err(malformed(kind, &bucket_path, "bucket must be an object"));
        };
        decoded.push(decode_bucket(FieldReader::new(
            VariantFamily::Aggregation,
            kind,
            name,
            &bucket_path,
            fields,
        ))?);
    }
    Ok(decoded)
}

/// Whatever a bucket holds besides its own fields are the results of the
/// sub-aggregations
fn decode_sub_aggregations<T: DeserializeOwned>(
    reader: FieldReader<'_>,
    children: &AggregationResolver,
) -> Result<NamedTable<AggregationResponse<T>>, CodecError> {
    let path = reader.path().to_string();
    children.decode_map(&path, &reader.into_extra())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

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
use crate::{Script, SourceFilter};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Metrics that produce a single value
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum MetricKind {
    Avg,
    Sum,
    Min,
    Max,
    Cardinality,
    ValueCount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricAggregation {
    pub kind: MetricKind,
    pub field: Option<String>,
    pub script: Option<Script>,
    /// Value used for documents missing the field
    pub missing: Option<Value>,
    pub extra: JsonMap,
}

impl MetricAggregation {
    pub fn new(kind: MetricKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: Some(field.into()),
            script: None,
            missing: None,
            extra: JsonMap::new(),
        }
    }

    pub fn avg(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Avg, field)
    }

    pub fn sum(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Sum, field)
    }

    pub fn min(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Min, field)
    }

    pub fn max(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Max, field)
    }

    pub fn cardinality(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Cardinality, field)
    }

    pub fn value_count(field: impl Into<String>) -> Self {
        Self::new(MetricKind::ValueCount, field)
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        let kind = reader.kind().parse::<MetricKind>().map_err(|_| {
            CodecError::unknown_kind(VariantFamily::Aggregation, reader.kind(), reader.path())
        })?;

        Ok(AggregationKind::Metric(Self {
            kind,
            field: reader.optional("field")?,
            script: reader.optional("script")?,
            missing: reader.optional("missing")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "field", &self.field);
        put(out, "script", &self.script);
        put(out, "missing", &self.missing);
        put_extra(out, &self.extra);
    }
}

impl From<MetricAggregation> for AggregationKind {
    fn from(value: MetricAggregation) -> Self {
        Self::Metric(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `count`, `min`, `max`, `avg` and `sum` in one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsAggregation {
    pub field: Option<String>,
    pub script: Option<Script>,
    pub missing: Option<Value>,
    pub extra: JsonMap,
}

impl StatsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Default::default()
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::Stats(Self {
            field: reader.optional("field")?,
            script: reader.optional("script")?,
            missing: reader.optional("missing")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "field", &self.field);
        put(out, "script", &self.script);
        put(out, "missing", &self.missing);
        put_extra(out, &self.extra);
    }
}

impl From<StatsAggregation> for AggregationKind {
    fn from(value: StatsAggregation) -> Self {
        Self::Stats(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stats extended with variance and standard deviation bounds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedStatsAggregation {
    pub field: Option<String>,
    pub script: Option<Script>,
    pub missing: Option<Value>,
    /// Standard deviations above and below the mean covered by the bounds
    pub sigma: Option<f64>,
    pub extra: JsonMap,
}

impl ExtendedStatsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Default::default()
        }
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::ExtendedStats(Self {
            field: reader.optional("field")?,
            script: reader.optional("script")?,
            missing: reader.optional("missing")?,
            sigma: reader.optional("sigma")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "field", &self.field);
        put(out, "sigma", &self.sigma);
        put(out, "script", &self.script);
        put(out, "missing", &self.missing);
        put_extra(out, &self.extra);
    }
}

impl From<ExtendedStatsAggregation> for AggregationKind {
    fn from(value: ExtendedStatsAggregation) -> Self {
        Self::ExtendedStats(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct GeoBoundsAggregation {
    pub field: String,
    pub wrap_longitude: Option<bool>,
    pub extra: JsonMap,
}

impl GeoBoundsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            wrap_longitude: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::GeoBounds(Self {
            field: reader.required("field")?,
            wrap_longitude: reader.optional("wrap_longitude")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_value(out, "field", self.field.as_str());
        put(out, "wrap_longitude", &self.wrap_longitude);
        put_extra(out, &self.extra);
    }
}

impl From<GeoBoundsAggregation> for AggregationKind {
    fn from(value: GeoBoundsAggregation) -> Self {
        Self::GeoBounds(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoCentroidAggregation {
    pub field: String,
    pub extra: JsonMap,
}

impl GeoCentroidAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::GeoCentroid(Self {
            field: reader.required("field")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_value(out, "field", self.field.as_str());
        put_extra(out, &self.extra);
    }
}

impl From<GeoCentroidAggregation> for AggregationKind {
    fn from(value: GeoCentroidAggregation) -> Self {
        Self::GeoCentroid(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Most relevant documents of each bucket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopHitsAggregation {
    pub from: Option<u32>,
    pub size: Option<u32>,
    pub sort: Vec<Value>,
    pub source: Option<SourceFilter>,
    pub extra: JsonMap,
}

impl TopHitsAggregation {
    pub fn new(size: u32) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort.push(sort.into());
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::TopHits(Self {
            from: reader.optional("from")?,
            size: reader.optional("size")?,
            sort: reader.list("sort")?,
            source: reader.optional("_source")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "from", &self.from);
        put(out, "size", &self.size);
        put_list(out, "sort", &self.sort);
        put(out, "_source", &self.source);
        put_extra(out, &self.extra);
    }
}

impl From<TopHitsAggregation> for AggregationKind {
    fn from(value: TopHitsAggregation) -> Self {
        Self::TopHits(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

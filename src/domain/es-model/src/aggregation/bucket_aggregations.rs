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
use crate::Script;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fixed-width numeric buckets
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramAggregation {
    pub field: String,
    pub interval: f64,
    pub offset: Option<f64>,
    pub min_doc_count: Option<u64>,
    /// `{"min": .., "max": ..}`
    pub extended_bounds: Option<Value>,
    pub missing: Option<Value>,
    pub extra: JsonMap,
}

impl HistogramAggregation {
    pub fn new(field: impl Into<String>, interval: f64) -> Self {
        Self {
            field: field.into(),
            interval,
            offset: None,
            min_doc_count: None,
            extended_bounds: None,
            missing: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::Histogram(Self {
            field: reader.required("field")?,
            interval: reader.required("interval")?,
            offset: reader.optional("offset")?,
            min_doc_count: reader.optional("min_doc_count")?,
            extended_bounds: reader.optional("extended_bounds")?,
            missing: reader.optional("missing")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_value(out, "field", self.field.as_str());
        put_value(out, "interval", self.interval);
        put(out, "offset", &self.offset);
        put(out, "min_doc_count", &self.min_doc_count);
        put(out, "extended_bounds", &self.extended_bounds);
        put(out, "missing", &self.missing);
        put_extra(out, &self.extra);
    }
}

impl From<HistogramAggregation> for AggregationKind {
    fn from(value: HistogramAggregation) -> Self {
        Self::Histogram(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Bucket width of a date histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInterval {
    /// Calendar-aware unit such as `1M` or `quarter`
    Calendar(String),
    /// Fixed SI duration such as `90m`
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateHistogramAggregation {
    pub field: String,
    pub interval: DateInterval,
    pub format: Option<String>,
    pub time_zone: Option<String>,
    pub offset: Option<String>,
    pub min_doc_count: Option<u64>,
    pub missing: Option<Value>,
    pub extra: JsonMap,
}

impl DateHistogramAggregation {
    pub fn new(field: impl Into<String>, interval: DateInterval) -> Self {
        Self {
            field: field.into(),
            interval,
            format: None,
            time_zone: None,
            offset: None,
            min_doc_count: None,
            missing: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        let calendar: Option<String> = reader.optional("calendar_interval")?;
        let fixed: Option<String> = reader.optional("fixed_interval")?;
        let interval = match (calendar, fixed) {
            (Some(calendar), None) => DateInterval::Calendar(calendar),
            (None, Some(fixed)) => DateInterval::Fixed(fixed),
            (Some(_), Some(_)) => {
                return Err(reader.malformed(
                    "fixed_interval",
                    "calendar_interval and fixed_interval are mutually exclusive",
                ));
            }
            (None, None) => {
                return Err(reader.malformed(
                    "calendar_interval",
                    "one of calendar_interval or fixed_interval is required",
                ));
            }
        };

        Ok(AggregationKind::DateHistogram(Self {
            field: reader.required("field")?,
            interval,
            format: reader.optional("format")?,
            time_zone: reader.optional("time_zone")?,
            offset: reader.optional("offset")?,
            min_doc_count: reader.optional("min_doc_count")?,
            missing: reader.optional("missing")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_value(out, "field", self.field.as_str());
        match &self.interval {
            DateInterval::Calendar(v) => put_value(out, "calendar_interval", v.as_str()),
            DateInterval::Fixed(v) => put_value(out, "fixed_interval", v.as_str()),
        }
        put(out, "format", &self.format);
        put(out, "time_zone", &self.time_zone);
        put(out, "offset", &self.offset);
        put(out, "min_doc_count", &self.min_doc_count);
        put(out, "missing", &self.missing);
        put_extra(out, &self.extra);
    }
}

impl From<DateHistogramAggregation> for AggregationKind {
    fn from(value: DateHistogramAggregation) -> Self {
        Self::DateHistogram(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One bucket per distinct value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermsAggregation {
    pub field: Option<String>,
    pub script: Option<Script>,
    pub size: Option<u32>,
    pub shard_size: Option<u32>,
    pub min_doc_count: Option<u64>,
    /// `{"_count": "desc"}` or a list of such
    pub order: Option<Value>,
    pub missing: Option<Value>,
    pub extra: JsonMap,
}

impl TermsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<AggregationKind, CodecError> {
        Ok(AggregationKind::Terms(Self {
            field: reader.optional("field")?,
            script: reader.optional("script")?,
            size: reader.optional("size")?,
            shard_size: reader.optional("shard_size")?,
            min_doc_count: reader.optional("min_doc_count")?,
            order: reader.optional("order")?,
            missing: reader.optional("missing")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "field", &self.field);
        put(out, "script", &self.script);
        put(out, "size", &self.size);
        put(out, "shard_size", &self.shard_size);
        put(out, "min_doc_count", &self.min_doc_count);
        put(out, "order", &self.order);
        put(out, "missing", &self.missing);
        put_extra(out, &self.extra);
    }
}

impl From<TermsAggregation> for AggregationKind {
    fn from(value: TermsAggregation) -> Self {
        Self::Terms(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

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

/// Exact value match on an unanalyzed field
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: String,
    pub value: Value,
    pub case_insensitive: Option<bool>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            case_insensitive: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        let (field, path, options) = read_field_options(&mut reader)?;
        let query = match options {
            FieldOptions::Shorthand(value) => Self::new(field, value.clone()),
            FieldOptions::Object(options) => {
                let mut options = reader.nested(&path, options);
                Self {
                    field: field.to_string(),
                    value: options.required("value")?,
                    case_insensitive: options.optional("case_insensitive")?,
                    boost: options.optional("boost")?,
                    extra: options.into_extra(),
                }
            }
        };
        Ok(Query::Term(query))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut options = JsonMap::new();
        put_value(&mut options, "value", self.value.clone());
        put(&mut options, "case_insensitive", &self.case_insensitive);
        put(&mut options, "boost", &self.boost);
        put_extra(&mut options, &self.extra);
        field_body(&self.field, options)
    }
}

impl From<TermQuery> for Query {
    fn from(value: TermQuery) -> Self {
        Self::Term(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Any of several exact values. Unlike most field-keyed queries the options
/// sit next to the field key: `{"terms": {"tag": ["a", "b"], "boost": 2.0}}`
#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    pub field: String,
    pub values: Vec<Value>,
    pub boost: Option<f64>,
    /// Query name reported in `matched_queries`
    pub query_name: Option<String>,
}

impl TermsQuery {
    pub fn new(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
            query_name: None,
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        let boost = reader.optional("boost")?;
        let query_name = reader.optional("_name")?;

        // Whatever key is left names the field
        let (field, values) = reader.single_entry()?;
        let Value::Array(values) = values else {
            return Err(reader.malformed(field, "expected a list of values"));
        };

        Ok(Query::Terms(Self {
            field: field.to_string(),
            values: values.clone(),
            boost,
            query_name,
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, &self.field, self.values.clone());
        put(&mut out, "boost", &self.boost);
        put(&mut out, "_name", &self.query_name);
        out
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub field: String,
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
    /// Date format of the bounds
    pub format: Option<String>,
    pub time_zone: Option<String>,
    /// `INTERSECTS`, `CONTAINS` or `WITHIN` for range fields
    pub relation: Option<String>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            format: None,
            time_zone: None,
            relation: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub fn gte(mut self, bound: impl Into<Value>) -> Self {
        self.gte = Some(bound.into());
        self
    }

    pub fn gt(mut self, bound: impl Into<Value>) -> Self {
        self.gt = Some(bound.into());
        self
    }

    pub fn lte(mut self, bound: impl Into<Value>) -> Self {
        self.lte = Some(bound.into());
        self
    }

    pub fn lt(mut self, bound: impl Into<Value>) -> Self {
        self.lt = Some(bound.into());
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        let (field, path, options) = read_field_options(&mut reader)?;
        let FieldOptions::Object(options) = options else {
            return Err(reader.malformed(field, "range bounds must be an object"));
        };

        let mut options = reader.nested(&path, options);
        Ok(Query::Range(Self {
            field: field.to_string(),
            gt: options.optional("gt")?,
            gte: options.optional("gte")?,
            lt: options.optional("lt")?,
            lte: options.optional("lte")?,
            format: options.optional("format")?,
            time_zone: options.optional("time_zone")?,
            relation: options.optional("relation")?,
            boost: options.optional("boost")?,
            extra: options.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut options = JsonMap::new();
        put(&mut options, "gt", &self.gt);
        put(&mut options, "gte", &self.gte);
        put(&mut options, "lt", &self.lt);
        put(&mut options, "lte", &self.lte);
        put(&mut options, "format", &self.format);
        put(&mut options, "time_zone", &self.time_zone);
        put(&mut options, "relation", &self.relation);
        put(&mut options, "boost", &self.boost);
        put_extra(&mut options, &self.extra);
        field_body(&self.field, options)
    }
}

impl From<RangeQuery> for Query {
    fn from(value: RangeQuery) -> Self {
        Self::Range(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct ExistsQuery {
    pub field: String,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::Exists(Self {
            field: reader.required("field")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, "field", self.field.as_str());
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Shared shape of `prefix` and `wildcard`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternQueryBody {
    pub field: String,
    pub value: String,
    pub case_insensitive: Option<bool>,
    pub rewrite: Option<String>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl PatternQueryBody {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            case_insensitive: None,
            rewrite: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>) -> Result<Self, CodecError> {
        let (field, path, options) = read_field_options(&mut reader)?;
        match options {
            FieldOptions::Shorthand(Value::String(value)) => Ok(Self::new(field, value.as_str())),
            FieldOptions::Shorthand(_) => Err(reader.malformed(field, "pattern must be a string")),
            FieldOptions::Object(options) => {
                let mut options = reader.nested(&path, options);
                Ok(Self {
                    field: field.to_string(),
                    value: options.required("value")?,
                    case_insensitive: options.optional("case_insensitive")?,
                    rewrite: options.optional("rewrite")?,
                    boost: options.optional("boost")?,
                    extra: options.into_extra(),
                })
            }
        }
    }

    fn encode_body(&self) -> JsonMap {
        let mut options = JsonMap::new();
        put_value(&mut options, "value", self.value.as_str());
        put(&mut options, "case_insensitive", &self.case_insensitive);
        put(&mut options, "rewrite", &self.rewrite);
        put(&mut options, "boost", &self.boost);
        put_extra(&mut options, &self.extra);
        field_body(&self.field, options)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixQuery(pub PatternQueryBody);

impl PrefixQuery {
    pub fn new(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self(PatternQueryBody::new(field, prefix))
    }

    pub(crate) fn decode(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        PatternQueryBody::decode(reader).map(|body| Query::Prefix(Self(body)))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        self.0.encode_body()
    }
}

/// Pattern with `*` and `?` wildcards
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardQuery(pub PatternQueryBody);

impl WildcardQuery {
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self(PatternQueryBody::new(field, pattern))
    }

    pub(crate) fn decode(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        PatternQueryBody::decode(reader).map(|body| Query::Wildcard(Self(body)))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        self.0.encode_body()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Documents by `_id`
#[derive(Debug, Clone, PartialEq)]
pub struct IdsQuery {
    pub values: Vec<String>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl IdsQuery {
    pub fn new(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::Ids(Self {
            values: reader.required("values")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, "values", self.values.clone());
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

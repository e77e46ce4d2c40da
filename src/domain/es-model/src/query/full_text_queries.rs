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

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub field: String,
    pub query: Value,
    pub operator: Option<Operator>,
    pub analyzer: Option<String>,
    pub fuzziness: Option<Value>,
    pub minimum_should_match: Option<Value>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
            operator: None,
            analyzer: None,
            fuzziness: None,
            minimum_should_match: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        let (field, path, options) = read_field_options(&mut reader)?;
        let query = match options {
            FieldOptions::Shorthand(query) => Self::new(field, query.clone()),
            FieldOptions::Object(options) => {
                let mut options = reader.nested(&path, options);
                Self {
                    field: field.to_string(),
                    query: options.required("query")?,
                    operator: options.optional("operator")?,
                    analyzer: options.optional("analyzer")?,
                    fuzziness: options.optional("fuzziness")?,
                    minimum_should_match: options.optional("minimum_should_match")?,
                    boost: options.optional("boost")?,
                    extra: options.into_extra(),
                }
            }
        };
        Ok(Query::Match(query))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut options = JsonMap::new();
        put_value(&mut options, "query", self.query.clone());
        put(&mut options, "operator", &self.operator);
        put(&mut options, "analyzer", &self.analyzer);
        put(&mut options, "fuzziness", &self.fuzziness);
        put(&mut options, "minimum_should_match", &self.minimum_should_match);
        put(&mut options, "boost", &self.boost);
        put_extra(&mut options, &self.extra);
        field_body(&self.field, options)
    }
}

impl From<MatchQuery> for Query {
    fn from(value: MatchQuery) -> Self {
        Self::Match(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct MatchPhraseQuery {
    pub field: String,
    pub query: String,
    pub analyzer: Option<String>,
    pub slop: Option<u32>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl MatchPhraseQuery {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
            analyzer: None,
            slop: None,
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
            FieldOptions::Shorthand(Value::String(query)) => Self::new(field, query.as_str()),
            FieldOptions::Shorthand(_) => {
                return Err(reader.malformed(field, "phrase must be a string"));
            }
            FieldOptions::Object(options) => {
                let mut options = reader.nested(&path, options);
                Self {
                    field: field.to_string(),
                    query: options.required("query")?,
                    analyzer: options.optional("analyzer")?,
                    slop: options.optional("slop")?,
                    boost: options.optional("boost")?,
                    extra: options.into_extra(),
                }
            }
        };
        Ok(Query::MatchPhrase(query))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut options = JsonMap::new();
        put_value(&mut options, "query", self.query.as_str());
        put(&mut options, "analyzer", &self.analyzer);
        put(&mut options, "slop", &self.slop);
        put(&mut options, "boost", &self.boost);
        put_extra(&mut options, &self.extra);
        field_body(&self.field, options)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    BestFields,
    MostFields,
    CrossFields,
    Phrase,
    PhrasePrefix,
    BoolPrefix,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiMatchQuery {
    pub query: Value,
    /// Field names, optionally boosted as `title^3`
    pub fields: Vec<String>,
    pub kind: Option<MultiMatchType>,
    pub operator: Option<Operator>,
    pub analyzer: Option<String>,
    pub tie_breaker: Option<f64>,
    pub minimum_should_match: Option<Value>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl MultiMatchQuery {
    pub fn new(
        query: impl Into<Value>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            query: query.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            kind: None,
            operator: None,
            analyzer: None,
            tie_breaker: None,
            minimum_should_match: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: MultiMatchType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::MultiMatch(Self {
            query: reader.required("query")?,
            fields: reader.string_or_list("fields")?,
            kind: reader.optional("type")?,
            operator: reader.optional("operator")?,
            analyzer: reader.optional("analyzer")?,
            tie_breaker: reader.optional("tie_breaker")?,
            minimum_should_match: reader.optional("minimum_should_match")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, "query", self.query.clone());
        put_list(&mut out, "fields", &self.fields);
        put(&mut out, "type", &self.kind);
        put(&mut out, "operator", &self.operator);
        put(&mut out, "analyzer", &self.analyzer);
        put(&mut out, "tie_breaker", &self.tie_breaker);
        put(&mut out, "minimum_should_match", &self.minimum_should_match);
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

impl From<MultiMatchQuery> for Query {
    fn from(value: MultiMatchQuery) -> Self {
        Self::MultiMatch(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Query in the simple syntax that never fails on invalid input
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleQueryStringQuery {
    pub query: String,
    pub fields: Vec<String>,
    pub default_operator: Option<Operator>,
    pub analyzer: Option<String>,
    /// Enabled operators, `|`-separated (e.g. `AND|PHRASE`)
    pub flags: Option<String>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl SimpleQueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            default_operator: None,
            analyzer: None,
            flags: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::SimpleQueryString(Self {
            query: reader.required("query")?,
            fields: reader.list("fields")?,
            default_operator: reader.optional("default_operator")?,
            analyzer: reader.optional("analyzer")?,
            flags: reader.optional("flags")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, "query", self.query.as_str());
        put_list(&mut out, "fields", &self.fields);
        put(&mut out, "default_operator", &self.default_operator);
        put(&mut out, "analyzer", &self.analyzer);
        put(&mut out, "flags", &self.flags);
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Query in the full Lucene syntax
#[derive(Debug, Clone, PartialEq)]
pub struct QueryStringQuery {
    pub query: String,
    pub default_field: Option<String>,
    pub fields: Vec<String>,
    pub default_operator: Option<Operator>,
    pub analyzer: Option<String>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl QueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            default_field: None,
            fields: Vec::new(),
            default_operator: None,
            analyzer: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::QueryString(Self {
            query: reader.required("query")?,
            default_field: reader.optional("default_field")?,
            fields: reader.list("fields")?,
            default_operator: reader.optional("default_operator")?,
            analyzer: reader.optional("analyzer")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, "query", self.query.as_str());
        put(&mut out, "default_field", &self.default_field);
        put_list(&mut out, "fields", &self.fields);
        put(&mut out, "default_operator", &self.default_operator);
        put(&mut out, "analyzer", &self.analyzer);
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

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

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchAllQuery {
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl MatchAllQuery {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::MatchAll(Self {
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchNoneQuery {
    pub extra: JsonMap,
}

impl MatchNoneQuery {
    pub(crate) fn decode(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::MatchNone(Self {
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        self.extra.clone()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Boolean combination of clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    /// Like `must` but without contributing to the score
    pub filter: Vec<Query>,
    pub should: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<Value>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl BoolQuery {
    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    pub fn filter(mut self, query: impl Into<Query>) -> Self {
        self.filter.push(query.into());
        self
    }

    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.must_not.push(query.into());
        self
    }

    pub fn minimum_should_match(mut self, value: impl Into<Value>) -> Self {
        self.minimum_should_match = Some(value.into());
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        Ok(Query::Bool(Self {
            must: read_queries(&mut reader, "must", ctx)?,
            filter: read_queries(&mut reader, "filter", ctx)?,
            should: read_queries(&mut reader, "should", ctx)?,
            must_not: read_queries(&mut reader, "must_not", ctx)?,
            minimum_should_match: reader.optional("minimum_should_match")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_queries(&mut out, "must", &self.must);
        put_queries(&mut out, "filter", &self.filter);
        put_queries(&mut out, "should", &self.should);
        put_queries(&mut out, "must_not", &self.must_not);
        put(&mut out, "minimum_should_match", &self.minimum_should_match);
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

impl From<BoolQuery> for Query {
    fn from(value: BoolQuery) -> Self {
        Self::Bool(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Query over objects of a `nested` field
#[derive(Debug, Clone, PartialEq)]
pub struct NestedQuery {
    pub path: String,
    pub query: Box<Query>,
    /// `avg`, `max`, `min`, `none` or `sum`
    pub score_mode: Option<String>,
    pub ignore_unmapped: Option<bool>,
    pub boost: Option<f64>,
    pub extra: JsonMap,
}

impl NestedQuery {
    pub fn new(path: impl Into<String>, query: impl Into<Query>) -> Self {
        Self {
            path: path.into(),
            query: Box::new(query.into()),
            score_mode: None,
            ignore_unmapped: None,
            boost: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Query, CodecError> {
        let path = reader.required("path")?;
        let query_path = reader.field_path("query");
        let Some(query) = reader.raw("query") else {
            return Err(reader.malformed("query", "missing required field"));
        };

        Ok(Query::Nested(Self {
            path,
            query: Box::new(Query::decode(&query_path, query, ctx)?),
            score_mode: reader.optional("score_mode")?,
            ignore_unmapped: reader.optional("ignore_unmapped")?,
            boost: reader.optional("boost")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_body(&self) -> JsonMap {
        let mut out = JsonMap::new();
        put_value(&mut out, "path", self.path.as_str());
        put_value(&mut out, "query", self.query.encode());
        put(&mut out, "score_mode", &self.score_mode);
        put(&mut out, "ignore_unmapped", &self.ignore_unmapped);
        put(&mut out, "boost", &self.boost);
        put_extra(&mut out, &self.extra);
        out
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

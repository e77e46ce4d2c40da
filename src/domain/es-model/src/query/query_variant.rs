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

/// Query DSL node, discriminated by the key wrapping its body
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    MatchAll(MatchAllQuery),
    MatchNone(MatchNoneQuery),
    Match(MatchQuery),
    MatchPhrase(MatchPhraseQuery),
    MultiMatch(MultiMatchQuery),
    Term(TermQuery),
    Terms(TermsQuery),
    Range(RangeQuery),
    Exists(ExistsQuery),
    Prefix(PrefixQuery),
    Wildcard(WildcardQuery),
    Ids(IdsQuery),
    SimpleQueryString(SimpleQueryStringQuery),
    QueryString(QueryStringQuery),
    Bool(BoolQuery),
    Nested(NestedQuery),
    Extension(ExtensionVariant),
}

impl Query {
    pub fn match_all() -> Self {
        Self::MatchAll(MatchAllQuery::default())
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        registry
            .register("match_all", MatchAllQuery::decode)
            .register("match_none", MatchNoneQuery::decode)
            .register("match", MatchQuery::decode)
            .register("match_phrase", MatchPhraseQuery::decode)
            .register("multi_match", MultiMatchQuery::decode)
            .register("term", TermQuery::decode)
            .register("terms", TermsQuery::decode)
            .register("range", RangeQuery::decode)
            .register("exists", ExistsQuery::decode)
            .register("prefix", PrefixQuery::decode)
            .register("wildcard", WildcardQuery::decode)
            .register("ids", IdsQuery::decode)
            .register("simple_query_string", SimpleQueryStringQuery::decode)
            .register("query_string", QueryStringQuery::decode)
            .register("bool", BoolQuery::decode)
            .register("nested", NestedQuery::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }

    pub fn encode(&self) -> Value {
        encode_keyed(self)
    }

    pub fn decode(path: &str, value: &Value, ctx: &DecodeContext<'_>) -> Result<Self, CodecError> {
        decode_keyed(path, value, ctx)
    }
}

impl KeyedVariant for Query {
    const FAMILY: VariantFamily = VariantFamily::Query;

    fn kind(&self) -> &str {
        match self {
            Self::MatchAll(_) => "match_all",
            Self::MatchNone(_) => "match_none",
            Self::Match(_) => "match",
            Self::MatchPhrase(_) => "match_phrase",
            Self::MultiMatch(_) => "multi_match",
            Self::Term(_) => "term",
            Self::Terms(_) => "terms",
            Self::Range(_) => "range",
            Self::Exists(_) => "exists",
            Self::Prefix(_) => "prefix",
            Self::Wildcard(_) => "wildcard",
            Self::Ids(_) => "ids",
            Self::SimpleQueryString(_) => "simple_query_string",
            Self::QueryString(_) => "query_string",
            Self::Bool(_) => "bool",
            Self::Nested(_) => "nested",
            Self::Extension(v) => &v.kind,
        }
    }

    fn encode_body(&self) -> JsonMap {
        match self {
            Self::MatchAll(v) => v.encode_body(),
            Self::MatchNone(v) => v.encode_body(),
            Self::Match(v) => v.encode_body(),
            Self::MatchPhrase(v) => v.encode_body(),
            Self::MultiMatch(v) => v.encode_body(),
            Self::Term(v) => v.encode_body(),
            Self::Terms(v) => v.encode_body(),
            Self::Range(v) => v.encode_body(),
            Self::Exists(v) => v.encode_body(),
            Self::Prefix(v) => v.encode_body(),
            Self::Wildcard(v) => v.encode_body(),
            Self::Ids(v) => v.encode_body(),
            Self::SimpleQueryString(v) => v.encode_body(),
            Self::QueryString(v) => v.encode_body(),
            Self::Bool(v) => v.encode_body(),
            Self::Nested(v) => v.encode_body(),
            Self::Extension(v) => {
                let mut out = JsonMap::new();
                v.encode_fields(&mut out);
                out
            }
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.queries
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[serde(alias = "AND")]
    And,
    #[serde(alias = "OR")]
    Or,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Body keyed by the target field name: `{"<field>": <options>}`, where the
/// options may also be given as a bare value
pub(crate) enum FieldOptions<'a> {
    Shorthand(&'a Value),
    Object(&'a JsonMap),
}

pub(crate) fn read_field_options<'a>(
    reader: &mut FieldReader<'a>,
) -> Result<(&'a str, String, FieldOptions<'a>), CodecError> {
    let (field, value) = reader.single_entry()?;
    let path = reader.field_path(field);
    let options = match value {
        Value::Object(options) => FieldOptions::Object(options),
        other => FieldOptions::Shorthand(other),
    };
    Ok((field, path, options))
}

pub(crate) fn field_body(field: &str, options: JsonMap) -> JsonMap {
    let mut out = JsonMap::new();
    out.insert(field.to_string(), Value::Object(options));
    out
}

/// Reads a clause that may hold a single query or a list of them
pub(crate) fn read_queries(
    reader: &mut FieldReader<'_>,
    key: &str,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<Query>, CodecError> {
    let path = reader.field_path(key);
    match reader.raw(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| Query::decode(&format!("{path}[{i}]"), item, ctx))
            .collect(),
        Some(single) => Ok(vec![Query::decode(&path, single, ctx)?]),
    }
}

pub(crate) fn put_queries(out: &mut JsonMap, key: &str, queries: &[Query]) {
    if !queries.is_empty() {
        put_value(out, key, queries.iter().map(Query::encode).collect::<Vec<_>>());
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

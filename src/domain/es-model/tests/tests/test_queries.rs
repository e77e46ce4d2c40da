// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use es_model::*;
use pretty_assertions::assert_eq;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn decode(value: &serde_json::Value) -> Result<Query, CodecError> {
    let registries = Registries::global();
    let ctx = DecodeContext::new(&registries);
    Query::decode("query", value, &ctx)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_encode_bool_query() {
    let query: Query = BoolQuery::default()
        .must(MatchQuery::new("title", "rust async").with_operator(Operator::And))
        .filter(TermQuery::new("status", "published"))
        .filter(RangeQuery::new("year").gte(2020).lt(2025))
        .must_not(Query::Terms(TermsQuery::new("tags", ["draft", "spam"])))
        .into();

    assert_eq!(
        query.encode(),
        json!({
            "bool": {
                "must": [
                    { "match": { "title": { "query": "rust async", "operator": "and" } } }
                ],
                "filter": [
                    { "term": { "status": { "value": "published" } } },
                    { "range": { "year": { "gte": 2020, "lt": 2025 } } },
                ],
                "must_not": [
                    { "terms": { "tags": ["draft", "spam"] } }
                ],
            }
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_bool_query_round_trip() {
    let query: Query = BoolQuery::default()
        .should(MatchQuery::new("title", "search"))
        .should(Query::Nested(NestedQuery::new(
            "reviews",
            RangeQuery::new("reviews.stars").gte(4),
        )))
        .minimum_should_match(1)
        .into();

    assert_eq!(decode(&query.encode()).unwrap(), query);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_shorthand_forms() {
    assert_eq!(
        decode(&json!({ "match": { "title": "rust" } })).unwrap(),
        MatchQuery::new("title", "rust").into()
    );
    assert_eq!(
        decode(&json!({ "term": { "year": 2024 } })).unwrap(),
        TermQuery::new("year", 2024).into()
    );

    // A single clause is accepted where a list is expected
    assert_eq!(
        decode(&json!({ "bool": { "filter": { "match_all": {} } } })).unwrap(),
        BoolQuery::default().filter(Query::match_all()).into()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_terms_query_options() {
    let decoded = decode(&json!({
        "terms": { "boost": 2.0, "tags": ["a", "b"], "_name": "tagged" }
    }))
    .unwrap();

    assert_eq!(
        decoded,
        Query::Terms(TermsQuery {
            boost: Some(2.0),
            query_name: Some("tagged".to_string()),
            ..TermsQuery::new("tags", ["a", "b"])
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_unknown_query_kind_carries_path() {
    let err = decode(&json!({
        "bool": { "must": [{ "match_all": {} }, { "semantic": { "field": "body" } }] }
    }))
    .unwrap_err();

    assert_eq!(
        err,
        CodecError::UnknownVariantKind {
            family: VariantFamily::Query,
            kind: "semantic".to_string(),
            path: "query.bool.must[1].semantic".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_registered_extension_query() {
    let mut registries = Registries::with_builtins();
    registries
        .queries
        .register("semantic", Query::decode_extension);
    let ctx = DecodeContext::new(&registries);

    let wire = json!({ "semantic": { "field": "body", "query": "fast databases" } });
    let decoded = Query::decode("query", &wire, &ctx).unwrap();

    assert!(matches!(&decoded, Query::Extension(v) if v.kind == "semantic"));
    assert_eq!(decoded.encode(), wire);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_wrapper_with_several_kinds_is_malformed() {
    let err = decode(&json!({ "match_all": {}, "match_none": {} })).unwrap_err();

    assert!(
        matches!(
            &err,
            CodecError::MalformedVariant { family: VariantFamily::Query, path, .. }
                if path == "query"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_range_requires_object_bounds() {
    let err = decode(&json!({ "range": { "year": 2020 } })).unwrap_err();

    assert!(
        matches!(
            &err,
            CodecError::MalformedVariant { kind, path, .. }
                if kind == "range" && path == "query.range.year"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_ids_query() {
    let query = Query::Ids(IdsQuery::new(["1", "4"]));

    assert_eq!(query.encode(), json!({ "ids": { "values": ["1", "4"] } }));

    let decoded = decode(&json!({ "ids": { "values": ["1", "4"], "boost": 1.5 } })).unwrap();
    assert_eq!(
        decoded,
        Query::Ids(IdsQuery {
            boost: Some(1.5),
            ..IdsQuery::new(["1", "4"])
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

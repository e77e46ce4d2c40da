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
use serde::Deserialize;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Book {
    title: String,
    price: f64,
}

fn resolve(aggregations: &[Aggregation]) -> AggregationResolver {
    AggregationResolver::from_request(aggregations, &Registries::with_builtins())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_encode_request_aggregations() {
    let aggregations = vec![
        Aggregation::new("avg_price", MetricAggregation::avg("price")),
        Aggregation::new("by_genre", TermsAggregation::new("genre").with_size(5))
            .with_sub_aggregation(Aggregation::new("avg_price", MetricAggregation::avg("price"))),
    ];

    assert_eq!(
        encode_aggregations(&aggregations),
        json!({
            "avg_price": { "avg": { "field": "price" } },
            "by_genre": {
                "terms": { "field": "genre", "size": 5 },
                "aggs": {
                    "avg_price": { "avg": { "field": "price" } }
                },
            },
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_request_aggregations_round_trip() {
    let registries = Registries::with_builtins();
    let ctx = DecodeContext::new(&registries);

    let aggregations = vec![
        Aggregation::new("price_stats", StatsAggregation::new("price")),
        Aggregation::new("by_genre", TermsAggregation::new("genre"))
            .with_sub_aggregation(Aggregation::new("top", TopHitsAggregation::new(1))),
    ];

    let decoded = decode_aggregations("aggs", &encode_aggregations(&aggregations), &ctx).unwrap();

    assert_eq!(decoded, aggregations);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_metric_response_is_resolved_by_request_name() {
    let resolver = resolve(&[Aggregation::new("avg_price", MetricAggregation::avg("price"))]);

    let decoded = resolver
        .decode::<Book>("aggregations", &json!({ "avg_price": { "value": 42.5 } }))
        .unwrap();

    assert_eq!(
        decoded.get("avg_price"),
        Some(&AggregationResponse::SingleValue(SingleValueResponse {
            name: "avg_price".to_string(),
            value: Some(42.5),
            value_as_string: None,
        }))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_bucket_sub_aggregations_use_nested_resolver() {
    let resolver = resolve(&[Aggregation::new("by_genre", TermsAggregation::new("genre"))
        .with_sub_aggregation(Aggregation::new("avg_price", MetricAggregation::avg("price")))]);

    let decoded = resolver
        .decode::<Book>(
            "aggregations",
            &json!({
                "by_genre": {
                    "doc_count_error_upper_bound": 0,
                    "sum_other_doc_count": 3,
                    "buckets": [
                        { "key": "fantasy", "doc_count": 10, "avg_price": { "value": 12.0 } },
                        { "key": "poetry", "doc_count": 2, "avg_price": { "value": null } },
                    ],
                }
            }),
        )
        .unwrap();

    let Some(AggregationResponse::Terms(terms)) = decoded.get("by_genre") else {
        panic!("unexpected response {decoded:?}");
    };
    assert_eq!(terms.sum_other_doc_count, Some(3));
    assert_eq!(
        terms
            .buckets
            .iter()
            .map(|b| (b.key.as_str(), b.doc_count))
            .collect::<Vec<_>>(),
        vec![("fantasy", 10), ("poetry", 2)]
    );
    assert_eq!(
        terms.buckets[0].aggregations.get("avg_price"),
        Some(&AggregationResponse::SingleValue(SingleValueResponse {
            name: "avg_price".to_string(),
            value: Some(12.0),
            value_as_string: None,
        }))
    );
    assert!(matches!(
        terms.buckets[1].aggregations.get("avg_price"),
        Some(AggregationResponse::SingleValue(SingleValueResponse { value: None, .. }))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_top_hits_are_typed() {
    let resolver = resolve(&[Aggregation::new("by_genre", TermsAggregation::new("genre"))
        .with_sub_aggregation(Aggregation::new("cheapest", TopHitsAggregation::new(1)))]);

    let decoded = resolver
        .decode::<Book>(
            "aggregations",
            &json!({
                "by_genre": {
                    "buckets": [{
                        "key": "fantasy",
                        "doc_count": 10,
                        "cheapest": {
                            "hits": {
                                "total": { "value": 10, "relation": "eq" },
                                "max_score": null,
                                "hits": [{
                                    "_index": "books",
                                    "_id": "1",
                                    "_score": null,
                                    "_source": { "title": "The Hobbit", "price": 7.5 },
                                    "sort": [7.5],
                                }],
                            }
                        },
                    }],
                }
            }),
        )
        .unwrap();

    let Some(AggregationResponse::Terms(terms)) = decoded.get("by_genre") else {
        panic!("unexpected response {decoded:?}");
    };
    let hits = terms.buckets[0].hits("cheapest").unwrap();

    assert_eq!(hits.total.map(|t| t.value), Some(10));
    assert_eq!(
        hits.sources().collect::<Vec<_>>(),
        vec![&Book {
            title: "The Hobbit".to_string(),
            price: 7.5,
        }]
    );
    assert_eq!(hits.hits[0].sort, vec![json!(7.5)]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_date_histogram_keys_are_timestamps() {
    let resolver = resolve(&[Aggregation::new(
        "per_month",
        DateHistogramAggregation::new("published", DateInterval::Calendar("month".to_string())),
    )]);

    let decoded = resolver
        .decode::<Book>(
            "aggregations",
            &json!({
                "per_month": {
                    "buckets": [
                        {
                            "key_as_string": "2024-01-01",
                            "key": 1_704_067_200_000_i64,
                            "doc_count": 4,
                        },
                    ]
                }
            }),
        )
        .unwrap();

    let Some(AggregationResponse::DateHistogram(histogram)) = decoded.get("per_month") else {
        panic!("unexpected response {decoded:?}");
    };
    assert_eq!(histogram.buckets[0].date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    assert_eq!(histogram.buckets[0].doc_count, 4);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_unrequested_result_is_unresolved() {
    let resolver = resolve(&[Aggregation::new("avg_price", MetricAggregation::avg("price"))]);

    let err = resolver
        .decode::<Book>("aggregations", &json!({ "max_price": { "value": 99.0 } }))
        .unwrap_err();

    assert_eq!(
        err,
        CodecError::UnresolvedAggregationKind {
            name: "max_price".to_string(),
            kind: None,
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_kind_without_response_shape_fails_lazily() {
    let mut registries = Registries::with_builtins();
    registries
        .aggregations
        .register("rare_terms", AggregationKind::decode_extension);
    let ctx = DecodeContext::new(&registries);

    let request = decode_aggregations(
        "aggs",
        &json!({ "rare": { "rare_terms": { "field": "genre" } } }),
        &ctx,
    )
    .unwrap();

    // Building the resolver succeeds, an empty response decodes
    let resolver = AggregationResolver::from_request(&request, &registries);
    assert_eq!(resolver.kind_of("rare"), Some("rare_terms"));
    assert!(resolver.decode::<Book>("aggregations", &json!({})).unwrap().is_empty());

    let err = resolver
        .decode::<Book>("aggregations", &json!({ "rare": { "buckets": [] } }))
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::UnresolvedAggregationKind {
            name: "rare".to_string(),
            kind: Some("rare_terms".to_string()),
        }
    );

    // Registering a raw shape makes the body available as JSON
    registries
        .aggregation_responses
        .register("rare_terms", AggregationResponseKind::Raw);
    let resolver = AggregationResolver::from_request(&request, &registries);
    let decoded = resolver
        .decode::<Book>("aggregations", &json!({ "rare": { "buckets": [] } }))
        .unwrap();
    assert_eq!(
        decoded.get("rare"),
        Some(&AggregationResponse::Raw(RawAggregationResponse {
            name: "rare".to_string(),
            kind: "rare_terms".to_string(),
            body: json!({ "buckets": [] }),
        }))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

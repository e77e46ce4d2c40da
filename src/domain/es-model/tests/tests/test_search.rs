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

fn fantasy_search() -> SearchRequest {
    SearchRequest::new()
        .with_query(
            BoolQuery::default()
                .must(MatchQuery::new("title", "dragon"))
                .filter(TermQuery::new("genre", "fantasy")),
        )
        .with_aggregation(Aggregation::new("avg_price", MetricAggregation::avg("price")))
        .with_page(10, 5)
        .with_sort(SortSpec::desc("price"))
        .with_sort(SortSpec::new("_doc"))
        .with_source(SourceFilter::Fields(vec!["title".to_string(), "price".to_string()]))
        .with_track_total_hits(TrackTotalHits::UpTo(1000))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_encode_search_request() {
    assert_eq!(
        fantasy_search().with_routing("tenant-1").encode(),
        json!({
            "query": {
                "bool": {
                    "must": [{ "match": { "title": { "query": "dragon" } } }],
                    "filter": [{ "term": { "genre": { "value": "fantasy" } } }],
                }
            },
            "aggs": { "avg_price": { "avg": { "field": "price" } } },
            "from": 10,
            "size": 5,
            "sort": [{ "price": { "order": "desc" } }, "_doc"],
            "_source": ["title", "price"],
            "track_total_hits": 1000,
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_search_request() {
    let registries = Registries::with_builtins();
    let request = fantasy_search().with_routing("tenant-1");

    let decoded = SearchRequest::decode(&request.encode(), &registries).unwrap();

    // Routing never travels in the body
    assert_eq!(decoded.routing(), None);
    assert_eq!(decoded, fantasy_search());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_accepts_long_aggregations_key_and_single_sort() {
    let registries = Registries::with_builtins();

    let decoded = SearchRequest::decode(
        &json!({
            "aggregations": { "genres": { "terms": { "field": "genre" } } },
            "sort": "_score",
        }),
        &registries,
    )
    .unwrap();

    assert_eq!(
        decoded.aggregations(),
        &[Aggregation::new("genres", TermsAggregation::new("genre"))]
    );
    assert_eq!(decoded.sort(), &[SortSpec::new("_score")]);
    assert_eq!(decoded.query(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_search_response() {
    let registries = Registries::with_builtins();
    let request = fantasy_search();
    let resolver = request.aggregation_resolver(&registries);

    let body = json!({
        "took": 3,
        "timed_out": false,
        "_shards": { "total": 2, "successful": 2, "skipped": 0, "failed": 0 },
        "hits": {
            "total": { "value": 1000, "relation": "gte" },
            "max_score": 1.3,
            "hits": [
                {
                    "_index": "books",
                    "_id": "7",
                    "_score": 1.3,
                    "_routing": "tenant-1",
                    "_source": { "title": "Dragonflight", "price": 9.99 },
                    "highlight": { "title": ["<em>Dragon</em>flight"] },
                },
                {
                    "_index": "books",
                    "_id": "9",
                    "_score": 0.8,
                    "_source": { "title": "The Dragon Reborn", "price": 8.5 },
                },
            ],
        },
        "aggregations": { "avg_price": { "value": 9.245 } },
    });

    let response =
        SearchResponse::<Book>::from_slice(body.to_string().as_bytes(), &resolver).unwrap();

    assert_eq!(response.took, 3);
    assert_eq!(
        response.shards,
        Some(ShardsInfo {
            total: 2,
            successful: 2,
            skipped: 0,
            failed: 0,
        })
    );
    assert_eq!(response.total_hits(), Some(1000));
    assert_eq!(
        response.hits.total.map(|t| t.relation),
        Some(TotalRelation::Gte)
    );
    assert_eq!(
        response
            .hits
            .sources()
            .map(|b| b.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Dragonflight", "The Dragon Reborn"]
    );
    assert_eq!(response.hits.hits[0].routing.as_deref(), Some("tenant-1"));
    assert_eq!(
        response.hits.hits[0]
            .highlight
            .as_ref()
            .and_then(|h| h.get("title"))
            .cloned(),
        Some(vec!["<em>Dragon</em>flight".to_string()])
    );
    assert!(matches!(
        response.aggregation("avg_price"),
        Some(AggregationResponse::SingleValue(SingleValueResponse { value: Some(v), .. }))
            if (*v - 9.245).abs() < f64::EPSILON
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_minimal_search_response() {
    let resolver = AggregationResolver::default();

    // Legacy integer total, hits without source
    let response = SearchResponse::<Book>::from_value(
        json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": 2,
                "hits": [
                    { "_index": "books", "_id": "1", "_score": 1.0 },
                    { "_index": "books", "_id": "2", "_score": 1.0 },
                ],
            },
        }),
        &resolver,
    )
    .unwrap();

    assert_eq!(
        response.hits.total,
        Some(HitsTotal {
            value: 2,
            relation: TotalRelation::Eq,
        })
    );
    assert_eq!(response.hits.sources().count(), 0);
    assert_eq!(response.hits.hits.len(), 2);
    assert!(response.aggregations.is_empty());
    assert_eq!(response.shards, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_source_of_wrong_shape_is_reported() {
    let resolver = AggregationResolver::default();

    let err = SearchResponse::<Book>::from_value(
        json!({
            "hits": {
                "hits": [{ "_index": "books", "_id": "1", "_source": { "title": 42 } }],
            },
        }),
        &resolver,
    )
    .unwrap_err();

    assert!(matches!(err, ResponseDecodeError::Json(_)), "{err:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_unrequested_aggregation_in_response_is_reported() {
    let resolver = AggregationResolver::default();

    let err = SearchResponse::<Book>::from_value(
        json!({
            "hits": { "hits": [] },
            "aggregations": { "surprise": { "value": 1.0 } },
        }),
        &resolver,
    )
    .unwrap_err();

    assert!(
        matches!(
            &err,
            ResponseDecodeError::Codec(CodecError::UnresolvedAggregationKind { name, kind: None })
                if name == "surprise"
        ),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

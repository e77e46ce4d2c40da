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
use serde_json::{Value, json};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn folding_analyzer() -> Analyzer {
    CustomAnalyzer::new("folding", Tokenizer::standard())
        .with_filter(TokenFilter::lowercase())
        .with_filter(TokenFilter::asciifolding())
        .into()
}

fn books_index() -> Index {
    Index::new("books")
        .with_settings(IndexSettings::new(2, 0))
        .with_property("title", TextMapping::default().with_analyzer(folding_analyzer()))
        .with_property("year", Mapping::numeric(NumericType::Integer))
        .with_user_meta("owner", "search")
}

/// Renders a create body the way `GET /{index}` reports it back
fn as_fetched(name: &str, create_body: &Value) -> Value {
    let settings = &create_body["settings"];
    let mut index_settings = json!({
        "number_of_shards": settings["number_of_shards"].to_string(),
        "number_of_replicas": settings["number_of_replicas"].to_string(),
        "creation_date": "1700000000000",
        "uuid": "xg1kLFSeQuyPhDTbD0lZsw",
        "version": { "created": "8110099" },
        "provided_name": name,
    });
    if let Some(analysis) = settings.get("analysis") {
        index_settings["analysis"] = analysis.clone();
    }

    json!({
        name: {
            "aliases": {},
            "mappings": create_body["mappings"],
            "settings": { "index": index_settings },
        }
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_create_body() {
    let index = books_index();
    let body = index.encode_create_body().unwrap();

    assert_eq!(
        body["settings"],
        json!({
            "number_of_shards": 2,
            "number_of_replicas": 0,
            "analysis": {
                "analyzer": {
                    "folding": {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "asciifolding"],
                    }
                }
            },
        })
    );
    assert_eq!(
        body["mappings"],
        json!({
            "_meta": {
                "private": {
                    "serial_version": 1,
                    "properties_hash": index.properties_hash().unwrap(),
                },
                "user_defined": { "owner": "search" },
            },
            "properties": {
                "title": { "type": "text", "analyzer": "folding" },
                "year": { "type": "integer" },
            },
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_create_body_without_analysis() {
    let index = Index::new("events")
        .with_property("at", Mapping::date())
        .with_dynamic(DynamicMapping::Strict);

    let body = index.encode_create_body().unwrap();

    assert_eq!(
        body["settings"],
        json!({ "number_of_shards": 1, "number_of_replicas": 1 })
    );
    assert_eq!(body["mappings"]["dynamic"], json!("strict"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_explicit_analysis_is_included() {
    let mut index = Index::new("events").with_property("at", Mapping::date());
    index
        .add_analysis(Normalizer::Custom(
            CustomNormalizer::new("folded").with_filter(TokenFilter::asciifolding()),
        ))
        .unwrap();

    let body = index.encode_create_body().unwrap();

    assert_eq!(
        body["settings"]["analysis"],
        json!({
            "normalizer": {
                "folded": { "type": "custom", "filter": ["asciifolding"] }
            }
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_conflicting_analysis_fails_create_body() {
    let other_folding: Analyzer = CustomAnalyzer::new("folding", Tokenizer::whitespace()).into();

    let index = books_index().with_property(
        "summary",
        TextMapping::default().with_analyzer(other_folding),
    );

    assert_eq!(
        index.encode_create_body().unwrap_err(),
        CodecError::ConflictingDefinition {
            family: VariantFamily::Analyzer,
            name: "folding".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_properties_hash() {
    let a = Index::new("a")
        .with_property("title", Mapping::text())
        .with_property("year", Mapping::numeric(NumericType::Integer));
    let b = Index::new("b")
        .with_property("year", Mapping::numeric(NumericType::Integer))
        .with_property("title", Mapping::text());
    let c = Index::new("c")
        .with_property("title", Mapping::text())
        .with_property("year", Mapping::numeric(NumericType::Long));

    let hash = a.properties_hash().unwrap();
    assert!(hash.starts_with("sha256:"), "{hash}");
    assert_eq!(hash.len(), "sha256:".len() + 64);

    assert_eq!(hash, a.properties_hash().unwrap());
    assert_eq!(hash, b.properties_hash().unwrap());
    assert_ne!(hash, c.properties_hash().unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_fetched() {
    let registries = Registries::with_builtins();
    let original = books_index();
    let fetched = as_fetched("books", &original.encode_create_body().unwrap());

    let index = Index::decode_fetched_response(&fetched, &registries).unwrap();

    assert_eq!(index.name(), "books");
    assert_eq!(index.properties(), original.properties());
    assert_eq!(index.settings().number_of_shards(), 2);
    assert_eq!(index.settings().number_of_replicas(), 0);
    assert_eq!(index.settings().uuid(), Some("xg1kLFSeQuyPhDTbD0lZsw"));
    assert_eq!(
        index.analysis().analyzers().get("folding"),
        Some(&folding_analyzer())
    );
    assert_eq!(
        index.meta().user_defined.get("owner").map(String::as_str),
        Some("search")
    );
    assert!(!index.properties_drifted().unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_drift_detection() {
    let registries = Registries::with_builtins();
    let mut body = books_index().encode_create_body().unwrap();

    // Property added after creation, e.g. through a mapping update
    body["mappings"]["properties"]["isbn"] = json!({ "type": "keyword" });

    let index =
        Index::decode_fetched_response(&as_fetched("books", &body), &registries).unwrap();

    assert!(index.properties_drifted().unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_foreign_index_never_drifts() {
    let registries = Registries::with_builtins();

    let index = Index::decode_fetched_response(
        &json!({
            "logs-2024": {
                "mappings": { "properties": { "message": { "type": "text" } } },
                "settings": { "index": { "number_of_shards": "1", "number_of_replicas": "1" } },
            }
        }),
        &registries,
    )
    .unwrap();

    assert_eq!(index.meta(), &IndexMeta::default());
    assert!(!index.properties_drifted().unwrap());
    assert!(index.analysis().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_fetched_mapping_referencing_undefined_analyzer() {
    let registries = Registries::with_builtins();

    let err = Index::decode_fetched_response(
        &json!({
            "books": {
                "mappings": {
                    "properties": { "title": { "type": "text", "analyzer": "folding" } }
                },
                "settings": { "index": { "number_of_shards": "1" } },
            }
        }),
        &registries,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CodecError::DanglingReference {
            family: VariantFamily::Analyzer,
            name: "folding".to_string(),
            referenced_from: "books.mappings.properties.title.analyzer".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_fetched_analysis_with_stringified_values() {
    let registries = Registries::with_builtins();

    let index = Index::decode_fetched_response(
        &json!({
            "books": {
                "mappings": {
                    "properties": { "title": { "type": "text", "analyzer": "autocomplete" } }
                },
                "settings": {
                    "index": {
                        "number_of_shards": "1",
                        "number_of_replicas": "1",
                        "analysis": {
                            "tokenizer": {
                                "edge": { "type": "edge_ngram", "min_gram": "2", "max_gram": "10" }
                            },
                            "filter": {
                                "shingles": {
                                    "type": "shingle",
                                    "max_shingle_size": "3",
                                    "output_unigrams": "false",
                                }
                            },
                            "analyzer": {
                                "autocomplete": {
                                    "type": "custom",
                                    "tokenizer": "edge",
                                    "filter": ["lowercase", "shingles"],
                                }
                            },
                        },
                    }
                },
            }
        }),
        &registries,
    )
    .unwrap();

    assert_eq!(
        index.analysis().tokenizers().get("edge"),
        Some(&Tokenizer::NGram(NGramTokenizer {
            min_gram: Some(2),
            max_gram: Some(10),
            ..NGramTokenizer::new(NGramKind::EdgeNGram, "edge")
        }))
    );
    assert_eq!(
        index.analysis().token_filters().get("shingles"),
        Some(&TokenFilter::Shingle(ShingleTokenFilter {
            max_shingle_size: Some(3),
            output_unigrams: Some(false),
            ..ShingleTokenFilter::new("shingles")
        }))
    );
    assert!(index.analysis().analyzers().contains("autocomplete"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

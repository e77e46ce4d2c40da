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

fn table(entries: impl IntoIterator<Item = (&'static str, Mapping)>) -> NamedTable<Mapping> {
    entries
        .into_iter()
        .map(|(name, mapping)| (name.to_string(), mapping))
        .collect()
}

fn folding_analyzer() -> Analyzer {
    CustomAnalyzer::new("folding", Tokenizer::standard())
        .with_filter(TokenFilter::lowercase())
        .with_filter(TokenFilter::asciifolding())
        .into()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_encode_properties() {
    let properties = table([
        (
            "title",
            TextMapping::default()
                .with_analyzer(folding_analyzer())
                .with_field("raw", KeywordMapping::default().with_ignore_above(256).into())
                .into(),
        ),
        ("price", Mapping::numeric(NumericType::ScaledFloat)),
        (
            "published",
            Mapping::Date(DateMapping::new(DateType::Date).with_format("yyyy-MM-dd")),
        ),
        (
            "author",
            Mapping::object(table([("name", Mapping::keyword())])),
        ),
        ("reviews", Mapping::nested(table([("stars", Mapping::numeric(NumericType::Byte))]))),
    ]);

    assert_eq!(
        encode_properties(&properties),
        json!({
            "title": {
                "type": "text",
                "analyzer": "folding",
                "fields": { "raw": { "type": "keyword", "ignore_above": 256 } },
            },
            "price": { "type": "scaled_float" },
            "published": { "type": "date", "format": "yyyy-MM-dd" },
            "author": { "properties": { "name": { "type": "keyword" } } },
            "reviews": {
                "type": "nested",
                "properties": { "stars": { "type": "byte" } },
            },
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_resolves_analysis_references() {
    let registries = Registries::with_builtins();
    let mut analysis = AnalysisContext::new();
    analysis.add_analyzer(folding_analyzer()).unwrap();
    let ctx = DecodeContext::new(&registries).with_analysis(&analysis);

    let decoded = decode_properties(
        "properties",
        &json!({
            "title": { "type": "text", "analyzer": "folding", "search_analyzer": "english" },
            "author": { "properties": { "name": { "type": "keyword" } } },
        }),
        &ctx,
    )
    .unwrap();

    assert_eq!(
        decoded.get("title"),
        Some(&Mapping::Text(TextMapping {
            analyzer: Some(folding_analyzer()),
            search_analyzer: Some(Analyzer::language("english")),
            ..TextMapping::default()
        }))
    );
    // Untyped entries with properties are plain objects
    assert_eq!(
        decoded.get("author"),
        Some(&Mapping::object(table([("name", Mapping::keyword())])))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_unknown_analyzer_reference_is_dangling() {
    let registries = Registries::with_builtins();
    let ctx = DecodeContext::new(&registries);

    let err = decode_properties(
        "mappings.properties",
        &json!({ "title": { "type": "text", "analyzer": "folding" } }),
        &ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CodecError::DanglingReference {
            family: VariantFamily::Analyzer,
            name: "folding".to_string(),
            referenced_from: "mappings.properties.title.analyzer".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_scaled_float_requires_scaling_factor() {
    let registries = Registries::with_builtins();
    let ctx = DecodeContext::new(&registries);

    let err = decode_properties(
        "properties",
        &json!({ "price": { "type": "scaled_float" } }),
        &ctx,
    )
    .unwrap_err();

    assert!(
        matches!(
            &err,
            CodecError::MalformedVariant { kind, path, .. }
                if kind == "scaled_float" && path == "properties.price.scaling_factor"
        ),
        "{err:?}"
    );

    let decoded = decode_properties(
        "properties",
        &json!({ "price": { "type": "scaled_float", "scaling_factor": 100.0 } }),
        &ctx,
    )
    .unwrap();
    assert_eq!(
        decoded.get("price"),
        Some(&NumericMapping::scaled_float(100.0).into())
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_unknown_mapping_fields_are_kept() {
    let registries = Registries::with_builtins();
    let ctx = DecodeContext::new(&registries);

    let wire = json!({
        "location": { "type": "geo_point", "future_option": [1, 2] },
        "tags": { "type": "keyword", "meta": { "unit": "none" } },
    });

    let decoded = decode_properties("properties", &wire, &ctx).unwrap();

    assert_eq!(encode_properties(&decoded), wire);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_unknown_mapping_type_is_rejected() {
    let registries = Registries::with_builtins();
    let ctx = DecodeContext::new(&registries);

    let err = decode_properties(
        "properties",
        &json!({ "embedding": { "type": "dense_vector", "dims": 3 } }),
        &ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CodecError::UnknownVariantKind {
            family: VariantFamily::Mapping,
            kind: "dense_vector".to_string(),
            path: "properties.embedding".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_analysis_dependencies_include_multi_fields() {
    let lowercase_normalizer = Normalizer::Custom(
        CustomNormalizer::new("folded").with_filter(TokenFilter::asciifolding()),
    );

    let mapping: Mapping = TextMapping::default()
        .with_analyzer(folding_analyzer())
        .with_field(
            "sortable",
            KeywordMapping::default()
                .with_normalizer(lowercase_normalizer.clone())
                .into(),
        )
        .into();

    assert_eq!(
        mapping.analysis_dependencies(),
        vec![
            AnalysisItem::Analyzer(folding_analyzer()),
            AnalysisItem::Normalizer(lowercase_normalizer),
        ]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_dynamic_mode_accepts_string_booleans() {
    let registries = Registries::with_builtins();
    let ctx = DecodeContext::new(&registries);

    let decoded = decode_properties(
        "properties",
        &json!({ "attrs": { "type": "object", "dynamic": "false", "enabled": false } }),
        &ctx,
    )
    .unwrap();

    let Some(Mapping::Object(attrs)) = decoded.get("attrs") else {
        panic!("unexpected mapping {decoded:?}");
    };
    assert_eq!(attrs.dynamic, Some(DynamicMapping::False));
    assert_eq!(attrs.enabled, Some(false));
    assert!(attrs.properties.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

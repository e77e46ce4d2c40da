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

fn edge_tokenizer() -> Tokenizer {
    Tokenizer::NGram(NGramTokenizer {
        min_gram: Some(2),
        max_gram: Some(10),
        token_chars: vec![TokenChars::Letter, TokenChars::Digit],
        ..NGramTokenizer::new(NGramKind::EdgeNGram, "edge_tokenizer")
    })
}

fn english_stop() -> TokenFilter {
    TokenFilter::Stop(StopTokenFilter {
        stopwords: Some(Stopwords::predefined("english")),
        ..StopTokenFilter::new("english_stop")
    })
}

fn german_stemmer() -> TokenFilter {
    TokenFilter::Stemmer(StemmerTokenFilter::new(
        "german_stemmer",
        Some(StemmerLanguage::LightGerman),
    ))
}

fn autocomplete_analyzer() -> Analyzer {
    CustomAnalyzer::new("autocomplete", edge_tokenizer())
        .with_filter(TokenFilter::lowercase())
        .with_filter(english_stop())
        .with_filter(german_stemmer())
        .into()
}

fn sorted_names<C: AnalysisComponent>(table: &NamedTable<C>) -> Vec<&str> {
    let mut names: Vec<&str> = table.names().collect();
    names.sort_unstable();
    names
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_collect_follows_references() {
    let mut ctx = AnalysisContext::new();
    ctx.add_analyzer(autocomplete_analyzer()).unwrap();

    assert_eq!(sorted_names(ctx.analyzers()), vec!["autocomplete"]);
    assert_eq!(sorted_names(ctx.tokenizers()), vec!["edge_tokenizer"]);
    // `lowercase` is predefined and never stored
    assert_eq!(
        sorted_names(ctx.token_filters()),
        vec!["english_stop", "german_stemmer"]
    );
    assert!(ctx.char_filters().is_empty());
    assert!(ctx.normalizers().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_shared_dependency_is_stored_once() {
    let other: Analyzer = CustomAnalyzer::new("plain", Tokenizer::standard())
        .with_filter(english_stop())
        .into();

    let mut ctx = AnalysisContext::new();
    ctx.add_analyzer(autocomplete_analyzer()).unwrap();
    ctx.add_analyzer(other).unwrap();

    assert_eq!(sorted_names(ctx.analyzers()), vec!["autocomplete", "plain"]);
    assert_eq!(ctx.token_filters().len(), 2);
    assert_eq!(ctx.tokenizers().len(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_identical_definition_is_noop() {
    let mut ctx = AnalysisContext::new();

    assert!(ctx.add(english_stop()).unwrap());
    assert!(!ctx.add(english_stop()).unwrap());
    assert!(!ctx.add(TokenFilter::lowercase()).unwrap());
    assert_eq!(ctx.token_filters().len(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_conflicting_definition_is_rejected() {
    let mut ctx = AnalysisContext::new();
    ctx.add(english_stop()).unwrap();

    let conflicting = TokenFilter::Stop(StopTokenFilter {
        stopwords: Some(Stopwords::List(vec!["the".to_string()])),
        ..StopTokenFilter::new("english_stop")
    });

    assert_eq!(
        ctx.add(conflicting).unwrap_err(),
        CodecError::ConflictingDefinition {
            family: VariantFamily::TokenFilter,
            name: "english_stop".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_encode_writes_references_by_name() {
    let mut ctx = AnalysisContext::new();
    ctx.add_analyzer(autocomplete_analyzer()).unwrap();

    let encoded = ctx.encode();

    assert_eq!(
        encoded["analyzer"],
        json!({
            "autocomplete": {
                "type": "custom",
                "tokenizer": "edge_tokenizer",
                "filter": ["lowercase", "english_stop", "german_stemmer"],
            }
        })
    );
    assert_eq!(
        encoded["tokenizer"],
        json!({
            "edge_tokenizer": {
                "type": "edge_ngram",
                "min_gram": 2,
                "max_gram": 10,
                "token_chars": ["letter", "digit"],
            }
        })
    );
    assert_eq!(
        encoded["filter"]["english_stop"],
        json!({ "type": "stop", "stopwords": "_english_" })
    );
    assert!(encoded.get("char_filter").is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_resolves_references() {
    let registries = Registries::with_builtins();

    let mut expected = AnalysisContext::new();
    expected.add_analyzer(autocomplete_analyzer()).unwrap();

    let decoded = AnalysisContext::decode(&expected.encode(), "analysis", &registries).unwrap();

    assert_eq!(
        decoded.analyzers().get("autocomplete"),
        Some(&autocomplete_analyzer())
    );
    assert_eq!(
        decoded.lookup(VariantFamily::TokenFilter, "german_stemmer"),
        Some(AnalysisItem::from(german_stemmer()))
    );
    assert_eq!(decoded.lookup(VariantFamily::Tokenizer, "missing"), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_decode_reaches_fixed_point_within_table() {
    let registries = Registries::with_builtins();

    // The multiplexer comes first but references a filter defined after it
    let decoded = AnalysisContext::decode(
        &json!({
            "filter": {
                "variants": {
                    "type": "multiplexer",
                    "filters": ["lowercase", "my_stop, asciifolding"],
                },
                "my_stop": { "type": "stop", "stopwords": ["a", "an"] },
            }
        }),
        "analysis",
        &registries,
    )
    .unwrap();

    let my_stop = TokenFilter::Stop(StopTokenFilter {
        stopwords: Some(Stopwords::List(vec!["a".to_string(), "an".to_string()])),
        ..StopTokenFilter::new("my_stop")
    });

    assert_eq!(
        decoded.token_filters().get("variants"),
        Some(&TokenFilter::Multiplexer(MultiplexerTokenFilter::new(
            "variants",
            vec![
                vec![TokenFilter::lowercase()],
                vec![my_stop, TokenFilter::asciifolding()],
            ]
        )))
    );
    // Table order follows the source
    assert_eq!(
        decoded.token_filters().names().collect::<Vec<_>>(),
        vec!["variants", "my_stop"]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_multiplexer_chains_round_trip() {
    let registries = Registries::with_builtins();
    let analysis = json!({
        "filter": {
            "variants": {
                "type": "multiplexer",
                "filters": ["lowercase", "lowercase,porter_stem"],
            }
        }
    });

    let decoded = AnalysisContext::decode(&analysis, "analysis", &registries).unwrap();

    assert_eq!(decoded.encode(), analysis);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_dangling_reference_is_reported() {
    let registries = Registries::with_builtins();

    let err = AnalysisContext::decode(
        &json!({
            "analyzer": {
                "my_analyzer": {
                    "type": "custom",
                    "tokenizer": "missing_tokenizer",
                    "filter": ["lowercase"],
                }
            }
        }),
        "analysis",
        &registries,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CodecError::DanglingReference {
            family: VariantFamily::Tokenizer,
            name: "missing_tokenizer".to_string(),
            referenced_from: "analysis.analyzer.my_analyzer".to_string(),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_mutual_references_are_reported() {
    let registries = Registries::with_builtins();

    let err = AnalysisContext::decode(
        &json!({
            "filter": {
                "a": { "type": "condition", "filter": ["b"], "script": { "source": "true" } },
                "b": { "type": "condition", "filter": ["a"], "script": { "source": "true" } },
            }
        }),
        "analysis",
        &registries,
    )
    .unwrap_err();

    assert!(
        matches!(&err, CodecError::DanglingReference { family: VariantFamily::TokenFilter, .. }),
        "{err:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_merge_combines_contexts() {
    let mut a = AnalysisContext::new();
    a.add_analyzer(autocomplete_analyzer()).unwrap();

    let mut b = AnalysisContext::new();
    b.add_token_filter(english_stop()).unwrap();
    b.add_normalizer(Normalizer::Custom(
        CustomNormalizer::new("folded").with_filter(TokenFilter::asciifolding()),
    ))
    .unwrap();

    a.merge(&b).unwrap();

    assert_eq!(a.token_filters().len(), 2);
    assert_eq!(sorted_names(a.normalizers()), vec!["folded"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

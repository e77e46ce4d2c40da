// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, LazyLock};

use super::{VariantFamily, VariantRegistry};
use crate::{
    AggregationKind,
    AggregationResponseRegistry,
    Analyzer,
    CharFilter,
    Mapping,
    Normalizer,
    Query,
    TokenFilter,
    Tokenizer,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

static GLOBAL_REGISTRIES: LazyLock<Arc<Registries>> =
    LazyLock::new(|| Arc::new(Registries::with_builtins()));

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Decoder registries of every variant family.
///
/// The process-wide instance returned by [`Registries::global`] holds the
/// builtin kinds and is never mutated. Callers that need plugin kinds build
/// their own instance from [`Registries::with_builtins`] and pass it to the
/// operations explicitly.
#[derive(Debug, Clone)]
pub struct Registries {
    pub analyzers: VariantRegistry<Analyzer>,
    pub tokenizers: VariantRegistry<Tokenizer>,
    pub token_filters: VariantRegistry<TokenFilter>,
    pub char_filters: VariantRegistry<CharFilter>,
    pub normalizers: VariantRegistry<Normalizer>,
    pub mappings: VariantRegistry<Mapping>,
    pub queries: VariantRegistry<Query>,
    pub aggregations: VariantRegistry<AggregationKind>,
    pub aggregation_responses: AggregationResponseRegistry,
}

impl Registries {
    pub fn empty() -> Self {
        Self {
            analyzers: VariantRegistry::new(VariantFamily::Analyzer),
            tokenizers: VariantRegistry::new(VariantFamily::Tokenizer),
            token_filters: VariantRegistry::new(VariantFamily::TokenFilter),
            char_filters: VariantRegistry::new(VariantFamily::CharFilter),
            normalizers: VariantRegistry::new(VariantFamily::Normalizer),
            mappings: VariantRegistry::new(VariantFamily::Mapping).with_implicit_kind("object"),
            queries: VariantRegistry::new(VariantFamily::Query),
            aggregations: VariantRegistry::new(VariantFamily::Aggregation),
            aggregation_responses: AggregationResponseRegistry::default(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registries = Self::empty();
        Analyzer::register_builtins(&mut registries.analyzers);
        Tokenizer::register_builtins(&mut registries.tokenizers);
        TokenFilter::register_builtins(&mut registries.token_filters);
        CharFilter::register_builtins(&mut registries.char_filters);
        Normalizer::register_builtins(&mut registries.normalizers);
        Mapping::register_builtins(&mut registries.mappings);
        Query::register_builtins(&mut registries.queries);
        AggregationKind::register_builtins(&mut registries.aggregations);
        registries.aggregation_responses.register_builtins();
        registries
    }

    /// Shared builtin registries
    pub fn global() -> Arc<Self> {
        GLOBAL_REGISTRIES.clone()
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::with_builtins()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

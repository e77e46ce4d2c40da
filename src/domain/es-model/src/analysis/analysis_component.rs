// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{AnalysisContext, Analyzer, CharFilter, Normalizer, TokenFilter, Tokenizer};
use crate::codec::{NamedTable, TaggedVariant, VariantFamily};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Named analysis building block that can live in an index `analysis` table
pub trait AnalysisComponent: TaggedVariant {
    fn name(&self) -> &str;

    /// Components referenced by name from this one
    fn dependencies(&self) -> Vec<AnalysisItem> {
        Vec::new()
    }

    fn table(ctx: &AnalysisContext) -> &NamedTable<Self>;

    fn table_mut(ctx: &mut AnalysisContext) -> &mut NamedTable<Self>;

    fn into_item(self) -> AnalysisItem;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Any analysis component
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisItem {
    Analyzer(Analyzer),
    Tokenizer(Tokenizer),
    TokenFilter(TokenFilter),
    CharFilter(CharFilter),
    Normalizer(Normalizer),
}

impl AnalysisItem {
    pub fn family(&self) -> VariantFamily {
        match self {
            Self::Analyzer(_) => VariantFamily::Analyzer,
            Self::Tokenizer(_) => VariantFamily::Tokenizer,
            Self::TokenFilter(_) => VariantFamily::TokenFilter,
            Self::CharFilter(_) => VariantFamily::CharFilter,
            Self::Normalizer(_) => VariantFamily::Normalizer,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Analyzer(v) => v.name(),
            Self::Tokenizer(v) => v.name(),
            Self::TokenFilter(v) => v.name(),
            Self::CharFilter(v) => v.name(),
            Self::Normalizer(v) => v.name(),
        }
    }
}

impl From<Analyzer> for AnalysisItem {
    fn from(value: Analyzer) -> Self {
        Self::Analyzer(value)
    }
}

impl From<Tokenizer> for AnalysisItem {
    fn from(value: Tokenizer) -> Self {
        Self::Tokenizer(value)
    }
}

impl From<TokenFilter> for AnalysisItem {
    fn from(value: TokenFilter) -> Self {
        Self::TokenFilter(value)
    }
}

impl From<CharFilter> for AnalysisItem {
    fn from(value: CharFilter) -> Self {
        Self::CharFilter(value)
    }
}

impl From<Normalizer> for AnalysisItem {
    fn from(value: Normalizer) -> Self {
        Self::Normalizer(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

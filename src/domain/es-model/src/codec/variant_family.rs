// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Group of variants that share one discriminant namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum VariantFamily {
    Analyzer,
    Tokenizer,
    TokenFilter,
    CharFilter,
    Normalizer,
    Mapping,
    Query,
    Aggregation,
}

impl VariantFamily {
    /// Whether the discriminant is a `type` field inside the body, as opposed
    /// to a key wrapping the body
    pub fn is_type_tagged(self) -> bool {
        !matches!(self, Self::Query | Self::Aggregation)
    }

    /// Key of the family's table inside an index `analysis` block
    pub fn analysis_key(self) -> Option<&'static str> {
        match self {
            Self::Analyzer => Some("analyzer"),
            Self::Tokenizer => Some("tokenizer"),
            Self::TokenFilter => Some("filter"),
            Self::CharFilter => Some("char_filter"),
            Self::Normalizer => Some("normalizer"),
            Self::Mapping | Self::Query | Self::Aggregation => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

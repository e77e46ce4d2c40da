// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use super::VariantFamily;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Unknown {family} kind '{kind}' at '{path}'")]
    UnknownVariantKind {
        family: VariantFamily,
        kind: String,
        path: String,
    },

    #[error("Malformed {family} '{kind}' at '{path}': {reason}")]
    MalformedVariant {
        family: VariantFamily,
        kind: String,
        path: String,
        reason: String,
    },

    #[error("{family} '{name}' referenced at '{referenced_from}' is not defined")]
    DanglingReference {
        family: VariantFamily,
        name: String,
        referenced_from: String,
    },

    #[error("Conflicting definitions of {family} '{name}'")]
    ConflictingDefinition { family: VariantFamily, name: String },

    #[error("Cannot resolve response of aggregation '{name}'")]
    UnresolvedAggregationKind {
        name: String,
        /// Request kind of the aggregation, if the name was found in the request
        kind: Option<String>,
    },
}

impl CodecError {
    pub fn malformed(
        family: VariantFamily,
        kind: impl Into<String>,
        path: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::MalformedVariant {
            family,
            kind: kind.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_kind(
        family: VariantFamily,
        kind: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::UnknownVariantKind {
            family,
            kind: kind.into(),
            path: path.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Joins a dotted diagnostic path
pub(crate) fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

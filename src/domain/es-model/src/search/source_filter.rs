// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Which parts of `_source` a search returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFilter {
    Disabled,
    All,
    Fields(Vec<String>),
    Patterns {
        includes: Vec<String>,
        excludes: Vec<String>,
    },
}

impl Serialize for SourceFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::All => serializer.serialize_bool(true),
            Self::Fields(fields) => fields.serialize(serializer),
            Self::Patterns { includes, excludes } => PatternsRepr {
                includes: includes.clone(),
                excludes: excludes.clone(),
            }
            .serialize(serializer),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PatternsRepr {
    #[serde(default, alias = "include", skip_serializing_if = "Vec::is_empty")]
    includes: Vec<String>,
    #[serde(default, alias = "exclude", skip_serializing_if = "Vec::is_empty")]
    excludes: Vec<String>,
}

impl<'de> Deserialize<'de> for SourceFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Enabled(bool),
            Field(String),
            Fields(Vec<String>),
            Patterns(PatternsRepr),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Enabled(true) => Self::All,
            Repr::Enabled(false) => Self::Disabled,
            Repr::Field(field) => Self::Fields(vec![field]),
            Repr::Fields(fields) => Self::Fields(fields),
            Repr::Patterns(p) => Self::Patterns {
                includes: p.includes,
                excludes: p.excludes,
            },
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

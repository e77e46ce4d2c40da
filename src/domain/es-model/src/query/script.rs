// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::JsonMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Inline script, as used by `condition` filters, scripted aggregations and
/// queries
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub source: String,
    pub lang: Option<String>,
    pub params: Option<JsonMap>,
}

impl Script {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            lang: None,
            params: None,
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_params(mut self, params: JsonMap) -> Self {
        self.params = Some(params);
        self
    }
}

#[derive(Serialize, Deserialize)]
struct ScriptObject {
    source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<JsonMap>,
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A script with only a source is written in its short form
        if self.lang.is_none() && self.params.is_none() {
            return serializer.serialize_str(&self.source);
        }
        ScriptObject {
            source: self.source.clone(),
            lang: self.lang.clone(),
            params: self.params.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Source(String),
            Object(ScriptObject),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Source(source) => Self::new(source),
            Repr::Object(v) => Self {
                source: v.source,
                lang: v.lang,
                params: v.params,
            },
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

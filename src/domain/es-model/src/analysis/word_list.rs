// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::codec::{CodecError, FieldReader, JsonMap};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stop words of an analyzer or a stop filter
#[derive(Debug, Clone, PartialEq)]
pub enum Stopwords {
    /// Predefined list such as `_english_` or `_none_`
    Predefined(String),
    List(Vec<String>),
    /// File relative to the Elasticsearch config directory
    Path(String),
}

impl Stopwords {
    pub fn predefined(language: &str) -> Self {
        Self::Predefined(format!("_{language}_"))
    }

    pub(crate) fn read(reader: &mut FieldReader<'_>) -> Result<Option<Self>, CodecError> {
        let inline = reader.raw("stopwords");
        let path: Option<String> = reader.optional("stopwords_path")?;

        match (inline, path) {
            (Some(_), Some(_)) => Err(reader.malformed(
                "stopwords",
                "'stopwords' and 'stopwords_path' are mutually exclusive",
            )),
            (Some(Value::String(s)), None) => Ok(Some(Self::Predefined(s.clone()))),
            (Some(value), None) => Vec::<String>::deserialize(value)
                .map(|list| Some(Self::List(list)))
                .map_err(|e| reader.malformed("stopwords", e)),
            (None, Some(path)) => Ok(Some(Self::Path(path))),
            (None, None) => Ok(None),
        }
    }

    pub(crate) fn write(stopwords: Option<&Self>, out: &mut JsonMap) {
        match stopwords {
            None => {}
            Some(Self::Predefined(s)) => {
                out.insert("stopwords".to_string(), json!(s));
            }
            Some(Self::List(list)) => {
                out.insert("stopwords".to_string(), json!(list));
            }
            Some(Self::Path(path)) => {
                out.insert("stopwords_path".to_string(), json!(path));
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// List of rules given either inline or as a file, as synonyms, keep words
/// and character mappings are
#[derive(Debug, Clone, PartialEq)]
pub enum WordList {
    Inline(Vec<String>),
    Path(String),
}

impl WordList {
    pub(crate) fn read(
        reader: &mut FieldReader<'_>,
        inline_key: &str,
        path_key: &str,
    ) -> Result<Option<Self>, CodecError> {
        let inline: Option<Vec<String>> = reader.optional(inline_key)?;
        let path: Option<String> = reader.optional(path_key)?;

        match (inline, path) {
            (Some(_), Some(_)) => Err(reader.malformed(
                inline_key,
                format!("'{inline_key}' and '{path_key}' are mutually exclusive"),
            )),
            (Some(list), None) => Ok(Some(Self::Inline(list))),
            (None, Some(path)) => Ok(Some(Self::Path(path))),
            (None, None) => Ok(None),
        }
    }

    pub(crate) fn read_required(
        reader: &mut FieldReader<'_>,
        inline_key: &str,
        path_key: &str,
    ) -> Result<Self, CodecError> {
        Self::read(reader, inline_key, path_key)?.ok_or_else(|| {
            reader.malformed(
                inline_key,
                format!("one of '{inline_key}' or '{path_key}' is required"),
            )
        })
    }

    pub(crate) fn write(&self, out: &mut JsonMap, inline_key: &str, path_key: &str) {
        match self {
            Self::Inline(list) => out.insert(inline_key.to_string(), json!(list)),
            Self::Path(path) => out.insert(path_key.to_string(), json!(path)),
        };
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

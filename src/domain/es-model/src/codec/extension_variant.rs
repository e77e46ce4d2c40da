// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{FieldReader, JsonMap, put_extra};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Variant of a kind this crate has no typed model for.
///
/// Registered by callers for plugin-provided kinds (e.g. `icu_tokenizer`),
/// keeps the body verbatim and writes it back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionVariant {
    pub kind: String,
    pub name: String,
    pub fields: JsonMap,
}

impl ExtensionVariant {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, fields: JsonMap) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            fields,
        }
    }

    pub fn from_reader(reader: FieldReader<'_>) -> Self {
        let kind = reader.kind().to_string();
        let name = reader.name().to_string();
        Self {
            kind,
            name,
            fields: reader.into_extra(),
        }
    }

    pub fn encode_fields(&self, out: &mut JsonMap) {
        put_extra(out, &self.fields);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

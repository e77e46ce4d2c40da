// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One sort criterion. Written as the bare field name when it has no options.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    /// Field name, or `_score` / `_doc`
    pub field: String,
    pub order: Option<SortOrder>,
    /// `_first`, `_last` or a substitute value
    pub missing: Option<Value>,
    pub unmapped_type: Option<String>,
    pub extra: JsonMap,
}

impl SortSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: None,
            missing: None,
            unmapped_type: None,
            extra: JsonMap::new(),
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            order: Some(SortOrder::Asc),
            ..Self::new(field)
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            order: Some(SortOrder::Desc),
            ..Self::new(field)
        }
    }

    pub fn relevance() -> Self {
        Self::desc("_score")
    }

    pub fn encode(&self) -> Value {
        let mut options = JsonMap::new();
        put(&mut options, "order", &self.order);
        put(&mut options, "missing", &self.missing);
        put(&mut options, "unmapped_type", &self.unmapped_type);
        put_extra(&mut options, &self.extra);

        if options.is_empty() {
            return Value::String(self.field.clone());
        }

        let mut out = JsonMap::new();
        out.insert(self.field.clone(), Value::Object(options));
        Value::Object(out)
    }

    pub fn decode(path: &str, value: &Value) -> Result<Self, CodecError> {
        let malformed =
            |reason: &str| CodecError::malformed(VariantFamily::Query, "sort", path, reason);

        let entry = match value {
            Value::String(field) => return Ok(Self::new(field.as_str())),
            Value::Object(entry) if entry.len() == 1 => entry,
            _ => return Err(malformed("expected a field name or a single-key object")),
        };

        let Some((field, options)) = entry.iter().next() else {
            return Err(malformed("expected a single-key object"));
        };

        match options {
            Value::String(_) => Ok(Self {
                order: Some(
                    SortOrder::deserialize(options).map_err(|e| malformed(&e.to_string()))?,
                ),
                ..Self::new(field.as_str())
            }),
            Value::Object(options) => {
                let options_path = join_path(path, field);
                let mut reader =
                    FieldReader::new(VariantFamily::Query, "sort", "", &options_path, options);
                Ok(Self {
                    field: field.clone(),
                    order: reader.optional("order")?,
                    missing: reader.optional("missing")?,
                    unmapped_type: reader.optional("unmapped_type")?,
                    extra: reader.into_extra(),
                })
            }
            _ => Err(malformed("sort options must be an order or an object")),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

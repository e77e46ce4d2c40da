// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{CodecError, VariantFamily, join_path};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type JsonMap = serde_json::Map<String, Value>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Cursor over the fields of one variant body.
///
/// Every field a decoder reads is marked as consumed, whatever is left after
/// decoding is returned by [`FieldReader::into_extra`] and kept on the variant
/// so that unknown but valid settings survive a round trip.
pub struct FieldReader<'a> {
    family: VariantFamily,
    kind: &'a str,
    name: &'a str,
    path: &'a str,
    fields: &'a JsonMap,
    consumed: Vec<&'a str>,
}

impl<'a> FieldReader<'a> {
    pub fn new(
        family: VariantFamily,
        kind: &'a str,
        name: &'a str,
        path: &'a str,
        fields: &'a JsonMap,
    ) -> Self {
        Self {
            family,
            kind,
            name,
            path,
            fields,
            consumed: Vec::new(),
        }
    }

    pub fn family(&self) -> VariantFamily {
        self.family
    }

    pub fn kind(&self) -> &'a str {
        self.kind
    }

    /// Name the variant is registered under, empty for unnamed positions
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn field_path(&self, key: &str) -> String {
        join_path(self.path, key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn malformed(&self, key: &str, reason: impl std::fmt::Display) -> CodecError {
        CodecError::malformed(self.family, self.kind, self.field_path(key), reason)
    }

    /// Takes the raw value of a field
    pub fn raw(&mut self, key: &str) -> Option<&'a Value> {
        let fields = self.fields;
        let (key, value) = fields.get_key_value(key)?;
        self.mark(key);
        if value.is_null() { None } else { Some(value) }
    }

    /// Reads and deserializes a field. A number or a boolean written as a
    /// string is accepted where the field expects one, as `GET /{index}`
    /// reports every setting that way.
    pub fn optional<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, CodecError> {
        let Some(value) = self.raw(key) else {
            return Ok(None);
        };

        match T::deserialize(value) {
            Ok(v) => Ok(Some(v)),
            Err(e) => match unquote_scalar(value) {
                Some(scalar) => T::deserialize(&scalar)
                    .map(Some)
                    .map_err(|_| self.malformed(key, e)),
                None => Err(self.malformed(key, e)),
            },
        }
    }

    pub fn required<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, CodecError> {
        self.optional(key)?
            .ok_or_else(|| self.malformed(key, "missing required field"))
    }

    /// Reads a list that is absent when empty
    pub fn list<T: DeserializeOwned>(&mut self, key: &str) -> Result<Vec<T>, CodecError> {
        Ok(self.optional(key)?.unwrap_or_default())
    }

    /// Reads a field that may be given either as a single string or as an
    /// array of strings
    pub fn string_or_list(&mut self, key: &str) -> Result<Vec<String>, CodecError> {
        match self.raw(key) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(value) => Vec::<String>::deserialize(value).map_err(|e| self.malformed(key, e)),
        }
    }

    /// Reads a field that may be written as a string but means a number
    /// (index settings are reported back this way)
    pub fn lenient_u32(&mut self, key: &str) -> Result<Option<u32>, CodecError> {
        match self.raw(key) {
            None => Ok(None),
            Some(Value::String(s)) => s
                .parse::<u32>()
                .map(Some)
                .map_err(|e| self.malformed(key, e)),
            Some(value) => u32::deserialize(value)
                .map(Some)
                .map_err(|e| self.malformed(key, e)),
        }
    }

    /// Reader over an object nested in this body, such as the per-field
    /// options of a field-keyed query
    pub fn nested<'b>(&self, path: &'b str, fields: &'b JsonMap) -> FieldReader<'b>
    where
        'a: 'b,
    {
        FieldReader::new(self.family, self.kind, self.name, path, fields)
    }

    /// Takes the only field that has not been consumed yet, used by bodies
    /// that are keyed by a field name (`{"term": {"user": ...}}`)
    pub fn single_entry(&mut self) -> Result<(&'a str, &'a Value), CodecError> {
        let fields = self.fields;
        let mut remaining = fields
            .iter()
            .filter(|(k, _)| !self.consumed.contains(&k.as_str()));

        let Some((key, value)) = remaining.next() else {
            return Err(CodecError::malformed(
                self.family,
                self.kind,
                self.path,
                "expected exactly one field name, found none",
            ));
        };
        if let Some((other, _)) = remaining.next() {
            return Err(CodecError::malformed(
                self.family,
                self.kind,
                self.path,
                format!("expected exactly one field name, found '{key}' and '{other}'"),
            ));
        }

        self.mark(key);
        Ok((key.as_str(), value))
    }

    /// Fields that no decoder asked for
    pub fn into_extra(self) -> JsonMap {
        self.fields
            .iter()
            .filter(|(k, _)| !self.consumed.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Marks a field as handled without reading it
    pub fn skip(&mut self, key: &'a str) {
        self.mark(key);
    }

    fn mark(&mut self, key: &'a str) {
        if !self.consumed.contains(&key) {
            self.consumed.push(key);
        }
    }
}

/// `"2"` -> `2`, `"false"` -> `false`, anything else is left alone
fn unquote_scalar(value: &Value) -> Option<Value> {
    let Value::String(s) = value else {
        return None;
    };

    match serde_json::from_str::<Value>(s) {
        Ok(scalar @ (Value::Number(_) | Value::Bool(_))) => Some(scalar),
        _ => None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

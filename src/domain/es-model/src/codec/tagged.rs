// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

use super::{CodecError, JsonMap, Registries, VariantFamily, VariantRegistry, join_path};
use crate::{AnalysisComponent, AnalysisContext};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// State shared by all decoders of one decode operation
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    pub registries: &'a Registries,
    /// Definitions that named references can resolve to
    pub analysis: Option<&'a AnalysisContext>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(registries: &'a Registries) -> Self {
        Self {
            registries,
            analysis: None,
        }
    }

    pub fn with_analysis(self, analysis: &'a AnalysisContext) -> Self {
        Self {
            analysis: Some(analysis),
            ..self
        }
    }

    /// Resolves a component referenced by name: a definition in the analysis
    /// context wins, otherwise the name must be a predefined kind
    pub fn resolve<C: AnalysisComponent>(
        &self,
        name: &str,
        referenced_from: &str,
    ) -> Result<C, CodecError> {
        if let Some(defined) = self.analysis.and_then(|a| C::table(a).get(name)) {
            return Ok(defined.clone());
        }

        let registry = C::registry(self.registries);
        if registry.has_builtin(name) {
            return registry.builtin(name, referenced_from);
        }

        Err(CodecError::DanglingReference {
            family: C::FAMILY,
            name: name.to_string(),
            referenced_from: referenced_from.to_string(),
        })
    }

    pub fn resolve_all<C: AnalysisComponent>(
        &self,
        names: &[String],
        referenced_from: &str,
    ) -> Result<Vec<C>, CodecError> {
        names
            .iter()
            .map(|name| self.resolve(name, referenced_from))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Variant discriminated by a `type` field inside its body
pub trait TaggedVariant: Clone + PartialEq + Sized + 'static {
    const FAMILY: VariantFamily;

    fn kind(&self) -> &str;

    /// True when the variant is the predefined default of its kind and can be
    /// written as the bare kind string
    fn is_builtin_default(&self) -> bool {
        false
    }

    /// Writes the body fields, without the `type` discriminant
    fn encode_fields(&self, out: &mut JsonMap);

    fn registry(registries: &Registries) -> &VariantRegistry<Self>;
}

pub fn encode_tagged<V: TaggedVariant>(variant: &V) -> Value {
    if variant.is_builtin_default() {
        return Value::String(variant.kind().to_string());
    }
    Value::Object(encode_tagged_object(variant))
}

/// Encodes a variant in its object form, as analysis tables require
pub fn encode_tagged_object<V: TaggedVariant>(variant: &V) -> JsonMap {
    let mut out = JsonMap::new();
    out.insert("type".to_string(), Value::String(variant.kind().to_string()));
    variant.encode_fields(&mut out);
    out
}

/// Decodes a variant found at `path` and registered under `name`. A bare
/// string is accepted only as a reference to a predefined kind.
pub fn decode_tagged<V: TaggedVariant>(
    name: &str,
    path: &str,
    value: &Value,
    ctx: &DecodeContext<'_>,
) -> Result<V, CodecError> {
    let registry = V::registry(ctx.registries);

    match value {
        Value::String(kind) => {
            if !name.is_empty() && name != kind {
                return Err(CodecError::malformed(
                    V::FAMILY,
                    kind,
                    path,
                    format!("definition of '{name}' cannot be a bare kind string"),
                ));
            }
            registry.builtin(kind, path)
        }
        Value::Object(fields) => {
            let kind = match fields.get("type") {
                Some(Value::String(kind)) => kind.as_str(),
                Some(other) => {
                    return Err(CodecError::malformed(
                        V::FAMILY,
                        other.to_string(),
                        join_path(path, "type"),
                        "discriminant must be a string",
                    ));
                }
                None => registry.implicit_kind().ok_or_else(|| {
                    CodecError::malformed(
                        V::FAMILY,
                        "",
                        path,
                        "missing 'type' discriminant",
                    )
                })?,
            };
            registry.decode(kind, name, path, fields, ctx)
        }
        other => Err(CodecError::malformed(
            V::FAMILY,
            "",
            path,
            format!("expected a string or an object, got {other}"),
        )),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Encodes named entries as a `{name: value}` object in iteration order
pub fn encode_named<'a, V: 'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a V)>,
    mut encode_entry: impl FnMut(&V) -> Value,
) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(name, v)| (name.to_string(), encode_entry(v)))
            .collect(),
    )
}

/// Decodes a `{name: value}` object entry by entry, preserving order
pub fn decode_named<V>(
    family: VariantFamily,
    path: &str,
    value: &Value,
    mut decode_entry: impl FnMut(&str, &str, &Value) -> Result<V, CodecError>,
) -> Result<Vec<(String, V)>, CodecError> {
    let Value::Object(entries) = value else {
        return Err(CodecError::malformed(
            family,
            "",
            path,
            "expected an object of named definitions",
        ));
    };

    entries
        .iter()
        .map(|(name, value)| {
            let entry_path = join_path(path, name);
            decode_entry(name, &entry_path, value).map(|v| (name.clone(), v))
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

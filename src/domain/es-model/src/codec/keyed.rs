// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

use super::{
    CodecError,
    DecodeContext,
    JsonMap,
    Registries,
    VariantFamily,
    VariantRegistry,
    join_path,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Variant discriminated by the single key that wraps its body,
/// as in `{"term": {...}}`
pub trait KeyedVariant: Clone + PartialEq + Sized + 'static {
    const FAMILY: VariantFamily;

    fn kind(&self) -> &str;

    fn encode_body(&self) -> JsonMap;

    fn registry(registries: &Registries) -> &VariantRegistry<Self>;
}

pub fn encode_keyed<V: KeyedVariant>(variant: &V) -> Value {
    let mut out = JsonMap::new();
    out.insert(variant.kind().to_string(), Value::Object(variant.encode_body()));
    Value::Object(out)
}

pub fn decode_keyed<V: KeyedVariant>(
    path: &str,
    value: &Value,
    ctx: &DecodeContext<'_>,
) -> Result<V, CodecError> {
    let Value::Object(wrapper) = value else {
        return Err(CodecError::malformed(
            V::FAMILY,
            "",
            path,
            "expected an object",
        ));
    };

    let mut keys = wrapper.iter();
    let (Some((kind, body)), None) = (keys.next(), keys.next()) else {
        return Err(CodecError::malformed(
            V::FAMILY,
            "",
            path,
            format!("expected exactly one kind key, found {}", wrapper.len()),
        ));
    };

    decode_keyed_body(kind, "", &join_path(path, kind), body, ctx)
}

/// Decodes a body whose kind is already known, used where the wrapping
/// object carries siblings of the kind key (aggregations)
pub fn decode_keyed_body<V: KeyedVariant>(
    kind: &str,
    name: &str,
    path: &str,
    body: &Value,
    ctx: &DecodeContext<'_>,
) -> Result<V, CodecError> {
    let Value::Object(fields) = body else {
        return Err(CodecError::malformed(
            V::FAMILY,
            kind,
            path,
            "body must be an object",
        ));
    };
    V::registry(ctx.registries).decode(kind, name, path, fields, ctx)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

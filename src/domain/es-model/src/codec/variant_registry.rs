// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use super::{CodecError, DecodeContext, FieldReader, JsonMap, VariantFamily};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builds a variant from its body
pub type DecodeFn<V> = fn(FieldReader<'_>, &DecodeContext<'_>) -> Result<V, CodecError>;

/// Builds the default form of a builtin kind, the one that can be referenced
/// by a bare kind string. Receives the kind.
pub type BuiltinFn<V> = fn(&str) -> V;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct RegistryEntry<V> {
    decode: DecodeFn<V>,
    builtin: Option<BuiltinFn<V>>,
}

impl<V> Clone for RegistryEntry<V> {
    fn clone(&self) -> Self {
        Self {
            decode: self.decode,
            builtin: self.builtin,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Discriminant to decoder mapping of one variant family
pub struct VariantRegistry<V> {
    family: VariantFamily,
    entries: HashMap<String, RegistryEntry<V>>,
    implicit_kind: Option<&'static str>,
}

impl<V> Clone for VariantRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            family: self.family,
            entries: self.entries.clone(),
            implicit_kind: self.implicit_kind,
        }
    }
}

impl<V> std::fmt::Debug for VariantRegistry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.entries.keys().collect();
        kinds.sort();
        f.debug_struct("VariantRegistry")
            .field("family", &self.family)
            .field("kinds", &kinds)
            .finish()
    }
}

impl<V> VariantRegistry<V> {
    pub fn new(family: VariantFamily) -> Self {
        Self {
            family,
            entries: HashMap::new(),
            implicit_kind: None,
        }
    }

    /// Kind assumed when a body carries no discriminant. Elasticsearch reports
    /// object fields back without a `type`.
    pub fn with_implicit_kind(mut self, kind: &'static str) -> Self {
        self.implicit_kind = Some(kind);
        self
    }

    pub fn family(&self) -> VariantFamily {
        self.family
    }

    pub fn implicit_kind(&self) -> Option<&'static str> {
        self.implicit_kind
    }

    /// Registers a kind that is always written out with its settings.
    /// Re-registering a kind replaces the previous decoder.
    pub fn register(&mut self, kind: impl Into<String>, decode: DecodeFn<V>) -> &mut Self {
        self.entries.insert(
            kind.into(),
            RegistryEntry {
                decode,
                builtin: None,
            },
        );
        self
    }

    /// Registers a kind that Elasticsearch predefines, so that a bare
    /// `"kind"` string resolves to `builtin(kind)`
    pub fn register_builtin(
        &mut self,
        kind: impl Into<String>,
        decode: DecodeFn<V>,
        builtin: BuiltinFn<V>,
    ) -> &mut Self {
        self.entries.insert(
            kind.into(),
            RegistryEntry {
                decode,
                builtin: Some(builtin),
            },
        );
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn has_builtin(&self, kind: &str) -> bool {
        self.entries.get(kind).is_some_and(|e| e.builtin.is_some())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolves a bare kind string
    pub fn builtin(&self, kind: &str, path: &str) -> Result<V, CodecError> {
        let Some(entry) = self.entries.get(kind) else {
            return Err(CodecError::unknown_kind(self.family, kind, path));
        };
        match entry.builtin {
            Some(builtin) => Ok(builtin(kind)),
            None => Err(CodecError::malformed(
                self.family,
                kind,
                path,
                "kind has no predefined form and must be given with its settings",
            )),
        }
    }

    pub fn decode(
        &self,
        kind: &str,
        name: &str,
        path: &str,
        fields: &JsonMap,
        ctx: &DecodeContext<'_>,
    ) -> Result<V, CodecError> {
        let Some(entry) = self.entries.get(kind) else {
            return Err(CodecError::unknown_kind(self.family, kind, path));
        };
        let mut reader = FieldReader::new(self.family, kind, name, path, fields);
        if self.family.is_type_tagged() {
            reader.skip("type");
        }
        (entry.decode)(reader, ctx)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

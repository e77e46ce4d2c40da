// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

use super::*;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `object` or `nested` field holding sub-properties
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMapping {
    pub kind: ObjectKind,
    pub properties: NamedTable<Mapping>,
    pub dynamic: Option<DynamicMapping>,
    pub enabled: Option<bool>,
    /// `nested` only
    pub include_in_parent: Option<bool>,
    /// `nested` only
    pub include_in_root: Option<bool>,
    pub extra: JsonMap,
}

impl ObjectMapping {
    pub fn new(kind: ObjectKind, properties: NamedTable<Mapping>) -> Self {
        Self {
            kind,
            properties,
            dynamic: None,
            enabled: None,
            include_in_parent: None,
            include_in_root: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_dynamic(mut self, dynamic: DynamicMapping) -> Self {
        self.dynamic = Some(dynamic);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        let kind = reader
            .kind()
            .parse::<ObjectKind>()
            .map_err(|_| CodecError::unknown_kind(reader.family(), reader.kind(), reader.path()))?;

        Ok(Mapping::Object(Self {
            kind,
            properties: read_properties(&mut reader, "properties", ctx)?,
            dynamic: reader.optional("dynamic")?,
            enabled: reader.optional("enabled")?,
            include_in_parent: reader.optional("include_in_parent")?,
            include_in_root: reader.optional("include_in_root")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "dynamic", &self.dynamic);
        put(out, "enabled", &self.enabled);
        put(out, "include_in_parent", &self.include_in_parent);
        put(out, "include_in_root", &self.include_in_root);
        put_properties(out, "properties", &self.properties);
        put_extra(out, &self.extra);
    }
}

impl From<ObjectMapping> for Mapping {
    fn from(value: ObjectMapping) -> Self {
        Self::Object(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Whole JSON object indexed as a single field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedMapping {
    pub depth_limit: Option<u32>,
    pub ignore_above: Option<u32>,
    pub index: Option<bool>,
    pub null_value: Option<String>,
    pub extra: JsonMap,
}

impl FlattenedMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Flattened(Self {
            depth_limit: reader.optional("depth_limit")?,
            ignore_above: reader.optional("ignore_above")?,
            index: reader.optional("index")?,
            null_value: reader.optional("null_value")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "depth_limit", &self.depth_limit);
        put(out, "ignore_above", &self.ignore_above);
        put(out, "index", &self.index);
        put(out, "null_value", &self.null_value);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parent/child relations within one index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinMapping {
    /// Parent name to its children, in declaration order
    pub relations: Vec<(String, Vec<String>)>,
    pub eager_global_ordinals: Option<bool>,
    pub extra: JsonMap,
}

impl JoinMapping {
    pub fn with_relation(
        mut self,
        parent: impl Into<String>,
        children: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.relations
            .push((parent.into(), children.into_iter().map(Into::into).collect()));
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        let relations = match reader.raw("relations") {
            None => Vec::new(),
            Some(Value::Object(entries)) => {
                let mut relations = Vec::with_capacity(entries.len());
                for (parent, children) in entries {
                    let children = match children {
                        Value::String(child) => vec![child.clone()],
                        Value::Array(items) => items
                            .iter()
                            .map(|item| {
                                item.as_str().map(str::to_string).ok_or_else(|| {
                                    reader.malformed("relations", "child names must be strings")
                                })
                            })
                            .collect::<Result<_, _>>()?,
                        _ => {
                            return Err(reader.malformed(
                                "relations",
                                format!("children of '{parent}' must be a string or a list"),
                            ));
                        }
                    };
                    relations.push((parent.clone(), children));
                }
                relations
            }
            Some(_) => return Err(reader.malformed("relations", "expected an object")),
        };

        Ok(Mapping::Join(Self {
            relations,
            eager_global_ordinals: reader.optional("eager_global_ordinals")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        if !self.relations.is_empty() {
            let relations: JsonMap = self
                .relations
                .iter()
                .map(|(parent, children)| {
                    let children = match children.as_slice() {
                        [single] => Value::String(single.clone()),
                        many => Value::from(many.to_vec()),
                    };
                    (parent.clone(), children)
                })
                .collect();
            out.insert("relations".to_string(), Value::Object(relations));
        }
        put(out, "eager_global_ordinals", &self.eager_global_ordinals);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Alternate name for another field
#[derive(Debug, Clone, PartialEq)]
pub struct AliasMapping {
    pub path: String,
    pub extra: JsonMap,
}

impl AliasMapping {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Alias(Self {
            path: reader.required("path")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_value(out, "path", self.path.as_str());
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Field storing queries to match incoming documents against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercolatorMapping {
    pub extra: JsonMap,
}

impl PercolatorMapping {
    pub(crate) fn decode(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Percolator(Self {
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

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
use crate::{AnalysisComponent, AnalysisItem, Analyzer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Field mapping, discriminated by its `type`
#[derive(Debug, Clone, PartialEq)]
pub enum Mapping {
    Text(TextMapping),
    MatchOnlyText(MatchOnlyTextMapping),
    Keyword(KeywordMapping),
    Numeric(NumericMapping),
    Date(DateMapping),
    Range(RangeMapping),
    Boolean(BooleanMapping),
    Binary(BinaryMapping),
    Ip(IpMapping),
    GeoPoint(GeoPointMapping),
    GeoShape(GeoShapeMapping),
    Object(ObjectMapping),
    Flattened(FlattenedMapping),
    Join(JoinMapping),
    Alias(AliasMapping),
    TokenCount(TokenCountMapping),
    Percolator(PercolatorMapping),
    Completion(CompletionMapping),
    Extension(ExtensionVariant),
}

impl Mapping {
    pub fn text() -> Self {
        Self::Text(TextMapping::default())
    }

    pub fn keyword() -> Self {
        Self::Keyword(KeywordMapping::default())
    }

    pub fn numeric(kind: NumericType) -> Self {
        Self::Numeric(NumericMapping::new(kind))
    }

    pub fn date() -> Self {
        Self::Date(DateMapping::new(DateType::Date))
    }

    pub fn boolean() -> Self {
        Self::Boolean(BooleanMapping::default())
    }

    pub fn object(properties: NamedTable<Mapping>) -> Self {
        Self::Object(ObjectMapping::new(ObjectKind::Object, properties))
    }

    pub fn nested(properties: NamedTable<Mapping>) -> Self {
        Self::Object(ObjectMapping::new(ObjectKind::Nested, properties))
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        for kind in <NumericType as strum::IntoEnumIterator>::iter() {
            registry.register(<&'static str>::from(kind), NumericMapping::decode);
        }
        for kind in <DateType as strum::IntoEnumIterator>::iter() {
            registry.register(<&'static str>::from(kind), DateMapping::decode);
        }
        for kind in <RangeType as strum::IntoEnumIterator>::iter() {
            registry.register(<&'static str>::from(kind), RangeMapping::decode);
        }
        for kind in <ObjectKind as strum::IntoEnumIterator>::iter() {
            registry.register(<&'static str>::from(kind), ObjectMapping::decode);
        }

        registry
            .register("text", TextMapping::decode)
            .register("match_only_text", MatchOnlyTextMapping::decode)
            .register("keyword", KeywordMapping::decode)
            .register("boolean", BooleanMapping::decode)
            .register("binary", BinaryMapping::decode)
            .register("ip", IpMapping::decode)
            .register("geo_point", GeoPointMapping::decode)
            .register("geo_shape", GeoShapeMapping::decode)
            .register("flattened", FlattenedMapping::decode)
            .register("join", JoinMapping::decode)
            .register("alias", AliasMapping::decode)
            .register("token_count", TokenCountMapping::decode)
            .register("percolator", PercolatorMapping::decode)
            .register("completion", CompletionMapping::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }

    /// Encodes the mapping object. Plain objects with properties are written
    /// without `type`, the way Elasticsearch reports them.
    pub fn encode(&self) -> Value {
        let mut out = JsonMap::new();
        let implicit = matches!(
            self,
            Self::Object(v) if v.kind == ObjectKind::Object && !v.properties.is_empty()
        );
        if !implicit {
            out.insert("type".to_string(), Value::String(self.kind().to_string()));
        }
        self.encode_fields(&mut out);
        Value::Object(out)
    }

    pub fn decode(
        name: &str,
        path: &str,
        value: &Value,
        ctx: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        decode_tagged(name, path, value, ctx)
    }

    /// Analysis components this mapping references, including those of
    /// multi-fields and sub-properties
    pub fn analysis_dependencies(&self) -> Vec<AnalysisItem> {
        let mut deps = Vec::new();
        self.collect_dependencies(&mut deps);
        deps
    }

    fn collect_dependencies(&self, deps: &mut Vec<AnalysisItem>) {
        match self {
            Self::Text(v) => {
                push_analyzers(
                    deps,
                    &[&v.analyzer, &v.search_analyzer, &v.search_quote_analyzer],
                );
                collect_table_dependencies(&v.fields, deps);
            }
            Self::MatchOnlyText(v) => collect_table_dependencies(&v.fields, deps),
            Self::Keyword(v) => {
                deps.extend(v.normalizer.iter().cloned().map(AnalysisItem::Normalizer));
                collect_table_dependencies(&v.fields, deps);
            }
            Self::TokenCount(v) => push_analyzers(deps, &[&v.analyzer]),
            Self::Completion(v) => push_analyzers(deps, &[&v.analyzer, &v.search_analyzer]),
            Self::Object(v) => collect_table_dependencies(&v.properties, deps),
            Self::Numeric(_)
            | Self::Date(_)
            | Self::Range(_)
            | Self::Boolean(_)
            | Self::Binary(_)
            | Self::Ip(_)
            | Self::GeoPoint(_)
            | Self::GeoShape(_)
            | Self::Flattened(_)
            | Self::Join(_)
            | Self::Alias(_)
            | Self::Percolator(_)
            | Self::Extension(_) => {}
        }
    }
}

fn push_analyzers(deps: &mut Vec<AnalysisItem>, analyzers: &[&Option<Analyzer>]) {
    deps.extend(
        analyzers
            .iter()
            .filter_map(|a| a.as_ref())
            .cloned()
            .map(AnalysisItem::Analyzer),
    );
}

fn collect_table_dependencies(table: &NamedTable<Mapping>, deps: &mut Vec<AnalysisItem>) {
    for mapping in table.values() {
        mapping.collect_dependencies(deps);
    }
}

impl TaggedVariant for Mapping {
    const FAMILY: VariantFamily = VariantFamily::Mapping;

    fn kind(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::MatchOnlyText(_) => "match_only_text",
            Self::Keyword(_) => "keyword",
            Self::Numeric(v) => <&'static str>::from(v.kind),
            Self::Date(v) => <&'static str>::from(v.kind),
            Self::Range(v) => <&'static str>::from(v.kind),
            Self::Boolean(_) => "boolean",
            Self::Binary(_) => "binary",
            Self::Ip(_) => "ip",
            Self::GeoPoint(_) => "geo_point",
            Self::GeoShape(_) => "geo_shape",
            Self::Object(v) => <&'static str>::from(v.kind),
            Self::Flattened(_) => "flattened",
            Self::Join(_) => "join",
            Self::Alias(_) => "alias",
            Self::TokenCount(_) => "token_count",
            Self::Percolator(_) => "percolator",
            Self::Completion(_) => "completion",
            Self::Extension(v) => &v.kind,
        }
    }

    fn encode_fields(&self, out: &mut JsonMap) {
        match self {
            Self::Text(v) => v.encode_fields(out),
            Self::MatchOnlyText(v) => v.encode_fields(out),
            Self::Keyword(v) => v.encode_fields(out),
            Self::Numeric(v) => v.encode_fields(out),
            Self::Date(v) => v.encode_fields(out),
            Self::Range(v) => v.encode_fields(out),
            Self::Boolean(v) => v.encode_fields(out),
            Self::Binary(v) => v.encode_fields(out),
            Self::Ip(v) => v.encode_fields(out),
            Self::GeoPoint(v) => v.encode_fields(out),
            Self::GeoShape(v) => v.encode_fields(out),
            Self::Object(v) => v.encode_fields(out),
            Self::Flattened(v) => v.encode_fields(out),
            Self::Join(v) => v.encode_fields(out),
            Self::Alias(v) => v.encode_fields(out),
            Self::TokenCount(v) => v.encode_fields(out),
            Self::Percolator(v) => v.encode_fields(out),
            Self::Completion(v) => v.encode_fields(out),
            Self::Extension(v) => v.encode_fields(out),
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.mappings
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Encodes a `properties` or multi-field `fields` object
pub fn encode_properties(properties: &NamedTable<Mapping>) -> Value {
    encode_named(properties.iter(), Mapping::encode)
}

pub fn decode_properties(
    path: &str,
    value: &Value,
    ctx: &DecodeContext<'_>,
) -> Result<NamedTable<Mapping>, CodecError> {
    decode_named(VariantFamily::Mapping, path, value, |name, entry_path, value| {
        Mapping::decode(name, entry_path, value, ctx)
    })
    .map(NamedTable::from_iter)
}

/// Reads a nested `properties`/`fields` table of a mapping body
pub(crate) fn read_properties(
    reader: &mut FieldReader<'_>,
    key: &str,
    ctx: &DecodeContext<'_>,
) -> Result<NamedTable<Mapping>, CodecError> {
    match reader.raw(key) {
        None => Ok(NamedTable::new()),
        Some(value) => decode_properties(&reader.field_path(key), value, ctx),
    }
}

/// Reads an analysis component referenced by name
pub(crate) fn read_reference<C: AnalysisComponent>(
    reader: &mut FieldReader<'_>,
    key: &str,
    ctx: &DecodeContext<'_>,
) -> Result<Option<C>, CodecError> {
    let name: Option<String> = reader.optional(key)?;
    let path = reader.field_path(key);
    name.map(|name| ctx.resolve(&name, &path)).transpose()
}

pub(crate) fn put_reference<C: AnalysisComponent>(out: &mut JsonMap, key: &str, value: Option<&C>) {
    if let Some(value) = value {
        put_value(out, key, value.name());
    }
}

pub(crate) fn put_properties(out: &mut JsonMap, key: &str, properties: &NamedTable<Mapping>) {
    if !properties.is_empty() {
        out.insert(key.to_string(), encode_properties(properties));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

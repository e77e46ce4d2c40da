// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{AnalysisComponent, AnalysisContext, AnalysisItem, CharFilter, TokenFilter};
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Analyzer counterpart for `keyword` fields, produces a single token
#[derive(Debug, Clone, PartialEq)]
pub enum Normalizer {
    Lowercase(LowercaseNormalizer),
    Custom(CustomNormalizer),
    Extension(ExtensionVariant),
}

impl Normalizer {
    pub fn lowercase() -> Self {
        Self::Lowercase(LowercaseNormalizer::new("lowercase"))
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        registry
            .register_builtin("lowercase", LowercaseNormalizer::decode, |kind| {
                Self::Lowercase(LowercaseNormalizer::new(kind))
            })
            .register("custom", CustomNormalizer::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }
}

impl TaggedVariant for Normalizer {
    const FAMILY: VariantFamily = VariantFamily::Normalizer;

    fn kind(&self) -> &str {
        match self {
            Self::Lowercase(_) => "lowercase",
            Self::Custom(_) => "custom",
            Self::Extension(v) => &v.kind,
        }
    }

    fn is_builtin_default(&self) -> bool {
        match self {
            Self::Lowercase(v) => v.name == "lowercase" && v.extra.is_empty(),
            Self::Custom(_) | Self::Extension(_) => false,
        }
    }

    fn encode_fields(&self, out: &mut JsonMap) {
        match self {
            Self::Lowercase(v) => put_extra(out, &v.extra),
            Self::Custom(v) => {
                put_list(
                    out,
                    "char_filter",
                    &v.char_filter.iter().map(CharFilter::name).collect::<Vec<_>>(),
                );
                put_list(
                    out,
                    "filter",
                    &v.filter.iter().map(TokenFilter::name).collect::<Vec<_>>(),
                );
                put_extra(out, &v.extra);
            }
            Self::Extension(v) => v.encode_fields(out),
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.normalizers
    }
}

impl AnalysisComponent for Normalizer {
    fn name(&self) -> &str {
        match self {
            Self::Lowercase(v) => &v.name,
            Self::Custom(v) => &v.name,
            Self::Extension(v) => &v.name,
        }
    }

    fn dependencies(&self) -> Vec<AnalysisItem> {
        let Self::Custom(v) = self else {
            return Vec::new();
        };

        v.char_filter
            .iter()
            .cloned()
            .map(AnalysisItem::CharFilter)
            .chain(v.filter.iter().cloned().map(AnalysisItem::TokenFilter))
            .collect()
    }

    fn table(ctx: &AnalysisContext) -> &NamedTable<Self> {
        ctx.normalizers()
    }

    fn table_mut(ctx: &mut AnalysisContext) -> &mut NamedTable<Self> {
        ctx.normalizers_mut()
    }

    fn into_item(self) -> AnalysisItem {
        AnalysisItem::Normalizer(self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct LowercaseNormalizer {
    pub name: String,
    pub extra: JsonMap,
}

impl LowercaseNormalizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: JsonMap::new(),
        }
    }

    fn decode(reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Normalizer, CodecError> {
        Ok(Normalizer::Lowercase(Self {
            name: reader.name().to_string(),
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct CustomNormalizer {
    pub name: String,
    pub char_filter: Vec<CharFilter>,
    pub filter: Vec<TokenFilter>,
    pub extra: JsonMap,
}

impl CustomNormalizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            char_filter: Vec::new(),
            filter: Vec::new(),
            extra: JsonMap::new(),
        }
    }

    pub fn with_filter(mut self, filter: TokenFilter) -> Self {
        self.filter.push(filter);
        self
    }

    pub fn with_char_filter(mut self, char_filter: CharFilter) -> Self {
        self.char_filter.push(char_filter);
        self
    }

    fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Normalizer, CodecError> {
        let path = reader.path();
        let char_filter = reader.string_or_list("char_filter")?;
        let filter = reader.string_or_list("filter")?;

        Ok(Normalizer::Custom(Self {
            name: reader.name().to_string(),
            char_filter: ctx.resolve_all(&char_filter, path)?,
            filter: ctx.resolve_all(&filter, path)?,
            extra: reader.into_extra(),
        }))
    }
}

impl From<CustomNormalizer> for Normalizer {
    fn from(value: CustomNormalizer) -> Self {
        Self::Custom(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

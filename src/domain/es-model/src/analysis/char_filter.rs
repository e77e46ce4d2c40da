// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{AnalysisComponent, AnalysisContext, AnalysisItem, WordList};
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub enum CharFilter {
    HtmlStrip(HtmlStripCharFilter),
    Mapping(MappingCharFilter),
    PatternReplace(PatternReplaceCharFilter),
    Extension(ExtensionVariant),
}

impl CharFilter {
    pub fn html_strip() -> Self {
        Self::HtmlStrip(HtmlStripCharFilter::new("html_strip"))
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        registry
            .register_builtin("html_strip", HtmlStripCharFilter::decode, |kind| {
                Self::HtmlStrip(HtmlStripCharFilter::new(kind))
            })
            .register("mapping", MappingCharFilter::decode)
            .register("pattern_replace", PatternReplaceCharFilter::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }
}

impl TaggedVariant for CharFilter {
    const FAMILY: VariantFamily = VariantFamily::CharFilter;

    fn kind(&self) -> &str {
        match self {
            Self::HtmlStrip(_) => "html_strip",
            Self::Mapping(_) => "mapping",
            Self::PatternReplace(_) => "pattern_replace",
            Self::Extension(v) => &v.kind,
        }
    }

    fn is_builtin_default(&self) -> bool {
        match self {
            Self::HtmlStrip(v) => *v == HtmlStripCharFilter::new("html_strip"),
            _ => false,
        }
    }

    fn encode_fields(&self, out: &mut JsonMap) {
        match self {
            Self::HtmlStrip(v) => {
                put_list(out, "escaped_tags", &v.escaped_tags);
                put_extra(out, &v.extra);
            }
            Self::Mapping(v) => {
                v.mappings.write(out, "mappings", "mappings_path");
                put_extra(out, &v.extra);
            }
            Self::PatternReplace(v) => {
                put_value(out, "pattern", v.pattern.as_str());
                put(out, "replacement", &v.replacement);
                put(out, "flags", &v.flags);
                put_extra(out, &v.extra);
            }
            Self::Extension(v) => v.encode_fields(out),
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.char_filters
    }
}

impl AnalysisComponent for CharFilter {
    fn name(&self) -> &str {
        match self {
            Self::HtmlStrip(v) => &v.name,
            Self::Mapping(v) => &v.name,
            Self::PatternReplace(v) => &v.name,
            Self::Extension(v) => &v.name,
        }
    }

    fn table(ctx: &AnalysisContext) -> &NamedTable<Self> {
        ctx.char_filters()
    }

    fn table_mut(ctx: &mut AnalysisContext) -> &mut NamedTable<Self> {
        ctx.char_filters_mut()
    }

    fn into_item(self) -> AnalysisItem {
        AnalysisItem::CharFilter(self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlStripCharFilter {
    pub name: String,
    /// Tags that are left in place
    pub escaped_tags: Vec<String>,
    pub extra: JsonMap,
}

impl HtmlStripCharFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            escaped_tags: Vec::new(),
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<CharFilter, CodecError> {
        Ok(CharFilter::HtmlStrip(Self {
            name: reader.name().to_string(),
            escaped_tags: reader.list("escaped_tags")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Replaces character sequences, rules are written as `from => to`
#[derive(Debug, Clone, PartialEq)]
pub struct MappingCharFilter {
    pub name: String,
    pub mappings: WordList,
    pub extra: JsonMap,
}

impl MappingCharFilter {
    pub fn new(name: impl Into<String>, mappings: WordList) -> Self {
        Self {
            name: name.into(),
            mappings,
            extra: JsonMap::new(),
        }
    }

    pub fn from_pairs<'a>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let rules = pairs
            .into_iter()
            .map(|(from, to)| format!("{from} => {to}"))
            .collect();
        Self::new(name, WordList::Inline(rules))
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<CharFilter, CodecError> {
        Ok(CharFilter::Mapping(Self {
            name: reader.name().to_string(),
            mappings: WordList::read_required(&mut reader, "mappings", "mappings_path")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct PatternReplaceCharFilter {
    pub name: String,
    pub pattern: String,
    /// Empty string when absent, may reference capture groups as `$1`
    pub replacement: Option<String>,
    pub flags: Option<String>,
    pub extra: JsonMap,
}

impl PatternReplaceCharFilter {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: None,
            flags: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<CharFilter, CodecError> {
        Ok(CharFilter::PatternReplace(Self {
            name: reader.name().to_string(),
            pattern: reader.required("pattern")?,
            replacement: reader.optional("replacement")?,
            flags: reader.optional("flags")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

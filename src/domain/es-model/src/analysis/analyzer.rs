// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    AnalysisComponent,
    AnalysisContext,
    AnalysisItem,
    CharFilter,
    Stopwords,
    TokenFilter,
    Tokenizer,
};
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Language analyzers Elasticsearch ships with
pub const LANGUAGE_ANALYZERS: &[&str] = &[
    "arabic",
    "armenian",
    "basque",
    "bengali",
    "brazilian",
    "bulgarian",
    "catalan",
    "cjk",
    "czech",
    "danish",
    "dutch",
    "english",
    "estonian",
    "finnish",
    "french",
    "galician",
    "german",
    "greek",
    "hindi",
    "hungarian",
    "indonesian",
    "irish",
    "italian",
    "latvian",
    "lithuanian",
    "norwegian",
    "persian",
    "portuguese",
    "romanian",
    "russian",
    "serbian",
    "sorani",
    "spanish",
    "swedish",
    "thai",
    "turkish",
];

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub enum Analyzer {
    Standard(StandardAnalyzer),
    Basic(BasicAnalyzer),
    Stop(StopAnalyzer),
    Pattern(PatternAnalyzer),
    Fingerprint(FingerprintAnalyzer),
    Language(LanguageAnalyzer),
    Custom(CustomAnalyzer),
    Extension(ExtensionVariant),
}

impl Analyzer {
    /// The predefined `standard` analyzer
    pub fn standard() -> Self {
        Self::Standard(StandardAnalyzer::new("standard"))
    }

    pub fn builtin(kind: BasicAnalyzerKind) -> Self {
        let name: &'static str = kind.into();
        Self::Basic(BasicAnalyzer::new(kind, name))
    }

    pub fn language(language: &str) -> Self {
        Self::Language(LanguageAnalyzer::new(language, language))
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        registry
            .register_builtin("standard", StandardAnalyzer::decode, |kind| {
                Self::Standard(StandardAnalyzer::new(kind))
            })
            .register_builtin("stop", StopAnalyzer::decode, |kind| {
                Self::Stop(StopAnalyzer::new(kind))
            })
            .register_builtin("pattern", PatternAnalyzer::decode, |kind| {
                Self::Pattern(PatternAnalyzer::new(kind))
            })
            .register_builtin("fingerprint", FingerprintAnalyzer::decode, |kind| {
                Self::Fingerprint(FingerprintAnalyzer::new(kind))
            })
            .register("custom", CustomAnalyzer::decode);

        for kind in <BasicAnalyzerKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(<&'static str>::from(kind), BasicAnalyzer::decode, |kind| {
                match kind.parse::<BasicAnalyzerKind>() {
                    Ok(k) => Self::builtin(k),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                }
            });
        }

        for language in LANGUAGE_ANALYZERS {
            registry.register_builtin(*language, LanguageAnalyzer::decode, Self::language);
        }
    }

    /// Decoder for plugin kinds that keeps the body verbatim
    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }
}

impl TaggedVariant for Analyzer {
    const FAMILY: VariantFamily = VariantFamily::Analyzer;

    fn kind(&self) -> &str {
        match self {
            Self::Standard(_) => "standard",
            Self::Basic(v) => <&'static str>::from(v.kind),
            Self::Stop(_) => "stop",
            Self::Pattern(_) => "pattern",
            Self::Fingerprint(_) => "fingerprint",
            Self::Language(v) => &v.language,
            Self::Custom(_) => "custom",
            Self::Extension(v) => &v.kind,
        }
    }

    fn is_builtin_default(&self) -> bool {
        let plain = match self {
            Self::Standard(v) => {
                v.max_token_length.is_none() && v.stopwords.is_none() && v.extra.is_empty()
            }
            Self::Basic(v) => v.extra.is_empty(),
            Self::Stop(v) => v.stopwords.is_none() && v.extra.is_empty(),
            Self::Pattern(v) => *v == PatternAnalyzer::new(&v.name),
            Self::Fingerprint(v) => *v == FingerprintAnalyzer::new(&v.name),
            Self::Language(v) => {
                v.stopwords.is_none() && v.stem_exclusion.is_empty() && v.extra.is_empty()
            }
            Self::Custom(_) | Self::Extension(_) => false,
        };
        plain && self.name() == self.kind()
    }

    fn encode_fields(&self, out: &mut JsonMap) {
        match self {
            Self::Standard(v) => {
                put(out, "max_token_length", &v.max_token_length);
                Stopwords::write(v.stopwords.as_ref(), out);
                put_extra(out, &v.extra);
            }
            Self::Basic(v) => put_extra(out, &v.extra),
            Self::Stop(v) => {
                Stopwords::write(v.stopwords.as_ref(), out);
                put_extra(out, &v.extra);
            }
            Self::Pattern(v) => {
                put(out, "pattern", &v.pattern);
                put(out, "flags", &v.flags);
                put(out, "lowercase", &v.lowercase);
                Stopwords::write(v.stopwords.as_ref(), out);
                put_extra(out, &v.extra);
            }
            Self::Fingerprint(v) => {
                put(out, "separator", &v.separator);
                put(out, "max_output_size", &v.max_output_size);
                Stopwords::write(v.stopwords.as_ref(), out);
                put_extra(out, &v.extra);
            }
            Self::Language(v) => {
                Stopwords::write(v.stopwords.as_ref(), out);
                put_list(out, "stem_exclusion", &v.stem_exclusion);
                put_extra(out, &v.extra);
            }
            Self::Custom(v) => {
                put_value(out, "tokenizer", v.tokenizer.name());
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
                put(out, "position_increment_gap", &v.position_increment_gap);
                put_extra(out, &v.extra);
            }
            Self::Extension(v) => v.encode_fields(out),
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.analyzers
    }
}

impl AnalysisComponent for Analyzer {
    fn name(&self) -> &str {
        match self {
            Self::Standard(v) => &v.name,
            Self::Basic(v) => &v.name,
            Self::Stop(v) => &v.name,
            Self::Pattern(v) => &v.name,
            Self::Fingerprint(v) => &v.name,
            Self::Language(v) => &v.name,
            Self::Custom(v) => &v.name,
            Self::Extension(v) => &v.name,
        }
    }

    fn dependencies(&self) -> Vec<AnalysisItem> {
        let Self::Custom(v) = self else {
            return Vec::new();
        };

        let mut deps = vec![AnalysisItem::Tokenizer(v.tokenizer.clone())];
        deps.extend(v.char_filter.iter().cloned().map(AnalysisItem::CharFilter));
        deps.extend(v.filter.iter().cloned().map(AnalysisItem::TokenFilter));
        deps
    }

    fn table(ctx: &AnalysisContext) -> &NamedTable<Self> {
        ctx.analyzers()
    }

    fn table_mut(ctx: &mut AnalysisContext) -> &mut NamedTable<Self> {
        ctx.analyzers_mut()
    }

    fn into_item(self) -> AnalysisItem {
        AnalysisItem::Analyzer(self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct StandardAnalyzer {
    pub name: String,
    pub max_token_length: Option<u32>,
    pub stopwords: Option<Stopwords>,
    pub extra: JsonMap,
}

impl StandardAnalyzer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_token_length: None,
            stopwords: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Analyzer, CodecError> {
        Ok(Analyzer::Standard(Self {
            name: reader.name().to_string(),
            max_token_length: reader.optional("max_token_length")?,
            stopwords: Stopwords::read(&mut reader)?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum BasicAnalyzerKind {
    Simple,
    Whitespace,
    Keyword,
}

/// Analyzer kind without settings
#[derive(Debug, Clone, PartialEq)]
pub struct BasicAnalyzer {
    pub kind: BasicAnalyzerKind,
    pub name: String,
    pub extra: JsonMap,
}

impl BasicAnalyzer {
    pub fn new(kind: BasicAnalyzerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            extra: JsonMap::new(),
        }
    }

    fn decode(reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Analyzer, CodecError> {
        let kind = reader
            .kind()
            .parse::<BasicAnalyzerKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(Analyzer::Basic(Self {
            kind,
            name: reader.name().to_string(),
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct StopAnalyzer {
    pub name: String,
    pub stopwords: Option<Stopwords>,
    pub extra: JsonMap,
}

impl StopAnalyzer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stopwords: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Analyzer, CodecError> {
        Ok(Analyzer::Stop(Self {
            name: reader.name().to_string(),
            stopwords: Stopwords::read(&mut reader)?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct PatternAnalyzer {
    pub name: String,
    /// Java regular expression, `\W+` when absent
    pub pattern: Option<String>,
    /// Java regular expression flags, pipe separated
    pub flags: Option<String>,
    pub lowercase: Option<bool>,
    pub stopwords: Option<Stopwords>,
    pub extra: JsonMap,
}

impl PatternAnalyzer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            flags: None,
            lowercase: None,
            stopwords: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Analyzer, CodecError> {
        Ok(Analyzer::Pattern(Self {
            name: reader.name().to_string(),
            pattern: reader.optional("pattern")?,
            flags: reader.optional("flags")?,
            lowercase: reader.optional("lowercase")?,
            stopwords: Stopwords::read(&mut reader)?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintAnalyzer {
    pub name: String,
    pub separator: Option<String>,
    pub max_output_size: Option<u32>,
    pub stopwords: Option<Stopwords>,
    pub extra: JsonMap,
}

impl FingerprintAnalyzer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            separator: None,
            max_output_size: None,
            stopwords: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Analyzer, CodecError> {
        Ok(Analyzer::Fingerprint(Self {
            name: reader.name().to_string(),
            separator: reader.optional("separator")?,
            max_output_size: reader.optional("max_output_size")?,
            stopwords: Stopwords::read(&mut reader)?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One of the predefined language analyzers, the kind is the language
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageAnalyzer {
    pub language: String,
    pub name: String,
    pub stopwords: Option<Stopwords>,
    pub stem_exclusion: Vec<String>,
    pub extra: JsonMap,
}

impl LanguageAnalyzer {
    pub fn new(language: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            name: name.into(),
            stopwords: None,
            stem_exclusion: Vec::new(),
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Analyzer, CodecError> {
        Ok(Analyzer::Language(Self {
            language: reader.kind().to_string(),
            name: reader.name().to_string(),
            stopwords: Stopwords::read(&mut reader)?,
            stem_exclusion: reader.list("stem_exclusion")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Analyzer assembled from a tokenizer and chains of filters, all of which
/// are written by name and defined in the same `analysis` block
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAnalyzer {
    pub name: String,
    pub tokenizer: Tokenizer,
    pub char_filter: Vec<CharFilter>,
    pub filter: Vec<TokenFilter>,
    pub position_increment_gap: Option<u32>,
    pub extra: JsonMap,
}

impl CustomAnalyzer {
    pub fn new(name: impl Into<String>, tokenizer: Tokenizer) -> Self {
        Self {
            name: name.into(),
            tokenizer,
            char_filter: Vec::new(),
            filter: Vec::new(),
            position_increment_gap: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_char_filter(mut self, char_filter: CharFilter) -> Self {
        self.char_filter.push(char_filter);
        self
    }

    pub fn with_filter(mut self, filter: TokenFilter) -> Self {
        self.filter.push(filter);
        self
    }

    fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Analyzer, CodecError> {
        let path = reader.path();

        let tokenizer: String = reader.required("tokenizer")?;
        let char_filter = reader.string_or_list("char_filter")?;
        let filter = reader.string_or_list("filter")?;

        Ok(Analyzer::Custom(Self {
            name: reader.name().to_string(),
            tokenizer: ctx.resolve(&tokenizer, path)?,
            char_filter: ctx.resolve_all(&char_filter, path)?,
            filter: ctx.resolve_all(&filter, path)?,
            position_increment_gap: reader.optional("position_increment_gap")?,
            extra: reader.into_extra(),
        }))
    }
}

impl From<CustomAnalyzer> for Analyzer {
    fn from(value: CustomAnalyzer) -> Self {
        Self::Custom(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

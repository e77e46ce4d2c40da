// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{AnalysisComponent, AnalysisContext, AnalysisItem, NGramKind, Stopwords, WordList};
use crate::Script;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub enum TokenFilter {
    Basic(BasicTokenFilter),
    Lowercase(LowercaseTokenFilter),
    AsciiFolding(AsciiFoldingTokenFilter),
    Stop(StopTokenFilter),
    Stemmer(StemmerTokenFilter),
    Synonym(SynonymTokenFilter),
    NGram(NGramTokenFilter),
    Length(LengthTokenFilter),
    Truncate(TruncateTokenFilter),
    Shingle(ShingleTokenFilter),
    Unique(UniqueTokenFilter),
    WordDelimiter(WordDelimiterTokenFilter),
    Keep(KeepTokenFilter),
    PatternReplace(PatternReplaceTokenFilter),
    Condition(ConditionTokenFilter),
    Multiplexer(MultiplexerTokenFilter),
    Extension(ExtensionVariant),
}

impl TokenFilter {
    pub fn builtin(kind: BasicTokenFilterKind) -> Self {
        Self::Basic(BasicTokenFilter::new(kind, <&'static str>::from(kind)))
    }

    pub fn lowercase() -> Self {
        Self::Lowercase(LowercaseTokenFilter::new("lowercase"))
    }

    pub fn asciifolding() -> Self {
        Self::AsciiFolding(AsciiFoldingTokenFilter::new("asciifolding"))
    }

    pub fn stemmer(language: StemmerLanguage) -> Self {
        Self::Stemmer(StemmerTokenFilter::for_language(language))
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        for kind in <BasicTokenFilterKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(<&'static str>::from(kind), BasicTokenFilter::decode, |kind| {
                match kind.parse::<BasicTokenFilterKind>() {
                    Ok(k) => Self::builtin(k),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                }
            });
        }

        for kind in <NGramKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(<&'static str>::from(kind), NGramTokenFilter::decode, |kind| {
                match kind.parse::<NGramKind>() {
                    Ok(k) => Self::NGram(NGramTokenFilter::new(k, kind)),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                }
            });
        }

        for kind in <SynonymKind as strum::IntoEnumIterator>::iter() {
            registry.register(<&'static str>::from(kind), SynonymTokenFilter::decode);
        }

        for kind in <WordDelimiterKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(
                <&'static str>::from(kind),
                WordDelimiterTokenFilter::decode,
                |kind| match kind.parse::<WordDelimiterKind>() {
                    Ok(k) => Self::WordDelimiter(WordDelimiterTokenFilter::new(k, kind)),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                },
            );
        }

        registry
            .register_builtin("lowercase", LowercaseTokenFilter::decode, |kind| {
                Self::Lowercase(LowercaseTokenFilter::new(kind))
            })
            .register_builtin("asciifolding", AsciiFoldingTokenFilter::decode, |kind| {
                Self::AsciiFolding(AsciiFoldingTokenFilter::new(kind))
            })
            .register_builtin("stop", StopTokenFilter::decode, |kind| {
                Self::Stop(StopTokenFilter::new(kind))
            })
            .register_builtin("stemmer", StemmerTokenFilter::decode, |kind| {
                Self::Stemmer(StemmerTokenFilter::new(kind, None))
            })
            .register_builtin("length", LengthTokenFilter::decode, |kind| {
                Self::Length(LengthTokenFilter::new(kind))
            })
            .register_builtin("truncate", TruncateTokenFilter::decode, |kind| {
                Self::Truncate(TruncateTokenFilter::new(kind))
            })
            .register_builtin("shingle", ShingleTokenFilter::decode, |kind| {
                Self::Shingle(ShingleTokenFilter::new(kind))
            })
            .register_builtin("unique", UniqueTokenFilter::decode, |kind| {
                Self::Unique(UniqueTokenFilter::new(kind))
            })
            .register("keep", KeepTokenFilter::decode)
            .register("pattern_replace", PatternReplaceTokenFilter::decode)
            .register("condition", ConditionTokenFilter::decode)
            .register("multiplexer", MultiplexerTokenFilter::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }
}

impl TaggedVariant for TokenFilter {
    const FAMILY: VariantFamily = VariantFamily::TokenFilter;

    fn kind(&self) -> &str {
        match self {
            Self::Basic(v) => <&'static str>::from(v.kind),
            Self::Lowercase(_) => "lowercase",
            Self::AsciiFolding(_) => "asciifolding",
            Self::Stop(_) => "stop",
            Self::Stemmer(_) => "stemmer",
            Self::Synonym(v) => <&'static str>::from(v.kind),
            Self::NGram(v) => <&'static str>::from(v.kind),
            Self::Length(_) => "length",
            Self::Truncate(_) => "truncate",
            Self::Shingle(_) => "shingle",
            Self::Unique(_) => "unique",
            Self::WordDelimiter(v) => <&'static str>::from(v.kind),
            Self::Keep(_) => "keep",
            Self::PatternReplace(_) => "pattern_replace",
            Self::Condition(_) => "condition",
            Self::Multiplexer(_) => "multiplexer",
            Self::Extension(v) => &v.kind,
        }
    }

    fn is_builtin_default(&self) -> bool {
        let plain = match self {
            Self::Basic(v) => v.extra.is_empty(),
            Self::Lowercase(v) => *v == LowercaseTokenFilter::new(&v.name),
            Self::AsciiFolding(v) => *v == AsciiFoldingTokenFilter::new(&v.name),
            Self::Stop(v) => *v == StopTokenFilter::new(&v.name),
            Self::Stemmer(v) => *v == StemmerTokenFilter::new(&v.name, None),
            Self::NGram(v) => *v == NGramTokenFilter::new(v.kind, &v.name),
            Self::Length(v) => *v == LengthTokenFilter::new(&v.name),
            Self::Truncate(v) => *v == TruncateTokenFilter::new(&v.name),
            Self::Shingle(v) => *v == ShingleTokenFilter::new(&v.name),
            Self::Unique(v) => *v == UniqueTokenFilter::new(&v.name),
            Self::WordDelimiter(v) => *v == WordDelimiterTokenFilter::new(v.kind, &v.name),
            Self::Synonym(_)
            | Self::Keep(_)
            | Self::PatternReplace(_)
            | Self::Condition(_)
            | Self::Multiplexer(_)
            | Self::Extension(_) => false,
        };
        plain && self.name() == self.kind()
    }

    fn encode_fields(&self, out: &mut JsonMap) {
        match self {
            Self::Basic(v) => put_extra(out, &v.extra),
            Self::Lowercase(v) => {
                put(out, "language", &v.language);
                put_extra(out, &v.extra);
            }
            Self::AsciiFolding(v) => {
                put(out, "preserve_original", &v.preserve_original);
                put_extra(out, &v.extra);
            }
            Self::Stop(v) => {
                Stopwords::write(v.stopwords.as_ref(), out);
                put(out, "ignore_case", &v.ignore_case);
                put(out, "remove_trailing", &v.remove_trailing);
                put_extra(out, &v.extra);
            }
            Self::Stemmer(v) => {
                put(
                    out,
                    "language",
                    &v.language.map(<&'static str>::from),
                );
                put_extra(out, &v.extra);
            }
            Self::Synonym(v) => {
                v.synonyms.write(out, "synonyms", "synonyms_path");
                put(out, "expand", &v.expand);
                put(out, "lenient", &v.lenient);
                put(out, "updateable", &v.updateable);
                put_extra(out, &v.extra);
            }
            Self::NGram(v) => {
                put(out, "min_gram", &v.min_gram);
                put(out, "max_gram", &v.max_gram);
                put(out, "preserve_original", &v.preserve_original);
                put_extra(out, &v.extra);
            }
            Self::Length(v) => {
                put(out, "min", &v.min);
                put(out, "max", &v.max);
                put_extra(out, &v.extra);
            }
            Self::Truncate(v) => {
                put(out, "length", &v.length);
                put_extra(out, &v.extra);
            }
            Self::Shingle(v) => {
                put(out, "min_shingle_size", &v.min_shingle_size);
                put(out, "max_shingle_size", &v.max_shingle_size);
                put(out, "output_unigrams", &v.output_unigrams);
                put(out, "token_separator", &v.token_separator);
                put(out, "filler_token", &v.filler_token);
                put_extra(out, &v.extra);
            }
            Self::Unique(v) => {
                put(out, "only_on_same_position", &v.only_on_same_position);
                put_extra(out, &v.extra);
            }
            Self::WordDelimiter(v) => {
                put(out, "generate_word_parts", &v.generate_word_parts);
                put(out, "generate_number_parts", &v.generate_number_parts);
                put(out, "catenate_words", &v.catenate_words);
                put(out, "catenate_numbers", &v.catenate_numbers);
                put(out, "catenate_all", &v.catenate_all);
                put(out, "split_on_case_change", &v.split_on_case_change);
                put(out, "split_on_numerics", &v.split_on_numerics);
                put(out, "preserve_original", &v.preserve_original);
                put_list(out, "protected_words", &v.protected_words);
                put_extra(out, &v.extra);
            }
            Self::Keep(v) => {
                v.keep_words.write(out, "keep_words", "keep_words_path");
                put(out, "keep_words_case", &v.keep_words_case);
                put_extra(out, &v.extra);
            }
            Self::PatternReplace(v) => {
                put_value(out, "pattern", v.pattern.as_str());
                put(out, "replacement", &v.replacement);
                put(out, "all", &v.all);
                put_extra(out, &v.extra);
            }
            Self::Condition(v) => {
                put_value(
                    out,
                    "filter",
                    serde_json::json!(v.filter.iter().map(TokenFilter::name).collect::<Vec<_>>()),
                );
                put_value(out, "script", serde_json::json!(v.script));
                put_extra(out, &v.extra);
            }
            Self::Multiplexer(v) => {
                let chains: Vec<String> = v
                    .filters
                    .iter()
                    .map(|chain| {
                        chain
                            .iter()
                            .map(TokenFilter::name)
                            .collect::<Vec<_>>()
                            .join(",")
                    })
                    .collect();
                put_value(out, "filters", serde_json::json!(chains));
                put(out, "preserve_original", &v.preserve_original);
                put_extra(out, &v.extra);
            }
            Self::Extension(v) => v.encode_fields(out),
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.token_filters
    }
}

impl AnalysisComponent for TokenFilter {
    fn name(&self) -> &str {
        match self {
            Self::Basic(v) => &v.name,
            Self::Lowercase(v) => &v.name,
            Self::AsciiFolding(v) => &v.name,
            Self::Stop(v) => &v.name,
            Self::Stemmer(v) => &v.name,
            Self::Synonym(v) => &v.name,
            Self::NGram(v) => &v.name,
            Self::Length(v) => &v.name,
            Self::Truncate(v) => &v.name,
            Self::Shingle(v) => &v.name,
            Self::Unique(v) => &v.name,
            Self::WordDelimiter(v) => &v.name,
            Self::Keep(v) => &v.name,
            Self::PatternReplace(v) => &v.name,
            Self::Condition(v) => &v.name,
            Self::Multiplexer(v) => &v.name,
            Self::Extension(v) => &v.name,
        }
    }

    fn dependencies(&self) -> Vec<AnalysisItem> {
        match self {
            Self::Condition(v) => v.filter.iter().cloned().map(AnalysisItem::TokenFilter).collect(),
            Self::Multiplexer(v) => v
                .filters
                .iter()
                .flatten()
                .cloned()
                .map(AnalysisItem::TokenFilter)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn table(ctx: &AnalysisContext) -> &NamedTable<Self> {
        ctx.token_filters()
    }

    fn table_mut(ctx: &mut AnalysisContext) -> &mut NamedTable<Self> {
        ctx.token_filters_mut()
    }

    fn into_item(self) -> AnalysisItem {
        AnalysisItem::TokenFilter(self)
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
pub enum BasicTokenFilterKind {
    Apostrophe,
    ArabicNormalization,
    BengaliNormalization,
    CjkWidth,
    Classic,
    DecimalDigit,
    FlattenGraph,
    GermanNormalization,
    HindiNormalization,
    IndicNormalization,
    Kstem,
    PersianNormalization,
    PorterStem,
    RemoveDuplicates,
    Reverse,
    ScandinavianFolding,
    ScandinavianNormalization,
    SerbianNormalization,
    SoraniNormalization,
    Trim,
    Uppercase,
}

/// Token filter kind without settings
#[derive(Debug, Clone, PartialEq)]
pub struct BasicTokenFilter {
    pub kind: BasicTokenFilterKind,
    pub name: String,
    pub extra: JsonMap,
}

impl BasicTokenFilter {
    pub fn new(kind: BasicTokenFilterKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            extra: JsonMap::new(),
        }
    }

    fn decode(reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<TokenFilter, CodecError> {
        let kind = reader
            .kind()
            .parse::<BasicTokenFilterKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(TokenFilter::Basic(Self {
            kind,
            name: reader.name().to_string(),
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct LowercaseTokenFilter {
    pub name: String,
    /// One of `greek`, `irish` or `turkish`
    pub language: Option<String>,
    pub extra: JsonMap,
}

impl LowercaseTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Lowercase(Self {
            name: reader.name().to_string(),
            language: reader.optional("language")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct AsciiFoldingTokenFilter {
    pub name: String,
    pub preserve_original: Option<bool>,
    pub extra: JsonMap,
}

impl AsciiFoldingTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preserve_original: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::AsciiFolding(Self {
            name: reader.name().to_string(),
            preserve_original: reader.optional("preserve_original")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct StopTokenFilter {
    pub name: String,
    pub stopwords: Option<Stopwords>,
    pub ignore_case: Option<bool>,
    pub remove_trailing: Option<bool>,
    pub extra: JsonMap,
}

impl StopTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stopwords: None,
            ignore_case: None,
            remove_trailing: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Stop(Self {
            name: reader.name().to_string(),
            stopwords: Stopwords::read(&mut reader)?,
            ignore_case: reader.optional("ignore_case")?,
            remove_trailing: reader.optional("remove_trailing")?,
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
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum StemmerLanguage {
    Arabic,
    Armenian,
    Basque,
    Bengali,
    Brazilian,
    Bulgarian,
    Catalan,
    Czech,
    Danish,
    Dutch,
    DutchKp,
    English,
    LightEnglish,
    Lovins,
    MinimalEnglish,
    Porter2,
    PossessiveEnglish,
    Estonian,
    Finnish,
    LightFinnish,
    French,
    LightFrench,
    MinimalFrench,
    Galician,
    MinimalGalician,
    German,
    German2,
    LightGerman,
    MinimalGerman,
    Greek,
    Hindi,
    Hungarian,
    LightHungarian,
    Indonesian,
    Irish,
    Italian,
    LightItalian,
    Sorani,
    Latvian,
    Lithuanian,
    Norwegian,
    LightNorwegian,
    MinimalNorwegian,
    LightNynorsk,
    MinimalNynorsk,
    Portuguese,
    LightPortuguese,
    MinimalPortuguese,
    PortugueseRslp,
    Romanian,
    Russian,
    LightRussian,
    Spanish,
    LightSpanish,
    Swedish,
    LightSwedish,
    Turkish,
}

/// Algorithmic stemmer, `english` when no language is set
#[derive(Debug, Clone, PartialEq)]
pub struct StemmerTokenFilter {
    pub name: String,
    pub language: Option<StemmerLanguage>,
    pub extra: JsonMap,
}

impl StemmerTokenFilter {
    pub fn new(name: impl Into<String>, language: Option<StemmerLanguage>) -> Self {
        Self {
            name: name.into(),
            language,
            extra: JsonMap::new(),
        }
    }

    /// Stemmer named `stemmer_<language>`
    pub fn for_language(language: StemmerLanguage) -> Self {
        Self::new(format!("stemmer_{language}"), Some(language))
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        // `name` is an accepted alias of `language`
        let language: Option<String> = match reader.optional("language")? {
            Some(language) => Some(language),
            None => reader.optional("name")?,
        };
        let language = language
            .map(|l| {
                l.parse::<StemmerLanguage>().map_err(|_| {
                    reader.malformed("language", format!("unknown stemmer language '{l}'"))
                })
            })
            .transpose()?;

        Ok(TokenFilter::Stemmer(Self {
            name: reader.name().to_string(),
            language,
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
pub enum SynonymKind {
    Synonym,
    SynonymGraph,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTokenFilter {
    pub kind: SynonymKind,
    pub name: String,
    pub synonyms: WordList,
    pub expand: Option<bool>,
    pub lenient: Option<bool>,
    pub updateable: Option<bool>,
    pub extra: JsonMap,
}

impl SynonymTokenFilter {
    pub fn new(kind: SynonymKind, name: impl Into<String>, synonyms: WordList) -> Self {
        Self {
            kind,
            name: name.into(),
            synonyms,
            expand: None,
            lenient: None,
            updateable: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        let kind = reader
            .kind()
            .parse::<SynonymKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(TokenFilter::Synonym(Self {
            kind,
            name: reader.name().to_string(),
            synonyms: WordList::read_required(&mut reader, "synonyms", "synonyms_path")?,
            expand: reader.optional("expand")?,
            lenient: reader.optional("lenient")?,
            updateable: reader.optional("updateable")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct NGramTokenFilter {
    pub kind: NGramKind,
    pub name: String,
    pub min_gram: Option<u32>,
    pub max_gram: Option<u32>,
    pub preserve_original: Option<bool>,
    pub extra: JsonMap,
}

impl NGramTokenFilter {
    pub fn new(kind: NGramKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            min_gram: None,
            max_gram: None,
            preserve_original: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        let kind = reader
            .kind()
            .parse::<NGramKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(TokenFilter::NGram(Self {
            kind,
            name: reader.name().to_string(),
            min_gram: reader.optional("min_gram")?,
            max_gram: reader.optional("max_gram")?,
            preserve_original: reader.optional("preserve_original")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct LengthTokenFilter {
    pub name: String,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub extra: JsonMap,
}

impl LengthTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: None,
            max: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Length(Self {
            name: reader.name().to_string(),
            min: reader.optional("min")?,
            max: reader.optional("max")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct TruncateTokenFilter {
    pub name: String,
    pub length: Option<u32>,
    pub extra: JsonMap,
}

impl TruncateTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Truncate(Self {
            name: reader.name().to_string(),
            length: reader.optional("length")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct ShingleTokenFilter {
    pub name: String,
    pub min_shingle_size: Option<u32>,
    pub max_shingle_size: Option<u32>,
    pub output_unigrams: Option<bool>,
    pub token_separator: Option<String>,
    pub filler_token: Option<String>,
    pub extra: JsonMap,
}

impl ShingleTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_shingle_size: None,
            max_shingle_size: None,
            output_unigrams: None,
            token_separator: None,
            filler_token: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Shingle(Self {
            name: reader.name().to_string(),
            min_shingle_size: reader.optional("min_shingle_size")?,
            max_shingle_size: reader.optional("max_shingle_size")?,
            output_unigrams: reader.optional("output_unigrams")?,
            token_separator: reader.optional("token_separator")?,
            filler_token: reader.optional("filler_token")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct UniqueTokenFilter {
    pub name: String,
    pub only_on_same_position: Option<bool>,
    pub extra: JsonMap,
}

impl UniqueTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            only_on_same_position: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Unique(Self {
            name: reader.name().to_string(),
            only_on_same_position: reader.optional("only_on_same_position")?,
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
pub enum WordDelimiterKind {
    WordDelimiter,
    WordDelimiterGraph,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordDelimiterTokenFilter {
    pub kind: WordDelimiterKind,
    pub name: String,
    pub generate_word_parts: Option<bool>,
    pub generate_number_parts: Option<bool>,
    pub catenate_words: Option<bool>,
    pub catenate_numbers: Option<bool>,
    pub catenate_all: Option<bool>,
    pub split_on_case_change: Option<bool>,
    pub split_on_numerics: Option<bool>,
    pub preserve_original: Option<bool>,
    pub protected_words: Vec<String>,
    pub extra: JsonMap,
}

impl WordDelimiterTokenFilter {
    pub fn new(kind: WordDelimiterKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            generate_word_parts: None,
            generate_number_parts: None,
            catenate_words: None,
            catenate_numbers: None,
            catenate_all: None,
            split_on_case_change: None,
            split_on_numerics: None,
            preserve_original: None,
            protected_words: Vec::new(),
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        let kind = reader
            .kind()
            .parse::<WordDelimiterKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(TokenFilter::WordDelimiter(Self {
            kind,
            name: reader.name().to_string(),
            generate_word_parts: reader.optional("generate_word_parts")?,
            generate_number_parts: reader.optional("generate_number_parts")?,
            catenate_words: reader.optional("catenate_words")?,
            catenate_numbers: reader.optional("catenate_numbers")?,
            catenate_all: reader.optional("catenate_all")?,
            split_on_case_change: reader.optional("split_on_case_change")?,
            split_on_numerics: reader.optional("split_on_numerics")?,
            preserve_original: reader.optional("preserve_original")?,
            protected_words: reader.list("protected_words")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keeps only the listed words
#[derive(Debug, Clone, PartialEq)]
pub struct KeepTokenFilter {
    pub name: String,
    pub keep_words: WordList,
    pub keep_words_case: Option<bool>,
    pub extra: JsonMap,
}

impl KeepTokenFilter {
    pub fn new(name: impl Into<String>, keep_words: WordList) -> Self {
        Self {
            name: name.into(),
            keep_words,
            keep_words_case: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::Keep(Self {
            name: reader.name().to_string(),
            keep_words: WordList::read_required(&mut reader, "keep_words", "keep_words_path")?,
            keep_words_case: reader.optional("keep_words_case")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct PatternReplaceTokenFilter {
    pub name: String,
    pub pattern: String,
    pub replacement: Option<String>,
    pub all: Option<bool>,
    pub extra: JsonMap,
}

impl PatternReplaceTokenFilter {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: None,
            all: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        Ok(TokenFilter::PatternReplace(Self {
            name: reader.name().to_string(),
            pattern: reader.required("pattern")?,
            replacement: reader.optional("replacement")?,
            all: reader.optional("all")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Applies a filter chain only to tokens matching a script predicate
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionTokenFilter {
    pub name: String,
    pub filter: Vec<TokenFilter>,
    pub script: Script,
    pub extra: JsonMap,
}

impl ConditionTokenFilter {
    pub fn new(name: impl Into<String>, filter: Vec<TokenFilter>, script: Script) -> Self {
        Self {
            name: name.into(),
            filter,
            script,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        let path = reader.path();
        let filter = reader.string_or_list("filter")?;

        Ok(TokenFilter::Condition(Self {
            name: reader.name().to_string(),
            filter: ctx.resolve_all(&filter, path)?,
            script: reader.required("script")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Emits the tokens of several filter chains at the same position
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplexerTokenFilter {
    pub name: String,
    pub filters: Vec<Vec<TokenFilter>>,
    pub preserve_original: Option<bool>,
    pub extra: JsonMap,
}

impl MultiplexerTokenFilter {
    pub fn new(name: impl Into<String>, filters: Vec<Vec<TokenFilter>>) -> Self {
        Self {
            name: name.into(),
            filters,
            preserve_original: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<TokenFilter, CodecError> {
        let path = reader.path();

        // Each entry is a comma separated chain
        let chains: Vec<String> = reader.list("filters")?;
        let filters = chains
            .iter()
            .map(|chain| {
                let names: Vec<String> = chain
                    .split(',')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .collect();
                ctx.resolve_all(&names, path)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TokenFilter::Multiplexer(Self {
            name: reader.name().to_string(),
            filters,
            preserve_original: reader.optional("preserve_original")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

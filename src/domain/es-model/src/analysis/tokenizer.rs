// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::{AnalysisComponent, AnalysisContext, AnalysisItem};
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub enum Tokenizer {
    MaxLength(MaxLengthTokenizer),
    Basic(BasicTokenizer),
    Keyword(KeywordTokenizer),
    NGram(NGramTokenizer),
    Pattern(PatternTokenizer),
    CharGroup(CharGroupTokenizer),
    PathHierarchy(PathHierarchyTokenizer),
    Extension(ExtensionVariant),
}

impl Tokenizer {
    pub fn standard() -> Self {
        Self::MaxLength(MaxLengthTokenizer::new(MaxLengthTokenizerKind::Standard, "standard"))
    }

    pub fn whitespace() -> Self {
        Self::MaxLength(MaxLengthTokenizer::new(
            MaxLengthTokenizerKind::Whitespace,
            "whitespace",
        ))
    }

    pub fn keyword() -> Self {
        Self::Keyword(KeywordTokenizer::new("keyword"))
    }

    pub fn register_builtins(registry: &mut VariantRegistry<Self>) {
        for kind in <MaxLengthTokenizerKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(
                <&'static str>::from(kind),
                MaxLengthTokenizer::decode,
                |kind| match kind.parse::<MaxLengthTokenizerKind>() {
                    Ok(k) => Self::MaxLength(MaxLengthTokenizer::new(k, kind)),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                },
            );
        }

        for kind in <BasicTokenizerKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(
                <&'static str>::from(kind),
                BasicTokenizer::decode,
                |kind| match kind.parse::<BasicTokenizerKind>() {
                    Ok(k) => Self::Basic(BasicTokenizer::new(k, kind)),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                },
            );
        }

        for kind in <NGramKind as strum::IntoEnumIterator>::iter() {
            registry.register_builtin(<&'static str>::from(kind), NGramTokenizer::decode, |kind| {
                match kind.parse::<NGramKind>() {
                    Ok(k) => Self::NGram(NGramTokenizer::new(k, kind)),
                    Err(_) => Self::Extension(ExtensionVariant::new(kind, kind, JsonMap::new())),
                }
            });
        }

        registry
            .register_builtin("keyword", KeywordTokenizer::decode, |kind| {
                Self::Keyword(KeywordTokenizer::new(kind))
            })
            .register_builtin("pattern", PatternTokenizer::decode, |kind| {
                Self::Pattern(PatternTokenizer::new(kind))
            })
            .register_builtin("path_hierarchy", PathHierarchyTokenizer::decode, |kind| {
                Self::PathHierarchy(PathHierarchyTokenizer::new(kind))
            })
            .register("char_group", CharGroupTokenizer::decode);
    }

    pub fn decode_extension(
        reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        Ok(Self::Extension(ExtensionVariant::from_reader(reader)))
    }
}

impl TaggedVariant for Tokenizer {
    const FAMILY: VariantFamily = VariantFamily::Tokenizer;

    fn kind(&self) -> &str {
        match self {
            Self::MaxLength(v) => <&'static str>::from(v.kind),
            Self::Basic(v) => <&'static str>::from(v.kind),
            Self::Keyword(_) => "keyword",
            Self::NGram(v) => <&'static str>::from(v.kind),
            Self::Pattern(_) => "pattern",
            Self::CharGroup(_) => "char_group",
            Self::PathHierarchy(_) => "path_hierarchy",
            Self::Extension(v) => &v.kind,
        }
    }

    fn is_builtin_default(&self) -> bool {
        let plain = match self {
            Self::MaxLength(v) => *v == MaxLengthTokenizer::new(v.kind, &v.name),
            Self::Basic(v) => v.extra.is_empty(),
            Self::Keyword(v) => *v == KeywordTokenizer::new(&v.name),
            Self::NGram(v) => *v == NGramTokenizer::new(v.kind, &v.name),
            Self::Pattern(v) => *v == PatternTokenizer::new(&v.name),
            Self::PathHierarchy(v) => *v == PathHierarchyTokenizer::new(&v.name),
            Self::CharGroup(_) | Self::Extension(_) => false,
        };
        plain && self.name() == self.kind()
    }

    fn encode_fields(&self, out: &mut JsonMap) {
        match self {
            Self::MaxLength(v) => {
                put(out, "max_token_length", &v.max_token_length);
                put_extra(out, &v.extra);
            }
            Self::Basic(v) => put_extra(out, &v.extra),
            Self::Keyword(v) => {
                put(out, "buffer_size", &v.buffer_size);
                put_extra(out, &v.extra);
            }
            Self::NGram(v) => {
                put(out, "min_gram", &v.min_gram);
                put(out, "max_gram", &v.max_gram);
                put_list(out, "token_chars", &v.token_chars);
                put(out, "custom_token_chars", &v.custom_token_chars);
                put_extra(out, &v.extra);
            }
            Self::Pattern(v) => {
                put(out, "pattern", &v.pattern);
                put(out, "flags", &v.flags);
                put(out, "group", &v.group);
                put_extra(out, &v.extra);
            }
            Self::CharGroup(v) => {
                put_value(out, "tokenize_on_chars", serde_json::json!(v.tokenize_on_chars));
                put(out, "max_token_length", &v.max_token_length);
                put_extra(out, &v.extra);
            }
            Self::PathHierarchy(v) => {
                put(out, "delimiter", &v.delimiter);
                put(out, "replacement", &v.replacement);
                put(out, "buffer_size", &v.buffer_size);
                put(out, "reverse", &v.reverse);
                put(out, "skip", &v.skip);
                put_extra(out, &v.extra);
            }
            Self::Extension(v) => v.encode_fields(out),
        }
    }

    fn registry(registries: &Registries) -> &VariantRegistry<Self> {
        &registries.tokenizers
    }
}

impl AnalysisComponent for Tokenizer {
    fn name(&self) -> &str {
        match self {
            Self::MaxLength(v) => &v.name,
            Self::Basic(v) => &v.name,
            Self::Keyword(v) => &v.name,
            Self::NGram(v) => &v.name,
            Self::Pattern(v) => &v.name,
            Self::CharGroup(v) => &v.name,
            Self::PathHierarchy(v) => &v.name,
            Self::Extension(v) => &v.name,
        }
    }

    fn table(ctx: &AnalysisContext) -> &NamedTable<Self> {
        ctx.tokenizers()
    }

    fn table_mut(ctx: &mut AnalysisContext) -> &mut NamedTable<Self> {
        ctx.tokenizers_mut()
    }

    fn into_item(self) -> AnalysisItem {
        AnalysisItem::Tokenizer(self)
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
pub enum MaxLengthTokenizerKind {
    Standard,
    Classic,
    Whitespace,
    UaxUrlEmail,
}

/// Tokenizer whose only setting is the maximum token length
#[derive(Debug, Clone, PartialEq)]
pub struct MaxLengthTokenizer {
    pub kind: MaxLengthTokenizerKind,
    pub name: String,
    pub max_token_length: Option<u32>,
    pub extra: JsonMap,
}

impl MaxLengthTokenizer {
    pub fn new(kind: MaxLengthTokenizerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            max_token_length: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        let kind = reader
            .kind()
            .parse::<MaxLengthTokenizerKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(Tokenizer::MaxLength(Self {
            kind,
            name: reader.name().to_string(),
            max_token_length: reader.optional("max_token_length")?,
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
pub enum BasicTokenizerKind {
    Letter,
    Lowercase,
    Thai,
}

/// Tokenizer kind without settings
#[derive(Debug, Clone, PartialEq)]
pub struct BasicTokenizer {
    pub kind: BasicTokenizerKind,
    pub name: String,
    pub extra: JsonMap,
}

impl BasicTokenizer {
    pub fn new(kind: BasicTokenizerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            extra: JsonMap::new(),
        }
    }

    fn decode(reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        let kind = reader
            .kind()
            .parse::<BasicTokenizerKind>()
            .map_err(|e| reader.malformed("type", e))?;
        Ok(Tokenizer::Basic(Self {
            kind,
            name: reader.name().to_string(),
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTokenizer {
    pub name: String,
    pub buffer_size: Option<u32>,
    pub extra: JsonMap,
}

impl KeywordTokenizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer_size: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        Ok(Tokenizer::Keyword(Self {
            name: reader.name().to_string(),
            buffer_size: reader.optional("buffer_size")?,
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
pub enum NGramKind {
    #[strum(serialize = "ngram")]
    NGram,
    #[strum(serialize = "edge_ngram")]
    EdgeNGram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenChars {
    Letter,
    Digit,
    Whitespace,
    Punctuation,
    Symbol,
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NGramTokenizer {
    pub kind: NGramKind,
    pub name: String,
    pub min_gram: Option<u32>,
    pub max_gram: Option<u32>,
    pub token_chars: Vec<TokenChars>,
    pub custom_token_chars: Option<String>,
    pub extra: JsonMap,
}

impl NGramTokenizer {
    pub fn new(kind: NGramKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            min_gram: None,
            max_gram: None,
            token_chars: Vec::new(),
            custom_token_chars: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        let kind = reader
            .kind()
            .parse::<NGramKind>()
            .map_err(|e| reader.malformed("type", e))?;
        let tokenizer = Self {
            kind,
            name: reader.name().to_string(),
            min_gram: reader.optional("min_gram")?,
            max_gram: reader.optional("max_gram")?,
            token_chars: reader.list("token_chars")?,
            custom_token_chars: reader.optional("custom_token_chars")?,
            extra: JsonMap::new(),
        };

        if let (Some(min), Some(max)) = (tokenizer.min_gram, tokenizer.max_gram)
            && min > max
        {
            return Err(reader.malformed(
                "min_gram",
                format!("min_gram {min} is greater than max_gram {max}"),
            ));
        }

        Ok(Tokenizer::NGram(Self {
            extra: reader.into_extra(),
            ..tokenizer
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct PatternTokenizer {
    pub name: String,
    pub pattern: Option<String>,
    pub flags: Option<String>,
    /// Capture group to emit as tokens, `-1` splits on the pattern
    pub group: Option<i32>,
    pub extra: JsonMap,
}

impl PatternTokenizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            flags: None,
            group: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        Ok(Tokenizer::Pattern(Self {
            name: reader.name().to_string(),
            pattern: reader.optional("pattern")?,
            flags: reader.optional("flags")?,
            group: reader.optional("group")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct CharGroupTokenizer {
    pub name: String,
    /// Single characters or character classes such as `whitespace`
    pub tokenize_on_chars: Vec<String>,
    pub max_token_length: Option<u32>,
    pub extra: JsonMap,
}

impl CharGroupTokenizer {
    pub fn new(name: impl Into<String>, tokenize_on_chars: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tokenize_on_chars,
            max_token_length: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        Ok(Tokenizer::CharGroup(Self {
            name: reader.name().to_string(),
            tokenize_on_chars: reader.required("tokenize_on_chars")?,
            max_token_length: reader.optional("max_token_length")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct PathHierarchyTokenizer {
    pub name: String,
    pub delimiter: Option<String>,
    pub replacement: Option<String>,
    pub buffer_size: Option<u32>,
    pub reverse: Option<bool>,
    pub skip: Option<u32>,
    pub extra: JsonMap,
}

impl PathHierarchyTokenizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delimiter: None,
            replacement: None,
            buffer_size: None,
            reverse: None,
            skip: None,
            extra: JsonMap::new(),
        }
    }

    fn decode(mut reader: FieldReader<'_>, _: &DecodeContext<'_>) -> Result<Tokenizer, CodecError> {
        Ok(Tokenizer::PathHierarchy(Self {
            name: reader.name().to_string(),
            delimiter: reader.optional("delimiter")?,
            replacement: reader.optional("replacement")?,
            buffer_size: reader.optional("buffer_size")?,
            reverse: reader.optional("reverse")?,
            skip: reader.optional("skip")?,
            extra: reader.into_extra(),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::*;
use crate::codec::*;
use crate::{Analyzer, Normalizer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Full-text field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMapping {
    pub analyzer: Option<Analyzer>,
    pub search_analyzer: Option<Analyzer>,
    pub search_quote_analyzer: Option<Analyzer>,
    pub boost: Option<f64>,
    pub eager_global_ordinals: Option<bool>,
    pub fielddata: Option<bool>,
    pub index: Option<bool>,
    pub index_options: Option<IndexOptions>,
    pub index_phrases: Option<bool>,
    pub norms: Option<bool>,
    pub position_increment_gap: Option<u32>,
    pub store: Option<bool>,
    pub similarity: Option<String>,
    pub term_vector: Option<TermVector>,
    pub copy_to: Vec<String>,
    /// Multi-fields indexing the same value differently
    pub fields: NamedTable<Mapping>,
    pub extra: JsonMap,
}

impl TextMapping {
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_search_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.search_analyzer = Some(analyzer);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, mapping: Mapping) -> Self {
        self.fields.insert(name, mapping);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Text(Self {
            analyzer: read_reference(&mut reader, "analyzer", ctx)?,
            search_analyzer: read_reference(&mut reader, "search_analyzer", ctx)?,
            search_quote_analyzer: read_reference(&mut reader, "search_quote_analyzer", ctx)?,
            boost: reader.optional("boost")?,
            eager_global_ordinals: reader.optional("eager_global_ordinals")?,
            fielddata: reader.optional("fielddata")?,
            index: reader.optional("index")?,
            index_options: reader.optional("index_options")?,
            index_phrases: reader.optional("index_phrases")?,
            norms: reader.optional("norms")?,
            position_increment_gap: reader.optional("position_increment_gap")?,
            store: reader.optional("store")?,
            similarity: reader.optional("similarity")?,
            term_vector: reader.optional("term_vector")?,
            copy_to: reader.string_or_list("copy_to")?,
            fields: read_properties(&mut reader, "fields", ctx)?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_reference(out, "analyzer", self.analyzer.as_ref());
        put_reference(out, "search_analyzer", self.search_analyzer.as_ref());
        put_reference(out, "search_quote_analyzer", self.search_quote_analyzer.as_ref());
        put(out, "boost", &self.boost);
        put(out, "eager_global_ordinals", &self.eager_global_ordinals);
        put(out, "fielddata", &self.fielddata);
        put(out, "index", &self.index);
        put(out, "index_options", &self.index_options);
        put(out, "index_phrases", &self.index_phrases);
        put(out, "norms", &self.norms);
        put(out, "position_increment_gap", &self.position_increment_gap);
        put(out, "store", &self.store);
        put(out, "similarity", &self.similarity);
        put(out, "term_vector", &self.term_vector);
        put_list(out, "copy_to", &self.copy_to);
        put_properties(out, "fields", &self.fields);
        put_extra(out, &self.extra);
    }
}

impl From<TextMapping> for Mapping {
    fn from(value: TextMapping) -> Self {
        Self::Text(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Space-optimized text field without scoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOnlyTextMapping {
    pub copy_to: Vec<String>,
    pub fields: NamedTable<Mapping>,
    pub extra: JsonMap,
}

impl MatchOnlyTextMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::MatchOnlyText(Self {
            copy_to: reader.string_or_list("copy_to")?,
            fields: read_properties(&mut reader, "fields", ctx)?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_list(out, "copy_to", &self.copy_to);
        put_properties(out, "fields", &self.fields);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Exact-value field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMapping {
    pub normalizer: Option<Normalizer>,
    pub boost: Option<f64>,
    pub doc_values: Option<bool>,
    pub eager_global_ordinals: Option<bool>,
    pub ignore_above: Option<u32>,
    pub index: Option<bool>,
    pub index_options: Option<IndexOptions>,
    pub norms: Option<bool>,
    pub null_value: Option<String>,
    pub store: Option<bool>,
    pub similarity: Option<String>,
    pub split_queries_on_whitespace: Option<bool>,
    pub copy_to: Vec<String>,
    pub fields: NamedTable<Mapping>,
    pub extra: JsonMap,
}

impl KeywordMapping {
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_ignore_above(mut self, ignore_above: u32) -> Self {
        self.ignore_above = Some(ignore_above);
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Keyword(Self {
            normalizer: read_reference(&mut reader, "normalizer", ctx)?,
            boost: reader.optional("boost")?,
            doc_values: reader.optional("doc_values")?,
            eager_global_ordinals: reader.optional("eager_global_ordinals")?,
            ignore_above: reader.optional("ignore_above")?,
            index: reader.optional("index")?,
            index_options: reader.optional("index_options")?,
            norms: reader.optional("norms")?,
            null_value: reader.optional("null_value")?,
            store: reader.optional("store")?,
            similarity: reader.optional("similarity")?,
            split_queries_on_whitespace: reader.optional("split_queries_on_whitespace")?,
            copy_to: reader.string_or_list("copy_to")?,
            fields: read_properties(&mut reader, "fields", ctx)?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_reference(out, "normalizer", self.normalizer.as_ref());
        put(out, "boost", &self.boost);
        put(out, "doc_values", &self.doc_values);
        put(out, "eager_global_ordinals", &self.eager_global_ordinals);
        put(out, "ignore_above", &self.ignore_above);
        put(out, "index", &self.index);
        put(out, "index_options", &self.index_options);
        put(out, "norms", &self.norms);
        put(out, "null_value", &self.null_value);
        put(out, "store", &self.store);
        put(out, "similarity", &self.similarity);
        put(out, "split_queries_on_whitespace", &self.split_queries_on_whitespace);
        put_list(out, "copy_to", &self.copy_to);
        put_properties(out, "fields", &self.fields);
        put_extra(out, &self.extra);
    }
}

impl From<KeywordMapping> for Mapping {
    fn from(value: KeywordMapping) -> Self {
        Self::Keyword(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Number of tokens the analyzer produces for the value
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCountMapping {
    pub analyzer: Option<Analyzer>,
    pub enable_position_increments: Option<bool>,
    pub doc_values: Option<bool>,
    pub index: Option<bool>,
    pub null_value: Option<u64>,
    pub store: Option<bool>,
    pub extra: JsonMap,
}

impl TokenCountMapping {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Some(analyzer),
            enable_position_increments: None,
            doc_values: None,
            index: None,
            null_value: None,
            store: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::TokenCount(Self {
            analyzer: read_reference(&mut reader, "analyzer", ctx)?,
            enable_position_increments: reader.optional("enable_position_increments")?,
            doc_values: reader.optional("doc_values")?,
            index: reader.optional("index")?,
            null_value: reader.optional("null_value")?,
            store: reader.optional("store")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_reference(out, "analyzer", self.analyzer.as_ref());
        put(out, "enable_position_increments", &self.enable_position_increments);
        put(out, "doc_values", &self.doc_values);
        put(out, "index", &self.index);
        put(out, "null_value", &self.null_value);
        put(out, "store", &self.store);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Suggester field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionMapping {
    pub analyzer: Option<Analyzer>,
    pub search_analyzer: Option<Analyzer>,
    pub preserve_separators: Option<bool>,
    pub preserve_position_increments: Option<bool>,
    pub max_input_length: Option<u32>,
    pub extra: JsonMap,
}

impl CompletionMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Completion(Self {
            analyzer: read_reference(&mut reader, "analyzer", ctx)?,
            search_analyzer: read_reference(&mut reader, "search_analyzer", ctx)?,
            preserve_separators: reader.optional("preserve_separators")?,
            preserve_position_increments: reader.optional("preserve_position_increments")?,
            max_input_length: reader.optional("max_input_length")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put_reference(out, "analyzer", self.analyzer.as_ref());
        put_reference(out, "search_analyzer", self.search_analyzer.as_ref());
        put(out, "preserve_separators", &self.preserve_separators);
        put(out, "preserve_position_increments", &self.preserve_position_increments);
        put(out, "max_input_length", &self.max_input_length);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

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
    AnalysisComponent,
    AnalysisItem,
    Analyzer,
    CharFilter,
    Normalizer,
    TokenFilter,
    Tokenizer,
};
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Named analysis definitions of one index, as found in its `analysis`
/// settings block.
///
/// A context is built for a single operation: populated while an index body is
/// assembled or while a fetched one is decoded, then dropped. Predefined
/// (builtin) components are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisContext {
    analyzers: NamedTable<Analyzer>,
    tokenizers: NamedTable<Tokenizer>,
    token_filters: NamedTable<TokenFilter>,
    char_filters: NamedTable<CharFilter>,
    normalizers: NamedTable<Normalizer>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
            && self.tokenizers.is_empty()
            && self.token_filters.is_empty()
            && self.char_filters.is_empty()
            && self.normalizers.is_empty()
    }

    pub fn analyzers(&self) -> &NamedTable<Analyzer> {
        &self.analyzers
    }

    pub fn tokenizers(&self) -> &NamedTable<Tokenizer> {
        &self.tokenizers
    }

    pub fn token_filters(&self) -> &NamedTable<TokenFilter> {
        &self.token_filters
    }

    pub fn char_filters(&self) -> &NamedTable<CharFilter> {
        &self.char_filters
    }

    pub fn normalizers(&self) -> &NamedTable<Normalizer> {
        &self.normalizers
    }

    pub(crate) fn analyzers_mut(&mut self) -> &mut NamedTable<Analyzer> {
        &mut self.analyzers
    }

    pub(crate) fn tokenizers_mut(&mut self) -> &mut NamedTable<Tokenizer> {
        &mut self.tokenizers
    }

    pub(crate) fn token_filters_mut(&mut self) -> &mut NamedTable<TokenFilter> {
        &mut self.token_filters
    }

    pub(crate) fn char_filters_mut(&mut self) -> &mut NamedTable<CharFilter> {
        &mut self.char_filters
    }

    pub(crate) fn normalizers_mut(&mut self) -> &mut NamedTable<Normalizer> {
        &mut self.normalizers
    }

    pub fn lookup(&self, family: VariantFamily, name: &str) -> Option<AnalysisItem> {
        match family {
            VariantFamily::Analyzer => self.analyzers.get(name).cloned().map(AnalysisItem::from),
            VariantFamily::Tokenizer => self.tokenizers.get(name).cloned().map(AnalysisItem::from),
            VariantFamily::TokenFilter => {
                self.token_filters.get(name).cloned().map(AnalysisItem::from)
            }
            VariantFamily::CharFilter => {
                self.char_filters.get(name).cloned().map(AnalysisItem::from)
            }
            VariantFamily::Normalizer => {
                self.normalizers.get(name).cloned().map(AnalysisItem::from)
            }
            VariantFamily::Mapping | VariantFamily::Query | VariantFamily::Aggregation => None,
        }
    }

    /// Adds a single definition without following its references.
    ///
    /// Returns whether the definition was stored: builtin defaults and exact
    /// duplicates are skipped, a different definition under a taken name is
    /// an error.
    pub fn add(&mut self, item: impl Into<AnalysisItem>) -> Result<bool, CodecError> {
        match item.into() {
            AnalysisItem::Analyzer(v) => self.add_component(v),
            AnalysisItem::Tokenizer(v) => self.add_component(v),
            AnalysisItem::TokenFilter(v) => self.add_component(v),
            AnalysisItem::CharFilter(v) => self.add_component(v),
            AnalysisItem::Normalizer(v) => self.add_component(v),
        }
    }

    pub fn add_analyzer(&mut self, analyzer: Analyzer) -> Result<(), CodecError> {
        self.collect(analyzer)
    }

    pub fn add_tokenizer(&mut self, tokenizer: Tokenizer) -> Result<(), CodecError> {
        self.collect(tokenizer)
    }

    pub fn add_token_filter(&mut self, filter: TokenFilter) -> Result<(), CodecError> {
        self.collect(filter)
    }

    pub fn add_char_filter(&mut self, char_filter: CharFilter) -> Result<(), CodecError> {
        self.collect(char_filter)
    }

    pub fn add_normalizer(&mut self, normalizer: Normalizer) -> Result<(), CodecError> {
        self.collect(normalizer)
    }

    /// Adds a definition together with everything it references, directly or
    /// transitively
    pub fn collect(&mut self, item: impl Into<AnalysisItem>) -> Result<(), CodecError> {
        let mut worklist = vec![item.into()];

        while let Some(item) = worklist.pop() {
            let dependencies = match &item {
                AnalysisItem::Analyzer(v) => v.dependencies(),
                AnalysisItem::Tokenizer(v) => v.dependencies(),
                AnalysisItem::TokenFilter(v) => v.dependencies(),
                AnalysisItem::CharFilter(v) => v.dependencies(),
                AnalysisItem::Normalizer(v) => v.dependencies(),
            };

            // A definition seen before had its references queued already
            if self.add(item)? {
                worklist.extend(dependencies.into_iter().rev());
            }
        }

        Ok(())
    }

    /// Merges all definitions of another context
    pub fn merge(&mut self, other: &AnalysisContext) -> Result<(), CodecError> {
        for v in other.char_filters.values() {
            self.add(v.clone())?;
        }
        for v in other.tokenizers.values() {
            self.add(v.clone())?;
        }
        for v in other.token_filters.values() {
            self.add(v.clone())?;
        }
        for v in other.normalizers.values() {
            self.add(v.clone())?;
        }
        for v in other.analyzers.values() {
            self.add(v.clone())?;
        }
        Ok(())
    }

    fn add_component<C: AnalysisComponent>(&mut self, component: C) -> Result<bool, CodecError> {
        if component.is_builtin_default() {
            return Ok(false);
        }

        let name = component.name().to_string();
        match C::table_mut(self).try_add(name.clone(), component) {
            Ok(added) => Ok(added),
            Err(_) => Err(CodecError::ConflictingDefinition {
                family: C::FAMILY,
                name,
            }),
        }
    }

    /// Encodes the `analysis` settings block, tables without entries are
    /// omitted
    pub fn encode(&self) -> Value {
        let mut out = JsonMap::new();
        encode_table(&mut out, &self.analyzers);
        encode_table(&mut out, &self.tokenizers);
        encode_table(&mut out, &self.token_filters);
        encode_table(&mut out, &self.char_filters);
        encode_table(&mut out, &self.normalizers);
        Value::Object(out)
    }

    /// Decodes an `analysis` settings block found at `path`
    pub fn decode(value: &Value, path: &str, registries: &Registries) -> Result<Self, CodecError> {
        let Value::Object(block) = value else {
            return Err(CodecError::malformed(
                VariantFamily::Analyzer,
                "",
                path,
                "analysis settings must be an object",
            ));
        };

        // Referenced components are decoded before the ones referencing them
        let mut ctx = Self::new();
        decode_table::<CharFilter>(&mut ctx, block, path, registries)?;
        decode_table::<Tokenizer>(&mut ctx, block, path, registries)?;
        decode_table::<TokenFilter>(&mut ctx, block, path, registries)?;
        decode_table::<Normalizer>(&mut ctx, block, path, registries)?;
        decode_table::<Analyzer>(&mut ctx, block, path, registries)?;
        Ok(ctx)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn encode_table<C: AnalysisComponent>(out: &mut JsonMap, table: &NamedTable<C>) {
    if table.is_empty() {
        return;
    }

    let Some(key) = C::FAMILY.analysis_key() else {
        return;
    };

    let entries = encode_named(table.iter(), |v| Value::Object(encode_tagged_object(v)));

    out.insert(key.to_string(), entries);
}

/// Decodes one table as a fixed point: an entry referencing a same-family
/// entry that is not decoded yet is retried after the others
fn decode_table<C: AnalysisComponent>(
    ctx: &mut AnalysisContext,
    block: &JsonMap,
    path: &str,
    registries: &Registries,
) -> Result<(), CodecError> {
    let Some(key) = C::FAMILY.analysis_key() else {
        return Ok(());
    };
    let table_path = join_path(path, key);

    let raw = match block.get(key) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(raw)) => raw,
        Some(_) => {
            return Err(CodecError::malformed(
                C::FAMILY,
                "",
                table_path,
                "expected an object of named definitions",
            ));
        }
    };

    let mut pending: Vec<(&String, &Value)> = raw.iter().collect();

    while !pending.is_empty() {
        let mut deferred = Vec::new();
        let mut last_error = None;

        for (name, value) in pending.iter().copied() {
            let entry_path = join_path(&table_path, name);
            let decoded = {
                let decode_ctx = DecodeContext::new(registries).with_analysis(ctx);
                decode_tagged::<C>(name, &entry_path, value, &decode_ctx)
            };

            match decoded {
                Ok(component) => {
                    C::table_mut(ctx).insert(name.clone(), component);
                }
                Err(CodecError::DanglingReference {
                    family,
                    name: missing,
                    referenced_from,
                }) if family == C::FAMILY && raw.contains_key(&missing) && missing != *name => {
                    deferred.push((name, value));
                    last_error = Some(CodecError::DanglingReference {
                        family,
                        name: missing,
                        referenced_from,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if deferred.len() == pending.len() {
            // No progress: the remaining entries reference each other
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        pending = deferred;
    }

    C::table_mut(ctx).reorder(raw.keys().map(String::as_str));
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

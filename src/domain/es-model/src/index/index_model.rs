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
use crate::{
    AnalysisContext,
    AnalysisItem,
    DynamicMapping,
    Mapping,
    decode_properties,
    encode_properties,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const MAPPINGS_KIND: &str = "mappings";

/// Root of an index mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexMappings {
    pub properties: NamedTable<Mapping>,
    pub dynamic: Option<DynamicMapping>,
    /// `false` stores documents without indexing any field
    pub enabled: Option<bool>,
    /// Root options this model does not name, such as `_source` or
    /// `dynamic_templates`
    pub extra: JsonMap,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Client-side model of an index: built before creating it, or reconstructed
/// from the definition the cluster reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    name: String,
    settings: IndexSettings,
    mappings: IndexMappings,
    analysis: AnalysisContext,
    meta: IndexMeta,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: IndexSettings::default(),
            mappings: IndexMappings::default(),
            analysis: AnalysisContext::new(),
            meta: IndexMeta::default(),
        }
    }

    pub fn with_settings(self, settings: IndexSettings) -> Self {
        Self { settings, ..self }
    }

    pub fn with_property(mut self, name: impl Into<String>, mapping: impl Into<Mapping>) -> Self {
        self.mappings.properties.insert(name, mapping.into());
        self
    }

    pub fn with_dynamic(mut self, dynamic: DynamicMapping) -> Self {
        self.mappings.dynamic = Some(dynamic);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.mappings.enabled = Some(enabled);
        self
    }

    pub fn with_user_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.user_defined.insert(key.into(), value.into());
        self
    }

    /// Adds an analysis definition that no mapping references, along with
    /// whatever it references itself
    pub fn add_analysis(&mut self, item: impl Into<AnalysisItem>) -> Result<(), CodecError> {
        self.analysis.collect(item)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    pub fn mappings(&self) -> &IndexMappings {
        &self.mappings
    }

    pub fn properties(&self) -> &NamedTable<Mapping> {
        &self.mappings.properties
    }

    /// Explicitly added definitions, or the analysis block of a fetched index
    pub fn analysis(&self) -> &AnalysisContext {
        &self.analysis
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn properties_hash(&self) -> Result<String, CodecError> {
        properties_hash(&self.mappings.properties)
    }

    /// Whether the properties differ from the ones the index was created
    /// with. Indices without a stored fingerprint never report drift.
    pub fn properties_drifted(&self) -> Result<bool, CodecError> {
        match &self.meta.private {
            None => Ok(false),
            Some(private) => Ok(private.properties_hash != self.properties_hash()?),
        }
    }

    /// Every non-builtin analysis definition reachable from the mappings and
    /// the explicitly added entries, each once
    pub fn collect_analysis(&self) -> Result<AnalysisContext, CodecError> {
        let mut collected = AnalysisContext::new();
        collected.merge(&self.analysis)?;
        for mapping in self.mappings.properties.values() {
            for dependency in mapping.analysis_dependencies() {
                collected.collect(dependency)?;
            }
        }
        Ok(collected)
    }

    /// Body of `PUT /{index}`
    pub fn encode_create_body(&self) -> Result<Value, CodecError> {
        let analysis = self.collect_analysis()?;

        let meta = IndexMeta {
            private: Some(PrivateIndexMeta::for_properties(&self.mappings.properties)?),
            user_defined: self.meta.user_defined.clone(),
        };

        let mut mappings = JsonMap::new();
        put(&mut mappings, "dynamic", &self.mappings.dynamic);
        put(&mut mappings, "enabled", &self.mappings.enabled);
        put(&mut mappings, "_meta", &Some(meta));
        put_value(&mut mappings, "properties", encode_properties(&self.mappings.properties));
        put_extra(&mut mappings, &self.mappings.extra);

        let mut body = JsonMap::new();
        put_value(&mut body, "settings", self.settings.encode(&analysis));
        put_value(&mut body, "mappings", mappings);
        Ok(Value::Object(body))
    }

    /// Reads the response of `GET /{index}`, an object keyed by the concrete
    /// index name
    pub fn decode_fetched_response(
        value: &Value,
        registries: &Registries,
    ) -> Result<Self, CodecError> {
        let Some((name, body)) = value.as_object().and_then(|o| o.iter().next()) else {
            return Err(CodecError::malformed(
                VariantFamily::Mapping,
                MAPPINGS_KIND,
                "",
                "expected an object keyed by index name",
            ));
        };
        Self::decode_fetched(name, body, registries)
    }

    /// Rebuilds an index from its reported definition. The analysis block is
    /// decoded first so that mappings can resolve the analyzers and
    /// normalizers they name.
    pub fn decode_fetched(
        name: &str,
        value: &Value,
        registries: &Registries,
    ) -> Result<Self, CodecError> {
        let (settings, analysis) = match value.get("settings") {
            None | Some(Value::Null) => (IndexSettings::default(), AnalysisContext::new()),
            Some(settings) => {
                IndexSettings::decode(&join_path(name, "settings"), settings, registries)?
            }
        };

        let ctx = DecodeContext::new(registries).with_analysis(&analysis);
        let mappings_path = join_path(name, "mappings");

        let (mappings, meta) = match value.get("mappings") {
            None | Some(Value::Null) => (IndexMappings::default(), IndexMeta::default()),
            Some(Value::Object(fields)) => {
                let mut reader = FieldReader::new(
                    VariantFamily::Mapping,
                    MAPPINGS_KIND,
                    name,
                    &mappings_path,
                    fields,
                );
                let meta = reader.optional("_meta")?.unwrap_or_default();
                let properties = match reader.raw("properties") {
                    None => NamedTable::new(),
                    Some(properties) => {
                        decode_properties(&reader.field_path("properties"), properties, &ctx)?
                    }
                };
                let mappings = IndexMappings {
                    properties,
                    dynamic: reader.optional("dynamic")?,
                    enabled: reader.optional("enabled")?,
                    extra: reader.into_extra(),
                };
                (mappings, meta)
            }
            Some(_) => {
                return Err(CodecError::malformed(
                    VariantFamily::Mapping,
                    MAPPINGS_KIND,
                    mappings_path,
                    "mappings must be an object",
                ));
            }
        };

        Ok(Self {
            name: name.to_string(),
            settings,
            mappings,
            analysis,
            meta,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

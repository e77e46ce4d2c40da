// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::AnalysisContext;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SETTINGS_KIND: &str = "settings";

/// Index-level settings.
///
/// Shard and replica counts are fixed when the index is created. The
/// remaining attributes are assigned by the cluster and only present on an
/// index read back from it.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSettings {
    number_of_shards: u32,
    number_of_replicas: u32,
    creation_date: Option<String>,
    uuid: Option<String>,
    version_created: Option<String>,
    provided_name: Option<String>,
    /// Other settings, such as `refresh_interval`
    pub extra: JsonMap,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl IndexSettings {
    pub fn new(shards: u32, replicas: u32) -> Self {
        Self {
            number_of_shards: shards,
            number_of_replicas: replicas,
            creation_date: None,
            uuid: None,
            version_created: None,
            provided_name: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn number_of_shards(&self) -> u32 {
        self.number_of_shards
    }

    pub fn number_of_replicas(&self) -> u32 {
        self.number_of_replicas
    }

    /// Creation time as reported by the cluster, epoch milliseconds
    pub fn creation_date(&self) -> Option<&str> {
        self.creation_date.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.creation_date.as_deref()?.parse::<i64>().ok()?;
        DateTime::<Utc>::from_timestamp_millis(millis)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    /// Internal id of the server version that created the index
    pub fn version_created(&self) -> Option<&str> {
        self.version_created.as_deref()
    }

    pub fn provided_name(&self) -> Option<&str> {
        self.provided_name.as_deref()
    }

    /// Settings object of a create-index body. Attributes assigned by the
    /// cluster are never sent.
    pub fn encode(&self, analysis: &AnalysisContext) -> Value {
        let mut out = JsonMap::new();
        put_value(&mut out, "number_of_shards", self.number_of_shards);
        put_value(&mut out, "number_of_replicas", self.number_of_replicas);
        if !analysis.is_empty() {
            put_value(&mut out, "analysis", analysis.encode());
        }
        put_extra(&mut out, &self.extra);
        Value::Object(out)
    }

    /// Reads the `settings` of an index together with its analysis block.
    ///
    /// Accepts both the flat form of a create body and the
    /// `{"index": {...}}` form returned by the cluster, where every value is
    /// rendered as a string.
    pub fn decode(
        path: &str,
        value: &Value,
        registries: &Registries,
    ) -> Result<(Self, AnalysisContext), CodecError> {
        let Value::Object(fields) = value else {
            return Err(CodecError::malformed(
                VariantFamily::Mapping,
                SETTINGS_KIND,
                path,
                "settings must be an object",
            ));
        };

        let (path, fields) = match fields.get("index") {
            Some(Value::Object(index)) if fields.len() == 1 => (join_path(path, "index"), index),
            _ => (path.to_string(), fields),
        };

        let mut reader = FieldReader::new(VariantFamily::Mapping, SETTINGS_KIND, "", &path, fields);

        let analysis = match reader.raw("analysis") {
            None => AnalysisContext::new(),
            Some(analysis) => {
                AnalysisContext::decode(analysis, &reader.field_path("analysis"), registries)?
            }
        };

        let version_created = match reader.raw("version") {
            None => None,
            Some(Value::Object(version)) => match version.get("created") {
                Some(Value::String(created)) => Some(created.clone()),
                Some(Value::Number(created)) => Some(created.to_string()),
                _ => None,
            },
            Some(_) => return Err(reader.malformed("version", "expected an object")),
        };

        let settings = Self {
            number_of_shards: reader.lenient_u32("number_of_shards")?.unwrap_or(1),
            number_of_replicas: reader.lenient_u32("number_of_replicas")?.unwrap_or(1),
            creation_date: read_string(&mut reader, "creation_date")?,
            uuid: reader.optional("uuid")?,
            version_created,
            provided_name: reader.optional("provided_name")?,
            extra: reader.into_extra(),
        };

        Ok((settings, analysis))
    }
}

/// Reads a value the cluster may render either as a string or as a number
fn read_string(reader: &mut FieldReader<'_>, key: &str) -> Result<Option<String>, CodecError> {
    match reader.raw(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(reader.malformed(key, "expected a string")),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::codec::{CodecError, NamedTable, VariantFamily};
use crate::{Mapping, encode_properties};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const INDEX_META_SERIAL_VERSION: u32 = 1;

/// Bookkeeping written by this library into `mappings._meta.private`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateIndexMeta {
    pub serial_version: u32,
    /// `sha256:<hex>` of the `properties` the index was created with
    pub properties_hash: String,
}

impl PrivateIndexMeta {
    pub fn for_properties(properties: &NamedTable<Mapping>) -> Result<Self, CodecError> {
        Ok(Self {
            serial_version: INDEX_META_SERIAL_VERSION,
            properties_hash: properties_hash(properties)?,
        })
    }
}

/// Contents of `mappings._meta`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    /// Absent on indices this library did not create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<PrivateIndexMeta>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_defined: BTreeMap<String, String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fingerprint of a `properties` table.
///
/// The table is rendered as canonical JSON before hashing, so the order in
/// which the cluster reports properties back does not affect the result.
pub fn properties_hash(properties: &NamedTable<Mapping>) -> Result<String, CodecError> {
    let normalized = canonical_json::to_string(&encode_properties(properties)).map_err(|e| {
        CodecError::malformed(VariantFamily::Mapping, "properties", "mappings.properties", e)
    })?;

    let mut hasher = sha2::Sha256::new();
    hasher.update(normalized.as_bytes());
    let result = hasher.finalize();

    Ok(format!("sha256:{}", hex::encode(result)))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

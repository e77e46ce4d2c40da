// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use es_model::{DynamicMapping, Index};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const RESOURCE_ALREADY_EXISTS: &str = "resource_already_exists_exception";

#[derive(Serialize)]
struct CacheEntryRef<'a, V: ?Sized> {
    value: &'a V,
}

#[derive(Deserialize)]
struct CacheEntry<V> {
    value: V,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Key-value store kept in a dedicated index. Values are stored unindexed,
/// so any JSON shape is accepted.
///
/// The index is created lazily by the first operation. Two processes may race
/// to create it: the loser's `resource_already_exists_exception` is accepted
/// as success.
pub struct KeyedCache {
    client: Arc<ElasticsearchClient>,
    index_name: String,
    index_ready: tokio::sync::OnceCell<()>,
}

impl KeyedCache {
    pub fn new(client: Arc<ElasticsearchClient>, index_name: impl Into<String>) -> Self {
        Self {
            client,
            index_name: index_name.into(),
            index_ready: tokio::sync::OnceCell::new(),
        }
    }

    /// Cache over the index named in the client config, `None` when the cache
    /// is disabled there
    pub fn from_config(client: Arc<ElasticsearchClient>) -> Option<Self> {
        let config = &client.config().keyed_cache;
        if !config.enabled {
            return None;
        }
        let index_name = config.index_name.clone();
        Some(Self::new(client, index_name))
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Mapping of the cache index: documents are kept but never indexed
    pub fn index_definition(&self) -> Index {
        Index::new(&self.index_name)
            .with_dynamic(DynamicMapping::True)
            .with_enabled(false)
    }

    /// Creates the cache index unless it exists. Runs at most once per
    /// instance.
    pub async fn ensure_index(&self) -> Result<(), ElasticsearchError> {
        self.index_ready
            .get_or_try_init(|| self.create_index_if_missing())
            .await?;
        Ok(())
    }

    async fn create_index_if_missing(&self) -> Result<(), ElasticsearchError> {
        if self.client.index_exists(&self.index_name).await? {
            return Ok(());
        }

        match self.client.create_index(&self.index_definition()).await {
            Ok(_) => {
                tracing::info!(index = %self.index_name, "Created keyed cache index");
                Ok(())
            }
            Err(e) if e.remote_error_type() == Some(RESOURCE_ALREADY_EXISTS) => {
                tracing::info!(
                    index = %self.index_name,
                    "Keyed cache index was created concurrently",
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(level = "debug", name = "KeyedCache::get", skip_all, fields(%key))]
    pub async fn get<V: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<V>, ElasticsearchError> {
        self.ensure_index().await?;

        let response = self
            .client
            .get::<CacheEntry<V>>(&self.index_name, key, &RequestOptions::default())
            .await?;

        Ok(response.and_then(|r| r.into_source()).map(|entry| entry.value))
    }

    #[tracing::instrument(level = "debug", name = "KeyedCache::set", skip_all, fields(%key))]
    pub async fn set<V: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &V,
    ) -> Result<(), ElasticsearchError> {
        self.ensure_index().await?;

        self.client
            .index_document(
                &self.index_name,
                Some(key),
                &CacheEntryRef { value },
                &RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// Removes a key. Returns `false` if it was not present.
    #[tracing::instrument(level = "debug", name = "KeyedCache::remove", skip_all, fields(%key))]
    pub async fn remove(&self, key: &str) -> Result<bool, ElasticsearchError> {
        self.ensure_index().await?;

        match self
            .client
            .delete_document(&self.index_name, key, &RequestOptions::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(ElasticsearchError::DocumentNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

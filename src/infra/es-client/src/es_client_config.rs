// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ElasticsearchClientConfig {
    pub url: Url,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Sent as the `ApiKey` authorization scheme, takes precedence over basic
    /// auth
    pub api_key: Option<ApiKeyConfig>,

    /// Extra root certificate to trust, for clusters with self-signed certs
    pub ca_cert_pem_path: Option<String>,

    /// Prepended to every index name the client touches
    pub index_prefix: String,

    pub timeout_secs: u64,

    pub enable_compression: bool,

    pub keyed_cache: KeyedCacheConfig,
}

impl ElasticsearchClientConfig {
    pub const DEFAULT_URL: &'static str = "http://localhost:9200";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(url: Url) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_index_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.index_prefix = prefix.into();
        self
    }

    pub fn with_keyed_cache(mut self, keyed_cache: KeyedCacheConfig) -> Self {
        self.keyed_cache = keyed_cache;
        self
    }

    /// Concrete name of an index on the cluster
    pub fn prefixed_index_name(&self, name: &str) -> String {
        format!("{}{name}", self.index_prefix)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.url.cannot_be_a_base() {
            return Err(InvalidConfigError::UrlCannotBeABase {
                url: self.url.clone(),
            });
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(InvalidConfigError::PasswordWithoutUsername);
        }
        if self.keyed_cache.enabled && self.keyed_cache.index_name.is_empty() {
            return Err(InvalidConfigError::EmptyCacheIndexName);
        }
        Ok(())
    }
}

impl Default for ElasticsearchClientConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(Self::DEFAULT_URL).unwrap(),
            username: None,
            password: None,
            api_key: None,
            ca_cert_pem_path: None,
            index_prefix: String::new(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            enable_compression: false,
            keyed_cache: KeyedCacheConfig::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ApiKeyConfig {
    pub id: String,
    pub key: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KeyedCacheConfig {
    pub enabled: bool,
    pub index_name: String,
}

impl KeyedCacheConfig {
    pub const DEFAULT_INDEX_NAME: &'static str = "elasticsearch-cache";

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

impl Default for KeyedCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            index_name: Self::DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidConfigError {
    #[error("Elasticsearch URL {url} cannot be used as a base URL")]
    UrlCannotBeABase { url: Url },

    #[error("Elasticsearch password is set without a username")]
    PasswordWithoutUsername,

    #[error("Keyed cache is enabled but its index name is empty")]
    EmptyCacheIndexName,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

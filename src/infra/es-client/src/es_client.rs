// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use bytes::Bytes;
use es_model::*;
use http::Method;
use internal_error::{InternalError, ResultIntoInternal};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Typed operations against one cluster.
///
/// Index names passed to the client are logical names: the configured
/// `index_prefix` is prepended before they reach the wire.
pub struct ElasticsearchClient {
    config: Arc<ElasticsearchClientConfig>,
    transport: Arc<dyn Transport>,
    registries: Arc<Registries>,
}

impl ElasticsearchClient {
    pub fn new(config: Arc<ElasticsearchClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            registries: Registries::global(),
        }
    }

    /// Client talking to the configured URL over HTTP
    pub fn connect(config: ElasticsearchClientConfig) -> Result<Self, InternalError> {
        let transport = ElasticsearchHttpTransport::new(&config)?;
        Ok(Self::new(Arc::new(config), Arc::new(transport)))
    }

    /// Uses registries with extension kinds in place of the builtin set
    pub fn with_registries(mut self, registries: Arc<Registries>) -> Self {
        self.registries = registries;
        self
    }

    pub fn config(&self) -> &ElasticsearchClientConfig {
        &self.config
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Runs a search. A missing index yields `None`.
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::search",
        skip_all,
        fields(%index)
    )]
    pub async fn search<T: DeserializeOwned>(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<Option<SearchResponse<T>>, ElasticsearchError> {
        let mut path = RequestPath::search(&self.config.prefixed_index_name(index))?;
        if let Some(routing) = request.routing() {
            path = path.with_param("routing", routing);
        }

        let Some(body) = self.send(Method::POST, &path, Some(&request.encode())).await? else {
            return Ok(None);
        };

        let resolver = request.aggregation_resolver(&self.registries);
        let response = SearchResponse::from_slice(&body, &resolver)?;

        tracing::debug!(
            took = response.took,
            total_hits = ?response.total_hits(),
            "Search completed",
        );
        Ok(Some(response))
    }

    /// Reads a document by id. A missing document or index yields `None`.
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::get",
        skip_all,
        fields(%index, %id)
    )]
    pub async fn get<T: DeserializeOwned>(
        &self,
        index: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<Option<GetResponse<T>>, ElasticsearchError> {
        let path = RequestPath::document(&self.config.prefixed_index_name(index), Some(id))?
            .with_options(options);

        let Some(body) = self.send(Method::GET, &path, None).await? else {
            return Ok(None);
        };

        let response: GetResponse<T> = parse_body(&body)?;
        if !response.found {
            return Ok(None);
        }
        Ok(Some(response))
    }

    /// Stores a document, replacing an existing one with the same id. Without
    /// an id the cluster assigns one.
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::index_document",
        skip_all,
        fields(%index, ?id)
    )]
    pub async fn index_document<D: Serialize + ?Sized>(
        &self,
        index: &str,
        id: Option<&str>,
        document: &D,
        options: &RequestOptions,
    ) -> Result<WriteResponse, ElasticsearchError> {
        let path = RequestPath::document(&self.config.prefixed_index_name(index), id)?
            .with_options(options);
        let method = if id.is_some() { Method::PUT } else { Method::POST };

        let body = serialize_body(document)?;
        let response = self.send_bytes(method, &path, Some(body)).await?;
        parse_body(&require_body(&path, response)?)
    }

    /// Stores a document that must not exist yet
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::create_document",
        skip_all,
        fields(%index, %id)
    )]
    pub async fn create_document<D: Serialize + ?Sized>(
        &self,
        index: &str,
        id: &str,
        document: &D,
        options: &RequestOptions,
    ) -> Result<WriteResponse, ElasticsearchError> {
        let path = RequestPath::create_document(&self.config.prefixed_index_name(index), id)?
            .with_options(options);

        let body = serialize_body(document)?;
        let response = self.send_bytes(Method::PUT, &path, Some(body)).await?;
        parse_body(&require_body(&path, response)?)
    }

    /// Merges `partial` into an existing document
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::update_document",
        skip_all,
        fields(%index, %id)
    )]
    pub async fn update_document<D: Serialize + ?Sized>(
        &self,
        index: &str,
        id: &str,
        partial: &D,
        options: &RequestOptions,
    ) -> Result<WriteResponse, ElasticsearchError> {
        let path = RequestPath::update_document(&self.config.prefixed_index_name(index), id)?
            .with_options(options);

        let partial = serde_json::to_value(partial).int_err()?;
        match self.send(Method::POST, &path, Some(&json!({ "doc": partial }))).await? {
            Some(body) => parse_body(&body),
            None => Err(ElasticsearchError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            }),
        }
    }

    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::delete_document",
        skip_all,
        fields(%index, %id)
    )]
    pub async fn delete_document(
        &self,
        index: &str,
        id: &str,
        options: &RequestOptions,
    ) -> Result<WriteResponse, ElasticsearchError> {
        let path = RequestPath::document(&self.config.prefixed_index_name(index), Some(id))?
            .with_options(options);

        match self.send(Method::DELETE, &path, None).await? {
            Some(body) => parse_body(&body),
            None => Err(ElasticsearchError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            }),
        }
    }

    /// Creates the index with its settings, collected analysis and mappings
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::create_index",
        skip_all,
        fields(index = %index.name())
    )]
    pub async fn create_index(
        &self,
        index: &Index,
    ) -> Result<CreateIndexResponse, ElasticsearchError> {
        let path = RequestPath::index(&self.config.prefixed_index_name(index.name()))?;
        let body = index.encode_create_body()?;
        let properties_hash = index.properties_hash()?;

        let response = self.send(Method::PUT, &path, Some(&body)).await?;
        let response: CreateIndexResponse = parse_body(&require_body(&path, response)?)?;

        tracing::info!(
            index = %response.index,
            acknowledged = response.acknowledged,
            %properties_hash,
            "Created index",
        );
        Ok(response)
    }

    /// Reads back the definition of an index. The result carries the logical
    /// name the index was requested by.
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::fetch_index",
        skip_all,
        fields(%name)
    )]
    pub async fn fetch_index(&self, name: &str) -> Result<Option<Index>, ElasticsearchError> {
        let path = RequestPath::index(&self.config.prefixed_index_name(name))?;

        let Some(body) = self.send(Method::GET, &path, None).await? else {
            return Ok(None);
        };

        let response: Value = parse_body(&body)?;
        let Some(definition) = response.as_object().and_then(|o| o.values().next()) else {
            return Err(ElasticsearchError::InvalidResponse(serde::de::Error::custom(
                "expected an object keyed by index name",
            )));
        };

        let index = Index::decode_fetched(name, definition, &self.registries)?;
        if index.properties_drifted()? {
            let actual_hash = index.properties_hash()?;
            tracing::warn!(
                index = %name,
                expected_hash = ?index.meta().private.as_ref().map(|p| &p.properties_hash),
                %actual_hash,
                "Index mappings drifted from the ones it was created with",
            );
        }
        Ok(Some(index))
    }

    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::index_exists",
        skip_all,
        fields(%name)
    )]
    pub async fn index_exists(&self, name: &str) -> Result<bool, ElasticsearchError> {
        let path = RequestPath::index(&self.config.prefixed_index_name(name))?;
        Ok(self.send(Method::GET, &path, None).await?.is_some())
    }

    /// Deletes an index. Returns `false` if there was nothing to delete.
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchClient::delete_index",
        skip_all,
        fields(%name)
    )]
    pub async fn delete_index(&self, name: &str) -> Result<bool, ElasticsearchError> {
        let path = RequestPath::index(&self.config.prefixed_index_name(name))?;

        let Some(body) = self.send(Method::DELETE, &path, None).await? else {
            return Ok(false);
        };

        let response: AcknowledgedResponse = parse_body(&body)?;
        Ok(response.acknowledged)
    }

    #[tracing::instrument(level = "debug", name = "ElasticsearchClient::health", skip_all)]
    pub async fn health(&self) -> Result<ClusterHealth, ElasticsearchError> {
        let path = RequestPath::cluster_health();
        let response = self.send(Method::GET, &path, None).await?;
        parse_body(&require_body(&path, response)?)
    }

    async fn send(
        &self,
        method: Method,
        path: &RequestPath,
        body: Option<&Value>,
    ) -> Result<Option<Bytes>, ElasticsearchError> {
        let body = body.map(serialize_body).transpose()?;
        self.send_bytes(method, path, body).await
    }

    async fn send_bytes(
        &self,
        method: Method,
        path: &RequestPath,
        body: Option<Bytes>,
    ) -> Result<Option<Bytes>, ElasticsearchError> {
        self.transport.send(method, &path.to_string(), body).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn serialize_body<B: Serialize + ?Sized>(body: &B) -> Result<Bytes, InternalError> {
    Ok(Bytes::from(serde_json::to_vec(body).int_err()?))
}

fn parse_body<R: DeserializeOwned>(body: &[u8]) -> Result<R, ElasticsearchError> {
    serde_json::from_slice(body).map_err(ElasticsearchError::InvalidResponse)
}

/// Calls where absence is never a valid answer
fn require_body(path: &RequestPath, body: Option<Bytes>) -> Result<Bytes, ElasticsearchError> {
    body.ok_or_else(|| {
        RemoteError {
            status: http::StatusCode::NOT_FOUND.as_u16(),
            error_type: None,
            reason: format!("{path} not found"),
        }
        .into()
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

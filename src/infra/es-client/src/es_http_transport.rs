// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use base64::Engine as _;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use internal_error::{InternalError, ResultIntoInternal};
use url::Url;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const JSON_CONTENT_TYPE: &str = "application/json";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// [`Transport`] over HTTP(S) using `reqwest`
pub struct ElasticsearchHttpTransport {
    client: reqwest::Client,
    base_url: Url,
    authorization: Option<HeaderValue>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl ElasticsearchHttpTransport {
    pub fn new(config: &ElasticsearchClientConfig) -> Result<Self, InternalError> {
        config.validate().int_err()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .gzip(config.enable_compression);

        if let Some(pem_path) = &config.ca_cert_pem_path {
            let pem = std::fs::read(pem_path)
                .context_int_err(format!("reading CA certificate {pem_path}"))?;
            let cert = reqwest::Certificate::from_pem(&pem).int_err()?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().int_err()?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            authorization: authorization_header(config)?,
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn url_for(&self, path: &str) -> Result<Url, UrlConstructionError> {
        let joined = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| UrlConstructionError::new(format!("{joined}: {e}")))
    }

    fn connection_failed(&self, e: reqwest::Error) -> ElasticsearchError {
        ElasticsearchError::ConnectionFailed {
            url: self.base_url.to_string(),
            source: e.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for ElasticsearchHttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Option<Bytes>, ElasticsearchError> {
        let url = self.url_for(path)?;

        tracing::debug!(%method, %path, "Sending Elasticsearch request");
        if let Some(observer) = &self.observer {
            observer.on_request(&method, path, body.as_deref());
        }

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization.clone());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.connection_failed(e))?;
        let status = response.status();
        let response_body = response.bytes().await.map_err(|e| self.connection_failed(e))?;

        tracing::debug!(%status, len = response_body.len(), "Received Elasticsearch response");
        if let Some(observer) = &self.observer {
            observer.on_response(&method, path, status, &response_body);
        }

        interpret_response(status, response_body)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `ApiKey` when a key is configured, otherwise `Basic` when both username and
/// password are set
fn authorization_header(
    config: &ElasticsearchClientConfig,
) -> Result<Option<HeaderValue>, InternalError> {
    let value = match (&config.api_key, &config.username, &config.password) {
        (Some(api_key), _, _) => {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", api_key.id, api_key.key));
            format!("ApiKey {encoded}")
        }
        (None, Some(username), Some(password)) => {
            let encoded =
                base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
            format!("Basic {encoded}")
        }
        _ => return Ok(None),
    };

    let mut header = HeaderValue::from_str(&value).int_err()?;
    header.set_sensitive(true);
    Ok(Some(header))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Asynchronous client for the Elasticsearch REST API.
//!
//! [`ElasticsearchClient`] turns the typed bodies of `es-model` into requests
//! and sends them through a [`Transport`]. The bundled transport is
//! [`ElasticsearchHttpTransport`]; tests substitute `MockTransport` (enabled
//! by the `testing` feature).

mod es_client;
mod es_client_config;
mod es_error;
mod es_http_transport;
mod es_keyed_cache;
mod es_request_path;
mod es_transport;

pub use es_client::*;
pub use es_client_config::*;
pub use es_error::*;
pub use es_http_transport::*;
pub use es_keyed_cache::*;
pub use es_request_path::*;
pub use es_transport::*;

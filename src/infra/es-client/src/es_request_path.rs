// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::UrlConstructionError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// When changes made by a write become visible to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Refresh {
    True,
    False,
    WaitFor,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Query string parameters of document calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub routing: Option<String>,
    pub version: Option<u64>,
    pub stored_fields: Option<Vec<String>>,
    pub realtime: Option<bool>,
    pub refresh: Option<Refresh>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_stored_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.stored_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = Some(realtime);
        self
    }

    pub fn with_refresh(mut self, refresh: Refresh) -> Self {
        self.refresh = Some(refresh);
        self
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(routing) = &self.routing {
            params.push(("routing", routing.clone()));
        }
        if let Some(version) = self.version {
            params.push(("version", version.to_string()));
        }
        if let Some(stored_fields) = &self.stored_fields {
            params.push(("stored_fields", stored_fields.join(",")));
        }
        if let Some(realtime) = self.realtime {
            params.push(("realtime", realtime.to_string()));
        }
        if let Some(refresh) = self.refresh {
            params.push(("refresh", refresh.to_string()));
        }
        params
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Path of a request relative to the cluster URL, with its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
    params: Vec<(&'static str, String)>,
}

impl RequestPath {
    /// `/{index}`
    pub fn index(index: &str) -> Result<Self, UrlConstructionError> {
        Ok(Self {
            segments: vec![encode_segment("index name", index)?],
            params: Vec::new(),
        })
    }

    /// `/{index}/_search`
    pub fn search(index: &str) -> Result<Self, UrlConstructionError> {
        Ok(Self::index(index)?.push_literal("_search"))
    }

    /// `/{index}/_doc/{id}`, or `/{index}/_doc` to let the cluster assign an id
    pub fn document(index: &str, id: Option<&str>) -> Result<Self, UrlConstructionError> {
        let path = Self::index(index)?.push_literal("_doc");
        match id {
            Some(id) => path.push_id(id),
            None => Ok(path),
        }
    }

    /// `/{index}/_create/{id}`, fails if the document already exists
    pub fn create_document(index: &str, id: &str) -> Result<Self, UrlConstructionError> {
        Self::index(index)?.push_literal("_create").push_id(id)
    }

    /// `/{index}/_update/{id}`
    pub fn update_document(index: &str, id: &str) -> Result<Self, UrlConstructionError> {
        Self::index(index)?.push_literal("_update").push_id(id)
    }

    /// `/_cluster/health`
    pub fn cluster_health() -> Self {
        Self {
            segments: vec!["_cluster".to_string(), "health".to_string()],
            params: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: &RequestOptions) -> Self {
        self.params.extend(options.query_params());
        self
    }

    pub fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    fn push_literal(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    fn push_id(mut self, id: &str) -> Result<Self, UrlConstructionError> {
        self.segments.push(encode_segment("document id", id)?);
        Ok(self)
    }
}

impl std::fmt::Display for RequestPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}=")?;
            // Commas separate list values and are sent as is
            for (j, part) in value.split(',').enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                f.write_str(&urlencoding::encode(part))?;
            }
        }
        Ok(())
    }
}

fn encode_segment(what: &str, value: &str) -> Result<String, UrlConstructionError> {
    if value.is_empty() {
        return Err(UrlConstructionError::new(format!("{what} is empty")));
    }
    Ok(urlencoding::encode(value).into_owned())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

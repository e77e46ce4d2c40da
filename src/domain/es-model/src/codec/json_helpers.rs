// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Serialize;
use serde_json::{Value, json};

use super::JsonMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn put<T: Serialize>(out: &mut JsonMap, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        out.insert(key.to_string(), json!(value));
    }
}

pub(crate) fn put_value(out: &mut JsonMap, key: &str, value: impl Into<Value>) {
    out.insert(key.to_string(), value.into());
}

pub(crate) fn put_list<T: Serialize>(out: &mut JsonMap, key: &str, values: &[T]) {
    if !values.is_empty() {
        out.insert(key.to_string(), json!(values));
    }
}

/// Writes unknown settings back, never overriding a known field
pub(crate) fn put_extra(out: &mut JsonMap, extra: &JsonMap) {
    for (key, value) in extra {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

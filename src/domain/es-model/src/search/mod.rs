// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod search_request;
mod search_response;
mod sort_spec;
mod source_filter;

pub use search_request::*;
pub use search_response::*;
pub use sort_spec::*;
pub use source_filter::*;

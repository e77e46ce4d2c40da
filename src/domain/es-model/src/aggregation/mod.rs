// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod aggregation_request;
mod aggregation_resolver;
mod aggregation_response;
mod bucket_aggregations;
mod metric_aggregations;

pub use aggregation_request::*;
pub use aggregation_resolver::*;
pub use aggregation_response::*;
pub use bucket_aggregations::*;
pub use metric_aggregations::*;

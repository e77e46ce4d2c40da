// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod compound_queries;
mod full_text_queries;
mod query_variant;
mod script;
mod term_level_queries;

pub use compound_queries::*;
pub use full_text_queries::*;
pub use query_variant::*;
pub use script::*;
pub use term_level_queries::*;

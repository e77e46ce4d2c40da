// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod index_meta;
mod index_model;
mod index_responses;
mod index_settings;

pub use index_meta::*;
pub use index_model::*;
pub use index_responses::*;
pub use index_settings::*;

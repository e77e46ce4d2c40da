// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod codec_error;
mod extension_variant;
mod field_reader;
mod json_helpers;
mod keyed;
mod named_table;
mod registries;
mod tagged;
mod variant_family;
mod variant_registry;

pub use codec_error::*;
pub use extension_variant::*;
pub use field_reader::*;
pub(crate) use json_helpers::*;
pub use keyed::*;
pub use named_table::*;
pub use registries::*;
pub use tagged::*;
pub use variant_family::*;
pub use variant_registry::*;

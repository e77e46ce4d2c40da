// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod mapping_params;
mod mapping_variant;
mod structural_mappings;
mod text_mappings;
mod value_mappings;

pub use mapping_params::*;
pub use mapping_variant::*;
pub use structural_mappings::*;
pub use text_mappings::*;
pub use value_mappings::*;

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod analysis_component;
mod analysis_context;
mod analyzer;
mod char_filter;
mod normalizer;
mod token_filter;
mod tokenizer;
mod word_list;

pub use analysis_component::*;
pub use analysis_context::*;
pub use analyzer::*;
pub use char_filter::*;
pub use normalizer::*;
pub use token_filter::*;
pub use tokenizer::*;
pub use word_list::*;

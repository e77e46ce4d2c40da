// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Typed model of the Elasticsearch REST API bodies.
//!
//! The core of the crate is the variant codec in [`codec`]: every
//! configuration family that Elasticsearch discriminates by a `type` field
//! (analyzers, tokenizers, token filters, character filters, normalizers,
//! field mappings) or by a wrapping key (queries, aggregations) is a Rust enum
//! with one arm per known kind plus an `Extension` arm, decoded through a
//! [`VariantRegistry`] of `discriminant -> decode fn` entries. Registries for
//! all families are bundled in [`Registries`]; the builtin set is available
//! process-wide through [`Registries::global`].
//!
//! Cross references between analysis components (a custom analyzer naming its
//! tokenizer and filters) are resolved through a per-operation
//! [`AnalysisContext`], and aggregation responses, which carry no type tag of
//! their own, are decoded through an [`AggregationResolver`] derived from the
//! originating [`SearchRequest`].

mod aggregation;
mod analysis;
mod cluster;
pub mod codec;
mod document;
mod index;
mod mapping;
mod query;
mod search;

pub use aggregation::*;
pub use analysis::*;
pub use cluster::*;
pub use codec::{
    BuiltinFn,
    CodecError,
    DecodeContext,
    DecodeFn,
    ExtensionVariant,
    FieldReader,
    JsonMap,
    KeyedVariant,
    NamedTable,
    Registries,
    TaggedVariant,
    VariantFamily,
    VariantRegistry,
};
pub use document::*;
pub use index::*;
pub use mapping::*;
pub use query::*;
pub use search::*;

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOptions {
    Docs,
    Freqs,
    Positions,
    Offsets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermVector {
    No,
    Yes,
    WithPositions,
    WithOffsets,
    WithPositionsOffsets,
    WithPositionsPayloads,
    WithPositionsOffsetsPayloads,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Handling of fields not present in the mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicMapping {
    True,
    False,
    Strict,
    Runtime,
}

impl Serialize for DynamicMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::True => serializer.serialize_bool(true),
            Self::False => serializer.serialize_bool(false),
            Self::Strict => serializer.serialize_str("strict"),
            Self::Runtime => serializer.serialize_str("runtime"),
        }
    }
}

impl<'de> Deserialize<'de> for DynamicMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bool(bool),
            Str(String),
        }

        // Mappings read back from a cluster carry booleans as strings
        match Repr::deserialize(deserializer)? {
            Repr::Bool(true) => Ok(Self::True),
            Repr::Bool(false) => Ok(Self::False),
            Repr::Str(s) => match s.as_str() {
                "true" => Ok(Self::True),
                "false" => Ok(Self::False),
                "strict" => Ok(Self::Strict),
                "runtime" => Ok(Self::Runtime),
                other => Err(serde::de::Error::custom(format!(
                    "unknown dynamic mapping mode '{other}'"
                ))),
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum NumericType {
    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    HalfFloat,
    ScaledFloat,
    UnsignedLong,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum DateType {
    Date,
    DateNanos,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum RangeType {
    IntegerRange,
    LongRange,
    FloatRange,
    DoubleRange,
    DateRange,
    IpRange,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectKind {
    Object,
    Nested,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

use super::*;
use crate::codec::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn parse_kind<K: std::str::FromStr>(reader: &FieldReader<'_>) -> Result<K, CodecError> {
    reader
        .kind()
        .parse::<K>()
        .map_err(|_| CodecError::unknown_kind(reader.family(), reader.kind(), reader.path()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct NumericMapping {
    pub kind: NumericType,
    pub coerce: Option<bool>,
    pub boost: Option<f64>,
    pub doc_values: Option<bool>,
    pub ignore_malformed: Option<bool>,
    pub index: Option<bool>,
    pub null_value: Option<serde_json::Number>,
    pub store: Option<bool>,
    /// Mandatory for `scaled_float`
    pub scaling_factor: Option<f64>,
    pub copy_to: Vec<String>,
    pub extra: JsonMap,
}

impl NumericMapping {
    pub fn new(kind: NumericType) -> Self {
        Self {
            kind,
            coerce: None,
            boost: None,
            doc_values: None,
            ignore_malformed: None,
            index: None,
            null_value: None,
            store: None,
            scaling_factor: None,
            copy_to: Vec::new(),
            extra: JsonMap::new(),
        }
    }

    pub fn scaled_float(scaling_factor: f64) -> Self {
        Self {
            scaling_factor: Some(scaling_factor),
            ..Self::new(NumericType::ScaledFloat)
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        let kind = parse_kind::<NumericType>(&reader)?;

        let scaling_factor = reader.optional("scaling_factor")?;
        if kind == NumericType::ScaledFloat && scaling_factor.is_none() {
            return Err(reader.malformed("scaling_factor", "required for scaled_float"));
        }

        Ok(Mapping::Numeric(Self {
            kind,
            coerce: reader.optional("coerce")?,
            boost: reader.optional("boost")?,
            doc_values: reader.optional("doc_values")?,
            ignore_malformed: reader.optional("ignore_malformed")?,
            index: reader.optional("index")?,
            null_value: reader.optional("null_value")?,
            store: reader.optional("store")?,
            scaling_factor,
            copy_to: reader.string_or_list("copy_to")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "coerce", &self.coerce);
        put(out, "boost", &self.boost);
        put(out, "doc_values", &self.doc_values);
        put(out, "ignore_malformed", &self.ignore_malformed);
        put(out, "index", &self.index);
        put(out, "null_value", &self.null_value);
        put(out, "store", &self.store);
        put(out, "scaling_factor", &self.scaling_factor);
        put_list(out, "copy_to", &self.copy_to);
        put_extra(out, &self.extra);
    }
}

impl From<NumericMapping> for Mapping {
    fn from(value: NumericMapping) -> Self {
        Self::Numeric(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct DateMapping {
    pub kind: DateType,
    pub boost: Option<f64>,
    pub doc_values: Option<bool>,
    /// Joda-style format list separated by `||`
    pub format: Option<String>,
    pub locale: Option<String>,
    pub ignore_malformed: Option<bool>,
    pub index: Option<bool>,
    pub null_value: Option<String>,
    pub store: Option<bool>,
    pub copy_to: Vec<String>,
    pub extra: JsonMap,
}

impl DateMapping {
    pub fn new(kind: DateType) -> Self {
        Self {
            kind,
            boost: None,
            doc_values: None,
            format: None,
            locale: None,
            ignore_malformed: None,
            index: None,
            null_value: None,
            store: None,
            copy_to: Vec::new(),
            extra: JsonMap::new(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Date(Self {
            kind: parse_kind(&reader)?,
            boost: reader.optional("boost")?,
            doc_values: reader.optional("doc_values")?,
            format: reader.optional("format")?,
            locale: reader.optional("locale")?,
            ignore_malformed: reader.optional("ignore_malformed")?,
            index: reader.optional("index")?,
            null_value: reader.optional("null_value")?,
            store: reader.optional("store")?,
            copy_to: reader.string_or_list("copy_to")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "boost", &self.boost);
        put(out, "doc_values", &self.doc_values);
        put(out, "format", &self.format);
        put(out, "locale", &self.locale);
        put(out, "ignore_malformed", &self.ignore_malformed);
        put(out, "index", &self.index);
        put(out, "null_value", &self.null_value);
        put(out, "store", &self.store);
        put_list(out, "copy_to", &self.copy_to);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct RangeMapping {
    pub kind: RangeType,
    pub coerce: Option<bool>,
    pub boost: Option<f64>,
    pub index: Option<bool>,
    pub store: Option<bool>,
    /// Only meaningful for `date_range`
    pub format: Option<String>,
    pub extra: JsonMap,
}

impl RangeMapping {
    pub fn new(kind: RangeType) -> Self {
        Self {
            kind,
            coerce: None,
            boost: None,
            index: None,
            store: None,
            format: None,
            extra: JsonMap::new(),
        }
    }

    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Range(Self {
            kind: parse_kind(&reader)?,
            coerce: reader.optional("coerce")?,
            boost: reader.optional("boost")?,
            index: reader.optional("index")?,
            store: reader.optional("store")?,
            format: reader.optional("format")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "coerce", &self.coerce);
        put(out, "boost", &self.boost);
        put(out, "index", &self.index);
        put(out, "store", &self.store);
        put(out, "format", &self.format);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanMapping {
    pub boost: Option<f64>,
    pub doc_values: Option<bool>,
    pub index: Option<bool>,
    pub null_value: Option<bool>,
    pub store: Option<bool>,
    pub extra: JsonMap,
}

impl BooleanMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Boolean(Self {
            boost: reader.optional("boost")?,
            doc_values: reader.optional("doc_values")?,
            index: reader.optional("index")?,
            null_value: reader.optional("null_value")?,
            store: reader.optional("store")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "boost", &self.boost);
        put(out, "doc_values", &self.doc_values);
        put(out, "index", &self.index);
        put(out, "null_value", &self.null_value);
        put(out, "store", &self.store);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Base64 encoded blob, not searchable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryMapping {
    pub doc_values: Option<bool>,
    pub store: Option<bool>,
    pub extra: JsonMap,
}

impl BinaryMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Binary(Self {
            doc_values: reader.optional("doc_values")?,
            store: reader.optional("store")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "doc_values", &self.doc_values);
        put(out, "store", &self.store);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpMapping {
    pub boost: Option<f64>,
    pub doc_values: Option<bool>,
    pub ignore_malformed: Option<bool>,
    pub index: Option<bool>,
    pub null_value: Option<String>,
    pub store: Option<bool>,
    pub extra: JsonMap,
}

impl IpMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::Ip(Self {
            boost: reader.optional("boost")?,
            doc_values: reader.optional("doc_values")?,
            ignore_malformed: reader.optional("ignore_malformed")?,
            index: reader.optional("index")?,
            null_value: reader.optional("null_value")?,
            store: reader.optional("store")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "boost", &self.boost);
        put(out, "doc_values", &self.doc_values);
        put(out, "ignore_malformed", &self.ignore_malformed);
        put(out, "index", &self.index);
        put(out, "null_value", &self.null_value);
        put(out, "store", &self.store);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoPointMapping {
    pub ignore_malformed: Option<bool>,
    pub ignore_z_value: Option<bool>,
    /// Any of the accepted point notations
    pub null_value: Option<Value>,
    pub extra: JsonMap,
}

impl GeoPointMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::GeoPoint(Self {
            ignore_malformed: reader.optional("ignore_malformed")?,
            ignore_z_value: reader.optional("ignore_z_value")?,
            null_value: reader.raw("null_value").cloned(),
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "ignore_malformed", &self.ignore_malformed);
        put(out, "ignore_z_value", &self.ignore_z_value);
        put(out, "null_value", &self.null_value);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoShapeMapping {
    pub orientation: Option<String>,
    pub ignore_malformed: Option<bool>,
    pub ignore_z_value: Option<bool>,
    pub coerce: Option<bool>,
    pub extra: JsonMap,
}

impl GeoShapeMapping {
    pub(crate) fn decode(
        mut reader: FieldReader<'_>,
        _: &DecodeContext<'_>,
    ) -> Result<Mapping, CodecError> {
        Ok(Mapping::GeoShape(Self {
            orientation: reader.optional("orientation")?,
            ignore_malformed: reader.optional("ignore_malformed")?,
            ignore_z_value: reader.optional("ignore_z_value")?,
            coerce: reader.optional("coerce")?,
            extra: reader.into_extra(),
        }))
    }

    pub(crate) fn encode_fields(&self, out: &mut JsonMap) {
        put(out, "orientation", &self.orientation);
        put(out, "ignore_malformed", &self.ignore_malformed);
        put(out, "ignore_z_value", &self.ignore_z_value);
        put(out, "coerce", &self.coerce);
        put_extra(out, &self.extra);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

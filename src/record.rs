// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequential composition of named fields.
//!
//! Just enough structure to place string fields inside a larger record:
//! fields are parsed in order and each result is added to the context seen
//! by the fields after it.
//!
//! ```
//! use charwise::record::{Record, UInt8};
//! use charwise::string::fixed_length_from_encoding;
//! use charwise::{Param, Value};
//!
//! # fn main() -> charwise::Result<()> {
//! let record = Record::new()
//!     .field("length", UInt8)
//!     .field("data", fixed_length_from_encoding("ascii", Param::field("length"))?);
//!
//! let parsed = record.parse_bytes(b"\x02abcd")?;
//! assert_eq!(parsed.get("data"), Some(&Value::from("ab")));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::core::{CharwiseError, Context, Result, Value};
use crate::field::Field;
use crate::io::{ByteSink, ByteSource, SliceSource};

/// Ordered list of named fields.
#[derive(Clone, Default)]
pub struct Record {
    fields: Vec<(String, Arc<dyn Field>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, field: impl Field + 'static) -> Self {
        self.fields.push((name.into(), Arc::new(field)));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse every field in order, returning the filled context.
    pub fn parse_fields(&self, src: &mut dyn ByteSource, path: &str) -> Result<Context> {
        let mut ctx = Context::new();
        for (name, field) in &self.fields {
            let field_path = format!("{path} -> {name}");
            let value = field.parse(&mut *src, &ctx, &field_path)?;
            ctx.insert(name.clone(), value);
        }
        Ok(ctx)
    }

    /// Build every field from `values`, which also serves as the context.
    pub fn build_fields(
        &self,
        values: &Context,
        sink: &mut dyn ByteSink,
        path: &str,
    ) -> Result<Vec<u8>> {
        let mut written = Vec::new();
        for (name, field) in &self.fields {
            let field_path = format!("{path} -> {name}");
            let value = values
                .get(name)
                .ok_or_else(|| CharwiseError::context_missing(name.clone()))?;
            written.extend(field.build(value, &mut *sink, values, &field_path)?);
        }
        Ok(written)
    }

    /// Parse from a byte slice.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Context> {
        self.parse_fields(&mut SliceSource::new(data), "(parsing)")
    }

    /// Build into a fresh buffer.
    pub fn build_bytes(&self, values: &Context) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.build_fields(values, &mut out, "(building)")?;
        Ok(out)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(name, _)| name))
            .finish()
    }
}

impl Field for Record {
    /// Nested records start from an empty context.
    fn parse(&self, src: &mut dyn ByteSource, _ctx: &Context, path: &str) -> Result<Value> {
        self.parse_fields(src, path).map(Value::Struct)
    }

    fn build(
        &self,
        value: &Value,
        sink: &mut dyn ByteSink,
        _ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        let values = value
            .as_struct()
            .ok_or_else(|| CharwiseError::context_type(path, "struct", value.type_name()))?;
        self.build_fields(values, sink, path)
    }

    fn static_size(&self, ctx: &Context, path: &str) -> Result<usize> {
        self.fields.iter().try_fold(0, |total, (name, field)| {
            Ok(total + field.static_size(ctx, &format!("{path} -> {name}"))?)
        })
    }
}

/// Single unsigned byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct UInt8;

impl Field for UInt8 {
    fn parse(&self, src: &mut dyn ByteSource, _ctx: &Context, _path: &str) -> Result<Value> {
        let bytes = src.read_bytes(1)?;
        Ok(Value::UInt(bytes[0].into()))
    }

    fn build(
        &self,
        value: &Value,
        sink: &mut dyn ByteSink,
        _ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        let byte = value
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| CharwiseError::context_type(path, "byte", value.type_name()))?;
        sink.write_bytes(&[byte])?;
        Ok(vec![byte])
    }

    fn static_size(&self, _ctx: &Context, _path: &str) -> Result<usize> {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Param;
    use crate::string::{fixed_length_from_encoding, linux_line};

    fn length_prefixed() -> Record {
        Record::new().field("length", UInt8).field(
            "data",
            fixed_length_from_encoding("ascii", Param::field("length")).unwrap(),
        )
    }

    #[test]
    fn test_length_from_sibling() {
        let record = length_prefixed();
        let mut src = SliceSource::new(b"\x02abcd");
        let ctx = record.parse_fields(&mut src, "(parsing)").unwrap();
        assert_eq!(ctx.get("length"), Some(&Value::UInt(2)));
        assert_eq!(ctx.get("data"), Some(&Value::from("ab")));
        assert_eq!(src.rest(), b"cd");
    }

    #[test]
    fn test_error_path_names_field() {
        let record = length_prefixed();
        let err = Record::new()
            .field("inner", record)
            .parse_bytes(b"\x00")
            .unwrap_err();
        assert_eq!(
            err,
            CharwiseError::empty_match("(parsing) -> inner -> data")
        );
    }

    #[test]
    fn test_build_uses_values_as_context() {
        let record = length_prefixed();
        let values = Context::new().with("length", 3u8).with("data", "xyz");
        assert_eq!(record.build_bytes(&values).unwrap(), b"\x03xyz");
    }

    #[test]
    fn test_build_missing_field() {
        let record = length_prefixed();
        let values = Context::new().with("length", 3u8);
        assert_eq!(
            record.build_bytes(&values).unwrap_err(),
            CharwiseError::context_missing("data")
        );
    }

    #[test]
    fn test_uint8_rejects_large_values() {
        let mut out = Vec::new();
        let err = UInt8
            .build(&Value::UInt(256), &mut out, &Context::new(), "n")
            .unwrap_err();
        assert!(matches!(err, CharwiseError::ContextType { .. }));
    }

    #[test]
    fn test_static_size_sums_fields() {
        let record = Record::new()
            .field("a", UInt8)
            .field("b", fixed_length_from_encoding("u16", 3).unwrap());
        assert_eq!(record.static_size(&Context::new(), "r").unwrap(), 7);

        let unsized_record = Record::new().field(
            "line",
            linux_line(crate::encoding::lookup("ascii").unwrap(), true, false),
        );
        assert!(matches!(
            unsized_record.static_size(&Context::new(), "r"),
            Err(CharwiseError::SizeUnknown { .. })
        ));
    }
}

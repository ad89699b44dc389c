// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ordered first-success alternation between string specifications.

use tracing::trace;

use super::engine::CharString;
use crate::core::{CharwiseError, Context, Result, Value};
use crate::field::Field;
use crate::io::{ByteSink, ByteSource, RecordingSource, SliceSource};

/// Tries each alternative in order and keeps the first that succeeds.
///
/// Bytes consumed by a failed alternative are pushed back to the source
/// before the next one runs, so every alternative starts at the same
/// position. If all fail, the error of the last one is returned.
#[derive(Debug, Clone)]
pub struct FirstOf {
    alternatives: Vec<CharString>,
}

impl FirstOf {
    pub fn new(alternatives: Vec<CharString>) -> Self {
        Self { alternatives }
    }

    pub fn parse(&self, src: &mut dyn ByteSource, ctx: &Context, path: &str) -> Result<String> {
        let mut last_err = None;
        for (index, alternative) in self.alternatives.iter().enumerate() {
            let mut attempt = RecordingSource::new(&mut *src);
            match alternative.parse(&mut attempt, ctx, path) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let rewound = attempt.rewind();
                    trace!(
                        "{}: alternative {} failed ({}), rewound {} bytes",
                        path,
                        index,
                        e,
                        rewound
                    );
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| CharwiseError::empty_match(path)))
    }

    /// Build with the first alternative that accepts `value`.
    ///
    /// Each attempt is built into a scratch buffer; only the successful one
    /// reaches `sink`.
    pub fn build(
        &self,
        value: &str,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        let mut last_err = None;
        for alternative in &self.alternatives {
            let mut scratch = Vec::new();
            match alternative.build(value, &mut scratch, ctx, path) {
                Ok(bytes) => {
                    sink.write_bytes(&scratch)?;
                    return Ok(bytes);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| CharwiseError::empty_match(path)))
    }

    /// Parse from a byte slice with an empty context.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<String> {
        self.parse(&mut SliceSource::new(data), &Context::new(), "(parsing)")
    }

    /// Build into a fresh buffer with an empty context.
    pub fn build_bytes(&self, value: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.build(value, &mut out, &Context::new(), "(building)")?;
        Ok(out)
    }
}

impl Field for FirstOf {
    fn parse(&self, src: &mut dyn ByteSource, ctx: &Context, path: &str) -> Result<Value> {
        FirstOf::parse(self, src, ctx, path).map(Value::String)
    }

    fn build(
        &self,
        value: &Value,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        let text = value
            .as_str()
            .ok_or_else(|| CharwiseError::context_type(path, "string", value.type_name()))?;
        FirstOf::build(self, text, sink, ctx, path)
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Entry points exposed to a surrounding parsing protocol.

use crate::core::{CharwiseError, Context, Result, Value};
use crate::io::{ByteSink, ByteSource};

/// A parseable and buildable field of a binary layout.
///
/// Implementations hold configuration only; everything that changes during a
/// parse stays local to the call.
pub trait Field: Send + Sync {
    /// Parse one value from `src`. `ctx` holds the sibling fields parsed
    /// before this one; `path` is only used in diagnostics.
    fn parse(&self, src: &mut dyn ByteSource, ctx: &Context, path: &str) -> Result<Value>;

    /// Write `value` to `sink`, returning the bytes written.
    fn build(
        &self,
        value: &Value,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>>;

    /// Size in bytes, if it does not depend on the data.
    fn static_size(&self, _ctx: &Context, path: &str) -> Result<usize> {
        Err(CharwiseError::size_unknown(path))
    }
}

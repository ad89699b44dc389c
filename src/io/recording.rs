// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! A source wrapper that remembers what it handed out.

use super::source::ByteSource;
use crate::core::Result;

/// Records every byte read through it so the caller can give them back.
///
/// Used by alternations: an alternative that fails has its consumed bytes
/// pushed back onto the underlying source before the next one is tried.
pub struct RecordingSource<'a> {
    inner: &'a mut dyn ByteSource,
    recorded: Vec<u8>,
}

impl<'a> RecordingSource<'a> {
    pub fn new(inner: &'a mut dyn ByteSource) -> Self {
        Self {
            inner,
            recorded: Vec::new(),
        }
    }

    /// Bytes read so far (and not unread).
    pub fn recorded(&self) -> &[u8] {
        &self.recorded
    }

    /// Push every recorded byte back onto the wrapped source.
    pub fn rewind(mut self) -> usize {
        let n = self.recorded.len();
        self.inner.unread(&self.recorded);
        self.recorded.clear();
        n
    }
}

impl ByteSource for RecordingSource<'_> {
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let bytes = self.inner.read_bytes(n)?;
        self.recorded.extend_from_slice(&bytes);
        Ok(bytes)
    }

    fn unread(&mut self, bytes: &[u8]) {
        let keep = self.recorded.len().saturating_sub(bytes.len());
        self.recorded.truncate(keep);
        self.inner.unread(bytes);
    }

    fn position(&self) -> u64 {
        self.inner.position()
    }
}

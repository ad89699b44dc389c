// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte sources with bounded reads.
//!
//! A [`ByteSource`] hands out exactly the number of bytes requested or fails
//! with [`CharwiseError::Underrun`]. Sources never seek; the only way back is
//! [`ByteSource::unread`], which returns bytes that were just read so an
//! alternative parse can see them again.

use std::io::Read;

use crate::core::{CharwiseError, Result};

/// Bounded byte reads over some input.
pub trait ByteSource {
    /// Read exactly `n` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CharwiseError::Underrun`] when fewer than `n` bytes remain.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Push back bytes obtained from the most recent reads.
    ///
    /// `bytes` must be a suffix of what was read, in the order it was read.
    fn unread(&mut self, bytes: &[u8]);

    /// Number of bytes consumed so far.
    fn position(&self) -> u64;
}

/// Source over an in-memory byte slice.
///
/// A read that would underrun does not advance the cursor.
///
/// # Example
///
/// ```
/// use charwise::io::{ByteSource, SliceSource};
///
/// let mut src = SliceSource::new(b"abc");
/// assert_eq!(src.read_bytes(2).unwrap(), b"ab");
/// assert!(src.read_bytes(2).is_err());
/// assert_eq!(src.remaining(), 1);
/// ```
pub struct SliceSource<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// The unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.offset.min(self.data.len())..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if n > self.remaining() {
            return Err(CharwiseError::underrun(
                n,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let bytes = self.data[self.offset..self.offset + n].to_vec();
        self.offset += n;
        Ok(bytes)
    }

    /// Unreading more than was consumed stops at the start of the buffer.
    fn unread(&mut self, bytes: &[u8]) {
        self.offset = self.offset.saturating_sub(bytes.len());
    }

    #[inline]
    fn position(&self) -> u64 {
        self.offset as u64
    }
}

/// Source over any [`Read`] implementation.
///
/// Unread bytes are kept in a pushback buffer and served first. Bytes of a
/// short read are kept there too, so like [`SliceSource`] a failed read
/// leaves the source where it was.
pub struct ReaderSource<R> {
    inner: R,
    pushback: Vec<u8>,
    position: u64,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: Vec::new(),
            position: 0,
        }
    }

    /// Recover the wrapped reader. Pushed-back bytes are dropped.
    pub fn into_inner(self) -> R {
        self.inner
    }

    // pushback is stored reversed so pop() yields the next byte
    fn restore(&mut self, bytes: &[u8]) {
        self.pushback.extend(bytes.iter().rev());
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            match self.pushback.pop() {
                Some(b) => out.push(b),
                None => break,
            }
        }

        let start = out.len();
        out.resize(n, 0);
        let mut filled = start;
        while filled < n {
            match self.inner.read(&mut out[filled..]) {
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.restore(&out[..filled]);
                    return Err(e.into());
                }
            }
        }

        if filled < n {
            self.restore(&out[..filled]);
            return Err(CharwiseError::underrun(n, filled, self.position));
        }
        self.position += n as u64;
        Ok(out)
    }

    fn unread(&mut self, bytes: &[u8]) {
        self.restore(bytes);
        self.position = self.position.saturating_sub(bytes.len() as u64);
    }

    fn position(&self) -> u64 {
        self.position
    }
}

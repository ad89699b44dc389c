// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte sinks for building.

use std::io::Write;

use crate::core::Result;

/// Destination for encoded bytes.
///
/// Implemented for every [`Write`], so a `Vec<u8>` or a file can be used
/// directly.
pub trait ByteSink {
    /// Write all of `bytes`.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_appends() {
        let mut out = Vec::new();
        out.write_bytes(b"ab").unwrap();
        out.write_bytes(b"c").unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn test_dyn_sink() {
        let mut out: Vec<u8> = Vec::new();
        let sink: &mut dyn ByteSink = &mut out;
        sink.write_bytes(&[0xFF]).unwrap();
        assert_eq!(out, vec![0xFF]);
    }
}

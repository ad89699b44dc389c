// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-encoding character logic.
//!
//! A [`Codec`] knows how to turn one encoded character into a `char` and
//! back, and how many bytes a character occupies. Fixed-width codecs read
//! exactly [`Codec::width`] bytes per character; the variable-width utf-8
//! codec inspects the lead byte to find the sequence length.
//!
//! ## Example
//!
//! ```
//! use charwise::encoding::global_registry;
//! use charwise::io::SliceSource;
//!
//! # fn main() -> charwise::Result<()> {
//! let codec = global_registry().lookup("utf8")?;
//! let mut src = SliceSource::new("é!".as_bytes());
//! assert_eq!(codec.read_char(&mut src, "(parsing)")?, 'é');
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::trace;

use crate::core::{CharwiseError, Result};
use crate::io::ByteSource;

/// Byte order of multi-byte code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Little,
    Big,
}

/// A character representation supplied by the caller.
///
/// Errors are plain reasons; the codec wraps them with its name and the
/// offending bytes or character.
///
/// # Example
///
/// ```
/// use charwise::encoding::{Charset, CharStrategy, CodecRegistry, Width};
///
/// #[derive(Debug)]
/// struct Latin1;
///
/// impl CharStrategy for Latin1 {
///     fn decode(&self, bytes: &[u8]) -> Result<char, String> {
///         Ok(char::from(bytes[0]))
///     }
///
///     fn encode(&self, ch: char) -> Result<Vec<u8>, String> {
///         u8::try_from(ch).map(|b| vec![b]).map_err(|e| e.to_string())
///     }
/// }
///
/// let mut registry = CodecRegistry::new();
/// registry.register(["latin-1"], Charset::custom(Latin1), Width::Fixed(1));
/// assert_eq!(registry.lookup("latin1").unwrap().decode(&[0xE9]).unwrap(), 'é');
/// ```
pub trait CharStrategy: fmt::Debug + Send + Sync {
    /// Total byte length of a sequence starting with `lead`.
    ///
    /// Only consulted by variable-width codecs.
    fn sequence_len(&self, _lead: u8) -> usize {
        1
    }

    /// Decode one complete character.
    fn decode(&self, bytes: &[u8]) -> std::result::Result<char, String>;

    /// Encode one character.
    fn encode(&self, ch: char) -> std::result::Result<Vec<u8>, String>;
}

/// How a byte sequence maps to a character.
#[derive(Debug, Clone)]
pub enum Charset {
    /// 7-bit ASCII, one byte per character
    Ascii,
    /// UTF-8, one to four bytes per character
    Utf8,
    /// UTF-16 code units; surrogates are not combined
    Utf16(Endian),
    /// UTF-32 code units
    Utf32(Endian),
    /// Caller-defined representation
    Custom(Arc<dyn CharStrategy>),
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Charset::Ascii, Charset::Ascii) | (Charset::Utf8, Charset::Utf8) => true,
            (Charset::Utf16(a), Charset::Utf16(b)) | (Charset::Utf32(a), Charset::Utf32(b)) => {
                a == b
            }
            (Charset::Custom(a), Charset::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Charset {}

impl Charset {
    /// Wrap a caller-defined strategy.
    pub fn custom(strategy: impl CharStrategy + 'static) -> Self {
        Charset::Custom(Arc::new(strategy))
    }

    /// Total byte length of a sequence, judged from its first byte.
    ///
    /// Only utf-8 has multi-byte sequences announced by the lead byte. A lead
    /// byte that matches no utf-8 pattern counts as a one-byte sequence and is
    /// left for [`Codec::decode`] to reject.
    pub fn sequence_len(&self, lead: u8) -> usize {
        match self {
            Charset::Utf8 => match lead {
                b if b & 0x80 == 0x00 => 1,
                b if b & 0xE0 == 0xC0 => 2,
                b if b & 0xF0 == 0xE0 => 3,
                b if b & 0xF8 == 0xF0 => 4,
                _ => 1,
            },
            Charset::Custom(strategy) => strategy.sequence_len(lead).max(1),
            _ => 1,
        }
    }
}

/// Character width policy of a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// Every character takes exactly this many bytes
    Fixed(usize),
    /// Width depends on the data
    Variable,
}

/// Immutable decode/encode/width logic for one character representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    name: String,
    charset: Charset,
    width: Width,
}

impl Codec {
    pub fn new(name: impl Into<String>, charset: Charset, width: Width) -> Self {
        Self {
            name: name.into(),
            charset,
            width,
        }
    }

    /// Canonical encoding name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Bytes per character.
    ///
    /// # Errors
    ///
    /// Returns [`CharwiseError::WidthComputation`] for variable-width codecs.
    pub fn width(&self) -> Result<usize> {
        match self.width {
            Width::Fixed(n) => Ok(n),
            Width::Variable => Err(CharwiseError::width_computation(&self.name)),
        }
    }

    /// Decode one complete character.
    ///
    /// # Errors
    ///
    /// Returns [`CharwiseError::Decoding`] when `bytes` is not exactly one
    /// valid character. No replacement character is substituted.
    pub fn decode(&self, bytes: &[u8]) -> Result<char> {
        match &self.charset {
            Charset::Ascii => match bytes {
                [b] if b.is_ascii() => Ok(*b as char),
                [_] => Err(self.decode_error(bytes, "byte outside the ASCII range")),
                _ => Err(self.decode_error(bytes, "expected a single byte")),
            },
            Charset::Utf8 => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| self.decode_error(bytes, e.to_string()))?;
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(self.decode_error(bytes, "expected exactly one character")),
                }
            }
            Charset::Utf16(endian) => {
                if bytes.len() != 2 {
                    return Err(self.decode_error(bytes, "expected a 2-byte code unit"));
                }
                let unit = match endian {
                    Endian::Little => LittleEndian::read_u16(bytes),
                    Endian::Big => BigEndian::read_u16(bytes),
                };
                char::from_u32(u32::from(unit))
                    .ok_or_else(|| self.decode_error(bytes, "unpaired surrogate"))
            }
            Charset::Utf32(endian) => {
                if bytes.len() != 4 {
                    return Err(self.decode_error(bytes, "expected a 4-byte code unit"));
                }
                let unit = match endian {
                    Endian::Little => LittleEndian::read_u32(bytes),
                    Endian::Big => BigEndian::read_u32(bytes),
                };
                char::from_u32(unit)
                    .ok_or_else(|| self.decode_error(bytes, format!("invalid code point 0x{unit:X}")))
            }
            Charset::Custom(strategy) => strategy
                .decode(bytes)
                .map_err(|reason| self.decode_error(bytes, reason)),
        }
    }

    /// Encode one character.
    ///
    /// utf-16 writes supplementary-plane characters as a surrogate pair.
    ///
    /// # Errors
    ///
    /// Returns [`CharwiseError::Encoding`] when the charset cannot represent `ch`.
    pub fn encode(&self, ch: char) -> Result<Vec<u8>> {
        match &self.charset {
            Charset::Ascii => {
                if ch.is_ascii() {
                    Ok(vec![ch as u8])
                } else {
                    Err(CharwiseError::encoding(
                        &self.name,
                        ch,
                        "character outside the ASCII range",
                    ))
                }
            }
            Charset::Utf8 => {
                let mut buf = [0u8; 4];
                Ok(ch.encode_utf8(&mut buf).as_bytes().to_vec())
            }
            Charset::Utf16(endian) => {
                let mut units = [0u16; 2];
                let units = ch.encode_utf16(&mut units);
                let mut out = vec![0u8; units.len() * 2];
                match endian {
                    Endian::Little => LittleEndian::write_u16_into(units, &mut out),
                    Endian::Big => BigEndian::write_u16_into(units, &mut out),
                }
                Ok(out)
            }
            Charset::Utf32(endian) => {
                let mut out = vec![0u8; 4];
                match endian {
                    Endian::Little => LittleEndian::write_u32(&mut out, ch as u32),
                    Endian::Big => BigEndian::write_u32(&mut out, ch as u32),
                }
                Ok(out)
            }
            Charset::Custom(strategy) => strategy
                .encode(ch)
                .map_err(|reason| CharwiseError::encoding(&self.name, ch, reason)),
        }
    }

    /// Read and decode one character from `src`.
    ///
    /// Underruns are returned unchanged.
    pub fn read_char(&self, src: &mut dyn ByteSource, path: &str) -> Result<char> {
        let bytes = match self.width {
            Width::Fixed(n) => src.read_bytes(n)?,
            Width::Variable => {
                let mut bytes = src.read_bytes(1)?;
                let extra = self.charset.sequence_len(bytes[0]) - 1;
                if extra > 0 {
                    bytes.extend(src.read_bytes(extra)?);
                }
                bytes
            }
        };
        let ch = self.decode(&bytes)?;
        trace!("{}: read {:?} from {} bytes ({})", path, ch, bytes.len(), self.name);
        Ok(ch)
    }

    fn decode_error(&self, bytes: &[u8], reason: impl Into<String>) -> CharwiseError {
        CharwiseError::decoding(&self.name, bytes, reason)
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Strings of a fixed number of characters.

use std::sync::Arc;

use super::engine::{encode_all, CharString, ScanHooks, Step};
use crate::core::{CharwiseError, Param, Result};
use crate::encoding::{lookup, Codec};

/// A string of exactly `length` characters.
///
/// `length` may be a constant or resolved from the context once per parse,
/// so an earlier field can decide it. Running out of input is always an
/// error. Building requires a value of exactly `length` characters.
///
/// # Example
///
/// ```
/// use charwise::encoding::lookup;
/// use charwise::string::fixed_length;
///
/// # fn main() -> charwise::Result<()> {
/// let field = fixed_length(lookup("ascii")?, 4);
/// assert_eq!(field.parse_bytes(b"abcdef")?, "abcd");
/// assert!(field.parse_bytes(b"abc").is_err());
/// # Ok(())
/// # }
/// ```
pub fn fixed_length(codec: Arc<Codec>, length: impl Into<Param<usize>>) -> CharString {
    let length = length.into();
    let scan_length = length.clone();
    let build_length = length.clone();

    let hooks = ScanHooks::new(
        move |ctx| scan_length.resolve(ctx),
        |codec, src, _, path| codec.read_char(src, path).map(Step::Char),
        |acc, length| Ok(acc.char_count() < *length),
        |acc, _| Ok(acc.into_string()),
        move |codec, value, sink, ctx, path| {
            let expected = build_length.resolve(ctx)?;
            let actual = value.chars().count();
            if actual != expected {
                return Err(CharwiseError::length_mismatch(path, expected, actual));
            }
            encode_all(codec, value.chars(), sink)
        },
    )
    .with_static_size(move |codec, ctx, _| Ok(length.resolve(ctx)? * codec.width()?));

    CharString::new(codec, hooks)
}

/// [`fixed_length`] with the codec looked up in the global registry.
pub fn fixed_length_from_encoding(
    encoding: &str,
    length: impl Into<Param<usize>>,
) -> Result<CharString> {
    Ok(fixed_length(lookup(encoding)?, length))
}

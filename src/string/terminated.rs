// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Strings that end at a terminator sequence.
//!
//! The scan stops as soon as the characters read end with the terminator.
//! Whether the end of input without a terminator is acceptable, and whether
//! the terminator is kept in the parsed value, are options.

use std::sync::Arc;

use tracing::trace;

use super::engine::{encode_all, CharString, ScanHooks, Step};
use super::select::FirstOf;
use crate::core::{Param, Result};
use crate::encoding::{lookup, Codec};

/// Windows line ending.
pub const CRLF: &str = "\r\n";
/// Unix line ending.
pub const LF: &str = "\n";

/// Options of a terminated string.
///
/// Each option is a constant or resolved from the context once per parse.
#[derive(Debug, Clone)]
pub struct TerminatedOptions {
    /// Terminator sequence
    pub term: Param<String>,
    /// Strip the terminator from the parsed value
    pub consume: Param<bool>,
    /// Treat end of input before the terminator as an error
    pub require: Param<bool>,
}

impl Default for TerminatedOptions {
    /// Newline terminator, consumed and required.
    fn default() -> Self {
        Self {
            term: LF.into(),
            consume: true.into(),
            require: true.into(),
        }
    }
}

impl TerminatedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a line: `term` is consumed and may be missing at end of input.
    pub fn line(term: &str) -> Self {
        Self {
            term: term.into(),
            consume: true.into(),
            require: false.into(),
        }
    }

    pub fn term(mut self, term: impl Into<Param<String>>) -> Self {
        self.term = term.into();
        self
    }

    pub fn consume(mut self, consume: impl Into<Param<bool>>) -> Self {
        self.consume = consume.into();
        self
    }

    pub fn require(mut self, require: impl Into<Param<bool>>) -> Self {
        self.require = require.into();
        self
    }
}

/// A string read up to and including a terminator.
///
/// When `require` is false, running out of input ends the string normally, so
/// the last unterminated fragment of a stream still parses. Building always
/// appends the terminator, whatever `consume` was at parse time.
///
/// An empty terminator matches before any character is read, so parsing
/// with one fails with an empty match.
///
/// # Example
///
/// ```
/// use charwise::encoding::lookup;
/// use charwise::string::{terminated, TerminatedOptions};
///
/// # fn main() -> charwise::Result<()> {
/// let field = terminated(lookup("ascii")?, TerminatedOptions::new().require(false));
/// assert_eq!(field.parse_bytes(b"hello\nworld")?, "hello");
/// assert_eq!(field.parse_bytes(b"hello")?, "hello");
/// assert_eq!(field.build_bytes("hello")?, b"hello\n");
/// # Ok(())
/// # }
/// ```
pub fn terminated(codec: Arc<Codec>, options: TerminatedOptions) -> CharString {
    let TerminatedOptions {
        term,
        consume,
        require,
    } = options;
    let build_term = term.clone();

    let hooks = ScanHooks::new(
        move |ctx| {
            Ok(Resolved {
                term: term.resolve(ctx)?,
                consume: consume.resolve(ctx)?,
                require: require.resolve(ctx)?,
            })
        },
        |codec, src, opts: &Resolved, path| match codec.read_char(src, path) {
            Ok(ch) => Ok(Step::Char(ch)),
            Err(e) if e.is_underrun() && !opts.require => {
                trace!("{}: no terminator before end of input", path);
                Ok(Step::Stop)
            }
            Err(e) => Err(e),
        },
        |acc, opts| Ok(!acc.ends_with(&opts.term)),
        |mut acc, opts| {
            if opts.consume {
                acc.strip_suffix(&opts.term);
            }
            Ok(acc.into_string())
        },
        move |codec, value, sink, ctx, _| {
            let term = build_term.resolve(ctx)?;
            encode_all(codec, value.chars().chain(term.chars()), sink)
        },
    );

    CharString::new(codec, hooks)
}

/// [`TerminatedOptions`] with every parameter resolved for one parse.
struct Resolved {
    term: String,
    consume: bool,
    require: bool,
}

/// [`terminated`] with the codec looked up in the global registry.
pub fn terminated_from_encoding(encoding: &str, options: TerminatedOptions) -> Result<CharString> {
    Ok(terminated(lookup(encoding)?, options))
}

/// A line ending in CR LF.
pub fn windows_line(
    codec: Arc<Codec>,
    consume: impl Into<Param<bool>>,
    require: impl Into<Param<bool>>,
) -> CharString {
    terminated(
        codec,
        TerminatedOptions::line(CRLF).consume(consume).require(require),
    )
}

/// A line ending in LF.
pub fn linux_line(
    codec: Arc<Codec>,
    consume: impl Into<Param<bool>>,
    require: impl Into<Param<bool>>,
) -> CharString {
    terminated(
        codec,
        TerminatedOptions::line(LF).consume(consume).require(require),
    )
}

/// A line ending in either CR LF or LF.
///
/// The CR LF form is tried first and wins whenever it parses; the LF form is
/// only tried after it fails. This is first-success, not longest-match.
pub fn line(
    codec: Arc<Codec>,
    consume: impl Into<Param<bool>>,
    require: impl Into<Param<bool>>,
) -> FirstOf {
    let consume = consume.into();
    let require = require.into();
    FirstOf::new(vec![
        windows_line(Arc::clone(&codec), consume.clone(), require.clone()),
        linux_line(codec, consume, require),
    ])
}

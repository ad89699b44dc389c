// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Charwise
//!
//! Encoding-aware text fields for binary formats.
//!
//! Text is read and written one logical character at a time, where a
//! character may take one to four bytes depending on the encoding. String
//! boundaries are set by pluggable rules rather than byte counts:
//! - **Fixed length** strings in [`string::fixed`] stop after N characters
//! - **Terminated** strings in [`string::terminated`] stop at a terminator
//!   sequence, or at the end of input when that is allowed
//!
//! ## Architecture
//!
//! - `core/` - Errors, values, the sibling-field context and deferred parameters
//! - `encoding/` - Character codecs and the encoding registry
//! - `io/` - Byte sources and sinks
//! - `string/` - The scanning engine and its instantiations
//! - `field` / `record` - Entry points for a surrounding parsing protocol
//!
//! ## Example: Reading lines
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use charwise::encoding::lookup;
//! use charwise::io::SliceSource;
//! use charwise::string::linux_line;
//! use charwise::Context;
//!
//! let line = linux_line(lookup("utf-8")?, true, false);
//! let mut src = SliceSource::new("première\nseconde".as_bytes());
//! let ctx = Context::new();
//!
//! assert_eq!(line.parse(&mut src, &ctx, "(parsing)")?, "première");
//! assert_eq!(line.parse(&mut src, &ctx, "(parsing)")?, "seconde");
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CharwiseError, Context, FromValue, Param, Result, Value};

// Codecs and registry
pub mod encoding;

pub use encoding::{global_registry, Codec, CodecRegistry};

// Stream primitives
pub mod io;

// Scanning engine and string kinds
pub mod string;

pub use string::{
    fixed_length, line, linux_line, terminated, windows_line, CharString, FirstOf,
    TerminatedOptions,
};

// Protocol entry points
pub mod field;
pub mod record;

pub use field::Field;

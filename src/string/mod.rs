// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Character strings read one logical character at a time.
//!
//! - [`engine`] - The shared scanning loop and its hook types
//! - [`fixed`] - Strings of a fixed character count
//! - [`terminated`] - Terminator-delimited strings and line helpers
//! - [`select`] - First-success alternation

pub mod engine;
pub mod fixed;
pub mod select;
pub mod terminated;

pub use engine::{encode_all, Accumulator, CharString, ScanHooks, Step};
pub use fixed::{fixed_length, fixed_length_from_encoding};
pub use select::FirstOf;
pub use terminated::{
    line, linux_line, terminated, terminated_from_encoding, windows_line, TerminatedOptions, CRLF,
    LF,
};

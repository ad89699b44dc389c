// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Stream primitives consumed by the codecs and string specifications.
//!
//! - [`ByteSource`] - bounded reads that fail with an underrun
//! - [`ByteSink`] - writes, implemented for every `std::io::Write`
//! - [`RecordingSource`] - replayable reads for first-success alternation

pub mod recording;
pub mod sink;
pub mod source;

pub use recording::RecordingSource;
pub use sink::ByteSink;
pub use source::{ByteSource, ReaderSource, SliceSource};

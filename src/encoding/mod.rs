// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Character codecs and the encoding registry.
//!
//! - [`codec`] - Per-encoding decode, encode and width logic
//! - [`registry`] - Name and alias lookup, with the built-in encodings

pub mod codec;
pub mod registry;

pub use codec::{CharStrategy, Charset, Codec, Endian, Width};
pub use registry::{global_registry, lookup, name_variants, CodecRegistry};

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout charwise.
//!
//! This module provides the foundational types for the library:
//! - [`CharwiseError`] - Error handling
//! - [`Value`] and [`Context`] - Parsed values and the sibling-field store
//! - [`Param`] - Constant or context-resolved parameters

pub mod error;
pub mod param;
pub mod value;

pub use error::{CharwiseError, Result};
pub use param::{FromValue, Param};
pub use value::{Context, Value};

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for charwise.
//!
//! Every failure raised while looking up codecs, reading characters from a
//! stream or building text back into bytes is a [`CharwiseError`]:
//! - Encoding lookup and width computation
//! - Character decoding and encoding
//! - Stream underrun and empty matches
//! - Deferred parameter resolution

use thiserror::Error;

/// Errors that can occur while scanning or building character strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharwiseError {
    /// Encoding name is not present in the registry
    #[error("Unknown encoding: '{name}'")]
    Lookup {
        /// Name that was looked up
        name: String,
    },

    /// Bytes do not form a valid character under the codec
    #[error("{encoding} decoding error for bytes [{}]: {reason}", hex::encode(.bytes))]
    Decoding {
        /// Codec name
        encoding: String,
        /// Offending byte sequence
        bytes: Vec<u8>,
        /// What was wrong with it
        reason: String,
    },

    /// Character cannot be represented by the codec
    #[error("{encoding} cannot encode character {ch:?}: {reason}")]
    Encoding {
        /// Codec name
        encoding: String,
        /// Offending character
        ch: char,
        /// Why it cannot be encoded
        reason: String,
    },

    /// Width requested from a variable-width codec
    #[error("Encoding '{encoding}' has no fixed character width")]
    WidthComputation {
        /// Codec name
        encoding: String,
    },

    /// Stream ended before the requested number of bytes was available
    #[error("Stream underrun: requested {requested} bytes at position {position}, but only {available} bytes available")]
    Underrun {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Stream position when the read was attempted
        position: u64,
    },

    /// Scanning loop stopped without reading a single character
    #[error("Empty match at {path}: no characters were read")]
    EmptyMatch {
        /// Diagnostics path of the field
        path: String,
    },

    /// Value handed to a fixed-length build has the wrong character count
    #[error("Length mismatch at {path}: expected {expected} characters, got {actual}")]
    LengthMismatch {
        /// Diagnostics path of the field
        path: String,
        /// Resolved length
        expected: usize,
        /// Characters in the value
        actual: usize,
    },

    /// Deferred parameter refers to a field that is not in the context
    #[error("Context has no field named '{field}'")]
    ContextMissing {
        /// Field name
        field: String,
    },

    /// Context field exists but has an unusable type
    #[error("Context field '{field}' is {found}, expected {expected}")]
    ContextType {
        /// Field name
        field: String,
        /// Expected type description
        expected: &'static str,
        /// Actual value type
        found: &'static str,
    },

    /// Static size requested from a specification that has none
    #[error("Size of {path} cannot be determined statically")]
    SizeUnknown {
        /// Diagnostics path of the field
        path: String,
    },

    /// Underlying writer failed
    #[error("IO error: {0}")]
    Io(String),
}

impl CharwiseError {
    /// Create a lookup error.
    pub fn lookup(name: impl Into<String>) -> Self {
        CharwiseError::Lookup { name: name.into() }
    }

    /// Create a decoding error.
    pub fn decoding(encoding: impl Into<String>, bytes: &[u8], reason: impl Into<String>) -> Self {
        CharwiseError::Decoding {
            encoding: encoding.into(),
            bytes: bytes.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create an encoding error.
    pub fn encoding(encoding: impl Into<String>, ch: char, reason: impl Into<String>) -> Self {
        CharwiseError::Encoding {
            encoding: encoding.into(),
            ch,
            reason: reason.into(),
        }
    }

    /// Create a width computation error.
    pub fn width_computation(encoding: impl Into<String>) -> Self {
        CharwiseError::WidthComputation {
            encoding: encoding.into(),
        }
    }

    /// Create an underrun error.
    pub fn underrun(requested: usize, available: usize, position: u64) -> Self {
        CharwiseError::Underrun {
            requested,
            available,
            position,
        }
    }

    /// Create an empty match error.
    pub fn empty_match(path: impl Into<String>) -> Self {
        CharwiseError::EmptyMatch { path: path.into() }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(path: impl Into<String>, expected: usize, actual: usize) -> Self {
        CharwiseError::LengthMismatch {
            path: path.into(),
            expected,
            actual,
        }
    }

    /// Create a missing context field error.
    pub fn context_missing(field: impl Into<String>) -> Self {
        CharwiseError::ContextMissing {
            field: field.into(),
        }
    }

    /// Create a context type error.
    pub fn context_type(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        CharwiseError::ContextType {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Create a size unknown error.
    pub fn size_unknown(path: impl Into<String>) -> Self {
        CharwiseError::SizeUnknown { path: path.into() }
    }

    /// Whether this error is a stream underrun.
    pub fn is_underrun(&self) -> bool {
        matches!(self, CharwiseError::Underrun { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CharwiseError::Lookup { name } => vec![("encoding", name.clone())],
            CharwiseError::Decoding {
                encoding,
                bytes,
                reason,
            } => vec![
                ("encoding", encoding.clone()),
                ("bytes", hex::encode(bytes)),
                ("reason", reason.clone()),
            ],
            CharwiseError::Encoding {
                encoding,
                ch,
                reason,
            } => vec![
                ("encoding", encoding.clone()),
                ("char", format!("U+{:04X}", *ch as u32)),
                ("reason", reason.clone()),
            ],
            CharwiseError::WidthComputation { encoding } => vec![("encoding", encoding.clone())],
            CharwiseError::Underrun {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CharwiseError::EmptyMatch { path } => vec![("path", path.clone())],
            CharwiseError::LengthMismatch {
                path,
                expected,
                actual,
            } => vec![
                ("path", path.clone()),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            CharwiseError::ContextMissing { field } => vec![("field", field.clone())],
            CharwiseError::ContextType {
                field,
                expected,
                found,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.to_string()),
                ("found", found.to_string()),
            ],
            CharwiseError::SizeUnknown { path } => vec![("path", path.clone())],
            CharwiseError::Io(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for CharwiseError {
    fn from(err: std::io::Error) -> Self {
        CharwiseError::Io(err.to_string())
    }
}

/// Result type for charwise operations.
pub type Result<T> = std::result::Result<T, CharwiseError>;

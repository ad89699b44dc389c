// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec registry keyed by encoding name and its aliases.
//!
//! Every registered name is expanded into a small, fixed set of spellings so
//! that `UTF-8`, `utf_8` and `utf8` all find the same codec. All aliases
//! produced by one [`CodecRegistry::register`] call share a single
//! `Arc<Codec>`. An alias that is already present keeps its first codec.
//!
//! # Example
//!
//! ```
//! use charwise::encoding::{Charset, CodecRegistry, Width};
//!
//! let mut registry = CodecRegistry::new();
//! registry.register(["latin-ascii"], Charset::Ascii, Width::Fixed(1));
//! assert!(registry.contains("latin_ascii"));
//! assert!(registry.contains("latinascii"));
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::codec::{Charset, Codec, Endian, Width};
use crate::core::{CharwiseError, Result};

/// Name -> codec table.
///
/// Registration takes `&mut self`; once built the registry is only read, so
/// it can be shared across threads without locking.
#[derive(Debug, Default, Clone)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<Codec>>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in encodings.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(["ascii"], Charset::Ascii, Width::Fixed(1));
        registry.register(["utf-8", "u8"], Charset::Utf8, Width::Variable);
        registry.register(
            ["u16", "utf-16", "utf-16-le"],
            Charset::Utf16(Endian::Little),
            Width::Fixed(2),
        );
        registry.register(["utf-16-be"], Charset::Utf16(Endian::Big), Width::Fixed(2));
        registry.register(
            ["u32", "utf-32", "utf-32-le"],
            Charset::Utf32(Endian::Little),
            Width::Fixed(4),
        );
        registry.register(["utf-32-be"], Charset::Utf32(Endian::Big), Width::Fixed(4));
        debug!("Codec registry built with {} aliases", registry.len());
        registry
    }

    /// Register one codec under every alias of `names`.
    ///
    /// The codec is named after the first name given (lowercased). Aliases
    /// that are already registered are left untouched.
    ///
    /// # Returns
    ///
    /// The number of aliases that were newly added.
    pub fn register<I, S>(&mut self, names: I, charset: Charset, width: Width) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        let Some(primary) = names.first() else {
            return 0;
        };

        let aliases: BTreeSet<String> = names.iter().flat_map(|n| name_variants(n)).collect();
        let codec = Arc::new(Codec::new(primary.clone(), charset, width));

        let mut added = 0;
        for alias in aliases {
            if self.codecs.contains_key(&alias) {
                debug!("Encoding alias '{}' already registered, keeping first", alias);
                continue;
            }
            self.codecs.insert(alias, Arc::clone(&codec));
            added += 1;
        }
        added
    }

    /// Look up a codec by exact (already normalized) name.
    ///
    /// # Errors
    ///
    /// Returns [`CharwiseError::Lookup`] if no alias matches.
    pub fn lookup(&self, name: &str) -> Result<Arc<Codec>> {
        self.codecs
            .get(name)
            .cloned()
            .ok_or_else(|| CharwiseError::lookup(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codecs.contains_key(name)
    }

    /// All registered aliases, sorted.
    pub fn encodings(&self) -> Vec<String> {
        let mut names: Vec<String> = self.codecs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

/// Normalized spellings of an encoding name.
///
/// Lowercase, with `_` and `-` interchangeable. A name with one hyphen also
/// gets its separator-free form (`utf-8` -> `utf8`); a name with two hyphens
/// gets its last separator collapsed (`utf-16-le` -> `utf-16le`, `utf_16le`).
pub fn name_variants(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let hyphenated = lower.replace('_', "-");
    let mut variants = vec![
        lower.clone(),
        hyphenated.clone(),
        hyphenated.replace('-', "_"),
    ];

    match hyphenated.matches('-').count() {
        1 => variants.push(hyphenated.replace('-', "")),
        2 => {
            if let Some(index) = hyphenated.rfind('-') {
                let collapsed = format!("{}{}", &hyphenated[..index], &hyphenated[index + 1..]);
                variants.push(collapsed.replace('-', "_"));
                variants.push(collapsed);
            }
        }
        _ => {}
    }

    variants.dedup();
    variants
}

static GLOBAL_REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();

/// Get the process-wide registry of built-in encodings.
///
/// Built on first use and immutable afterwards. For custom encodings, build a
/// [`CodecRegistry`] and pass it explicitly.
pub fn global_registry() -> &'static CodecRegistry {
    GLOBAL_REGISTRY.get_or_init(CodecRegistry::with_builtins)
}

/// Look up an encoding in the global registry.
pub fn lookup(name: &str) -> Result<Arc<Codec>> {
    global_registry().lookup(name)
}

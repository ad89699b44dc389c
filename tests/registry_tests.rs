// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding registry and alias tests.

use std::sync::Arc;

use charwise::encoding::{
    global_registry, name_variants, CharStrategy, Charset, CodecRegistry, Endian, Width,
};
use charwise::string::fixed_length;
use charwise::CharwiseError;

const BASE_NAMES: &[&str] = &[
    "ascii",
    "utf-8",
    "u8",
    "u16",
    "utf-16",
    "utf-16-le",
    "utf-16-be",
    "u32",
    "utf-32",
    "utf-32-le",
    "utf-32-be",
];

// ============================================================================
// Alias Closure
// ============================================================================

#[test]
fn test_every_alias_resolves_to_same_codec() {
    let registry = global_registry();
    for base in BASE_NAMES {
        let codec = registry.lookup(base).expect("base name registered");
        for alias in name_variants(base) {
            let other = registry.lookup(&alias).expect("alias registered");
            assert!(
                Arc::ptr_eq(&codec, &other),
                "{alias} does not resolve to the codec of {base}"
            );
        }
    }
}

#[test]
fn test_documented_spellings() {
    let registry = global_registry();
    for name in [
        "utf8", "utf_8", "utf16", "utf_16", "utf-16le", "utf_16le", "utf_16be",
        "utf32", "utf-32be", "utf_32_le",
    ] {
        assert!(registry.contains(name), "missing alias {name}");
    }
}

#[test]
fn test_little_endian_family_is_shared() {
    let registry = global_registry();
    let u16 = registry.lookup("u16").unwrap();
    assert!(Arc::ptr_eq(&u16, &registry.lookup("utf-16").unwrap()));
    assert!(Arc::ptr_eq(&u16, &registry.lookup("utf_16_le").unwrap()));
    assert_eq!(u16.charset(), &Charset::Utf16(Endian::Little));
    assert_eq!(
        registry.lookup("utf_16be").unwrap().charset(),
        &Charset::Utf16(Endian::Big)
    );
}

#[test]
fn test_unknown_encoding() {
    let err = global_registry().lookup("shift-jis").unwrap_err();
    assert_eq!(err, CharwiseError::lookup("shift-jis"));
    assert_eq!(err.to_string(), "Unknown encoding: 'shift-jis'");
}

// ============================================================================
// Custom Registries
// ============================================================================

#[test]
fn test_custom_registry_is_independent() {
    let mut registry = CodecRegistry::new();
    registry.register(["Wide-Chars"], Charset::Utf32(Endian::Big), Width::Fixed(4));

    assert!(registry.contains("wide_chars"));
    assert!(registry.contains("widechars"));
    assert!(!registry.contains("ascii"));
    assert!(!global_registry().contains("wide-chars"));
}

/// ISO-8859-1: every byte is the code point of the same value.
#[derive(Debug)]
struct Latin1;

impl CharStrategy for Latin1 {
    fn decode(&self, bytes: &[u8]) -> Result<char, String> {
        match bytes {
            [b] => Ok(char::from(*b)),
            _ => Err("expected a single byte".to_string()),
        }
    }

    fn encode(&self, ch: char) -> Result<Vec<u8>, String> {
        u8::try_from(ch).map(|b| vec![b]).map_err(|e| e.to_string())
    }
}

#[test]
fn test_custom_strategy_registers_under_aliases() {
    let mut registry = CodecRegistry::with_builtins();
    let added = registry.register(["latin-1", "l1"], Charset::custom(Latin1), Width::Fixed(1));
    assert_eq!(added, 4);

    let codec = registry.lookup("latin_1").unwrap();
    assert!(Arc::ptr_eq(&codec, &registry.lookup("l1").unwrap()));
    assert_eq!(codec.name(), "latin-1");
    assert_eq!(codec.width().unwrap(), 1);

    let field = fixed_length(Arc::clone(&codec), 4);
    assert_eq!(field.parse_bytes(b"caf\xE9").unwrap(), "café");
    assert_eq!(field.build_bytes("naïf").unwrap(), b"na\xEFf");
    assert!(matches!(
        field.build_bytes("€uro"),
        Err(CharwiseError::Encoding { ch: '€', .. })
    ));
}

#[test]
fn test_registration_is_idempotent() {
    let mut registry = CodecRegistry::with_builtins();
    let before = registry.encodings();
    let original = registry.lookup("ascii").unwrap();

    let added = registry.register(["ascii", "utf-8"], Charset::Utf8, Width::Variable);

    assert_eq!(added, 0);
    assert_eq!(registry.encodings(), before);
    assert!(Arc::ptr_eq(&original, &registry.lookup("ascii").unwrap()));
}

#[test]
fn test_width_of_variable_codec_fails() {
    let codec = global_registry().lookup("u8").unwrap();
    assert_eq!(
        codec.width().unwrap_err(),
        CharwiseError::width_computation("utf-8")
    );
}

use crate::dict::{encode, parse_dictionary, DictEntry, DictionaryError, EncoderOptions};
use crate::testutil::{sample_dict, test_options, FIRMWARE_TABLE, SAMPLE_DICTIONARY};

fn opts(min_len: usize, max_len: usize) -> EncoderOptions {
    EncoderOptions { min_len, max_len }
}

fn entries(pairs: &[(&str, &str)]) -> Vec<DictEntry> {
    pairs.iter().map(|(t, c)| DictEntry::new(t, c)).collect()
}

#[test]
fn test_encode_sample_matches_firmware_table() {
    let dict = sample_dict();
    assert_eq!(dict.as_bytes(), &FIRMWARE_TABLE[..]);
    assert_eq!(dict.len(), 103);
}

#[test]
fn test_encode_stats() {
    let dict = sample_dict();
    assert_eq!(dict.entry_count(), 7);
    assert_eq!(dict.min_len(), 4);
    // ":thier" is six symbols, "bandwith" eight.
    assert_eq!(dict.max_len(), 8);
}

#[test]
fn test_encode_is_order_independent() {
    let mut list = parse_dictionary(SAMPLE_DICTIONARY).unwrap();
    let forward = encode(&list, &test_options()).unwrap();
    list.reverse();
    let backward = encode(&list, &test_options()).unwrap();
    assert_eq!(forward.as_bytes(), backward.as_bytes());
}

#[test]
fn test_encode_is_deterministic() {
    let list = parse_dictionary(SAMPLE_DICTIONARY).unwrap();
    let a = encode(&list, &test_options()).unwrap();
    let b = encode(&list, &test_options()).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_encode_single_entry_is_a_chain() {
    let dict = encode(&entries(&[("ab", "x")]), &opts(1, 4)).unwrap();
    assert_eq!(dict.as_bytes(), &[0x05, 0x04, 0x00, 0x81, b'x', 0x00]);
}

#[test]
fn test_encode_trailing_boundary_edge() {
    let dict = encode(&entries(&[("teh:", "the")]), &opts(3, 8)).unwrap();
    // Boundary first, then h, e, t; two backspaces because the last letter
    // was already sent when the boundary arrives.
    assert_eq!(
        dict.as_bytes(),
        &[0x2C, 0x0B, 0x08, 0x17, 0x00, 0x82, b'h', b'e', 0x00]
    );
    assert_eq!(dict.max_len(), 4);
}

#[test]
fn test_encode_empty() {
    assert!(matches!(
        encode(&[], &test_options()),
        Err(DictionaryError::Empty)
    ));
}

#[test]
fn test_encode_word_too_short() {
    let err = encode(&entries(&[("abc", "abd")]), &opts(4, 8)).unwrap_err();
    match err {
        DictionaryError::WordTooShort { typo, len, min } => {
            assert_eq!(typo, "abc");
            assert_eq!(len, 3);
            assert_eq!(min, 4);
        }
        other => panic!("expected WordTooShort, got {other:?}"),
    }
}

#[test]
fn test_encode_word_too_long() {
    let err = encode(&entries(&[("bandwidthh", "bandwidth")]), &opts(4, 8)).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::WordTooLong { len: 10, max: 8, .. }
    ));
}

#[test]
fn test_encode_length_ignores_sentinels() {
    // Four letters plus two sentinels still fits a max of four.
    assert!(encode(&entries(&[(":apss:", "pass")]), &opts(4, 4)).is_ok());
}

#[test]
fn test_encode_duplicate_after_sentinel_normalization() {
    let err = encode(
        &entries(&[("thier", "their"), (":thier", "their")]),
        &test_options(),
    )
    .unwrap_err();
    assert!(matches!(err, DictionaryError::DuplicateEntry(ref t) if t == ":thier"));
}

#[test]
fn test_encode_duplicate_is_case_insensitive() {
    let err = encode(
        &entries(&[("fitler", "filter"), ("FITLER", "filter")]),
        &test_options(),
    )
    .unwrap_err();
    assert!(matches!(err, DictionaryError::DuplicateEntry(_)));
}

#[test]
fn test_encode_invalid_character() {
    let err = encode(&entries(&[("te1h", "the")]), &test_options()).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::InvalidCharacter { ch: '1', .. }
    ));
}

#[test]
fn test_encode_invalid_correction() {
    let err = encode(&entries(&[("abcd", "")]), &test_options()).unwrap_err();
    assert!(matches!(err, DictionaryError::InvalidCorrection { .. }));
    let err = encode(&entries(&[("cafe", "café")]), &test_options()).unwrap_err();
    assert!(matches!(err, DictionaryError::InvalidCorrection { .. }));
}

#[test]
fn test_encode_shadowed_entry_either_order() {
    for list in [
        entries(&[("apss", "pass"), ("xapss", "xpass")]),
        entries(&[("xapss", "xpass"), ("apss", "pass")]),
    ] {
        let err = encode(&list, &test_options()).unwrap_err();
        match err {
            DictionaryError::ShadowedEntry { typo, shadowed_by } => {
                assert_eq!(typo, "xapss");
                assert_eq!(shadowed_by, "apss");
            }
            other => panic!("expected ShadowedEntry, got {other:?}"),
        }
    }
}

#[test]
fn test_encode_boundary_variant_is_not_shadowed() {
    // "apss:" goes through a boundary edge first, so it never passes
    // through the terminal of "xapss".
    let list = entries(&[("xapss", "xpass"), ("apss:", "pass")]);
    assert!(encode(&list, &test_options()).is_ok());
}

#[test]
fn test_encode_correction_triggers_typo() {
    let err = encode(&entries(&[("abcd", "xabcd")]), &test_options()).unwrap_err();
    match err {
        DictionaryError::CorrectionTriggersTypo { typo, correction } => {
            assert_eq!(typo, "abcd");
            assert_eq!(correction, "xabcd");
        }
        other => panic!("expected CorrectionTriggersTypo, got {other:?}"),
    }
}

#[test]
fn test_encode_correction_triggers_other_entry() {
    let list = entries(&[("wrod", "word"), ("ord:", "order")]);
    assert!(matches!(
        encode(&list, &opts(3, 8)),
        Err(DictionaryError::CorrectionTriggersTypo { ref typo, .. }) if typo == "wrod"
    ));
}

#[test]
fn test_encode_too_large() {
    let correction = "z".repeat(60);
    let list: Vec<DictEntry> = (0..1200usize)
        .map(|i| {
            let typo: String = [i / 676, (i / 26) % 26, i % 26, 0]
                .iter()
                .map(|&d| (b'a' + d as u8) as char)
                .collect();
            DictEntry::new(&typo, &correction)
        })
        .collect();
    assert!(matches!(
        encode(&list, &test_options()),
        Err(DictionaryError::TooLarge(n)) if n > u16::MAX as usize
    ));
}

#[test]
fn test_encode_max_length_clamped_to_backspace_range() {
    let typo = "a".repeat(63);
    let err = encode(&entries(&[(typo.as_str(), "b")]), &opts(1, 200)).unwrap_err();
    assert!(matches!(err, DictionaryError::WordTooLong { max: 62, .. }));
}

#[test]
fn test_encode_default_options_come_from_settings() {
    let o = EncoderOptions::default();
    assert_eq!(o, opts(4, 32));
}

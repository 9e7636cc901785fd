use super::*;
use proptest::prelude::*;

// Property: valid UTF-8 decodes to exactly the characters of the string
proptest! {
    #[test]
    fn prop_utf8_matches_std(s in "\\PC*") {
        let n = TextNormalizer::default();
        let decoded = n.decode(TextInput::from(s.as_str())).unwrap();
        let expected: Vec<(usize, char)> = s.char_indices().collect();
        let actual: Vec<(usize, char)> = decoded.iter().map(|cp| (cp.offset, cp.ch)).collect();
        prop_assert_eq!(actual, expected);
    }
}

// Property: UTF-16 and UTF-8 renditions of a string agree
proptest! {
    #[test]
    fn prop_utf16_agrees_with_utf8(s in "\\PC*") {
        // A literal U+FEFF/U+FFFE would be read as a byte-order mark
        prop_assume!(!s.contains('\u{FEFF}') && !s.contains('\u{FFFE}'));
        let n = TextNormalizer::default();
        let units: Vec<u16> = s.encode_utf16().collect();
        let from16 = n.decode_chars(TextInput::Utf16(&units)).unwrap();
        let from8 = n.decode_chars(TextInput::from(s.as_str())).unwrap();
        prop_assert_eq!(from16, from8);
    }
}

// Property: a leading swapped BOM with swapped units decodes like native text
proptest! {
    #[test]
    fn prop_swapped_bom_roundtrip(s in "[a-zA-Z0-9 ]{0,40}") {
        let n = TextNormalizer::default();
        let mut units = vec![UNICODE_BOM_SWAPPED];
        units.extend(s.encode_utf16().map(u16::swap_bytes));
        let decoded: String = n.decode_chars(TextInput::Utf16(&units)).unwrap().into_iter().collect();
        prop_assert_eq!(decoded, s);
    }
}

// Property: Latin-1 never fails and keeps one code point per byte
proptest! {
    #[test]
    fn prop_latin1_total(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let n = TextNormalizer::default();
        let decoded = n.decode(TextInput::Latin1(&bytes)).unwrap();
        prop_assert_eq!(decoded.len(), bytes.len());
    }
}

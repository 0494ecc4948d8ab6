//! Properties of the serialized scanner state.

use proptest::prelude::*;

use scanner::{Scanner, StringCursor, TagKind, TokenKind, TokenSet, SERIALIZATION_BUFFER_SIZE};

/// A stack entry as it appears on the wire.
#[derive(Clone, Debug)]
enum Entry {
    Known(TagKind),
    Custom(String),
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    prop_oneof![
        proptest::sample::select(vec![
            TagKind::Html,
            TagKind::Body,
            TagKind::Div,
            TagKind::P,
            TagKind::Ul,
            TagKind::Li,
            TagKind::Table,
            TagKind::Tr,
            TagKind::Td,
            TagKind::Script,
            TagKind::Svg,
            TagKind::Math,
        ])
        .prop_map(Entry::Known),
        "[a-zA-Z][a-zA-Z0-9-]{0,11}".prop_map(Entry::Custom),
    ]
}

/// Encode a (suffix, stack) state exactly as the scanner serializes it.
fn encode(suffix: &[u8], entries: &[Entry]) -> Vec<u8> {
    let mut out = vec![suffix.len() as u8];
    out.extend_from_slice(suffix);
    let count = entries.len() as u16;
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    for entry in entries {
        match entry {
            Entry::Known(kind) => out.push(*kind as u8),
            Entry::Custom(name) => {
                out.push(TagKind::Custom as u8);
                out.push(name.len() as u8);
                out.extend_from_slice(name.as_bytes());
            }
        }
    }
    out
}

proptest! {
    /// Round-trip law: whenever the state fits the buffer, deserialize
    /// followed by serialize reproduces the exact bytes.
    #[test]
    fn serialized_state_round_trips_byte_for_byte(
        suffix in proptest::collection::vec(any::<u8>(), 0..=64),
        entries in proptest::collection::vec(entry_strategy(), 0..=24),
    ) {
        let encoded = encode(&suffix, &entries);
        prop_assume!(encoded.len() <= SERIALIZATION_BUFFER_SIZE);

        let mut scanner = Scanner::new();
        scanner.deserialize(&encoded);
        prop_assert_eq!(scanner.depth(), entries.len());
        prop_assert_eq!(scanner.verbatim_suffix(), &suffix[..]);

        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let written = scanner.serialize(&mut buffer);
        prop_assert_eq!(&buffer[..written], &encoded[..]);
    }

    /// Scanning is deterministic: identical fresh state, input, and validity
    /// produce identical tokens and identical post-scan state.
    #[test]
    fn identical_scans_are_bitwise_identical(input in "[ -~]{0,48}") {
        let valid = TokenSet::of(&[
            TokenKind::HtmlStartTagName,
            TokenKind::VoidStartTagName,
            TokenKind::ForeignStartTagName,
            TokenKind::ScriptStartTagName,
            TokenKind::StyleStartTagName,
            TokenKind::TitleStartTagName,
            TokenKind::TextareaStartTagName,
            TokenKind::PlaintextStartTagName,
            TokenKind::SelfClosingTagDelimiter,
            TokenKind::ImplicitEndTag,
        ]);

        let run = |input: &str| {
            let mut scanner = Scanner::new();
            let mut cursor = StringCursor::new(input);
            let token = scanner.scan(&mut cursor, &valid);
            let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
            let written = scanner.serialize(&mut buffer);
            (token, cursor.offset(), buffer[..written].to_vec())
        };

        prop_assert_eq!(run(&input), run(&input));
    }
}

//! Host-simulation harness for driving the scanner the way the parser does.
//!
//! The grammar owns punctuation (`<`, `</`, `>`, Django tag markers) and asks
//! the scanner only for the context-sensitive tokens. Tests script that
//! interplay: consume a grammar-owned literal, issue a scan with the validity
//! set for the state, and resume lexing at the emitted token's end mark, or
//! restore the cursor when the scanner rejects.

use scanner::{Scanner, StringCursor, TokenKind, TokenSet, SERIALIZATION_BUFFER_SIZE};

/// An accepted scan: the emitted token id and its marked extent's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutcome {
    pub kind: TokenKind,
    pub text: String,
}

/// Scanner plus cursor over one document, with parser-side bookkeeping.
pub struct ScanHarness {
    scanner: Scanner,
    cursor: StringCursor,
}

impl ScanHarness {
    pub fn new(input: &str) -> Self {
        Self {
            scanner: Scanner::new(),
            cursor: StringCursor::new(input),
        }
    }

    /// Start from previously serialized scanner state (incremental reparse).
    pub fn with_state(input: &str, state: &[u8]) -> Self {
        let mut harness = Self::new(input);
        harness.scanner.deserialize(state);
        harness
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn depth(&self) -> usize {
        self.scanner.depth()
    }

    pub fn at_eof(&self) -> bool {
        self.cursor.remaining().is_empty()
    }

    /// Consume a grammar-owned literal in front of the cursor.
    pub fn expect_literal(&mut self, literal: &str) {
        assert!(
            self.cursor.consume_literal(literal),
            "expected grammar literal {literal:?}, cursor at {:?}",
            self.cursor.remaining()
        );
    }

    /// Issue one scan call. On acceptance the cursor resumes at the token's
    /// end mark; on rejection it is restored, as the parser would do.
    pub fn scan(&mut self, valid: &[TokenKind]) -> Option<ScanOutcome> {
        let checkpoint = self.cursor.offset();
        self.cursor.begin_token();
        match self.scanner.scan(&mut self.cursor, &TokenSet::of(valid)) {
            Some(kind) => {
                let (_, end) = self.cursor.token_range();
                let text = self.cursor.token_text();
                self.cursor.rewind_to(end);
                Some(ScanOutcome { kind, text })
            }
            None => {
                self.cursor.rewind_to(checkpoint);
                None
            }
        }
    }

    /// Scan and require a specific token id; returns its text.
    pub fn scan_expect(&mut self, valid: &[TokenKind], expected: TokenKind) -> String {
        let outcome = self.scan(valid).unwrap_or_else(|| {
            panic!(
                "scanner rejected; expected {expected:?}, cursor at {:?}",
                self.cursor.remaining()
            )
        });
        assert_eq!(
            outcome.kind, expected,
            "unexpected token for text {:?}",
            outcome.text
        );
        outcome.text
    }

    /// Require a rejection at the current position.
    pub fn scan_reject(&mut self, valid: &[TokenKind]) {
        let before = self.cursor.offset();
        if let Some(outcome) = self.scan(valid) {
            panic!(
                "expected rejection, got {:?} ({:?})",
                outcome.kind, outcome.text
            );
        }
        assert_eq!(
            self.cursor.offset(),
            before,
            "rejection must restore the cursor"
        );
    }

    /// Serialized scanner state, as the parser would snapshot it.
    pub fn state(&self) -> Vec<u8> {
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let written = self.scanner.serialize(&mut buffer);
        buffer[..written].to_vec()
    }

    /// Serialize the scanner state and restore it into a fresh scanner, as an
    /// incremental edit boundary would.
    pub fn round_trip_state(&mut self) {
        let state = self.state();
        let mut restored = Scanner::new();
        restored.deserialize(&state);
        self.scanner = restored;
    }
}

/// Validity set offered where the grammar expects any start-tag name.
pub const START_TAG_NAMES: &[TokenKind] = &[
    TokenKind::HtmlStartTagName,
    TokenKind::VoidStartTagName,
    TokenKind::ForeignStartTagName,
    TokenKind::ScriptStartTagName,
    TokenKind::StyleStartTagName,
    TokenKind::TitleStartTagName,
    TokenKind::TextareaStartTagName,
    TokenKind::PlaintextStartTagName,
];

/// Validity set offered where the grammar expects an end-tag name.
pub const END_TAG_NAMES: &[TokenKind] = &[TokenKind::EndTagName, TokenKind::ErroneousEndTagName];

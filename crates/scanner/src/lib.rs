//! External lexical scanner for a mixed HTML + Django template grammar.
//!
//! The scanner cooperates with a GLR-style incremental parser: the parser
//! calls [`Scanner::scan`] at states where the context-free grammar cannot
//! decide on its own (raw-text regions, implicit end tags, Django constructs
//! with runtime-dependent terminators), passing a validity vector of the
//! token ids currently acceptable and a byte-at-a-time lexer cursor.
//!
//! Invariants:
//! - A scan call either emits exactly one token or rejects; rejection never
//!   panics and leaves no observable scanner-state change.
//! - Scanner state (open-element stack + verbatim suffix) mutates only on
//!   successful emission, at most once per accepted token.
//! - The dispatcher's sub-scanner choice is a pure function of the validity
//!   vector and the next character.
//! - State round-trips through [`Scanner::serialize`] /
//!   [`Scanner::deserialize`] whenever the serialized form fits the host
//!   buffer; on overflow, trailing stack entries degrade to placeholders that
//!   preserve depth but lose identity.

mod cursor;
mod scanner;
mod stack;
mod tag;
mod token;

pub use cursor::{Cursor, StringCursor};
pub use scanner::{Scanner, ScannerStats, SERIALIZATION_BUFFER_SIZE};
pub use stack::ElementStack;
pub use tag::{Tag, TagKind};
pub use token::{TokenKind, TokenSet, TOKEN_KIND_COUNT};

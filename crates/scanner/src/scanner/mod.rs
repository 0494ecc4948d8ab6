//! Scanner state and sub-scanner dispatch.
//!
//! The scanner owns the only mutable state visible to incremental parsing:
//! the open-element stack and the verbatim-suffix buffer. Both mutate only on
//! successful token emission; a rejected scan leaves them untouched, so the
//! parser can restore the cursor and fall back to its own lexer.
//!
//! Dispatch is a pure function of (validity vector, next character): Django
//! content scanners first (their regions admit no other token), then the
//! zero-width validators and the filter colon, then the text modes, then the
//! character-directed HTML paths.

mod django;
mod html;
mod serialize;


use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::stack::ElementStack;
use crate::token::{TokenKind, TokenSet};

pub use serialize::SERIALIZATION_BUFFER_SIZE;

/// Instrumentation counters, in the spirit of the host parser's own stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScannerStats {
    pub scans: u64,
    pub tokens_emitted: u64,
    pub rejections: u64,
    pub max_stack_depth: u32,
}

/// Captured `{% verbatim … %}` suffix: the dynamic terminator for the
/// matching `{% endverbatim… %}`.
///
/// Written only by the verbatim-start scanner; cleared by the
/// verbatim-content scanner on a successful close and by deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct VerbatimSuffix {
    bytes: SmallVec<[u8; 16]>,
}

impl VerbatimSuffix {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    pub(crate) fn set(&mut self, bytes: &[u8]) {
        self.bytes.clear();
        self.bytes.extend_from_slice(bytes);
    }

    pub(crate) fn replace(&mut self, bytes: SmallVec<[u8; 16]>) {
        self.bytes = bytes;
    }
}

/// External scanner state: open-element stack + verbatim suffix.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    pub(crate) stack: ElementStack,
    pub(crate) verbatim: VerbatimSuffix,
    stats: ScannerStats,
}

impl Scanner {
    /// Fresh scanner for a newly opened document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open-element depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Currently recorded verbatim suffix bytes.
    pub fn verbatim_suffix(&self) -> &[u8] {
        self.verbatim.as_bytes()
    }

    /// Copy of the instrumentation counters.
    pub fn stats(&self) -> ScannerStats {
        let mut stats = self.stats;
        stats.max_stack_depth = self.stack.max_depth();
        stats
    }

    /// Attempt to scan one external token.
    ///
    /// Returns the emitted token id, with the extent recorded on the cursor
    /// via `mark_end`, or `None` when no external token applies here. The
    /// caller owns cursor restoration after a rejection.
    pub fn scan<C: Cursor>(&mut self, cursor: &mut C, valid: &TokenSet) -> Option<TokenKind> {
        self.stats.scans += 1;
        let emitted = self.dispatch(cursor, valid);
        match emitted {
            Some(kind) => {
                self.stats.tokens_emitted += 1;
                self.trace_emit(kind);
            }
            None => self.stats.rejections += 1,
        }
        emitted
    }

    #[cfg(any(test, feature = "debug-stats"))]
    fn trace_emit(&self, kind: TokenKind) {
        log::trace!(
            target: "scanner",
            "emit {kind:?} depth={} suffix_len={}",
            self.stack.len(),
            self.verbatim.as_bytes().len()
        );
    }

    #[cfg(not(any(test, feature = "debug-stats")))]
    fn trace_emit(&self, _kind: TokenKind) {}

    fn dispatch<C: Cursor>(&mut self, cursor: &mut C, valid: &TokenSet) -> Option<TokenKind> {
        // Django content regions admit nothing else; handle them first.
        if valid.contains(TokenKind::DjangoCommentContent) {
            return django::scan_django_comment_content(cursor);
        }
        if valid.contains(TokenKind::VerbatimStart) {
            return self.scan_verbatim_start(cursor);
        }
        if valid.contains(TokenKind::VerbatimBlockContent) {
            return self.scan_verbatim_content(cursor);
        }

        // Zero-width generic-tag validation.
        if valid.contains(TokenKind::ValidateGenericBlock)
            || valid.contains(TokenKind::ValidateGenericSimple)
        {
            return django::scan_validate_generic_tag(cursor, valid);
        }

        // Context-sensitive filter-argument separator.
        if valid.contains(TokenKind::FilterColon) && cursor.lookahead() == Some(':') {
            return django::scan_filter_colon(cursor);
        }

        let start_tag_valid = valid.any_start_tag_name();
        let end_tag_valid = valid.any_end_tag_name();

        // Text modes are only taken when no tag-name token competes: at a
        // `</tag` boundary the grammar offers both, and the tag must win.
        if valid.contains(TokenKind::RawText) && !end_tag_valid && !start_tag_valid {
            return self.scan_raw_text(cursor);
        }
        if valid.contains(TokenKind::RcdataText) && !end_tag_valid && !start_tag_valid {
            return self.scan_rcdata_text(cursor);
        }
        if valid.contains(TokenKind::PlaintextText) {
            return self.scan_plaintext_text(cursor);
        }

        while cursor.lookahead().is_some_and(char::is_whitespace) {
            cursor.skip();
        }

        match cursor.lookahead() {
            Some('<') => {
                cursor.mark_end();
                cursor.advance();
                if cursor.lookahead() == Some('!') {
                    cursor.advance();
                    return html::scan_comment(cursor);
                }
                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(cursor);
                }
                None
            }
            // End of input, or a literal NUL the host lexer reports there.
            None | Some('\0') => {
                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(cursor);
                }
                None
            }
            Some('/') => {
                if valid.contains(TokenKind::SelfClosingTagDelimiter) {
                    return self.scan_self_closing_tag_delimiter(cursor);
                }
                None
            }
            Some(_) => {
                if (start_tag_valid || end_tag_valid) && !valid.contains(TokenKind::RawText) {
                    if end_tag_valid {
                        self.scan_end_tag_name(cursor)
                    } else {
                        self.scan_start_tag_name(cursor)
                    }
                } else {
                    None
                }
            }
        }
    }
}

//! Django sub-scanners: comment bodies, verbatim blocks, generic-tag
//! validation, and the filter-argument colon.
//!
//! These cover the constructs a context-free grammar cannot capture: the
//! comment body must stop just before a closer it does not consume, the
//! verbatim closer carries a runtime-captured suffix, and generic blocks are
//! only committed to when a matching `end<name>` exists further ahead.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::token::{TokenKind, TokenSet};

use super::serialize::MAX_VERBATIM_SUFFIX_LEN;
use super::Scanner;

/// Identifier capture bound for generic tag names; longer identifiers are
/// truncated for the closer search.
const MAX_GENERIC_IDENT_LEN: usize = 255;

/// Built-in tag keywords with dedicated grammar rules; the generic-tag
/// validator must never claim them.
const BUILTIN_DJANGO_TAGS: &[&str] = &[
    "if",
    "elif",
    "else",
    "endif",
    "for",
    "empty",
    "endfor",
    "with",
    "endwith",
    "block",
    "endblock",
    "extends",
    "include",
    "load",
    "url",
    "csrf_token",
    "autoescape",
    "endautoescape",
    "filter",
    "endfilter",
    "spaceless",
    "endspaceless",
    "verbatim",
    "endverbatim",
    "cycle",
    "firstof",
    "now",
    "regroup",
    "ifchanged",
    "endifchanged",
    "widthratio",
    "templatetag",
    "debug",
    "lorem",
    "resetcycle",
    "querystring",
    "partialdef",
    "endpartialdef",
    "partial",
    "comment",
    "endcomment",
];

fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

/// Consume horizontal whitespace (never newlines) as token content.
fn advance_horizontal_space<C: Cursor>(cursor: &mut C) {
    while cursor.lookahead().is_some_and(is_horizontal_space) {
        cursor.advance();
    }
}

/// Consume inter-token template whitespace, newlines included.
fn advance_template_whitespace<C: Cursor>(cursor: &mut C) {
    while matches!(cursor.lookahead(), Some(' ' | '\t' | '\r' | '\n')) {
        cursor.advance();
    }
}

/// Consume `keyword` exactly; on mismatch the partial consumption stands
/// (callers treat the whole attempt as failed).
fn advance_keyword<C: Cursor>(cursor: &mut C, keyword: &str) -> bool {
    for expected in keyword.chars() {
        if cursor.lookahead() == Some(expected) {
            cursor.advance();
        } else {
            return false;
        }
    }
    true
}

/// Consume characters matching `suffix` byte-for-byte (UTF-8).
fn advance_suffix_bytes<C: Cursor>(cursor: &mut C, suffix: &[u8]) -> bool {
    let mut index = 0;
    while index < suffix.len() {
        let Some(c) = cursor.lookahead() else {
            return false;
        };
        let mut encoded = [0u8; 4];
        let bytes = c.encode_utf8(&mut encoded).as_bytes();
        if suffix[index..].starts_with(bytes) {
            cursor.advance();
            index += bytes.len();
        } else {
            return false;
        }
    }
    true
}

/// Body of `{% comment %}…{% endcomment %}`: everything up to, but not
/// consuming, the closer. Fails at end of input (the grammar reports the
/// unterminated construct).
pub(super) fn scan_django_comment_content<C: Cursor>(cursor: &mut C) -> Option<TokenKind> {
    cursor.mark_end();
    loop {
        match cursor.lookahead() {
            None => return None,
            Some('{') => {
                // Content ends just before this brace if the closer matches.
                cursor.mark_end();
                cursor.advance();
                if cursor.lookahead() == Some('%') {
                    cursor.advance();
                    advance_template_whitespace(cursor);
                    if advance_keyword(cursor, "endcomment") {
                        advance_template_whitespace(cursor);
                        if cursor.lookahead() == Some('%') {
                            cursor.advance();
                            if cursor.lookahead() == Some('}') {
                                // Leave the closer for the grammar; the end
                                // mark already excludes it.
                                return Some(TokenKind::DjangoCommentContent);
                            }
                        }
                    }
                }
            }
            Some(_) => cursor.advance(),
        }
    }
}

/// Zero-width validation of a generic (non-built-in) tag name, deciding
/// between the block and simple productions by looking for `{% end<name>`
/// further ahead. Nothing is consumed into the token.
pub(super) fn scan_validate_generic_tag<C: Cursor>(
    cursor: &mut C,
    valid: &TokenSet,
) -> Option<TokenKind> {
    cursor.mark_end();

    if !cursor
        .lookahead()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    {
        return None;
    }

    let mut name = String::new();
    while let Some(c) = cursor.lookahead() {
        if (c.is_ascii_alphanumeric() || c == '_') && name.len() < MAX_GENERIC_IDENT_LEN {
            name.push(c);
            cursor.advance();
        } else {
            break;
        }
    }

    if name.is_empty() || BUILTIN_DJANGO_TAGS.contains(&name.as_str()) {
        return None;
    }
    // `end…` names belong to the grammar's closing-tag rules.
    if name.as_bytes().starts_with(b"end") {
        return None;
    }

    if valid.contains(TokenKind::ValidateGenericBlock) {
        let closer = format!("end{name}");
        while let Some(c) = cursor.lookahead() {
            if c == '{' {
                cursor.advance();
                if cursor.lookahead() == Some('%') {
                    cursor.advance();
                    advance_template_whitespace(cursor);
                    if advance_keyword(cursor, &closer)
                        && matches!(cursor.lookahead(), Some(' ' | '\t' | '\r' | '\n' | '%'))
                    {
                        return Some(TokenKind::ValidateGenericBlock);
                    }
                }
            } else {
                cursor.advance();
            }
        }
    }

    if valid.contains(TokenKind::ValidateGenericSimple) {
        return Some(TokenKind::ValidateGenericSimple);
    }
    None
}

/// Filter-argument separator: `:` only counts when an argument starter
/// follows directly (Django allows no whitespace there). Otherwise the
/// grammar's own punctuation rule takes the colon.
pub(super) fn scan_filter_colon<C: Cursor>(cursor: &mut C) -> Option<TokenKind> {
    cursor.mark_end();
    cursor.advance();
    let starts_argument = matches!(
        cursor.lookahead(),
        Some(c) if matches!(c, '"' | '\'' | '+' | '-' | '.' | '_') || c.is_ascii_alphanumeric()
    );
    if starts_argument {
        cursor.mark_end();
        return Some(TokenKind::FilterColon);
    }
    None
}

impl Scanner {
    /// Capture the verbatim suffix: every byte after the `verbatim` keyword
    /// up to `%}`, with trailing horizontal whitespace stripped from the
    /// recorded length. Aborts on newline, end of input, or a recorded
    /// suffix longer than the storable maximum.
    pub(super) fn scan_verbatim_start<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        cursor.mark_end();
        let mut captured: SmallVec<[u8; 16]> = SmallVec::new();
        let mut recorded = 0usize;

        loop {
            let c = cursor.lookahead()?;
            if c == '\n' {
                return None;
            }
            if c == '%' {
                cursor.advance();
                if cursor.lookahead() == Some('}') {
                    if recorded > MAX_VERBATIM_SUFFIX_LEN {
                        return None;
                    }
                    captured.truncate(recorded);
                    cursor.advance();
                    cursor.mark_end();
                    self.verbatim.replace(captured);
                    return Some(TokenKind::VerbatimStart);
                }
                // A lone '%' is suffix content.
                captured.push(b'%');
                recorded = captured.len();
                continue;
            }
            let mut encoded = [0u8; 4];
            captured.extend_from_slice(c.encode_utf8(&mut encoded).as_bytes());
            if !is_horizontal_space(c) {
                recorded = captured.len();
            }
            cursor.advance();
        }
    }

    /// Scan the verbatim body through `{%`, horizontal whitespace,
    /// `endverbatim`, the exact recorded suffix, horizontal whitespace,
    /// `%}`. The whole block including the closer is consumed and the
    /// suffix cleared. Fails at end of input.
    pub(super) fn scan_verbatim_content<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        loop {
            cursor.lookahead()?;
            cursor.mark_end();

            if cursor.lookahead() == Some('{') {
                cursor.advance();
                if cursor.lookahead() == Some('%') {
                    cursor.advance();
                    advance_horizontal_space(cursor);
                    if advance_keyword(cursor, "endverbatim")
                        && advance_suffix_bytes(cursor, self.verbatim.as_bytes())
                    {
                        advance_horizontal_space(cursor);
                        if cursor.lookahead() == Some('%') {
                            cursor.advance();
                            if cursor.lookahead() == Some('}') {
                                cursor.advance();
                                cursor.mark_end();
                                self.verbatim.clear();
                                return Some(TokenKind::VerbatimBlockContent);
                            }
                        }
                    }
                }
            }

            // One character per failed attempt, no backtracking: a `{%`
            // whose brace was consumed by the attempt above is not
            // re-examined.
            cursor.advance();
        }
    }
}

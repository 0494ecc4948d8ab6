//! HTML sub-scanners: comments, tag names, implicit end tags, text modes.

use crate::cursor::Cursor;
use crate::tag::{Tag, TagKind};
use crate::token::TokenKind;

use super::Scanner;

/// Comment tokenizer states, entered after `<!--`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommentState {
    Start,
    StartDash,
    Body,
    Lt,
    LtBang,
    LtBangDash,
    LtBangDashDash,
    EndDash,
    End,
    EndBang,
}

/// Scan an HTML comment. The caller has consumed `<!`; anything but `--`
/// next (doctype, bogus markup) is the grammar's business.
///
/// Accepts `-->`, `--!>`, the empty forms `<!-->` / `<!--->`, and end of
/// input anywhere inside the comment (lenient EOF).
pub(super) fn scan_comment<C: Cursor>(cursor: &mut C) -> Option<TokenKind> {
    if cursor.lookahead() != Some('-') {
        return None;
    }
    cursor.advance();
    if cursor.lookahead() != Some('-') {
        return None;
    }
    cursor.advance();

    let mut state = CommentState::Start;
    loop {
        let Some(c) = cursor.lookahead() else {
            cursor.mark_end();
            return Some(TokenKind::Comment);
        };

        match state {
            CommentState::Start => match c {
                '-' => {
                    state = CommentState::StartDash;
                    cursor.advance();
                }
                '>' => {
                    cursor.advance();
                    cursor.mark_end();
                    return Some(TokenKind::Comment);
                }
                _ => {
                    state = CommentState::Body;
                    cursor.advance();
                }
            },
            CommentState::StartDash => match c {
                '-' => {
                    state = CommentState::End;
                    cursor.advance();
                }
                '>' => {
                    cursor.advance();
                    cursor.mark_end();
                    return Some(TokenKind::Comment);
                }
                _ => {
                    state = CommentState::Body;
                    cursor.advance();
                }
            },
            CommentState::Body => match c {
                '<' => {
                    state = CommentState::Lt;
                    cursor.advance();
                }
                '-' => {
                    state = CommentState::EndDash;
                    cursor.advance();
                }
                _ => cursor.advance(),
            },
            CommentState::Lt => match c {
                '!' => {
                    state = CommentState::LtBang;
                    cursor.advance();
                }
                '<' => {
                    state = CommentState::Body;
                    cursor.advance();
                }
                _ => state = CommentState::Body,
            },
            CommentState::LtBang => match c {
                '-' => {
                    state = CommentState::LtBangDash;
                    cursor.advance();
                }
                _ => state = CommentState::Body,
            },
            CommentState::LtBangDash => match c {
                '-' => {
                    state = CommentState::LtBangDashDash;
                    cursor.advance();
                }
                _ => state = CommentState::EndDash,
            },
            CommentState::LtBangDashDash => state = CommentState::End,
            CommentState::EndDash => match c {
                '-' => {
                    state = CommentState::End;
                    cursor.advance();
                }
                _ => {
                    state = CommentState::Body;
                    cursor.advance();
                }
            },
            CommentState::End => match c {
                '>' => {
                    cursor.advance();
                    cursor.mark_end();
                    return Some(TokenKind::Comment);
                }
                '!' => {
                    state = CommentState::EndBang;
                    cursor.advance();
                }
                '-' => cursor.advance(),
                _ => {
                    state = CommentState::Body;
                    cursor.advance();
                }
            },
            CommentState::EndBang => match c {
                '-' => {
                    state = CommentState::EndDash;
                    cursor.advance();
                }
                '>' => {
                    cursor.advance();
                    cursor.mark_end();
                    return Some(TokenKind::Comment);
                }
                _ => {
                    state = CommentState::Body;
                    cursor.advance();
                }
            },
        }
    }
}

/// Read a tag name (`[A-Za-z0-9:_-]+`), optionally ASCII-uppercase folded.
pub(super) fn scan_tag_name<C: Cursor>(cursor: &mut C, fold_ascii_upper: bool) -> String {
    let mut name = String::new();
    while let Some(c) = cursor.lookahead() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_') {
            name.push(if fold_ascii_upper {
                c.to_ascii_uppercase()
            } else {
                c
            });
            cursor.advance();
        } else {
            break;
        }
    }
    name
}

/// Shared raw-text / RCDATA loop: collect content until the case-insensitive
/// end-tag sentinel, a Django opener (`{{`, `{%`, `{#`), or end of input.
///
/// The sentinel letters are scanned but excluded from the token; a Django
/// opener's `{` is left unconsumed for the grammar. Emits only if at least
/// one content character was produced.
fn scan_embedded_text<C: Cursor>(
    cursor: &mut C,
    sentinel: &[u8],
    token: TokenKind,
) -> Option<TokenKind> {
    cursor.mark_end();
    let mut sentinel_index = 0;
    let mut has_content = false;

    while let Some(c) = cursor.lookahead() {
        if c.to_ascii_uppercase() == sentinel[sentinel_index] as char {
            sentinel_index += 1;
            if sentinel_index == sentinel.len() {
                break;
            }
            cursor.advance();
        } else if c == '{' {
            cursor.mark_end();
            cursor.advance();
            if matches!(cursor.lookahead(), Some('{' | '%' | '#')) {
                break;
            }
            // Lone brace is content; resume sentinel matching at the very
            // next character.
            sentinel_index = 0;
            has_content = true;
            cursor.mark_end();
        } else {
            sentinel_index = 0;
            cursor.advance();
            has_content = true;
            cursor.mark_end();
        }
    }

    if has_content {
        Some(token)
    } else {
        None
    }
}

impl Scanner {
    pub(super) fn scan_start_tag_name<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        let foreign = self.stack.in_foreign_content();
        let name = scan_tag_name(cursor, !foreign);
        if name.is_empty() {
            return None;
        }

        if foreign {
            self.stack.push(Tag::custom(name));
            return Some(TokenKind::ForeignStartTagName);
        }

        let tag = Tag::for_name(&name);
        if tag.is_void() {
            // Void elements never open; nothing to push.
            return Some(TokenKind::VoidStartTagName);
        }

        let token = match tag.kind() {
            TagKind::Script => TokenKind::ScriptStartTagName,
            TagKind::Style => TokenKind::StyleStartTagName,
            TagKind::Title => TokenKind::TitleStartTagName,
            TagKind::Textarea => TokenKind::TextareaStartTagName,
            TagKind::Plaintext => TokenKind::PlaintextStartTagName,
            TagKind::Svg | TagKind::Math => TokenKind::ForeignStartTagName,
            _ => TokenKind::HtmlStartTagName,
        };
        self.stack.push(tag);
        Some(token)
    }

    pub(super) fn scan_end_tag_name<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        let foreign = self.stack.in_foreign_content();
        let fold = !foreign
            || self
                .stack
                .top()
                .is_some_and(|top| matches!(top.kind(), TagKind::Svg | TagKind::Math));
        let name = scan_tag_name(cursor, fold);
        if name.is_empty() {
            return None;
        }

        let tag = if foreign && !fold {
            Tag::custom(name)
        } else {
            Tag::for_name(&name)
        };

        if self.stack.top() == Some(&tag) {
            self.stack.pop();
            Some(TokenKind::EndTagName)
        } else if self.stack.contains(&tag) {
            // Matches deeper in the stack: emit without popping so a later
            // template branch can still close the element for real.
            Some(TokenKind::EndTagName)
        } else {
            Some(TokenKind::ErroneousEndTagName)
        }
    }

    /// Zero-width implicit close. The dispatcher has consumed `<` (with the
    /// end mark pinned before it) or stands at end of input.
    pub(super) fn scan_implicit_end_tag<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        let foreign = self.stack.in_foreign_content();

        if !foreign && !self.stack.is_empty() && cursor.eof() {
            self.stack.pop();
            return Some(TokenKind::ImplicitEndTag);
        }

        let is_closing_tag = if cursor.lookahead() == Some('/') {
            cursor.advance();
            true
        } else {
            if self.stack.top().is_some_and(|top| top.is_void()) {
                self.stack.pop();
                return Some(TokenKind::ImplicitEndTag);
            }
            false
        };

        let fold = !foreign
            || self
                .stack
                .top()
                .is_some_and(|top| top.kind() != TagKind::Custom);
        let name = scan_tag_name(cursor, fold);
        if name.is_empty() && !cursor.eof() {
            return None;
        }
        let next_tag = Tag::for_name(&name);

        if is_closing_tag {
            if self.stack.top() == Some(&next_tag) {
                // The real end tag; decline and let the grammar take it.
                return None;
            }
            // A close matching deeper in the stack drains one level per call
            // toward the match (malformed-HTML accommodation).
            if self.stack.contains(&next_tag) {
                self.stack.pop();
                return Some(TokenKind::ImplicitEndTag);
            }
        } else if let Some(parent) = self.stack.top() {
            let structural_close = !parent.can_contain(&next_tag);
            let document_close = matches!(
                parent.kind(),
                TagKind::Html | TagKind::Head | TagKind::Body
            ) && cursor.eof();
            if !foreign && (structural_close || document_close) {
                self.stack.pop();
                return Some(TokenKind::ImplicitEndTag);
            }
        }

        None
    }

    pub(super) fn scan_self_closing_tag_delimiter<C: Cursor>(
        &mut self,
        cursor: &mut C,
    ) -> Option<TokenKind> {
        cursor.advance();
        if cursor.lookahead() == Some('>') {
            cursor.advance();
            if self.stack.in_foreign_content() {
                // Foreign self-close balances the start tag immediately.
                self.stack.pop();
            }
            return Some(TokenKind::SelfClosingTagDelimiter);
        }
        None
    }

    pub(super) fn scan_raw_text<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        let sentinel: &[u8] = match self.stack.top().map(Tag::kind) {
            Some(TagKind::Script) => b"</SCRIPT",
            Some(TagKind::Style) => b"</STYLE",
            _ => return None,
        };
        scan_embedded_text(cursor, sentinel, TokenKind::RawText)
    }

    pub(super) fn scan_rcdata_text<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        let sentinel: &[u8] = match self.stack.top().map(Tag::kind) {
            Some(TagKind::Title) => b"</TITLE",
            Some(TagKind::Textarea) => b"</TEXTAREA",
            _ => return None,
        };
        scan_embedded_text(cursor, sentinel, TokenKind::RcdataText)
    }

    /// Plaintext has no end tag: consume the rest of the document and close
    /// the element.
    pub(super) fn scan_plaintext_text<C: Cursor>(&mut self, cursor: &mut C) -> Option<TokenKind> {
        if self.stack.top().map(Tag::kind) != Some(TagKind::Plaintext) {
            return None;
        }
        cursor.mark_end();
        while cursor.lookahead().is_some() {
            cursor.advance();
            cursor.mark_end();
        }
        self.stack.pop();
        Some(TokenKind::PlaintextText)
    }
}

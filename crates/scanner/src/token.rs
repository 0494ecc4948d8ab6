//! External token ids and the per-call validity vector.

/// Token ids the scanner can emit.
///
/// The discriminant order is part of the host contract: it must line up with
/// the external-token declaration order in the grammar, and it is the index
/// into the validity vector the parser passes to every scan call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    HtmlStartTagName,
    VoidStartTagName,
    ForeignStartTagName,
    ScriptStartTagName,
    StyleStartTagName,
    TitleStartTagName,
    TextareaStartTagName,
    PlaintextStartTagName,
    EndTagName,
    ErroneousEndTagName,
    SelfClosingTagDelimiter,
    ImplicitEndTag,
    RawText,
    RcdataText,
    PlaintextText,
    Comment,
    DjangoCommentContent,
    VerbatimStart,
    VerbatimBlockContent,
    ValidateGenericBlock,
    ValidateGenericSimple,
    FilterColon,
}

/// Number of external token ids.
pub const TOKEN_KIND_COUNT: usize = 22;

impl TokenKind {
    /// Index of this token id in the validity vector.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Validity vector: one flag per token id, telling the scanner which tokens
/// the parser can accept at the current state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet {
    flags: [bool; TOKEN_KIND_COUNT],
}

impl TokenSet {
    /// Empty set; every scan against it rejects.
    pub const fn empty() -> Self {
        Self {
            flags: [false; TOKEN_KIND_COUNT],
        }
    }

    /// Build a set from an explicit list of token ids.
    pub fn of(kinds: &[TokenKind]) -> Self {
        let mut set = Self::empty();
        for &kind in kinds {
            set.insert(kind);
        }
        set
    }

    /// Build a set from the host's raw bool vector.
    ///
    /// Flags beyond [`TOKEN_KIND_COUNT`] are ignored; a short slice leaves
    /// the remaining ids invalid.
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut set = Self::empty();
        for (slot, &flag) in set.flags.iter_mut().zip(flags) {
            *slot = flag;
        }
        set
    }

    pub fn insert(&mut self, kind: TokenKind) {
        self.flags[kind.index()] = true;
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.flags[kind.index()]
    }

    /// True when any of the start-tag-name ids is valid.
    pub(crate) fn any_start_tag_name(&self) -> bool {
        self.contains(TokenKind::HtmlStartTagName)
            || self.contains(TokenKind::VoidStartTagName)
            || self.contains(TokenKind::ForeignStartTagName)
            || self.contains(TokenKind::ScriptStartTagName)
            || self.contains(TokenKind::StyleStartTagName)
            || self.contains(TokenKind::TitleStartTagName)
            || self.contains(TokenKind::TextareaStartTagName)
            || self.contains(TokenKind::PlaintextStartTagName)
    }

    /// True when either end-tag-name id is valid.
    pub(crate) fn any_end_tag_name(&self) -> bool {
        self.contains(TokenKind::EndTagName) || self.contains(TokenKind::ErroneousEndTagName)
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenKind, TokenSet, TOKEN_KIND_COUNT};

    #[test]
    fn token_indices_are_stable_and_dense() {
        assert_eq!(TokenKind::HtmlStartTagName.index(), 0);
        assert_eq!(TokenKind::EndTagName.index(), 8);
        assert_eq!(TokenKind::Comment.index(), 15);
        assert_eq!(TokenKind::FilterColon.index(), TOKEN_KIND_COUNT - 1);
    }

    #[test]
    fn from_flags_matches_of() {
        let mut flags = [false; TOKEN_KIND_COUNT];
        flags[TokenKind::RawText.index()] = true;
        flags[TokenKind::ImplicitEndTag.index()] = true;
        let from_flags = TokenSet::from_flags(&flags);
        let from_kinds = TokenSet::of(&[TokenKind::RawText, TokenKind::ImplicitEndTag]);
        assert_eq!(from_flags, from_kinds);
        assert!(from_flags.contains(TokenKind::RawText));
        assert!(!from_flags.contains(TokenKind::RcdataText));
    }

    #[test]
    fn short_flag_slices_leave_tail_invalid() {
        let set = TokenSet::from_flags(&[true]);
        assert!(set.contains(TokenKind::HtmlStartTagName));
        assert!(!set.contains(TokenKind::FilterColon));
    }
}

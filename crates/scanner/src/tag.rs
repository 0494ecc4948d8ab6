//! Tag vocabulary: classification of tag names and HTML content-model rules.
//!
//! Recognized HTML names are matched in canonical ASCII-uppercase form (the
//! tag-name scanners fold as they read); anything else becomes [`TagKind::Custom`]
//! with the name preserved. Discriminants are stable because they appear in
//! the serialized scanner state: void kinds first, `Custom` last.

/// Closed set of tag categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    // Void elements: no closing tag, never pushed on the open-element stack.
    Area,
    Base,
    Br,
    Col,
    Embed,
    Hr,
    Img,
    Input,
    Link,
    Meta,
    Param,
    Source,
    Track,
    Wbr,
    // Regular elements.
    A,
    Abbr,
    Address,
    Article,
    Aside,
    Audio,
    B,
    Bdi,
    Bdo,
    Blockquote,
    Body,
    Button,
    Canvas,
    Caption,
    Cite,
    Code,
    Colgroup,
    Data,
    Datalist,
    Dd,
    Del,
    Details,
    Dfn,
    Dialog,
    Div,
    Dl,
    Dt,
    Em,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Head,
    Header,
    Hgroup,
    Html,
    I,
    Iframe,
    Ins,
    Kbd,
    Label,
    Legend,
    Li,
    Main,
    Map,
    Mark,
    Math,
    Menu,
    Meter,
    Nav,
    Noscript,
    Object,
    Ol,
    Optgroup,
    Option,
    Output,
    P,
    Picture,
    Plaintext,
    Pre,
    Progress,
    Q,
    Rb,
    Rp,
    Rt,
    Rtc,
    Ruby,
    S,
    Samp,
    Script,
    Section,
    Select,
    Slot,
    Small,
    Span,
    Strong,
    Style,
    Sub,
    Summary,
    Sup,
    Svg,
    Table,
    Tbody,
    Td,
    Template,
    Textarea,
    Tfoot,
    Th,
    Thead,
    Time,
    Title,
    Tr,
    U,
    Ul,
    Var,
    Video,
    /// Unrecognized or foreign-content name; the owning [`Tag`] carries it.
    Custom,
}

/// All kinds in discriminant order. Indexed by the serialized kind byte.
const ALL_KINDS: [TagKind; 118] = [
    TagKind::Area,
    TagKind::Base,
    TagKind::Br,
    TagKind::Col,
    TagKind::Embed,
    TagKind::Hr,
    TagKind::Img,
    TagKind::Input,
    TagKind::Link,
    TagKind::Meta,
    TagKind::Param,
    TagKind::Source,
    TagKind::Track,
    TagKind::Wbr,
    TagKind::A,
    TagKind::Abbr,
    TagKind::Address,
    TagKind::Article,
    TagKind::Aside,
    TagKind::Audio,
    TagKind::B,
    TagKind::Bdi,
    TagKind::Bdo,
    TagKind::Blockquote,
    TagKind::Body,
    TagKind::Button,
    TagKind::Canvas,
    TagKind::Caption,
    TagKind::Cite,
    TagKind::Code,
    TagKind::Colgroup,
    TagKind::Data,
    TagKind::Datalist,
    TagKind::Dd,
    TagKind::Del,
    TagKind::Details,
    TagKind::Dfn,
    TagKind::Dialog,
    TagKind::Div,
    TagKind::Dl,
    TagKind::Dt,
    TagKind::Em,
    TagKind::Fieldset,
    TagKind::Figcaption,
    TagKind::Figure,
    TagKind::Footer,
    TagKind::Form,
    TagKind::H1,
    TagKind::H2,
    TagKind::H3,
    TagKind::H4,
    TagKind::H5,
    TagKind::H6,
    TagKind::Head,
    TagKind::Header,
    TagKind::Hgroup,
    TagKind::Html,
    TagKind::I,
    TagKind::Iframe,
    TagKind::Ins,
    TagKind::Kbd,
    TagKind::Label,
    TagKind::Legend,
    TagKind::Li,
    TagKind::Main,
    TagKind::Map,
    TagKind::Mark,
    TagKind::Math,
    TagKind::Menu,
    TagKind::Meter,
    TagKind::Nav,
    TagKind::Noscript,
    TagKind::Object,
    TagKind::Ol,
    TagKind::Optgroup,
    TagKind::Option,
    TagKind::Output,
    TagKind::P,
    TagKind::Picture,
    TagKind::Plaintext,
    TagKind::Pre,
    TagKind::Progress,
    TagKind::Q,
    TagKind::Rb,
    TagKind::Rp,
    TagKind::Rt,
    TagKind::Rtc,
    TagKind::Ruby,
    TagKind::S,
    TagKind::Samp,
    TagKind::Script,
    TagKind::Section,
    TagKind::Select,
    TagKind::Slot,
    TagKind::Small,
    TagKind::Span,
    TagKind::Strong,
    TagKind::Style,
    TagKind::Sub,
    TagKind::Summary,
    TagKind::Sup,
    TagKind::Svg,
    TagKind::Table,
    TagKind::Tbody,
    TagKind::Td,
    TagKind::Template,
    TagKind::Textarea,
    TagKind::Tfoot,
    TagKind::Th,
    TagKind::Thead,
    TagKind::Time,
    TagKind::Title,
    TagKind::Tr,
    TagKind::U,
    TagKind::Ul,
    TagKind::Var,
    TagKind::Video,
    TagKind::Custom,
];

impl TagKind {
    /// Classify a canonical (ASCII-uppercase) tag name.
    pub fn for_name(name: &str) -> Option<TagKind> {
        let kind = match name {
            "AREA" => TagKind::Area,
            "BASE" => TagKind::Base,
            "BR" => TagKind::Br,
            "COL" => TagKind::Col,
            "EMBED" => TagKind::Embed,
            "HR" => TagKind::Hr,
            "IMG" => TagKind::Img,
            "INPUT" => TagKind::Input,
            "LINK" => TagKind::Link,
            "META" => TagKind::Meta,
            "PARAM" => TagKind::Param,
            "SOURCE" => TagKind::Source,
            "TRACK" => TagKind::Track,
            "WBR" => TagKind::Wbr,
            "A" => TagKind::A,
            "ABBR" => TagKind::Abbr,
            "ADDRESS" => TagKind::Address,
            "ARTICLE" => TagKind::Article,
            "ASIDE" => TagKind::Aside,
            "AUDIO" => TagKind::Audio,
            "B" => TagKind::B,
            "BDI" => TagKind::Bdi,
            "BDO" => TagKind::Bdo,
            "BLOCKQUOTE" => TagKind::Blockquote,
            "BODY" => TagKind::Body,
            "BUTTON" => TagKind::Button,
            "CANVAS" => TagKind::Canvas,
            "CAPTION" => TagKind::Caption,
            "CITE" => TagKind::Cite,
            "CODE" => TagKind::Code,
            "COLGROUP" => TagKind::Colgroup,
            "DATA" => TagKind::Data,
            "DATALIST" => TagKind::Datalist,
            "DD" => TagKind::Dd,
            "DEL" => TagKind::Del,
            "DETAILS" => TagKind::Details,
            "DFN" => TagKind::Dfn,
            "DIALOG" => TagKind::Dialog,
            "DIV" => TagKind::Div,
            "DL" => TagKind::Dl,
            "DT" => TagKind::Dt,
            "EM" => TagKind::Em,
            "FIELDSET" => TagKind::Fieldset,
            "FIGCAPTION" => TagKind::Figcaption,
            "FIGURE" => TagKind::Figure,
            "FOOTER" => TagKind::Footer,
            "FORM" => TagKind::Form,
            "H1" => TagKind::H1,
            "H2" => TagKind::H2,
            "H3" => TagKind::H3,
            "H4" => TagKind::H4,
            "H5" => TagKind::H5,
            "H6" => TagKind::H6,
            "HEAD" => TagKind::Head,
            "HEADER" => TagKind::Header,
            "HGROUP" => TagKind::Hgroup,
            "HTML" => TagKind::Html,
            "I" => TagKind::I,
            "IFRAME" => TagKind::Iframe,
            "INS" => TagKind::Ins,
            "KBD" => TagKind::Kbd,
            "LABEL" => TagKind::Label,
            "LEGEND" => TagKind::Legend,
            "LI" => TagKind::Li,
            "MAIN" => TagKind::Main,
            "MAP" => TagKind::Map,
            "MARK" => TagKind::Mark,
            "MATH" => TagKind::Math,
            "MENU" => TagKind::Menu,
            "METER" => TagKind::Meter,
            "NAV" => TagKind::Nav,
            "NOSCRIPT" => TagKind::Noscript,
            "OBJECT" => TagKind::Object,
            "OL" => TagKind::Ol,
            "OPTGROUP" => TagKind::Optgroup,
            "OPTION" => TagKind::Option,
            "OUTPUT" => TagKind::Output,
            "P" => TagKind::P,
            "PICTURE" => TagKind::Picture,
            "PLAINTEXT" => TagKind::Plaintext,
            "PRE" => TagKind::Pre,
            "PROGRESS" => TagKind::Progress,
            "Q" => TagKind::Q,
            "RB" => TagKind::Rb,
            "RP" => TagKind::Rp,
            "RT" => TagKind::Rt,
            "RTC" => TagKind::Rtc,
            "RUBY" => TagKind::Ruby,
            "S" => TagKind::S,
            "SAMP" => TagKind::Samp,
            "SCRIPT" => TagKind::Script,
            "SECTION" => TagKind::Section,
            "SELECT" => TagKind::Select,
            "SLOT" => TagKind::Slot,
            "SMALL" => TagKind::Small,
            "SPAN" => TagKind::Span,
            "STRONG" => TagKind::Strong,
            "STYLE" => TagKind::Style,
            "SUB" => TagKind::Sub,
            "SUMMARY" => TagKind::Summary,
            "SUP" => TagKind::Sup,
            "SVG" => TagKind::Svg,
            "TABLE" => TagKind::Table,
            "TBODY" => TagKind::Tbody,
            "TD" => TagKind::Td,
            "TEMPLATE" => TagKind::Template,
            "TEXTAREA" => TagKind::Textarea,
            "TFOOT" => TagKind::Tfoot,
            "TH" => TagKind::Th,
            "THEAD" => TagKind::Thead,
            "TIME" => TagKind::Time,
            "TITLE" => TagKind::Title,
            "TR" => TagKind::Tr,
            "U" => TagKind::U,
            "UL" => TagKind::Ul,
            "VAR" => TagKind::Var,
            "VIDEO" => TagKind::Video,
            _ => return None,
        };
        Some(kind)
    }

    /// Decode a serialized kind byte.
    pub(crate) fn from_u8(byte: u8) -> Option<TagKind> {
        ALL_KINDS.get(byte as usize).copied()
    }

    pub fn is_void(self) -> bool {
        matches!(
            self,
            TagKind::Area
                | TagKind::Base
                | TagKind::Br
                | TagKind::Col
                | TagKind::Embed
                | TagKind::Hr
                | TagKind::Img
                | TagKind::Input
                | TagKind::Link
                | TagKind::Meta
                | TagKind::Param
                | TagKind::Source
                | TagKind::Track
                | TagKind::Wbr
        )
    }
}

/// An element tag: a kind plus, for [`TagKind::Custom`], the owned name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    kind: TagKind,
    name: Option<Box<str>>,
}

impl Tag {
    /// A recognized HTML tag. Must not be used for `Custom`.
    pub fn html(kind: TagKind) -> Self {
        debug_assert!(
            kind != TagKind::Custom,
            "custom tags carry a name; use Tag::custom"
        );
        Self { kind, name: None }
    }

    /// A custom tag owning its name. An empty name is the depth-preserving
    /// placeholder restored when deserialization hits buffer overflow.
    pub fn custom(name: impl Into<Box<str>>) -> Self {
        Self {
            kind: TagKind::Custom,
            name: Some(name.into()),
        }
    }

    /// Classify a canonical (already case-folded) name; unrecognized names
    /// become custom tags keeping the folded spelling.
    pub fn for_name(name: &str) -> Self {
        match TagKind::for_name(name) {
            Some(kind) => Self::html(kind),
            None => Self::custom(name),
        }
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Owned name for custom tags, `None` otherwise.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }

    /// HTML implicit-close table: does opening `child` inside `self` keep
    /// `self` open? Kinds with no rule default to `true`.
    pub fn can_contain(&self, child: &Tag) -> bool {
        let child = child.kind;
        match self.kind {
            TagKind::Li => child != TagKind::Li,
            TagKind::Dt | TagKind::Dd => child != TagKind::Dt && child != TagKind::Dd,
            TagKind::P => !matches!(
                child,
                TagKind::Address
                    | TagKind::Article
                    | TagKind::Aside
                    | TagKind::Blockquote
                    | TagKind::Details
                    | TagKind::Div
                    | TagKind::Dl
                    | TagKind::Fieldset
                    | TagKind::Figcaption
                    | TagKind::Figure
                    | TagKind::Footer
                    | TagKind::Form
                    | TagKind::H1
                    | TagKind::H2
                    | TagKind::H3
                    | TagKind::H4
                    | TagKind::H5
                    | TagKind::H6
                    | TagKind::Header
                    | TagKind::Hr
                    | TagKind::Main
                    | TagKind::Nav
                    | TagKind::Ol
                    | TagKind::P
                    | TagKind::Pre
                    | TagKind::Section
            ),
            TagKind::Colgroup => child == TagKind::Col,
            TagKind::Rb | TagKind::Rt | TagKind::Rp => {
                !matches!(child, TagKind::Rb | TagKind::Rt | TagKind::Rp)
            }
            TagKind::Optgroup => child != TagKind::Optgroup,
            TagKind::Tr => child != TagKind::Tr,
            TagKind::Td | TagKind::Th => {
                !matches!(child, TagKind::Td | TagKind::Th | TagKind::Tr)
            }
            _ => true,
        }
    }
}

//! The tree reconstructed from a front-end AST dump (§3, §4.2).
//!
//! `AstNode` is deliberately a plain arena-friendly value: children are owned
//! `Vec`s with no parent back-reference, so the tree can be built, walked
//! read-only, and dropped without any cycle-breaking dance.

/// The closed set of dump-line kinds the builder recognizes. Anything else
/// is walked over (to keep indent arithmetic correct) but never attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Invalid,
    FieldDecl,
    RecordDecl,
    NamespaceDecl,
    ClassTemplateDecl,
    TemplateTypeParmDecl,
    NonTypeTemplateParmDecl,
    TemplateTemplateParmDecl,
    AccessPublic,
    AccessPrivate,
    EnumDecl,
    TranslationUnitDecl,
}

impl TagKind {
    /// Whether this tag is one of the three template-parameter kinds.
    pub fn is_template_param(self) -> bool {
        matches!(
            self,
            TagKind::TemplateTypeParmDecl
                | TagKind::NonTypeTemplateParmDecl
                | TagKind::TemplateTemplateParmDecl
        )
    }
}

/// One node of the reconstructed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub indent: usize,
    pub tag: TagKind,
    /// Everything on the dump line after the matched tag token and its
    /// trailing space, with the line's own trailing newline already gone.
    pub payload: String,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(indent: usize, tag: TagKind, payload: String) -> Self {
        Self {
            indent,
            tag,
            payload,
            children: Vec::new(),
        }
    }
}

/// The closed table of dump tokens recognized by the builder, in match
/// order. A token must be followed by a space in the dump line to count as
/// a match (§4.2); the characters matched here come from the real front-end
/// dump this generator was built against (see DESIGN.md).
const TAG_TABLE: &[(&str, TagKind)] = &[
    ("FieldDecl", TagKind::FieldDecl),
    ("CXXRecordDecl", TagKind::RecordDecl),
    ("NamespaceDecl", TagKind::NamespaceDecl),
    ("ClassTemplateDecl", TagKind::ClassTemplateDecl),
    ("TemplateTypeParmDecl", TagKind::TemplateTypeParmDecl),
    ("NonTypeTemplateParmDecl", TagKind::NonTypeTemplateParmDecl),
    ("TemplateTemplateParmDecl", TagKind::TemplateTemplateParmDecl),
    ("public", TagKind::AccessPublic),
    ("private", TagKind::AccessPrivate),
    ("EnumDecl", TagKind::EnumDecl),
    ("TranslationUnitDecl", TagKind::TranslationUnitDecl),
];

/// Classify the portion of a dump line following its indent prefix.
///
/// Returns the matched tag and the byte length of `token + " "` consumed,
/// so the caller can slice out the payload. `TagKind::Invalid` with a
/// consumed length of `0` means no table entry matched.
pub fn classify(rest: &str) -> (TagKind, usize) {
    for (token, tag) in TAG_TABLE {
        if let Some(after) = rest.strip_prefix(token) {
            if after.starts_with(' ') {
                return (*tag, token.len() + 1);
            }
        }
    }
    (TagKind::Invalid, 0)
}

/// Count the leading run of indent-prefix characters on a raw dump line.
///
/// The original C++ computes this with an increment/decrement dance that
/// nets out to exactly this count (see DESIGN.md); we compute it directly.
pub fn indent_of(line: &str) -> usize {
    line.chars()
        .take_while(|c| matches!(c, ' ' | '|' | '-' | '`'))
        .count()
}

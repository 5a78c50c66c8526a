//! Block kind tags.

use serde::{Deserialize, Serialize};

/// The kind tag of a [`ContentBlock`](crate::ContentBlock).
///
/// Tags are the camelCase strings used in content records (`"twoColumn"`,
/// `"bibliographyCards"`, ...). Adding a kind means adding a case here, a
/// case in `ContentBlock`, and one validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Heading,
    Subtitle,
    Paragraph,
    Divider,
    Image,
    Code,
    Callout,
    List,
    TwoColumn,
    FeatureCard,
    ComponentGrid,
    FileStructure,
    Quiz,
    Assignment,
    EvaluationCards,
    BibliographyCards,
}

impl BlockKind {
    pub const ALL: [BlockKind; 16] = [
        Self::Heading,
        Self::Subtitle,
        Self::Paragraph,
        Self::Divider,
        Self::Image,
        Self::Code,
        Self::Callout,
        Self::List,
        Self::TwoColumn,
        Self::FeatureCard,
        Self::ComponentGrid,
        Self::FileStructure,
        Self::Quiz,
        Self::Assignment,
        Self::EvaluationCards,
        Self::BibliographyCards,
    ];

    /// The tag string as it appears in content records.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Subtitle => "subtitle",
            Self::Paragraph => "paragraph",
            Self::Divider => "divider",
            Self::Image => "image",
            Self::Code => "code",
            Self::Callout => "callout",
            Self::List => "list",
            Self::TwoColumn => "twoColumn",
            Self::FeatureCard => "featureCard",
            Self::ComponentGrid => "componentGrid",
            Self::FileStructure => "fileStructure",
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::EvaluationCards => "evaluationCards",
            Self::BibliographyCards => "bibliographyCards",
        }
    }

    /// Resolve a tag string. Matching is exact; no case folding or aliasing.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_tag() == tag)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_resolve_both_ways() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_tag(kind.as_tag()), Some(kind));
        }
    }

    #[test]
    fn tags_match_serde_names() {
        for kind in BlockKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize");
            assert_eq!(json, format!("\"{}\"", kind.as_tag()));
        }
    }

    #[test]
    fn unknown_and_miscased_tags_do_not_resolve() {
        assert_eq!(BlockKind::from_tag("video"), None);
        assert_eq!(BlockKind::from_tag("TwoColumn"), None);
        assert_eq!(BlockKind::from_tag("two-column"), None);
        assert_eq!(BlockKind::from_tag(""), None);
    }
}

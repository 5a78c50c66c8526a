//! Typed content blocks and their payloads.

use serde::{Deserialize, Serialize};

use crate::kind::BlockKind;

/// One unit of curriculum content.
///
/// Serializes as `{"type": "<tag>", ...payload}`, the same shape content
/// records use. Renderers switch on the variant; the core knows nothing
/// about presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBlock {
    Heading(TextBlock),
    Subtitle(TextBlock),
    Paragraph(TextBlock),
    Divider,
    Image(ImageBlock),
    Code(CodeBlock),
    Callout(CalloutBlock),
    List(ListBlock),
    TwoColumn(TwoColumn),
    FeatureCard(FeatureCards),
    ComponentGrid(ComponentGrid),
    FileStructure(FileStructure),
    Quiz(Quiz),
    Assignment(Assignment),
    EvaluationCards(ResourceCards),
    BibliographyCards(ResourceCards),
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading(_) => BlockKind::Heading,
            Self::Subtitle(_) => BlockKind::Subtitle,
            Self::Paragraph(_) => BlockKind::Paragraph,
            Self::Divider => BlockKind::Divider,
            Self::Image(_) => BlockKind::Image,
            Self::Code(_) => BlockKind::Code,
            Self::Callout(_) => BlockKind::Callout,
            Self::List(_) => BlockKind::List,
            Self::TwoColumn(_) => BlockKind::TwoColumn,
            Self::FeatureCard(_) => BlockKind::FeatureCard,
            Self::ComponentGrid(_) => BlockKind::ComponentGrid,
            Self::FileStructure(_) => BlockKind::FileStructure,
            Self::Quiz(_) => BlockKind::Quiz,
            Self::Assignment(_) => BlockKind::Assignment,
            Self::EvaluationCards(_) => BlockKind::EvaluationCards,
            Self::BibliographyCards(_) => BlockKind::BibliographyCards,
        }
    }

    /// Deep-link anchor of a text block, if it declares one.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::Heading(t) | Self::Subtitle(t) | Self::Paragraph(t) => t.id.as_deref(),
            _ => None,
        }
    }

    /// The quiz payload, if this is a quiz block.
    pub fn as_quiz(&self) -> Option<&Quiz> {
        match self {
            Self::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    /// Number of learner-visible text characters (code excluded).
    pub fn text_len(&self) -> usize {
        fn chars(s: &str) -> usize {
            s.chars().count()
        }
        fn all(lines: &[String]) -> usize {
            lines.iter().map(|l| chars(l)).sum()
        }

        match self {
            Self::Heading(t) | Self::Subtitle(t) | Self::Paragraph(t) => chars(&t.text),
            Self::Divider | Self::Code(_) => 0,
            Self::Image(img) => chars(&img.caption),
            Self::Callout(c) => chars(&c.text),
            Self::List(list) => list
                .items
                .iter()
                .map(|item| match item {
                    ListItem::Text(text) => chars(text),
                    ListItem::Nested { text, sub_items } => chars(text) + all(sub_items),
                })
                .sum(),
            Self::TwoColumn(tc) => tc
                .columns
                .iter()
                .map(|c| chars(&c.title) + all(&c.items))
                .sum(),
            Self::FeatureCard(fc) => fc
                .cards
                .iter()
                .map(|c| chars(&c.title) + chars(&c.text))
                .sum(),
            Self::ComponentGrid(grid) => grid.items.iter().map(|i| chars(&i.title)).sum(),
            Self::FileStructure(fs) => fs
                .files
                .iter()
                .map(|n| chars(&n.name) + all(&n.description))
                .sum(),
            Self::Quiz(quiz) => quiz
                .questions
                .iter()
                .map(|q| chars(&q.question) + all(&q.options))
                .sum(),
            Self::Assignment(a) => all(&a.description),
            Self::EvaluationCards(rc) | Self::BibliographyCards(rc) => rc
                .cards
                .iter()
                .map(|c| chars(&c.title) + chars(&c.description) + chars(&c.button_text))
                .sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload shared by `heading`, `subtitle` and `paragraph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    /// Stable anchor for deep-linking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// URL or asset path.
    pub src: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Highlighting language tag.
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    Info,
    Warning,
    Tip,
}

impl CalloutVariant {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "tip" => Some(Self::Tip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub variant: CalloutVariant,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    pub items: Vec<ListItem>,
}

/// A list entry: plain text, or text with one level of sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Nested {
        text: String,
        #[serde(rename = "subItems")]
        sub_items: Vec<String>,
    },
}

/// Side-by-side comparison. Always exactly two columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoColumn {
    pub columns: [Column; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCards {
    pub cards: Vec<FeatureCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub icon: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGrid {
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: String,
    pub title: String,
    pub icon: String,
}

/// A flat listing of files. Nodes carry no children; order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    pub files: Vec<FileNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

/// A multiple-choice question.
///
/// `correct_answer` indexes into `options`; blocks are only accepted when
/// `correct_answer < options.len()` and there are at least two options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl Question {
    pub fn new(question: impl Into<String>, options: &[&str], correct_answer: usize) -> Self {
        Self {
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    /// Instruction lines; may carry inline markup for the renderer.
    pub description: Vec<String>,
    pub code: String,
}

/// Payload of `evaluationCards` and `bibliographyCards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCards {
    pub cards: Vec<ResourceCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCard {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub url: String,
    /// Free-form resource type (`book`, `article`, `exam`, ...).
    pub category: String,
}

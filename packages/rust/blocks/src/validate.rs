//! Raw record validation.
//!
//! [`parse_block`] turns an already-parsed JSON record into a typed
//! [`ContentBlock`], failing with `MalformedBlock` (naming the offending
//! field path) or `UnknownBlockKind`. It never coerces one kind into another.
//! [`check_block`] applies the semantic rules that the type system cannot
//! express, for raw and hand-built blocks alike.

use serde_json::{Map, Value};
use tracing::trace;

use curriculum_shared::{BlockPosition, CurriculumError, Result};

use crate::block::{
    Assignment, CalloutBlock, CalloutVariant, CodeBlock, Column, ComponentGrid, ContentBlock,
    FeatureCard, FeatureCards, FileNode, FileStructure, GridItem, ImageBlock, ListBlock, ListItem,
    Question, Quiz, ResourceCard, ResourceCards, TextBlock, TwoColumn,
};
use crate::kind::BlockKind;

/// Minimum number of options a question must offer.
const MIN_OPTIONS: usize = 2;

/// Parse and validate a raw block record found at `position`.
pub fn parse_block(raw: &Value, position: &BlockPosition) -> Result<ContentBlock> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CurriculumError::malformed(position, "<block>", "is not an object"))?;
    let fields = Fields::root(obj, position);

    let tag = fields.str("type")?;
    let kind = BlockKind::from_tag(&tag).ok_or_else(|| CurriculumError::UnknownBlockKind {
        position: position.clone(),
        kind: tag.clone(),
    })?;
    trace!(%position, %kind, "parsing block");

    let block = match kind {
        BlockKind::Heading => ContentBlock::Heading(text_block(&fields)?),
        BlockKind::Subtitle => ContentBlock::Subtitle(text_block(&fields)?),
        BlockKind::Paragraph => ContentBlock::Paragraph(text_block(&fields)?),
        BlockKind::Divider => ContentBlock::Divider,
        BlockKind::Image => ContentBlock::Image(ImageBlock {
            src: fields.str("src")?,
            caption: fields.str("caption")?,
        }),
        BlockKind::Code => ContentBlock::Code(CodeBlock {
            language: fields.str("language")?,
            code: fields.str("code")?,
        }),
        BlockKind::Callout => {
            let tag = fields.str("variant")?;
            let variant = CalloutVariant::from_tag(&tag).ok_or_else(|| {
                fields.error("variant", format!("`{tag}` is not one of info, warning, tip"))
            })?;
            ContentBlock::Callout(CalloutBlock {
                variant,
                text: fields.str("text")?,
            })
        }
        BlockKind::List => ContentBlock::List(ListBlock {
            items: list_items(&fields)?,
        }),
        BlockKind::TwoColumn => ContentBlock::TwoColumn(two_column(&fields)?),
        BlockKind::FeatureCard => ContentBlock::FeatureCard(FeatureCards {
            cards: fields
                .objects("cards")?
                .iter()
                .map(|card| -> Result<FeatureCard> {
                    Ok(FeatureCard {
                        icon: card.str("icon")?,
                        title: card.str("title")?,
                        text: card.str("text")?,
                    })
                })
                .collect::<Result<_>>()?,
        }),
        BlockKind::ComponentGrid => ContentBlock::ComponentGrid(ComponentGrid {
            items: fields
                .objects("items")?
                .iter()
                .map(|item| -> Result<GridItem> {
                    Ok(GridItem {
                        id: item.str("id")?,
                        title: item.str("title")?,
                        icon: item.str("icon")?,
                    })
                })
                .collect::<Result<_>>()?,
        }),
        BlockKind::FileStructure => ContentBlock::FileStructure(FileStructure {
            files: fields
                .objects("files")?
                .iter()
                .map(|node| -> Result<FileNode> {
                    Ok(FileNode {
                        id: node.str("id")?,
                        name: node.str("name")?,
                        description: node.str_array("description")?,
                    })
                })
                .collect::<Result<_>>()?,
        }),
        BlockKind::Quiz => ContentBlock::Quiz(Quiz {
            questions: fields
                .objects("questions")?
                .iter()
                .map(|q| -> Result<Question> {
                    Ok(Question {
                        question: q.str("question")?,
                        options: q.str_array("options")?,
                        correct_answer: q.index("correctAnswer")?,
                    })
                })
                .collect::<Result<_>>()?,
        }),
        BlockKind::Assignment => ContentBlock::Assignment(Assignment {
            id: fields.str("id")?,
            description: fields.str_array("description")?,
            code: fields.str("code")?,
        }),
        BlockKind::EvaluationCards => ContentBlock::EvaluationCards(resource_cards(&fields)?),
        BlockKind::BibliographyCards => ContentBlock::BibliographyCards(resource_cards(&fields)?),
    };

    check_block(&block, position)?;
    Ok(block)
}

/// Apply the semantic rules of each kind to an already-typed block.
pub fn check_block(block: &ContentBlock, position: &BlockPosition) -> Result<()> {
    let err = |field: String, reason: &str| CurriculumError::malformed(position, field, reason);

    match block {
        ContentBlock::Heading(t) | ContentBlock::Subtitle(t) | ContentBlock::Paragraph(t) => {
            if t.id.as_deref().is_some_and(str::is_empty) {
                return Err(err("id".into(), "must not be empty when present"));
            }
        }
        ContentBlock::Image(img) => {
            if img.src.trim().is_empty() {
                return Err(err("src".into(), "must not be empty"));
            }
        }
        ContentBlock::Quiz(quiz) => {
            if quiz.questions.is_empty() {
                return Err(err("questions".into(), "must contain at least one question"));
            }
            for (i, q) in quiz.questions.iter().enumerate() {
                if q.options.len() < MIN_OPTIONS {
                    return Err(err(
                        format!("questions[{i}].options"),
                        "must offer at least two options",
                    ));
                }
                if q.correct_answer >= q.options.len() {
                    return Err(CurriculumError::malformed(
                        position,
                        format!("questions[{i}].correctAnswer"),
                        format!(
                            "is {} but the question has {} options",
                            q.correct_answer,
                            q.options.len()
                        ),
                    ));
                }
            }
        }
        ContentBlock::EvaluationCards(rc) | ContentBlock::BibliographyCards(rc) => {
            for (i, card) in rc.cards.iter().enumerate() {
                if !is_link(&card.url) {
                    return Err(err(
                        format!("cards[{i}].url"),
                        "must be an absolute URL or a root-relative path",
                    ));
                }
            }
        }
        ContentBlock::Divider
        | ContentBlock::Code(_)
        | ContentBlock::Callout(_)
        | ContentBlock::List(_)
        | ContentBlock::TwoColumn(_)
        | ContentBlock::FeatureCard(_)
        | ContentBlock::ComponentGrid(_)
        | ContentBlock::FileStructure(_)
        | ContentBlock::Assignment(_) => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-kind builders
// ---------------------------------------------------------------------------

fn text_block(fields: &Fields<'_>) -> Result<TextBlock> {
    Ok(TextBlock {
        text: fields.str("text")?,
        id: fields.opt_str("id")?,
    })
}

fn list_items(fields: &Fields<'_>) -> Result<Vec<ListItem>> {
    fields
        .array("items")?
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<ListItem> {
            match item {
                Value::String(text) => Ok(ListItem::Text(text.clone())),
                Value::Object(obj) => {
                    let nested = fields.child(obj, fields.path(&format!("items[{i}]")));
                    Ok(ListItem::Nested {
                        text: nested.str("text")?,
                        sub_items: nested.str_array("subItems")?,
                    })
                }
                _ => Err(fields.error(
                    &format!("items[{i}]"),
                    "must be a string or a {text, subItems} object",
                )),
            }
        })
        .collect()
}

fn two_column(fields: &Fields<'_>) -> Result<TwoColumn> {
    let columns = fields.objects("columns")?;
    let [left, right] = columns.as_slice() else {
        return Err(fields.error(
            "columns",
            format!("must have exactly 2 entries, found {}", columns.len()),
        ));
    };
    let column = |c: &Fields<'_>| -> Result<Column> {
        Ok(Column {
            title: c.str("title")?,
            items: c.str_array("items")?,
        })
    };
    Ok(TwoColumn {
        columns: [column(left)?, column(right)?],
    })
}

fn resource_cards(fields: &Fields<'_>) -> Result<ResourceCards> {
    Ok(ResourceCards {
        cards: fields
            .objects("cards")?
            .iter()
            .map(|card| -> Result<ResourceCard> {
                Ok(ResourceCard {
                    title: card.str("title")?,
                    description: card.str("description")?,
                    button_text: card.str("buttonText")?,
                    url: card.str("url")?,
                    category: card.str("category")?,
                })
            })
            .collect::<Result<_>>()?,
    })
}

fn is_link(raw: &str) -> bool {
    (raw.starts_with('/') && !raw.starts_with("//")) || url::Url::parse(raw).is_ok()
}

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

/// Typed access to a JSON object, producing `MalformedBlock` errors that
/// carry the full field path (e.g. `questions[2].options[1]`).
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    prefix: String,
    position: &'a BlockPosition,
}

impl<'a> Fields<'a> {
    fn root(obj: &'a Map<String, Value>, position: &'a BlockPosition) -> Self {
        Self {
            obj,
            prefix: String::new(),
            position,
        }
    }

    fn child(&self, obj: &'a Map<String, Value>, path: String) -> Self {
        Self {
            obj,
            prefix: path,
            position: self.position,
        }
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }

    fn error(&self, name: &str, reason: impl Into<String>) -> CurriculumError {
        CurriculumError::malformed(self.position, self.path(name), reason)
    }

    fn required(&self, name: &str) -> Result<&'a Value> {
        match self.obj.get(name) {
            None | Some(Value::Null) => Err(self.error(name, "is missing")),
            Some(value) => Ok(value),
        }
    }

    fn str(&self, name: &str) -> Result<String> {
        self.required(name)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.error(name, "must be a string"))
    }

    fn opt_str(&self, name: &str) -> Result<Option<String>> {
        match self.obj.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.error(name, "must be a string")),
        }
    }

    /// A non-negative integer.
    fn index(&self, name: &str) -> Result<usize> {
        self.required(name)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.error(name, "must be a non-negative integer"))
    }

    fn array(&self, name: &str) -> Result<&'a Vec<Value>> {
        self.required(name)?
            .as_array()
            .ok_or_else(|| self.error(name, "must be an array"))
    }

    fn str_array(&self, name: &str) -> Result<Vec<String>> {
        self.array(name)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.error(&format!("{name}[{i}]"), "must be a string"))
            })
            .collect()
    }

    fn objects(&self, name: &str) -> Result<Vec<Fields<'a>>> {
        self.array(name)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let path = format!("{name}[{i}]");
                v.as_object()
                    .map(|obj| self.child(obj, self.path(&path)))
                    .ok_or_else(|| self.error(&path, "must be an object"))
            })
            .collect()
    }
}

//! Topic assembly.
//!
//! A topic is an identifier, a title, and an ordered list of validated
//! content blocks. Assembly fails fast on the first invalid block and never
//! returns a partially built topic.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use curriculum_blocks::{BlockKind, ContentBlock, check_block, parse_block};
use curriculum_shared::{BlockPosition, Result, validate_identifier};

/// An assembled, immutable topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    id: String,
    title: String,
    blocks: Vec<ContentBlock>,
}

/// Knobs for [`assemble_topic_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicOptions {
    /// Drop blocks whose kind tag is unknown instead of failing.
    pub skip_unknown_blocks: bool,
}

impl Topic {
    /// Assemble a topic from blocks already built in code.
    ///
    /// The same semantic rules as for raw records apply.
    pub fn from_blocks(
        id: impl Into<String>,
        title: impl Into<String>,
        blocks: Vec<ContentBlock>,
    ) -> Result<Self> {
        let id = id.into();
        validate_identifier(&id)?;
        for (index, block) in blocks.iter().enumerate() {
            check_block(block, &BlockPosition::new(&id, index))?;
        }
        Ok(Self {
            id,
            title: title.into(),
            blocks,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Blocks in authoring order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Kind tags of the blocks, in order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(ContentBlock::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Validate every raw block record and assemble a topic.
pub fn assemble_topic(
    id: impl Into<String>,
    title: impl Into<String>,
    blocks: &[Value],
) -> Result<Topic> {
    assemble_topic_with(id, title, blocks, TopicOptions::default())
}

/// [`assemble_topic`] with explicit options.
///
/// Error positions always refer to the index in `blocks`, even when earlier
/// unknown blocks were skipped.
#[instrument(skip_all, fields(topic = tracing::field::Empty, blocks = blocks.len()))]
pub fn assemble_topic_with(
    id: impl Into<String>,
    title: impl Into<String>,
    blocks: &[Value],
    options: TopicOptions,
) -> Result<Topic> {
    let id = id.into();
    tracing::Span::current().record("topic", id.as_str());
    validate_identifier(&id)?;

    let mut parsed = Vec::with_capacity(blocks.len());
    for (index, raw) in blocks.iter().enumerate() {
        let position = BlockPosition::new(&id, index);
        match parse_block(raw, &position) {
            Ok(block) => parsed.push(block),
            Err(err) if options.skip_unknown_blocks && err.is_skippable() => {
                warn!(%position, error = %err, "skipping block");
            }
            Err(err) => return Err(err),
        }
    }

    debug!(kept = parsed.len(), "topic assembled");

    Ok(Topic {
        id,
        title: title.into(),
        blocks: parsed,
    })
}

#[cfg(test)]
mod tests {
    use curriculum_blocks::TextBlock;
    use curriculum_shared::CurriculumError;
    use serde_json::json;

    use super::*;

    #[test]
    fn traversal_visits_every_block_in_order() {
        let raw = vec![
            json!({"type": "heading", "text": "Aula 1"}),
            json!({"type": "paragraph", "text": "Primeiro"}),
            json!({"type": "divider"}),
            json!({"type": "paragraph", "text": "Segundo"}),
            json!({"type": "code", "language": "js", "code": "let x = 1;"}),
        ];
        let topic = assemble_topic("modulo-1-aula-1", "Aula 1", &raw).expect("assemble");

        assert_eq!(topic.blocks().len(), raw.len());
        for (block, original) in topic.blocks().iter().zip(&raw) {
            assert_eq!(&serde_json::to_value(block).expect("serialize"), original);
        }
    }

    #[test]
    fn fails_fast_with_position() {
        let raw = vec![
            json!({"type": "paragraph", "text": "ok"}),
            json!({"type": "image", "caption": "sem src"}),
            json!({"type": "paragraph"}),
        ];
        let err = assemble_topic("aula-2", "Aula 2", &raw).unwrap_err();
        match err {
            CurriculumError::MalformedBlock {
                position, field, ..
            } => {
                assert_eq!(position, BlockPosition::new("aula-2", 1));
                assert_eq!(field, "src");
            }
            other => panic!("expected MalformedBlock, got {other:?}"),
        }
    }

    #[test]
    fn unknown_blocks_abort_by_default() {
        let raw = vec![json!({"type": "video", "src": "x.mp4"})];
        let err = assemble_topic("aula-3", "Aula 3", &raw).unwrap_err();
        assert!(matches!(err, CurriculumError::UnknownBlockKind { .. }));
    }

    #[test]
    fn unknown_blocks_can_be_skipped() {
        let raw = vec![
            json!({"type": "video", "src": "x.mp4"}),
            json!({"type": "paragraph", "text": "ok"}),
        ];
        let options = TopicOptions {
            skip_unknown_blocks: true,
        };
        let topic = assemble_topic_with("aula-3", "Aula 3", &raw, options).expect("assemble");
        assert_eq!(topic.blocks().len(), 1);
        assert_eq!(topic.blocks()[0].kind(), BlockKind::Paragraph);

        // Malformed blocks are never skipped.
        let raw = vec![json!({"type": "paragraph"})];
        assert!(assemble_topic_with("aula-3", "Aula 3", &raw, options).is_err());
    }

    #[test]
    fn empty_topic_is_allowed() {
        let topic = assemble_topic("em-breve", "Em breve", &[]).expect("assemble");
        assert!(topic.is_empty());
    }

    #[test]
    fn identifier_must_be_anchor_safe() {
        let err = assemble_topic("Aula 1", "Aula 1", &[]).unwrap_err();
        assert!(matches!(err, CurriculumError::InvalidIdentifier { .. }));
    }

    #[test]
    fn from_blocks_checks_semantics() {
        let topic = Topic::from_blocks(
            "intro",
            "Intro",
            vec![ContentBlock::Heading(TextBlock::new("Olá"))],
        )
        .expect("assemble");
        assert_eq!(topic.id(), "intro");

        let err = Topic::from_blocks(
            "intro",
            "Intro",
            vec![ContentBlock::Heading(TextBlock::new("Olá").with_id(""))],
        )
        .unwrap_err();
        assert!(matches!(err, CurriculumError::MalformedBlock { .. }));
    }
}

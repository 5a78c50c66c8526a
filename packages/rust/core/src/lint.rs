//! Non-blocking authoring checks.
//!
//! Lint findings never prevent a curriculum from being published; they flag
//! legitimate work-in-progress states such as empty topics.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use curriculum_shared::LintConfig;

use crate::curriculum::Curriculum;

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum LintWarning {
    /// Topic has no content blocks yet.
    EmptyTopic { topic: String },
    /// Module has no lessons yet ("coming soon").
    EmptyModule { module: String },
    /// Two blocks in one topic declare the same deep-link anchor.
    DuplicateAnchor {
        topic: String,
        anchor: String,
        index: usize,
    },
}

impl std::fmt::Display for LintWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTopic { topic } => write!(f, "{topic}: topic has no content blocks"),
            Self::EmptyModule { module } => write!(f, "{module}: module has no lessons"),
            Self::DuplicateAnchor {
                topic,
                anchor,
                index,
            } => write!(f, "{topic}#{index}: anchor `{anchor}` is already used in this topic"),
        }
    }
}

/// Run every enabled rule over `curriculum`.
pub fn lint_curriculum(curriculum: &Curriculum, config: &LintConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if config.empty_modules {
        warnings.extend(
            curriculum
                .modules()
                .iter()
                .filter(|m| m.is_coming_soon())
                .map(|m| LintWarning::EmptyModule {
                    module: m.id().to_string(),
                }),
        );
    }

    for r in curriculum.topics() {
        let topic = r.topic;
        if config.empty_topics && topic.is_empty() {
            warnings.push(LintWarning::EmptyTopic {
                topic: topic.id().to_string(),
            });
        }

        if config.duplicate_anchors {
            let mut seen = HashSet::new();
            for (index, block) in topic.blocks().iter().enumerate() {
                let Some(anchor) = block.anchor() else {
                    continue;
                };
                if !seen.insert(anchor) {
                    warnings.push(LintWarning::DuplicateAnchor {
                        topic: topic.id().to_string(),
                        anchor: anchor.to_string(),
                        index,
                    });
                }
            }
        }
    }

    for warning in &warnings {
        warn!(language = %curriculum.language(), %warning, "lint");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use curriculum_blocks::{BlockKind, ContentBlock, TextBlock};

    use super::*;
    use crate::curriculum::assemble_curriculum;
    use crate::fixtures;
    use crate::module::assemble_module;
    use crate::topic::Topic;

    #[test]
    fn clean_curriculum_has_no_warnings() {
        let curriculum = fixtures::curriculum("pt", 2, 2);
        assert!(lint_curriculum(&curriculum, &LintConfig::default()).is_empty());
    }

    #[test]
    fn flags_empty_topics_and_modules() {
        let module = assemble_module("modulo-9", "Em breve", fixtures::topic("em-breve", &[]), vec![])
            .expect("module");
        let curriculum =
            assemble_curriculum(fixtures::lang("pt"), vec![module], vec![]).expect("curriculum");

        let warnings = lint_curriculum(&curriculum, &LintConfig::default());
        assert_eq!(
            warnings,
            vec![
                LintWarning::EmptyModule {
                    module: "modulo-9".into()
                },
                LintWarning::EmptyTopic {
                    topic: "em-breve".into()
                },
            ]
        );

        let config = LintConfig {
            empty_topics: false,
            empty_modules: false,
            ..LintConfig::default()
        };
        assert!(lint_curriculum(&curriculum, &config).is_empty());
    }

    #[test]
    fn flags_duplicate_anchor() {
        let topic = Topic::from_blocks(
            "aula-1",
            "Aula 1",
            vec![
                ContentBlock::Heading(TextBlock::new("Um").with_id("secao")),
                fixtures::block(BlockKind::Paragraph, "x"),
                ContentBlock::Subtitle(TextBlock::new("Dois").with_id("secao")),
            ],
        )
        .expect("topic");
        let module =
            assemble_module("modulo-1", "M1", fixtures::topic("intro", &[BlockKind::Heading]), vec![topic])
                .expect("module");
        let curriculum =
            assemble_curriculum(fixtures::lang("es"), vec![module], vec![]).expect("curriculum");

        let warnings = lint_curriculum(&curriculum, &LintConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].to_string(),
            "aula-1#2: anchor `secao` is already used in this topic"
        );
    }
}

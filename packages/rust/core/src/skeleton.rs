//! Language-independent curriculum skeleton and its digest.

use serde::Serialize;
use sha2::{Digest, Sha256};

use curriculum_blocks::BlockKind;
use curriculum_shared::SingletonKind;

use crate::curriculum::Curriculum;
use crate::topic::Topic;

/// Module, topic and block-kind structure with all text stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skeleton {
    pub modules: Vec<ModuleSkeleton>,
    pub singletons: Vec<(SingletonKind, TopicSkeleton)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSkeleton {
    pub id: String,
    pub overview: TopicSkeleton,
    pub lessons: Vec<TopicSkeleton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSkeleton {
    pub id: String,
    pub blocks: Vec<BlockKind>,
}

impl From<&Topic> for TopicSkeleton {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id().to_string(),
            blocks: topic.kinds(),
        }
    }
}

impl Curriculum {
    pub fn skeleton(&self) -> Skeleton {
        Skeleton {
            modules: self
                .modules()
                .iter()
                .map(|m| ModuleSkeleton {
                    id: m.id().to_string(),
                    overview: m.overview().into(),
                    lessons: m.lessons().iter().map(TopicSkeleton::from).collect(),
                })
                .collect(),
            singletons: self
                .singletons()
                .map(|(kind, topic)| (kind, topic.into()))
                .collect(),
        }
    }

    /// SHA-256 (hex) over the skeleton. Equal for structurally isomorphic
    /// curricula regardless of language.
    pub fn skeleton_digest(&self) -> String {
        self.skeleton().digest()
    }
}

impl Skeleton {
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        let mut topic = |prefix: &str, t: &TopicSkeleton| {
            hasher.update(format!("{prefix} {}\n", t.id));
            for kind in &t.blocks {
                hasher.update(format!("  {kind}\n"));
            }
        };

        for module in &self.modules {
            topic(&format!("module {} overview", module.id), &module.overview);
            for lesson in &module.lessons {
                topic(&format!("module {} lesson", module.id), lesson);
            }
        }
        for (kind, t) in &self.singletons {
            topic(&format!("singleton {kind}"), t);
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use curriculum_blocks::BlockKind;

    use crate::fixtures;

    #[test]
    fn isomorphic_curricula_share_digest() {
        let pt = fixtures::curriculum("pt", 2, 3);
        let es = fixtures::curriculum("es", 2, 3);
        assert_eq!(pt.skeleton(), es.skeleton());
        assert_eq!(pt.skeleton_digest(), es.skeleton_digest());
        assert_eq!(pt.skeleton_digest().len(), 64);
    }

    #[test]
    fn structural_change_changes_digest() {
        let pt = fixtures::curriculum("pt", 2, 3);
        let es = fixtures::curriculum_with("es", 2, 3, |m, l, kinds| {
            let mut kinds = kinds.to_vec();
            if (m, l) == (1, 1) {
                kinds.swap(0, 1);
            }
            kinds
        });
        assert_ne!(pt.skeleton_digest(), es.skeleton_digest());
    }

    #[test]
    fn skeleton_lists_block_kinds() {
        let pt = fixtures::curriculum("pt", 1, 1);
        let skeleton = pt.skeleton();
        assert_eq!(skeleton.modules[0].lessons[0].blocks, fixtures::LESSON_KINDS);
        assert_eq!(skeleton.singletons.len(), 3);
        assert_eq!(
            skeleton.modules[0].overview.blocks,
            [BlockKind::Heading, BlockKind::FeatureCard]
        );
    }
}

//! Curriculum assembly and read-only traversal.
//!
//! A curriculum is the per-language tree: ordered modules plus the named
//! singleton topics. Topic identifiers are navigation anchors and must be
//! unique across the whole tree. Once assembled the tree is immutable and can
//! be shared freely between readers.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{info, instrument};

use curriculum_blocks::ContentBlock;
use curriculum_shared::{BlockPosition, CurriculumError, Language, Result, SingletonKind};

use crate::module::Module;
use crate::topic::Topic;

/// Where a topic sits in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "slot", rename_all = "camelCase")]
pub enum TopicSlot {
    Overview { module: usize },
    Lesson { module: usize, lesson: usize },
    Singleton { kind: SingletonKind },
}

/// A topic together with its location, yielded by [`Curriculum::topics`].
#[derive(Debug, Clone, Copy)]
pub struct TopicRef<'a> {
    pub slot: TopicSlot,
    pub module: Option<&'a Module>,
    pub topic: &'a Topic,
}

impl TopicRef<'_> {
    /// Human-readable path such as `modulo-1/aula-2` or `bibliography/bibliografia`.
    pub fn path(&self) -> String {
        match (self.module, self.slot) {
            (Some(module), _) => format!("{}/{}", module.id(), self.topic.id()),
            (None, TopicSlot::Singleton { kind }) => format!("{kind}/{}", self.topic.id()),
            (None, _) => self.topic.id().to_string(),
        }
    }
}

/// Aggregate counts over a curriculum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumStats {
    pub modules: usize,
    pub topics: usize,
    pub blocks: usize,
    pub quizzes: usize,
    pub questions: usize,
    pub empty_topics: usize,
    /// Learner-visible text characters across all blocks.
    pub text_chars: usize,
}

/// An assembled, immutable curriculum for one language.
#[derive(Debug, Clone, Serialize)]
pub struct Curriculum {
    language: Language,
    modules: Vec<Module>,
    singletons: BTreeMap<SingletonKind, Topic>,
    /// Reading order of every topic.
    #[serde(skip)]
    order: Vec<TopicSlot>,
    /// Topic id -> position in `order`.
    #[serde(skip)]
    anchors: HashMap<String, usize>,
}

/// Assemble a curriculum, enforcing global uniqueness of topic identifiers
/// (across all modules and singletons) and of module identifiers.
#[instrument(skip_all, fields(language = %language, modules = modules.len()))]
pub fn assemble_curriculum(
    language: Language,
    modules: Vec<Module>,
    singleton_topics: Vec<(SingletonKind, Topic)>,
) -> Result<Curriculum> {
    let scope = format!("curriculum `{language}`");

    let mut module_ids = HashSet::with_capacity(modules.len());
    for module in &modules {
        if !module_ids.insert(module.id()) {
            return Err(CurriculumError::duplicate(module.id(), &scope));
        }
    }

    let mut singletons = BTreeMap::new();
    for (kind, topic) in singleton_topics {
        if singletons.contains_key(&kind) {
            return Err(CurriculumError::duplicate(kind.as_str(), &scope));
        }
        singletons.insert(kind, topic);
    }

    let mut order = Vec::new();
    for (m, module) in modules.iter().enumerate() {
        order.push(TopicSlot::Overview { module: m });
        order.extend((0..module.lessons().len()).map(|l| TopicSlot::Lesson {
            module: m,
            lesson: l,
        }));
    }
    order.extend(singletons.keys().map(|&kind| TopicSlot::Singleton { kind }));

    let mut curriculum = Curriculum {
        language,
        modules,
        singletons,
        order,
        anchors: HashMap::new(),
    };

    let mut anchors = HashMap::with_capacity(curriculum.order.len());
    for (position, slot) in curriculum.order.iter().enumerate() {
        let id = curriculum.resolve(*slot).id();
        if anchors.insert(id.to_string(), position).is_some() {
            return Err(CurriculumError::duplicate(id, &scope));
        }
    }
    curriculum.anchors = anchors;

    info!(topics = curriculum.order.len(), "curriculum assembled");
    Ok(curriculum)
}

impl Curriculum {
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id() == id)
    }

    pub fn singleton(&self, kind: SingletonKind) -> Option<&Topic> {
        self.singletons.get(&kind)
    }

    /// Singleton topics in reading order.
    pub fn singletons(&self) -> impl Iterator<Item = (SingletonKind, &Topic)> {
        self.singletons.iter().map(|(kind, topic)| (*kind, topic))
    }

    /// Every topic in reading order: each module's overview then its
    /// lessons, then the singletons.
    pub fn topics(&self) -> impl Iterator<Item = TopicRef<'_>> {
        self.order.iter().map(|slot| self.topic_ref(*slot))
    }

    /// Every block in reading order, with its position.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockPosition, &ContentBlock)> {
        self.topics().flat_map(|r| {
            r.topic
                .blocks()
                .iter()
                .enumerate()
                .map(move |(index, block)| (BlockPosition::new(r.topic.id(), index), block))
        })
    }

    /// Look a topic up by its anchor.
    pub fn topic(&self, id: &str) -> Option<TopicRef<'_>> {
        self.anchors
            .get(id)
            .map(|&position| self.topic_ref(self.order[position]))
    }

    /// Previous and next topic in reading order, for pager navigation.
    pub fn neighbors(&self, id: &str) -> Option<(Option<TopicRef<'_>>, Option<TopicRef<'_>>)> {
        let &position = self.anchors.get(id)?;
        let prev = position
            .checked_sub(1)
            .map(|p| self.topic_ref(self.order[p]));
        let next = self.order.get(position + 1).map(|slot| self.topic_ref(*slot));
        Some((prev, next))
    }

    pub fn topic_count(&self) -> usize {
        self.order.len()
    }

    pub fn stats(&self) -> CurriculumStats {
        let mut stats = CurriculumStats {
            modules: self.modules.len(),
            topics: self.order.len(),
            ..Default::default()
        };
        for r in self.topics() {
            if r.topic.is_empty() {
                stats.empty_topics += 1;
            }
            for block in r.topic.blocks() {
                stats.blocks += 1;
                stats.text_chars += block.text_len();
                if let Some(quiz) = block.as_quiz() {
                    stats.quizzes += 1;
                    stats.questions += quiz.questions.len();
                }
            }
        }
        stats
    }

    fn topic_ref(&self, slot: TopicSlot) -> TopicRef<'_> {
        let module = match slot {
            TopicSlot::Overview { module } | TopicSlot::Lesson { module, .. } => {
                Some(&self.modules[module])
            }
            TopicSlot::Singleton { .. } => None,
        };
        TopicRef {
            slot,
            module,
            topic: self.resolve(slot),
        }
    }

    fn resolve(&self, slot: TopicSlot) -> &Topic {
        match slot {
            TopicSlot::Overview { module } => self.modules[module].overview(),
            TopicSlot::Lesson { module, lesson } => &self.modules[module].lessons()[lesson],
            // `order` only holds singleton slots for kinds present in the map.
            TopicSlot::Singleton { kind } => &self.singletons[&kind],
        }
    }
}

//! Module assembly: an overview topic plus ordered lesson topics.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument};

use curriculum_shared::{CurriculumError, Result, validate_identifier};

use crate::topic::Topic;

/// An assembled, immutable module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    id: String,
    title: String,
    overview: Topic,
    lessons: Vec<Topic>,
}

impl Module {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn overview(&self) -> &Topic {
        &self.overview
    }

    /// Lessons in pedagogical order, exactly as supplied.
    pub fn lessons(&self) -> &[Topic] {
        &self.lessons
    }

    /// Overview first, then lessons.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        std::iter::once(&self.overview).chain(&self.lessons)
    }

    /// A module without lessons is "coming soon".
    pub fn is_coming_soon(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Group an overview and lesson topics under a module.
///
/// Topic identifiers (overview included) must be unique within the module.
/// Lesson order is preserved.
#[instrument(skip_all, fields(module = tracing::field::Empty, lessons = lessons.len()))]
pub fn assemble_module(
    id: impl Into<String>,
    title: impl Into<String>,
    overview: Topic,
    lessons: Vec<Topic>,
) -> Result<Module> {
    let id = id.into();
    tracing::Span::current().record("module", id.as_str());
    validate_identifier(&id)?;

    let mut seen = HashSet::with_capacity(lessons.len() + 1);
    for topic in std::iter::once(&overview).chain(&lessons) {
        if !seen.insert(topic.id()) {
            return Err(CurriculumError::duplicate(
                topic.id(),
                format!("module `{id}`"),
            ));
        }
    }

    debug!("module assembled");

    Ok(Module {
        id,
        title: title.into(),
        overview,
        lessons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::assemble_topic;

    fn topic(id: &str) -> Topic {
        assemble_topic(id, id, &[serde_json::json!({"type": "paragraph", "text": id})])
            .expect("topic")
    }

    #[test]
    fn preserves_lesson_order() {
        let ids = ["aula-3", "aula-1", "aula-2"];
        let module = assemble_module(
            "modulo-1",
            "Módulo 1",
            topic("modulo-1-visao-geral"),
            ids.iter().map(|id| topic(id)).collect(),
        )
        .expect("assemble");

        let got: Vec<&str> = module.lessons().iter().map(Topic::id).collect();
        assert_eq!(got, ids);
        assert_eq!(module.topics().count(), 4);
    }

    #[test]
    fn duplicate_lesson_rejected() {
        let err = assemble_module(
            "modulo-1",
            "Módulo 1",
            topic("visao-geral"),
            vec![topic("aula-1"), topic("aula-1")],
        )
        .unwrap_err();
        match err {
            CurriculumError::DuplicateIdentifier { id, scope } => {
                assert_eq!(id, "aula-1");
                assert_eq!(scope, "module `modulo-1`");
            }
            other => panic!("expected DuplicateIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn lesson_clashing_with_overview_rejected() {
        let err = assemble_module("modulo-1", "M", topic("aula-1"), vec![topic("aula-1")])
            .unwrap_err();
        assert!(matches!(err, CurriculumError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn empty_module_is_coming_soon() {
        let module =
            assemble_module("modulo-9", "Em breve", topic("modulo-9-intro"), vec![]).expect("ok");
        assert!(module.is_coming_soon());
    }
}

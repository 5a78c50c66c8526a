//! Test-only builders for small multi-language curricula.

use curriculum_blocks::{
    Assignment, BlockKind, CalloutBlock, CalloutVariant, CodeBlock, Column, ComponentGrid,
    ContentBlock, FeatureCard, FeatureCards, FileNode, FileStructure, GridItem, ImageBlock,
    ListBlock, ListItem, Question, Quiz, ResourceCard, ResourceCards, TextBlock, TwoColumn,
};
use curriculum_shared::{Language, SingletonKind};

use crate::curriculum::{Curriculum, assemble_curriculum};
use crate::module::assemble_module;
use crate::topic::Topic;

pub(crate) const QUESTIONS_PER_QUIZ: usize = 4;

/// Block skeleton used for every lesson.
pub(crate) const LESSON_KINDS: [BlockKind; 6] = [
    BlockKind::Heading,
    BlockKind::Paragraph,
    BlockKind::Code,
    BlockKind::Callout,
    BlockKind::Paragraph,
    BlockKind::Quiz,
];

pub(crate) fn lang(code: &str) -> Language {
    Language::new(code).expect("valid language")
}

/// A valid block of `kind`; `text` varies the learner-visible payload.
pub(crate) fn block(kind: BlockKind, text: &str) -> ContentBlock {
    let s = |suffix: &str| format!("{text} {suffix}");
    match kind {
        BlockKind::Heading => ContentBlock::Heading(TextBlock::new(s("título"))),
        BlockKind::Subtitle => ContentBlock::Subtitle(TextBlock::new(s("subtítulo"))),
        BlockKind::Paragraph => ContentBlock::Paragraph(TextBlock::new(s("parágrafo"))),
        BlockKind::Divider => ContentBlock::Divider,
        BlockKind::Image => ContentBlock::Image(ImageBlock {
            src: "/img/diagrama.png".into(),
            caption: s("legenda"),
        }),
        BlockKind::Code => ContentBlock::Code(CodeBlock {
            language: "jsx".into(),
            code: "const App = () => <h1>Olá</h1>;".into(),
        }),
        BlockKind::Callout => ContentBlock::Callout(CalloutBlock {
            variant: CalloutVariant::Tip,
            text: s("dica"),
        }),
        BlockKind::List => ContentBlock::List(ListBlock {
            items: vec![
                ListItem::Text(s("item")),
                ListItem::Nested {
                    text: s("grupo"),
                    sub_items: vec![s("sub")],
                },
            ],
        }),
        BlockKind::TwoColumn => ContentBlock::TwoColumn(TwoColumn {
            columns: [
                Column {
                    title: s("esquerda"),
                    items: vec![s("a")],
                },
                Column {
                    title: s("direita"),
                    items: vec![s("b")],
                },
            ],
        }),
        BlockKind::FeatureCard => ContentBlock::FeatureCard(FeatureCards {
            cards: vec![FeatureCard {
                icon: "⚡".into(),
                title: s("recurso"),
                text: s("descrição"),
            }],
        }),
        BlockKind::ComponentGrid => ContentBlock::ComponentGrid(ComponentGrid {
            items: vec![GridItem {
                id: "button".into(),
                title: s("botão"),
                icon: "🔘".into(),
            }],
        }),
        BlockKind::FileStructure => ContentBlock::FileStructure(FileStructure {
            files: vec![FileNode {
                id: "src".into(),
                name: "src/".into(),
                description: vec![s("código-fonte")],
            }],
        }),
        BlockKind::Quiz => ContentBlock::Quiz(quiz(&[0, 1, 3, 0])),
        BlockKind::Assignment => ContentBlock::Assignment(Assignment {
            id: "tarefa".into(),
            description: vec![s("enunciado")],
            code: "// implemente aqui".into(),
        }),
        BlockKind::EvaluationCards | BlockKind::BibliographyCards => {
            let cards = ResourceCards {
                cards: vec![ResourceCard {
                    title: s("recurso"),
                    description: s("descrição"),
                    button_text: s("abrir"),
                    url: "https://example.com/recurso".into(),
                    category: "article".into(),
                }],
            };
            if kind == BlockKind::EvaluationCards {
                ContentBlock::EvaluationCards(cards)
            } else {
                ContentBlock::BibliographyCards(cards)
            }
        }
    }
}

/// A quiz whose question `i` has four options and `correct[i]` as the answer.
pub(crate) fn quiz(correct: &[usize]) -> Quiz {
    Quiz {
        questions: correct
            .iter()
            .enumerate()
            .map(|(i, &answer)| Question::new(format!("Pergunta {i}"), &["A", "B", "C", "D"], answer))
            .collect(),
    }
}

pub(crate) fn topic(id: &str, kinds: &[BlockKind]) -> Topic {
    Topic::from_blocks(id, id, kinds.iter().map(|&k| block(k, id)).collect()).expect("topic")
}

/// `modules` modules of `lessons` lessons each, plus all three singletons.
/// Identifiers are the same for every language; text is language-tagged.
pub(crate) fn curriculum(code: &str, modules: usize, lessons: usize) -> Curriculum {
    curriculum_with(code, modules, lessons, |_, _, kinds| kinds.to_vec())
}

/// Like [`curriculum`], letting `edit(module, lesson, kinds)` reshape a lesson's skeleton.
pub(crate) fn curriculum_with(
    code: &str,
    modules: usize,
    lessons: usize,
    edit: impl Fn(usize, usize, &[BlockKind]) -> Vec<BlockKind>,
) -> Curriculum {
    let text = |id: &str| format!("[{code}] {id}");
    let build = |id: String, kinds: &[BlockKind]| {
        Topic::from_blocks(
            id.clone(),
            text(&id),
            kinds.iter().map(|&k| block(k, &text(&id))).collect(),
        )
        .expect("topic")
    };

    let modules = (1..=modules)
        .map(|m| {
            let overview = build(
                format!("modulo-{m}-visao-geral"),
                &[BlockKind::Heading, BlockKind::FeatureCard],
            );
            let lesson_topics = (1..=lessons)
                .map(|l| build(format!("modulo-{m}-aula-{l}"), &edit(m, l, &LESSON_KINDS)))
                .collect();
            assemble_module(format!("modulo-{m}"), text("módulo"), overview, lesson_topics)
                .expect("module")
        })
        .collect();

    let singletons = vec![
        (
            SingletonKind::Objectives,
            build("objetivos".into(), &[BlockKind::Heading, BlockKind::List]),
        ),
        (
            SingletonKind::Evaluations,
            build("avaliacoes".into(), &[BlockKind::EvaluationCards]),
        ),
        (
            SingletonKind::Bibliography,
            build("bibliografia".into(), &[BlockKind::BibliographyCards]),
        ),
    ];

    assemble_curriculum(lang(code), modules, singletons).expect("curriculum")
}

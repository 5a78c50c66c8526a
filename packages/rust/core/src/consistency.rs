//! Cross-language structural consistency.
//!
//! Two curricula are structurally isomorphic when they have the same modules
//! (ids and order), the same topics in each slot, and the same ordered
//! block-kind sequence in every topic. Text is allowed to differ.
//!
//! Sequences are aligned with a longest-common-subsequence diff, so a single
//! missing or extra element produces a single mismatch instead of cascading
//! through the rest of the sequence. Every divergence is collected; nothing
//! stops at the first one.

use serde::Serialize;
use tracing::{debug, info, instrument};

use curriculum_blocks::BlockKind;
use curriculum_shared::{Language, SingletonKind};

use crate::curriculum::Curriculum;
use crate::module::Module;
use crate::topic::Topic;

/// One structural divergence. `None` on a side means the node is absent there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralMismatch {
    pub path: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl std::fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |side: &Option<String>| side.clone().unwrap_or_else(|| "nothing".into());
        write!(
            f,
            "{}: expected {}, found {}",
            self.path,
            show(&self.expected),
            show(&self.actual)
        )
    }
}

/// Full divergence report between a reference and a candidate curriculum.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub reference: Language,
    pub candidate: Language,
    pub mismatches: Vec<StructuralMismatch>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Walk both curricula in lockstep and collect every structural divergence.
#[instrument(skip_all, fields(reference = %reference.language(), candidate = %candidate.language()))]
pub fn check_consistency(reference: &Curriculum, candidate: &Curriculum) -> ConsistencyReport {
    let mut out = Vec::new();

    let ref_ids: Vec<&str> = reference.modules().iter().map(Module::id).collect();
    let cand_ids: Vec<&str> = candidate.modules().iter().map(Module::id).collect();

    for step in align(&ref_ids, &cand_ids) {
        match step {
            Step::Same(r, c) => {
                compare_modules(&reference.modules()[r], &candidate.modules()[c], &mut out)
            }
            Step::Changed(r, c) => out.push(StructuralMismatch {
                path: format!("modules[{r}]"),
                expected: Some(format!("module `{}`", ref_ids[r])),
                actual: Some(format!("module `{}`", cand_ids[c])),
            }),
            Step::Missing(r) => out.push(StructuralMismatch {
                path: format!("modules[{r}]"),
                expected: Some(format!("module `{}`", ref_ids[r])),
                actual: None,
            }),
            Step::Extra(c) => out.push(StructuralMismatch {
                path: format!("modules[{c}]"),
                expected: None,
                actual: Some(format!("module `{}`", cand_ids[c])),
            }),
        }
    }

    for kind in SingletonKind::ALL {
        let path = format!("singletons/{kind}");
        match (reference.singleton(kind), candidate.singleton(kind)) {
            (Some(r), Some(c)) => compare_topics(&path, r, c, &mut out),
            (Some(r), None) => out.push(StructuralMismatch {
                path,
                expected: Some(topic_label(r)),
                actual: None,
            }),
            (None, Some(c)) => out.push(StructuralMismatch {
                path,
                expected: None,
                actual: Some(topic_label(c)),
            }),
            (None, None) => {}
        }
    }

    info!(mismatches = out.len(), "consistency check finished");

    ConsistencyReport {
        reference: reference.language().clone(),
        candidate: candidate.language().clone(),
        mismatches: out,
    }
}

fn compare_modules(reference: &Module, candidate: &Module, out: &mut Vec<StructuralMismatch>) {
    let module = reference.id();
    debug!(module, "comparing module");

    compare_topics(
        &format!("{module}/overview"),
        reference.overview(),
        candidate.overview(),
        out,
    );

    let ref_ids: Vec<&str> = reference.lessons().iter().map(Topic::id).collect();
    let cand_ids: Vec<&str> = candidate.lessons().iter().map(Topic::id).collect();

    for step in align(&ref_ids, &cand_ids) {
        match step {
            Step::Same(r, c) => compare_topics(
                &format!("{module}/{}", ref_ids[r]),
                &reference.lessons()[r],
                &candidate.lessons()[c],
                out,
            ),
            Step::Changed(r, c) => out.push(StructuralMismatch {
                path: format!("{module}/lessons[{r}]"),
                expected: Some(topic_label(&reference.lessons()[r])),
                actual: Some(topic_label(&candidate.lessons()[c])),
            }),
            Step::Missing(r) => out.push(StructuralMismatch {
                path: format!("{module}/lessons[{r}]"),
                expected: Some(topic_label(&reference.lessons()[r])),
                actual: None,
            }),
            Step::Extra(c) => out.push(StructuralMismatch {
                path: format!("{module}/lessons[{c}]"),
                expected: None,
                actual: Some(topic_label(&candidate.lessons()[c])),
            }),
        }
    }
}

/// Compare two topics occupying the same slot.
fn compare_topics(path: &str, reference: &Topic, candidate: &Topic, out: &mut Vec<StructuralMismatch>) {
    if reference.id() != candidate.id() {
        out.push(StructuralMismatch {
            path: path.to_string(),
            expected: Some(topic_label(reference)),
            actual: Some(topic_label(candidate)),
        });
        return;
    }

    let ref_kinds = reference.kinds();
    let cand_kinds = candidate.kinds();
    if ref_kinds == cand_kinds {
        return;
    }

    let kind = |k: BlockKind| Some(k.as_tag().to_string());
    for step in align(&ref_kinds, &cand_kinds) {
        let mismatch = match step {
            Step::Same(..) => continue,
            Step::Changed(r, c) => StructuralMismatch {
                path: format!("{path}/blocks[{r}]"),
                expected: kind(ref_kinds[r]),
                actual: kind(cand_kinds[c]),
            },
            Step::Missing(r) => StructuralMismatch {
                path: format!("{path}/blocks[{r}]"),
                expected: kind(ref_kinds[r]),
                actual: None,
            },
            Step::Extra(c) => StructuralMismatch {
                path: format!("{path}/blocks[{c}]"),
                expected: None,
                actual: kind(cand_kinds[c]),
            },
        };
        out.push(mismatch);
    }
}

fn topic_label(topic: &Topic) -> String {
    format!("topic `{}`", topic.id())
}

// ---------------------------------------------------------------------------
// Sequence alignment
// ---------------------------------------------------------------------------

/// One step of an alignment between a reference and a candidate sequence.
/// Indices are into the reference (`r`) and candidate (`c`) sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Same(usize, usize),
    Changed(usize, usize),
    Missing(usize),
    Extra(usize),
}

/// Align two sequences by longest common subsequence.
///
/// Within each gap between matched elements, leftover reference and
/// candidate elements are paired up positionally as `Changed`; the rest are
/// `Missing` or `Extra`.
fn align<T: PartialEq>(reference: &[T], candidate: &[T]) -> Vec<Step> {
    let (n, m) = (reference.len(), candidate.len());

    // lcs[i][j] = LCS length of reference[i..] and candidate[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if reference[i] == candidate[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut steps = Vec::with_capacity(n.max(m));
    let (mut gap_r, mut gap_c) = (Vec::new(), Vec::new());
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && reference[i] == candidate[j] {
            flush_gap(&mut gap_r, &mut gap_c, &mut steps);
            steps.push(Step::Same(i, j));
            i += 1;
            j += 1;
        } else if j >= m || (i < n && lcs[i + 1][j] >= lcs[i][j + 1]) {
            gap_r.push(i);
            i += 1;
        } else {
            gap_c.push(j);
            j += 1;
        }
    }
    flush_gap(&mut gap_r, &mut gap_c, &mut steps);
    steps
}

fn flush_gap(gap_r: &mut Vec<usize>, gap_c: &mut Vec<usize>, steps: &mut Vec<Step>) {
    let paired = gap_r.len().min(gap_c.len());
    steps.extend((0..paired).map(|k| Step::Changed(gap_r[k], gap_c[k])));
    steps.extend(gap_r[paired..].iter().map(|&r| Step::Missing(r)));
    steps.extend(gap_c[paired..].iter().map(|&c| Step::Extra(c)));
    gap_r.clear();
    gap_c.clear();
}

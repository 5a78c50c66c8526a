//! Quiz assessment engine.
//!
//! A [`QuizSession`] is the per-learner state for one attempt at one quiz
//! block. Each question moves `Unanswered -> Answered -> Revealed`;
//! selection may be changed freely until the answer is revealed, after which
//! the question is final. Retrying means starting a new session.

use serde::Serialize;
use tracing::{debug, trace};

use curriculum_blocks::Quiz;
use curriculum_shared::{CurriculumError, Result};

/// State of a single question within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum QuestionState {
    Unanswered,
    Answered {
        selected: usize,
    },
    #[serde(rename_all = "camelCase")]
    Revealed {
        selected: usize,
        is_correct: bool,
    },
}

/// Correct answers out of total questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Fraction of correct answers; `0.0` for an empty quiz.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Review entry for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question: usize,
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
}

/// Final result of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub score: Score,
    /// One entry per question, in authoring order.
    pub review: Vec<QuestionOutcome>,
}

impl QuizOutcome {
    /// Indices of the questions answered incorrectly.
    pub fn incorrect(&self) -> Vec<usize> {
        self.review
            .iter()
            .filter(|o| !o.is_correct)
            .map(|o| o.question)
            .collect()
    }
}

/// Mutable, session-local state for one quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession<'q> {
    quiz: &'q Quiz,
    states: Vec<QuestionState>,
}

impl<'q> QuizSession<'q> {
    pub fn new(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            states: vec![QuestionState::Unanswered; quiz.questions.len()],
        }
    }

    pub fn question_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, question: usize) -> Option<QuestionState> {
        self.states.get(question).copied()
    }

    /// Record (or replace) the selected option of an unrevealed question.
    pub fn select_option(&mut self, question: usize, option: usize) -> Result<()> {
        let options = self.options_len(question)?;
        if let QuestionState::Revealed { .. } = self.states[question] {
            return Err(CurriculumError::QuestionAlreadyGraded { question });
        }
        if option >= options {
            return Err(CurriculumError::OptionOutOfRange {
                question,
                option,
                options,
            });
        }

        self.states[question] = QuestionState::Answered { selected: option };
        trace!(question, option, "option selected");
        Ok(())
    }

    /// Grade the current selection and return whether it is correct.
    pub fn reveal_answer(&mut self, question: usize) -> Result<bool> {
        let correct_answer = self.question(question)?.correct_answer;

        let state = &mut self.states[question];
        let selected = match *state {
            QuestionState::Unanswered => {
                return Err(CurriculumError::NoSelection { question });
            }
            QuestionState::Revealed { .. } => {
                return Err(CurriculumError::QuestionAlreadyGraded { question });
            }
            QuestionState::Answered { selected } => selected,
        };

        let is_correct = selected == correct_answer;
        *state = QuestionState::Revealed {
            selected,
            is_correct,
        };
        debug!(question, selected, is_correct, "answer revealed");

        if self.is_completed() {
            debug!(score = %self.score(), "quiz completed");
        }
        Ok(is_correct)
    }

    /// Running score: correct revealed answers out of all questions.
    pub fn score(&self) -> Score {
        let correct = self
            .states
            .iter()
            .filter(|s| matches!(s, QuestionState::Revealed { is_correct: true, .. }))
            .count();
        Score {
            correct,
            total: self.states.len(),
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| matches!(s, QuestionState::Revealed { .. }))
            .count()
    }

    /// Every question has been revealed.
    pub fn is_completed(&self) -> bool {
        self.revealed_count() == self.states.len()
    }

    /// Final score and review list; `None` until the session is completed.
    pub fn outcome(&self) -> Option<QuizOutcome> {
        if !self.is_completed() {
            return None;
        }

        let review = self
            .states
            .iter()
            .zip(&self.quiz.questions)
            .enumerate()
            .filter_map(|(question, (state, q))| match *state {
                QuestionState::Revealed {
                    selected,
                    is_correct,
                } => Some(QuestionOutcome {
                    question,
                    selected,
                    correct_answer: q.correct_answer,
                    is_correct,
                }),
                _ => None,
            })
            .collect();

        Some(QuizOutcome {
            score: self.score(),
            review,
        })
    }

    fn question(&self, question: usize) -> Result<&'q curriculum_blocks::Question> {
        self.quiz
            .questions
            .get(question)
            .ok_or(CurriculumError::QuestionOutOfRange {
                question,
                total: self.quiz.questions.len(),
            })
    }

    fn options_len(&self, question: usize) -> Result<usize> {
        Ok(self.question(question)?.options.len())
    }
}

/// Grade a full set of selections in one go (batch grading clients).
///
/// `selections[i]` is the option chosen for question `i`. A missing entry
/// fails with `NoSelection`; surplus entries fail with `QuestionOutOfRange`.
pub fn grade_selections(quiz: &Quiz, selections: &[usize]) -> Result<QuizOutcome> {
    let mut session = QuizSession::new(quiz);
    for question in 0..selections.len().max(session.question_count()) {
        if let Some(&option) = selections.get(question) {
            session.select_option(question, option)?;
        }
        session.reveal_answer(question)?;
    }
    // Every question was revealed above.
    session.outcome().ok_or(CurriculumError::NoSelection {
        question: session.revealed_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn scenario_three_of_four() {
        let quiz = fixtures::quiz(&[0, 1, 3, 0]);
        let mut session = QuizSession::new(&quiz);

        for (question, option) in [0, 1, 2, 0].into_iter().enumerate() {
            session.select_option(question, option).expect("select");
            session.reveal_answer(question).expect("reveal");
        }

        let outcome = session.outcome().expect("completed");
        assert_eq!(outcome.score, Score { correct: 3, total: 4 });
        assert_eq!(outcome.score.to_string(), "3/4");
        assert_eq!(outcome.incorrect(), vec![2]);
        assert_eq!(outcome.review[2].selected, 2);
        assert_eq!(outcome.review[2].correct_answer, 3);
        assert!((outcome.score.ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn reveal_without_selection_fails() {
        let quiz = fixtures::quiz(&[0, 1]);
        let mut session = QuizSession::new(&quiz);

        let err = session.reveal_answer(1).unwrap_err();
        assert!(matches!(err, CurriculumError::NoSelection { question: 1 }));
        assert_eq!(session.state(1), Some(QuestionState::Unanswered));
        assert_eq!(session.score().correct, 0);
    }

    #[test]
    fn reselecting_before_reveal_replaces_selection() {
        let quiz = fixtures::quiz(&[2]);
        let mut session = QuizSession::new(&quiz);

        session.select_option(0, 1).expect("select");
        session.select_option(0, 1).expect("same option again");
        assert_eq!(session.state(0), Some(QuestionState::Answered { selected: 1 }));

        session.select_option(0, 2).expect("change mind");
        assert!(session.reveal_answer(0).expect("reveal"));
        assert_eq!(session.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn graded_question_is_final() {
        let quiz = fixtures::quiz(&[0, 0]);
        let mut session = QuizSession::new(&quiz);
        session.select_option(0, 1).expect("select");
        assert!(!session.reveal_answer(0).expect("reveal"));

        let before = session.state(0);
        let err = session.select_option(0, 0).unwrap_err();
        assert!(matches!(err, CurriculumError::QuestionAlreadyGraded { question: 0 }));
        let err = session.reveal_answer(0).unwrap_err();
        assert!(matches!(err, CurriculumError::QuestionAlreadyGraded { question: 0 }));
        assert_eq!(session.state(0), before);

        let err = session.select_option(0, 9).unwrap_err();
        assert!(matches!(err, CurriculumError::QuestionAlreadyGraded { question: 0 }));
        assert_eq!(session.state(0), before);

        // Other questions are untouched.
        assert_eq!(session.state(1), Some(QuestionState::Unanswered));
        session.select_option(1, 0).expect("other question still open");
    }

    #[test]
    fn scoring_is_order_independent() {
        let quiz = fixtures::quiz(&[0, 1, 3, 0]);
        let selections = [0, 1, 2, 0];

        let in_order = grade_selections(&quiz, &selections).expect("grade");

        let mut session = QuizSession::new(&quiz);
        for question in [3, 1, 2, 0] {
            session
                .select_option(question, selections[question])
                .expect("select");
        }
        for question in [2, 0, 3, 1] {
            session.reveal_answer(question).expect("reveal");
        }
        let shuffled = session.outcome().expect("completed");

        assert_eq!(in_order, shuffled);
        let order: Vec<usize> = shuffled.review.iter().map(|o| o.question).collect();
        assert_eq!(order, [0, 1, 2, 3]);
    }

    #[test]
    fn outcome_only_when_completed() {
        let quiz = fixtures::quiz(&[0, 1]);
        let mut session = QuizSession::new(&quiz);
        session.select_option(0, 0).expect("select");
        session.reveal_answer(0).expect("reveal");

        assert!(!session.is_completed());
        assert!(session.outcome().is_none());
        assert_eq!(session.score(), Score { correct: 1, total: 2 });
    }

    #[test]
    fn out_of_range_actions_rejected() {
        let quiz = fixtures::quiz(&[0]);
        let mut session = QuizSession::new(&quiz);

        let err = session.select_option(1, 0).unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::QuestionOutOfRange { question: 1, total: 1 }
        ));
        let err = session.select_option(0, 4).unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::OptionOutOfRange { option: 4, options: 4, .. }
        ));
        assert_eq!(session.state(0), Some(QuestionState::Unanswered));
    }

    #[test]
    fn batch_grading_checks_length() {
        let quiz = fixtures::quiz(&[0, 1]);
        let err = grade_selections(&quiz, &[0]).unwrap_err();
        assert!(matches!(err, CurriculumError::NoSelection { question: 1 }));

        let err = grade_selections(&quiz, &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, CurriculumError::QuestionOutOfRange { question: 2, .. }));
    }

    #[test]
    fn state_serializes_with_tag() {
        let state = QuestionState::Revealed {
            selected: 1,
            is_correct: true,
        };
        let json = serde_json::to_value(state).expect("serialize");
        assert_eq!(json["state"], "revealed");
        assert_eq!(json["isCorrect"], true);
    }
}

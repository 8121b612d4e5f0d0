//! Scoring for the three quiz modes.
//!
//! Questions come from outside (typically a JSON file); this module only knows
//! how to check answers and walk through a quiz.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PatternCategory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("question {index}: correct answer is not one of the options")]
    AnswerNotInOptions { index: usize },

    #[error("select an answer before checking")]
    NoSelection,

    #[error("check the answer before moving on")]
    NotChecked,
}

/// A single quiz question in one of the three modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Question {
    /// Pick the right option out of several.
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        answer: String,
    },
    /// Decide whether a statement is correct or incorrect.
    Judgement { statement: String, correct: bool },
    /// Match a pattern description to its category.
    CategoryMatch {
        prompt: String,
        pattern: String,
        category: PatternCategory,
    },
}

/// What the user picked for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Option(String),
    Verdict(bool),
    Category(PatternCategory),
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Question::MultipleChoice { prompt, .. } | Question::CategoryMatch { prompt, .. } => {
                prompt
            }
            Question::Judgement { statement, .. } => statement,
        }
    }

    /// An answer of the wrong kind is never correct.
    #[must_use]
    pub fn is_correct(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (Question::MultipleChoice { answer: expected, .. }, Answer::Option(picked)) => {
                expected.trim() == picked.trim()
            }
            (Question::Judgement { correct, .. }, Answer::Verdict(verdict)) => correct == verdict,
            (Question::CategoryMatch { category, .. }, Answer::Category(picked)) => {
                category == picked
            }
            _ => false,
        }
    }
}

/// A validated, non-empty list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for an empty list and
    /// `QuizError::AnswerNotInOptions` when a multiple-choice answer is not
    /// among its options.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        for (index, question) in questions.iter().enumerate() {
            if let Question::MultipleChoice {
                options, answer, ..
            } = question
            {
                if !options.iter().any(|opt| opt.trim() == answer.trim()) {
                    return Err(QuizError::AnswerNotInOptions { index });
                }
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Tally for a finished pass through a quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub answered: usize,
    pub skipped: usize,
    pub total: usize,
}

impl QuizScore {
    /// Share of all questions answered correctly, 0..=100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.correct.saturating_mul(100) / self.total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved to the question at this 1-based position.
    Question(usize),
    /// Last question passed; the run restarted from the top.
    Finished(QuizScore),
}

/// Cursor over a quiz: select, check, then move on or skip.
#[derive(Debug, Clone)]
pub struct QuizRun {
    quiz: Quiz,
    current: usize,
    selected: Option<Answer>,
    checked: Option<bool>,
    scored: bool,
    score: QuizScore,
}

impl QuizRun {
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        let total = quiz.len();
        Self {
            quiz,
            current: 0,
            selected: None,
            checked: None,
            scored: false,
            score: QuizScore {
                total,
                ..QuizScore::default()
            },
        }
    }

    #[must_use]
    pub fn current(&self) -> &Question {
        &self.quiz.questions[self.current]
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Answer> {
        self.selected.as_ref()
    }

    /// Result of the last check on the current question, if any.
    #[must_use]
    pub fn checked(&self) -> Option<bool> {
        self.checked
    }

    /// Running score for this pass.
    #[must_use]
    pub fn score(&self) -> QuizScore {
        self.score
    }

    /// Choose an answer; changing the selection clears a previous check.
    pub fn select(&mut self, answer: Answer) {
        self.selected = Some(answer);
        self.checked = None;
    }

    /// Check the selected answer.
    ///
    /// Only the first check of a question counts towards the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` if nothing is selected.
    pub fn check(&mut self) -> Result<bool, QuizError> {
        let answer = self.selected.as_ref().ok_or(QuizError::NoSelection)?;
        let correct = self.current().is_correct(answer);
        self.checked = Some(correct);
        if !self.scored {
            self.scored = true;
            self.score.answered += 1;
            if correct {
                self.score.correct += 1;
            }
        }
        Ok(correct)
    }

    /// Move past the current question without answering it.
    pub fn skip(&mut self) -> QuizStep {
        if !self.scored {
            self.score.skipped += 1;
        }
        self.advance()
    }

    /// Move on after checking.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotChecked` if the current question was never checked.
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        if !self.scored {
            return Err(QuizError::NotChecked);
        }
        Ok(self.advance())
    }

    fn advance(&mut self) -> QuizStep {
        self.selected = None;
        self.checked = None;
        self.scored = false;

        if self.current + 1 < self.quiz.len() {
            self.current += 1;
            return QuizStep::Question(self.position());
        }

        let finished = self.score;
        self.current = 0;
        self.score = QuizScore {
            total: self.quiz.len(),
            ..QuizScore::default()
        };
        QuizStep::Finished(finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quiz() -> Quiz {
        Quiz::new(vec![
            Question::MultipleChoice {
                prompt: "Creates families of related objects?".into(),
                options: vec!["Abstract Factory".into(), "Builder".into()],
                answer: "Abstract Factory".into(),
            },
            Question::Judgement {
                statement: "Observer defines a one-to-many dependency.".into(),
                correct: true,
            },
            Question::CategoryMatch {
                prompt: "Composes objects into trees.".into(),
                pattern: "Composite".into(),
                category: PatternCategory::Structural,
            },
        ])
        .unwrap()
    }

    #[test]
    fn answers_of_the_wrong_kind_are_incorrect() {
        let quiz = sample_quiz();
        let judgement = &quiz.questions()[1];
        assert!(judgement.is_correct(&Answer::Verdict(true)));
        assert!(!judgement.is_correct(&Answer::Verdict(false)));
        assert!(!judgement.is_correct(&Answer::Option("true".into())));
    }

    #[test]
    fn new_validates_questions() {
        assert_eq!(Quiz::new(Vec::new()).unwrap_err(), QuizError::Empty);
        let err = Quiz::new(vec![Question::MultipleChoice {
            prompt: "?".into(),
            options: vec!["A".into()],
            answer: "B".into(),
        }])
        .unwrap_err();
        assert_eq!(err, QuizError::AnswerNotInOptions { index: 0 });
    }

    #[test]
    fn check_requires_a_selection() {
        let mut run = QuizRun::new(sample_quiz());
        assert_eq!(run.check().unwrap_err(), QuizError::NoSelection);
        assert_eq!(run.next().unwrap_err(), QuizError::NotChecked);
    }

    #[test]
    fn full_pass_scores_and_restarts() {
        let mut run = QuizRun::new(sample_quiz());

        run.select(Answer::Option("Builder".into()));
        assert!(!run.check().unwrap());
        run.select(Answer::Option("Abstract Factory".into()));
        assert!(run.check().unwrap());
        assert_eq!(run.next().unwrap(), QuizStep::Question(2));

        assert_eq!(run.skip(), QuizStep::Question(3));

        run.select(Answer::Category(PatternCategory::Structural));
        assert!(run.check().unwrap());
        let step = run.next().unwrap();
        assert_eq!(
            step,
            QuizStep::Finished(QuizScore {
                correct: 1,
                answered: 2,
                skipped: 1,
                total: 3,
            })
        );

        assert_eq!(run.position(), 1);
        assert_eq!(run.score().answered, 0);
    }

    #[test]
    fn percent_is_bounded() {
        let score = QuizScore {
            correct: 2,
            answered: 3,
            skipped: 0,
            total: 3,
        };
        assert_eq!(score.percent(), 66);
        assert_eq!(QuizScore::default().percent(), 0);
    }

    #[test]
    fn questions_load_from_tagged_json() {
        let raw = r#"[
            {"kind":"multipleChoice","prompt":"?","options":["Builder","Bridge"],"answer":"Bridge"},
            {"kind":"judgement","statement":"Singleton is structural.","correct":false},
            {"kind":"categoryMatch","prompt":"Step by step construction","pattern":"Builder","category":"creational"}
        ]"#;
        let questions: Vec<Question> = serde_json::from_str(raw).unwrap();
        let quiz = Quiz::new(questions).unwrap();
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.questions()[1].prompt(), "Singleton is structural.");
    }
}

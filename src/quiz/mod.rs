//! Financial literacy quiz
//!
//! A fixed bank of five multiple-choice questions and the session state
//! machine that walks through them: NotStarted → InProgress → Completed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AdvisorError;
use crate::Result;

/// A single multiple-choice question. Static, defined once at process start.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct_option: usize,
    pub explanation: &'static str,
}

/// Static question bank — zero allocation
pub const QUESTION_BANK: &[QuizQuestion] = &[
    QuizQuestion {
        id: 1,
        prompt: "In the 50/30/20 budgeting rule, what does the 20% stand for?",
        options: [
            "Wants and entertainment",
            "Savings and debt repayment",
            "Housing costs",
            "Taxes",
        ],
        correct_option: 1,
        explanation: "The rule allocates 50% of income to needs, 30% to wants, \
            and 20% to savings and debt repayment.",
    },
    QuizQuestion {
        id: 2,
        prompt: "How large should an emergency fund typically be?",
        options: [
            "One week of expenses",
            "One month of expenses",
            "3-6 months of expenses",
            "Two years of expenses",
        ],
        correct_option: 2,
        explanation: "3-6 months of living expenses in an easily accessible \
            account covers most job losses and surprise bills.",
    },
    QuizQuestion {
        id: 3,
        prompt: "You invest $1,000 at 7% a year. Roughly how long until it doubles?",
        options: ["About 5 years", "About 10 years", "About 20 years", "About 35 years"],
        correct_option: 1,
        explanation: "By the rule of 72, money doubles in about 72 / 7 ≈ 10 years \
            at a 7% annual return.",
    },
    QuizQuestion {
        id: 4,
        prompt: "What does diversifying a portfolio mainly reduce?",
        options: [
            "Fund fees",
            "Taxes owed",
            "Risk from any single investment",
            "Time spent trading",
        ],
        correct_option: 2,
        explanation: "Spreading money across many assets limits the damage any \
            one investment can do to the whole portfolio.",
    },
    QuizQuestion {
        id: 5,
        prompt: "Which factor has the biggest impact on your credit score?",
        options: [
            "Payment history",
            "Number of bank accounts",
            "Your income",
            "Your age",
        ],
        correct_option: 0,
        explanation: "Payment history is the largest component of a credit \
            score — about 35% of a FICO score.",
    },
];

/// Render a question the way the chat panel shows it
pub fn format_question(question: &QuizQuestion, number: usize, total: usize) -> String {
    let mut text = format!("Question {}/{}: {}\n", number, total, question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, option));
    }
    text.push_str("Reply with 1-4.");
    text
}

//
// ================= State Machine =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum QuizState {
    NotStarted,
    InProgress { question: usize, score: u32 },
    Completed { score: u32 },
}

/// Progress and score for one quiz attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    state: QuizState,
    answers: Vec<usize>,
}

/// What happened after one answer submission
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub explanation: &'static str,
    pub progress: QuizProgress,
}

#[derive(Debug, Clone)]
pub enum QuizProgress {
    /// The next question, shown after the fixed UI delay
    Next(&'static QuizQuestion),
    Finished(QuizSummary),
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: QuizState::NotStarted,
            answers: Vec::new(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, QuizState::InProgress { .. })
    }

    /// Chosen option indices so far, in question order
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    /// Begin a fresh attempt, discarding any prior progress or final score
    pub fn start(&mut self) -> &'static QuizQuestion {
        self.state = QuizState::InProgress {
            question: 0,
            score: 0,
        };
        self.answers.clear();

        info!(total = QUESTION_BANK.len(), "Quiz started");
        &QUESTION_BANK[0]
    }

    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        match self.state {
            QuizState::InProgress { question, .. } => QUESTION_BANK.get(question),
            _ => None,
        }
    }

    /// Score one answer and advance. Valid only while a quiz is in progress;
    /// the turn classifier guarantees that for the chat flow. Option indices
    /// outside the rendered 0-3 range simply score as incorrect.
    pub fn submit_answer(&mut self, option: usize) -> Result<AnswerOutcome> {
        let QuizState::InProgress { question, score } = self.state else {
            return Err(AdvisorError::QuizError(
                "No quiz in progress; answers can only follow a started quiz".to_string(),
            ));
        };

        let current = &QUESTION_BANK[question];
        let correct = option == current.correct_option;
        let score = if correct { score + 1 } else { score };

        self.answers.push(option);

        let next_index = question + 1;
        let progress = if next_index < QUESTION_BANK.len() {
            self.state = QuizState::InProgress {
                question: next_index,
                score,
            };
            QuizProgress::Next(&QUESTION_BANK[next_index])
        } else {
            self.state = QuizState::Completed { score };
            info!(score, total = QUESTION_BANK.len(), "Quiz completed");
            QuizProgress::Finished(QuizSummary::new(score, QUESTION_BANK.len() as u32))
        };

        Ok(AnswerOutcome {
            correct,
            explanation: current.explanation,
            progress,
        })
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

//
// ================= Scoring =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Expert,
    Intermediate,
    Beginner,
}

impl ScoreTier {
    /// Tier boundaries are inclusive at the lower end: [80,100] expert,
    /// [60,80) intermediate, [0,60) beginner.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreTier::Expert
        } else if percentage >= 60.0 {
            ScoreTier::Intermediate
        } else {
            ScoreTier::Beginner
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreTier::Expert => {
                "Outstanding — you clearly know your personal finance fundamentals!"
            }
            ScoreTier::Intermediate => {
                "Nice work — you have a solid foundation with a little room to grow."
            }
            ScoreTier::Beginner => {
                "Good start — keep learning and the fundamentals will come quickly."
            }
        }
    }
}

/// Final scored summary for a completed attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub tier: ScoreTier,
}

impl QuizSummary {
    pub fn new(score: u32, total: u32) -> Self {
        let percentage = f64::from(score) / f64::from(total) * 100.0;
        Self {
            score,
            total,
            percentage,
            tier: ScoreTier::for_percentage(percentage),
        }
    }

    /// The summary line appended to the conversation log
    pub fn message(&self) -> String {
        format!(
            "Quiz complete! You scored {}/{} ({:.0}%). {}",
            self.score,
            self.total,
            self.percentage,
            self.tier.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_is_well_formed() {
        assert_eq!(QUESTION_BANK.len(), 5);
        for question in QUESTION_BANK {
            assert!(question.correct_option < question.options.len());
            assert!(!question.explanation.is_empty());
        }
    }

    #[test]
    fn test_five_answers_complete_the_quiz() {
        let mut session = QuizSession::new();
        session.start();

        for _ in 0..QUESTION_BANK.len() {
            session.submit_answer(0).expect("quiz should be in progress");
        }

        let QuizState::Completed { score } = *session.state() else {
            panic!("expected Completed, got {:?}", session.state());
        };
        assert!(score <= QUESTION_BANK.len() as u32);
        assert_eq!(session.answers().len(), 5);
    }

    #[test]
    fn test_correct_answer_scores_one_point() {
        let mut session = QuizSession::new();
        let first = session.start();

        let outcome = session
            .submit_answer(first.correct_option)
            .expect("quiz should be in progress");

        assert!(outcome.correct);
        assert_eq!(outcome.explanation, first.explanation);
        assert_eq!(
            *session.state(),
            QuizState::InProgress {
                question: 1,
                score: 1
            }
        );
    }

    #[test]
    fn test_incorrect_answer_leaves_score_unchanged() {
        let mut session = QuizSession::new();
        let first = session.start();
        let wrong = (first.correct_option + 1) % 4;

        let outcome = session.submit_answer(wrong).expect("quiz should be in progress");

        assert!(!outcome.correct);
        assert_eq!(
            *session.state(),
            QuizState::InProgress {
                question: 1,
                score: 0
            }
        );
    }

    #[test]
    fn test_perfect_run_reports_expert_summary() {
        let mut session = QuizSession::new();
        session.start();

        let mut last = None;
        for question in QUESTION_BANK {
            last = Some(
                session
                    .submit_answer(question.correct_option)
                    .expect("quiz should be in progress"),
            );
        }

        let outcome = last.expect("five answers were submitted");
        let QuizProgress::Finished(summary) = outcome.progress else {
            panic!("expected a final summary");
        };

        assert_eq!(summary.score, 5);
        let message = summary.message();
        assert!(message.contains("5/5 (100%)"), "message: {}", message);
        assert!(message.contains(ScoreTier::Expert.message()));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::for_percentage(100.0), ScoreTier::Expert);
        assert_eq!(ScoreTier::for_percentage(80.0), ScoreTier::Expert);
        assert_eq!(ScoreTier::for_percentage(79.9), ScoreTier::Intermediate);
        assert_eq!(ScoreTier::for_percentage(60.0), ScoreTier::Intermediate);
        assert_eq!(ScoreTier::for_percentage(59.0), ScoreTier::Beginner);
        assert_eq!(ScoreTier::for_percentage(0.0), ScoreTier::Beginner);
    }

    #[test]
    fn test_restart_resets_progress_and_score() {
        let mut session = QuizSession::new();
        session.start();
        for question in QUESTION_BANK {
            session
                .submit_answer(question.correct_option)
                .expect("quiz should be in progress");
        }
        assert_eq!(*session.state(), QuizState::Completed { score: 5 });

        let first = session.start();
        assert_eq!(first.id, QUESTION_BANK[0].id);
        assert_eq!(
            *session.state(),
            QuizState::InProgress {
                question: 0,
                score: 0
            }
        );
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_answer_without_active_quiz_is_rejected() {
        let mut session = QuizSession::new();
        assert!(session.submit_answer(0).is_err());

        session.start();
        for _ in 0..QUESTION_BANK.len() {
            session.submit_answer(0).expect("quiz should be in progress");
        }
        assert!(session.submit_answer(0).is_err());
    }

    #[test]
    fn test_out_of_range_option_scores_as_incorrect() {
        let mut session = QuizSession::new();
        session.start();

        let outcome = session.submit_answer(9).expect("quiz should be in progress");
        assert!(!outcome.correct);
    }

    #[test]
    fn test_format_question_lists_all_options() {
        let rendered = format_question(&QUESTION_BANK[0], 1, 5);
        assert!(rendered.starts_with("Question 1/5:"));
        for option in QUESTION_BANK[0].options {
            assert!(rendered.contains(option));
        }
        assert!(rendered.ends_with("Reply with 1-4."));
    }
}

//! Advisor session controller
//!
//! One `AdvisorSession` owns the conversation log and the quiz state for a
//! single chat session, and turns each user input into advisor replies.
//! Rendering collaborators get the session by handle; nothing here is a
//! process-wide singleton.

use std::time::Duration;
use tracing::{debug, info};

use crate::classifier::{classify, InputKind};
use crate::conversation::{ConversationLog, Message, Sender};
use crate::quiz::{format_question, QuizProgress, QuizSession, QUESTION_BANK};
use crate::templates;

/// Fixed UI delay before the next quiz question appears in the log
pub const NEXT_QUESTION_DELAY: Duration = Duration::from_millis(1000);

/// Confidence reported for a matched template vs the fallback
const MATCHED_CONFIDENCE: f32 = 0.85;
const FALLBACK_CONFIDENCE: f32 = 0.6;

const QUIZ_INTRO: &str =
    "Let's test your financial knowledge! Five quick questions — answer each one \
     by picking an option.";

/// Advisor output for one user turn
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// Advisor messages appended to the log during this turn
    pub messages: Vec<Message>,
    /// Next quiz question, to be appended by the caller after
    /// [`NEXT_QUESTION_DELAY`]
    pub delayed_question: Option<String>,
    pub confidence: f32,
}

/// State for one chat session: log, quiz progress, and a reset epoch
#[derive(Debug, Default)]
pub struct AdvisorSession {
    log: ConversationLog,
    quiz: QuizSession,
    epoch: u64,
}

impl AdvisorSession {
    pub fn new() -> Self {
        Self {
            log: ConversationLog::new(),
            quiz: QuizSession::new(),
            epoch: 0,
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    /// Bumped on every reset; delayed appends scheduled under an older epoch
    /// are dropped.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Handle one user turn. Total over all string inputs: free text that
    /// matches no rule gets the fallback template. The caller is expected to
    /// have filtered empty/whitespace-only input.
    pub fn handle_message(&mut self, text: &str) -> TurnReply {
        let text = text.trim();
        self.log.append(Sender::User, text);

        let kind = classify(text, self.quiz.is_active());
        debug!(?kind, "Turn classified");

        match kind {
            InputKind::StartQuiz => self.start_quiz(),
            InputKind::QuizAnswer(option) => self.answer_quiz(option),
            InputKind::Advice => self.advise(text),
        }
    }

    fn start_quiz(&mut self) -> TurnReply {
        let first = self.quiz.start();

        let intro = self.log.append(Sender::Advisor, QUIZ_INTRO).clone();
        let question = self
            .log
            .append(
                Sender::Advisor,
                format_question(first, 1, QUESTION_BANK.len()),
            )
            .clone();

        TurnReply {
            messages: vec![intro, question],
            delayed_question: None,
            confidence: MATCHED_CONFIDENCE,
        }
    }

    fn answer_quiz(&mut self, option: usize) -> TurnReply {
        // The classifier only yields QuizAnswer while a quiz is in progress,
        // so a rejected submission means the contract was broken upstream;
        // degrade to an advice turn rather than dropping the input.
        let Ok(outcome) = self.quiz.submit_answer(option) else {
            return self.advise("quiz");
        };

        let verdict = if outcome.correct {
            format!("Correct! {}", outcome.explanation)
        } else {
            format!("Not quite. {}", outcome.explanation)
        };
        let mut messages = vec![self.log.append(Sender::Advisor, verdict).clone()];

        let delayed_question = match outcome.progress {
            QuizProgress::Next(next) => Some(format_question(
                next,
                next.id as usize,
                QUESTION_BANK.len(),
            )),
            QuizProgress::Finished(summary) => {
                info!(score = summary.score, "Quiz summary appended");
                messages.push(self.log.append(Sender::Advisor, summary.message()).clone());
                None
            }
        };

        TurnReply {
            messages,
            delayed_question,
            confidence: MATCHED_CONFIDENCE,
        }
    }

    fn advise(&mut self, text: &str) -> TurnReply {
        let (reply, confidence) = match templates::match_rule(text) {
            Some(rule) => {
                debug!(topic = rule.topic, "Template matched");
                (rule.template, MATCHED_CONFIDENCE)
            }
            None => (templates::FALLBACK_TEMPLATE, FALLBACK_CONFIDENCE),
        };

        let message = self.log.append(Sender::Advisor, reply).clone();

        TurnReply {
            messages: vec![message],
            delayed_question: None,
            confidence,
        }
    }

    /// Append an advisor message outside the request/reply cycle (the delayed
    /// quiz question).
    pub fn append_advisor(&mut self, text: &str) -> Message {
        self.log.append(Sender::Advisor, text).clone()
    }

    /// Destroy the session state: log, quiz progress, and any pending
    /// delayed append (via the epoch bump).
    pub fn reset(&mut self) {
        self.log.clear();
        self.quiz = QuizSession::new();
        self.epoch += 1;
        info!(epoch = self.epoch, "Session reset");
    }
}

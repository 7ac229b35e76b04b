//! Turn classifier
//!
//! Decides what a user turn means for the session:
//! - StartQuiz: the user asked for the financial literacy quiz
//! - QuizAnswer: a quiz is in progress and the input picks one of its options
//! - Advice: everything else goes to the response template bank

/// Static keyword list — zero allocation
const QUIZ_KEYWORDS: &[&str] = &[
    "quiz",
    "test me",
    "test my knowledge",
    "financial literacy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    StartQuiz,
    /// Zero-based option index
    QuizAnswer(usize),
    Advice,
}

/// Classify a user turn. Answer inputs are only recognized while a quiz is
/// actually in progress; outside a quiz, "2" is just another advice message.
pub fn classify(message: &str, quiz_active: bool) -> InputKind {
    let lowered = message.trim().to_lowercase();

    if quiz_active {
        if let Some(option) = parse_option(&lowered) {
            return InputKind::QuizAnswer(option);
        }
    }

    if QUIZ_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return InputKind::StartQuiz;
    }

    InputKind::Advice
}

/// Accepts "1"-"4" and "a"-"d" as option picks
fn parse_option(input: &str) -> Option<usize> {
    match input {
        "1" | "a" => Some(0),
        "2" | "b" => Some(1),
        "3" | "c" => Some(2),
        "4" | "d" => Some(3),
        _ => None,
    }
}

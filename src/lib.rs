//! Personal Finance Advisor Engine
//!
//! The scripted chat core of a personal-finance dashboard:
//! - Matches free-text questions against a fixed advice template bank
//! - Runs a five-question financial literacy quiz with a scored summary
//! - Keeps an append-only conversation log per session
//! - Serves canned analytics projections for the dashboard's results panel
//!
//! TURN LOOP:
//! INPUT → CLASSIFY → (QUIZ STEP | TEMPLATE LOOKUP) → LOG → REPLY

pub mod advisor;
pub mod analytics;
pub mod api;
pub mod classifier;
pub mod conversation;
pub mod error;
pub mod models;
pub mod quiz;
pub mod session;
pub mod templates;

pub use error::Result;

// Re-export common types
pub use classifier::{classify, InputKind};
pub use conversation::{ConversationLog, Message, Sender};
pub use models::*;

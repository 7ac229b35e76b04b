//! Error types for the advisor engine

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Core Engine Errors
    // =============================

    #[error("Quiz error: {0}")]
    QuizError(String),

    #[error("Analysis error: {0}")]
    AnalysisError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

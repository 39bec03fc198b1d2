//! Error types for IngredientIQ.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Question catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Question catalog must contain at least one question")]
    Empty,

    #[error("Duplicate question id: {id}")]
    DuplicateId { id: String },
}

/// Answer shape violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("Question {question_id} expects a {expected} answer, got {actual}")]
    KindMismatch {
        question_id: String,
        expected: String,
        actual: String,
    },

    #[error("Option {option:?} is not offered by question {question_id}")]
    UnknownOption { question_id: String, option: String },

    #[error("Question {question_id} has no toggleable options")]
    NotToggleable { question_id: String },
}

/// Custom-item buffer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomItemError {
    #[error("No custom item at index {index} in {category} (len {len})")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },
}

/// Onboarding wizard errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown question: {id}")]
    UnknownQuestion { id: String },

    #[error("Question {id} does not accept custom items")]
    NotACustomCategory { id: String },

    #[error("Wizard already completed")]
    Completed,

    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error(transparent)]
    CustomItem(#[from] CustomItemError),
}

/// Ingredient analyzer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzerError {
    #[error("No ingredients entered")]
    EmptyInput,

    #[error("Input method {method} is not available yet")]
    UnsupportedInput { method: String },
}

/// Sign-in / sign-up errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Email is required")]
    MissingEmail,
}

/// Feedback submission errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    #[error("Feedback is empty")]
    Empty,
}

//! Onboarding wizard — the post-sign-up question flow.
//!
//! The user steps through a fixed catalog of questions. Answers and custom
//! items accumulate in a `WizardState`; advancing past the last question
//! hands a snapshot of everything collected to a `CompletionHandler` once.

pub mod answers;
pub mod catalog;
pub mod completion;
pub mod custom;
pub mod routes;
pub mod sessions;
pub mod wizard;

pub use answers::{AnswerStore, AnswerValue};
pub use catalog::{Question, QuestionCatalog, QuestionKind};
pub use completion::{
    ChannelCompletion, CompletionHandler, FanOut, LogCompletion, WebhookCompletion, WizardSnapshot,
};
pub use custom::CustomItems;
pub use routes::{OnboardingRouteState, WizardView, onboarding_routes};
pub use sessions::{WizardSessions, spawn_expiry_task};
pub use wizard::{StepOutcome, WizardState, WizardStatus};

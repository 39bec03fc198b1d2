//! Onboarding wizard — step cursor over the catalog plus the answers collected so far.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::answers::{AnswerStore, AnswerValue};
use super::catalog::{Question, QuestionCatalog, QuestionKind};
use super::completion::{CompletionHandler, WizardSnapshot};
use super::custom::CustomItems;
use crate::error::WizardError;

/// Lifecycle of a wizard.
///
/// Active → Completed, once the cursor is advanced past the last question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    Active,
    Completed,
}

/// Result of `next()` / `skip()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to this question index.
    Advanced(usize),
    /// Ran past the last question; the completion handler has fired.
    Completed,
}

/// A single user's pass through the onboarding questions.
///
/// All mutation goes through the methods below. Nothing is validated on
/// navigation: any question may be left unanswered.
pub struct WizardState {
    id: Uuid,
    catalog: Arc<QuestionCatalog>,
    cursor: usize,
    answers: AnswerStore,
    custom: CustomItems,
    status: WizardStatus,
    on_complete: Arc<dyn CompletionHandler>,
}

impl WizardState {
    pub fn new(catalog: Arc<QuestionCatalog>, on_complete: Arc<dyn CompletionHandler>) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog,
            cursor: 0,
            answers: AnswerStore::new(),
            custom: CustomItems::new(),
            status: WizardStatus::Active,
            on_complete,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn question_count(&self) -> usize {
        self.catalog.count()
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// The question the cursor points at.
    pub fn current_question(&self) -> &Question {
        // catalog is non-empty and cursor stays in bounds
        &self.catalog[self.cursor]
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn custom_items(&self) -> &CustomItems {
        &self.custom
    }

    /// Percentage of the flow reached, counting the current question.
    pub fn progress_percent(&self) -> u8 {
        let count = self.catalog.count();
        (((self.cursor + 1) * 100 + count / 2) / count) as u8
    }

    /// Whether `next()` will complete the wizard instead of advancing.
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.catalog.count()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    // ── Answers ─────────────────────────────────────────────────────────

    pub fn set_answer(&mut self, question_id: &str, value: AnswerValue) -> Result<(), WizardError> {
        self.ensure_active()?;
        let question = lookup(&self.catalog, question_id)?;
        self.answers.set_answer(question, value)?;
        Ok(())
    }

    pub fn toggle_option(&mut self, question_id: &str, option: &str) -> Result<(), WizardError> {
        self.ensure_active()?;
        let question = lookup(&self.catalog, question_id)?;
        self.answers.toggle_option(question, option)?;
        Ok(())
    }

    pub fn get_answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get_answer(question_id)
    }

    // ── Custom items ────────────────────────────────────────────────────

    pub fn stage_custom(&mut self, category: &str, text: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_active()?;
        self.custom_category(category)?;
        self.custom.stage_text(category, text);
        Ok(())
    }

    /// Commit the category's draft. `Ok(None)` when the draft was blank.
    pub fn commit_custom(&mut self, category: &str) -> Result<Option<String>, WizardError> {
        self.ensure_active()?;
        self.custom_category(category)?;
        Ok(self.custom.commit(category))
    }

    pub fn remove_custom(&mut self, category: &str, index: usize) -> Result<String, WizardError> {
        self.ensure_active()?;
        self.custom_category(category)?;
        Ok(self.custom.remove(category, index)?)
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Advance one question, or complete the wizard from the last one.
    pub fn next(&mut self) -> Result<StepOutcome, WizardError> {
        self.ensure_active()?;
        if self.cursor + 1 < self.catalog.count() {
            self.cursor += 1;
            debug!(wizard_id = %self.id, cursor = self.cursor, "Wizard advanced");
            return Ok(StepOutcome::Advanced(self.cursor));
        }

        let snapshot = self.snapshot();
        self.status = WizardStatus::Completed;
        self.on_complete.on_complete(&snapshot);
        Ok(StepOutcome::Completed)
    }

    /// Step back one question. At the first question this does nothing.
    pub fn previous(&mut self) -> Result<usize, WizardError> {
        self.ensure_active()?;
        if self.cursor > 0 {
            self.cursor -= 1;
            debug!(wizard_id = %self.id, cursor = self.cursor, "Wizard went back");
        }
        Ok(self.cursor)
    }

    /// Same as `next()`; the current question may be unanswered.
    pub fn skip(&mut self) -> Result<StepOutcome, WizardError> {
        self.next()
    }

    /// Copy of the answers and committed custom items collected so far.
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            wizard_id: self.id,
            answers: self.answers.clone(),
            custom_items: self.custom.committed().clone(),
            completed_at: Utc::now(),
        }
    }

    fn ensure_active(&self) -> Result<(), WizardError> {
        match self.status {
            WizardStatus::Active => Ok(()),
            WizardStatus::Completed => Err(WizardError::Completed),
        }
    }

    fn custom_category(&self, id: &str) -> Result<(), WizardError> {
        let question = lookup(&self.catalog, id)?;
        if question.kind == QuestionKind::MultiChoice {
            Ok(())
        } else {
            Err(WizardError::NotACustomCategory { id: id.to_string() })
        }
    }
}

fn lookup<'a>(catalog: &'a QuestionCatalog, id: &str) -> Result<&'a Question, WizardError> {
    catalog
        .find(id)
        .ok_or_else(|| WizardError::UnknownQuestion { id: id.to_string() })
}

impl std::fmt::Debug for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardState")
            .field("id", &self.id)
            .field("cursor", &self.cursor)
            .field("status", &self.status)
            .field("answers", &self.answers)
            .field("custom", &self.custom)
            .finish_non_exhaustive()
    }
}

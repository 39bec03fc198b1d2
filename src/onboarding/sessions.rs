//! Wizard sessions — in-memory registry of wizards in progress.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::catalog::QuestionCatalog;
use super::completion::CompletionHandler;
use super::wizard::{WizardState, WizardStatus};

struct Session {
    wizard: WizardState,
    last_touched: Instant,
}

/// Live wizards keyed by id. Completed wizards are dropped, idle ones expire.
pub struct WizardSessions {
    catalog: Arc<QuestionCatalog>,
    on_complete: Arc<dyn CompletionHandler>,
    wizards: RwLock<HashMap<Uuid, Session>>,
}

impl WizardSessions {
    pub fn new(catalog: Arc<QuestionCatalog>, on_complete: Arc<dyn CompletionHandler>) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            on_complete,
            wizards: RwLock::new(HashMap::new()),
        })
    }

    /// Start a new wizard and return its id.
    pub async fn start(&self) -> Uuid {
        let wizard = WizardState::new(Arc::clone(&self.catalog), Arc::clone(&self.on_complete));
        let id = wizard.id();
        let session = Session {
            wizard,
            last_touched: Instant::now(),
        };
        self.wizards.write().await.insert(id, session);
        info!(wizard_id = %id, "Onboarding wizard started");
        id
    }

    /// Read a wizard. `None` if it does not exist (completed or expired).
    pub async fn with<R>(&self, id: Uuid, f: impl FnOnce(&WizardState) -> R) -> Option<R> {
        let mut wizards = self.wizards.write().await;
        let session = wizards.get_mut(&id)?;
        session.last_touched = Instant::now();
        Some(f(&session.wizard))
    }

    /// Mutate a wizard. If the closure completes it, the wizard is removed.
    pub async fn with_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut WizardState) -> R) -> Option<R> {
        let mut wizards = self.wizards.write().await;
        let session = wizards.get_mut(&id)?;
        session.last_touched = Instant::now();
        let result = f(&mut session.wizard);
        if session.wizard.status() == WizardStatus::Completed {
            wizards.remove(&id);
            info!(wizard_id = %id, "Onboarding wizard finished and discarded");
        }
        Some(result)
    }

    /// Drop wizards untouched for longer than `max_idle`.
    /// Returns the number of wizards expired.
    pub async fn expire_idle(&self, max_idle: Duration) -> usize {
        let mut wizards = self.wizards.write().await;
        let before = wizards.len();
        wizards.retain(|id, session| {
            let keep = session.last_touched.elapsed() <= max_idle;
            if !keep {
                debug!(wizard_id = %id, "Onboarding wizard expired");
            }
            keep
        });
        let expired = before - wizards.len();
        if expired > 0 {
            info!(expired, remaining = wizards.len(), "Expired idle onboarding wizards");
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.wizards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.wizards.read().await.is_empty()
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }
}

/// Spawn a background task that periodically drops idle wizards.
pub fn spawn_expiry_task(
    sessions: Arc<WizardSessions>,
    max_idle: Duration,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            sessions.expire_idle(max_idle).await;
        }
    })
}

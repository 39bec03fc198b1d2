//! Completion handlers — where a finished wizard's answers go.
//!
//! The wizard calls [`CompletionHandler::on_complete`] exactly once and moves
//! on. Handlers must not block, and their failures never reach the wizard.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use super::answers::{AnswerStore, AnswerValue};

/// Read-only copy of everything a wizard collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub wizard_id: Uuid,
    pub answers: AnswerStore,
    /// Committed custom items per category.
    pub custom_items: BTreeMap<String, Vec<String>>,
    pub completed_at: DateTime<Utc>,
}

impl WizardSnapshot {
    /// Predefined selections for `category` followed by its custom items.
    pub fn selections(&self, category: &str) -> Vec<String> {
        let mut merged: Vec<String> = self
            .answers
            .get_answer(category)
            .and_then(AnswerValue::selections)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        if let Some(custom) = self.custom_items.get(category) {
            for item in custom {
                if !merged.contains(item) {
                    merged.push(item.clone());
                }
            }
        }
        merged
    }
}

/// Receives the snapshot of a completed wizard.
pub trait CompletionHandler: Send + Sync {
    fn on_complete(&self, snapshot: &WizardSnapshot);
}

/// Records the completion in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCompletion;

impl CompletionHandler for LogCompletion {
    fn on_complete(&self, snapshot: &WizardSnapshot) {
        let custom: usize = snapshot.custom_items.values().map(Vec::len).sum();
        info!(
            wizard_id = %snapshot.wizard_id,
            answered = snapshot.answers.len(),
            custom_items = custom,
            "Onboarding completed"
        );
    }
}

/// Forwards snapshots to an in-process consumer.
#[derive(Debug, Clone)]
pub struct ChannelCompletion {
    tx: mpsc::UnboundedSender<WizardSnapshot>,
}

impl ChannelCompletion {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WizardSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CompletionHandler for ChannelCompletion {
    fn on_complete(&self, snapshot: &WizardSnapshot) {
        if self.tx.send(snapshot.clone()).is_err() {
            warn!(wizard_id = %snapshot.wizard_id, "Completion consumer is gone, snapshot dropped");
        }
    }
}

/// POSTs the snapshot as JSON to a backend endpoint.
///
/// The request runs on a spawned task; non-2xx responses and transport
/// errors are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct WebhookCompletion {
    client: reqwest::Client,
    url: String,
}

impl WebhookCompletion {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CompletionHandler for WebhookCompletion {
    fn on_complete(&self, snapshot: &WizardSnapshot) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(wizard_id = %snapshot.wizard_id, "No async runtime, skipping answer submission");
            return;
        };

        let client = self.client.clone();
        let url = self.url.clone();
        let snapshot = snapshot.clone();
        handle.spawn(async move {
            match client.post(&url).json(&snapshot).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!(wizard_id = %snapshot.wizard_id, url = %url, "Onboarding answers submitted");
                }
                Ok(resp) => {
                    warn!(
                        wizard_id = %snapshot.wizard_id,
                        status = %resp.status(),
                        "Answer submission rejected"
                    );
                }
                Err(e) => {
                    warn!(wizard_id = %snapshot.wizard_id, error = %e, "Answer submission failed");
                }
            }
        });
    }
}

/// Calls each handler in order.
#[derive(Clone, Default)]
pub struct FanOut {
    handlers: Vec<Arc<dyn CompletionHandler>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handler: Arc<dyn CompletionHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl CompletionHandler for FanOut {
    fn on_complete(&self, snapshot: &WizardSnapshot) {
        for handler in &self.handlers {
            handler.on_complete(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::catalog::{Question, QuestionKind};

    fn snapshot() -> WizardSnapshot {
        let q = Question::new("allergies", "Allergies", QuestionKind::MultiChoice)
            .with_options(["Nuts", "Dairy"]);
        let mut answers = AnswerStore::new();
        answers.toggle_option(&q, "Nuts").unwrap();

        let mut custom_items = BTreeMap::new();
        custom_items.insert(
            "allergies".to_string(),
            vec!["Nickel".to_string(), "Nuts".to_string()],
        );
        custom_items.insert("avoiding".to_string(), vec!["Talc".to_string()]);

        WizardSnapshot {
            wizard_id: Uuid::new_v4(),
            answers,
            custom_items,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn selections_merge_custom_items_after_predefined() {
        let snap = snapshot();
        assert_eq!(snap.selections("allergies"), ["Nuts", "Nickel"]);
        assert_eq!(snap.selections("avoiding"), ["Talc"]);
        assert!(snap.selections("products").is_empty());
    }

    #[tokio::test]
    async fn channel_completion_delivers_snapshot() {
        let (handler, mut rx) = ChannelCompletion::new();
        let snap = snapshot();
        handler.on_complete(&snap);
        assert_eq!(rx.recv().await.unwrap(), snap);
    }

    #[test]
    fn channel_completion_tolerates_dropped_receiver() {
        let (handler, rx) = ChannelCompletion::new();
        drop(rx);
        handler.on_complete(&snapshot());
    }

    #[tokio::test]
    async fn fan_out_reaches_every_handler() {
        let (a, mut rx_a) = ChannelCompletion::new();
        let (b, mut rx_b) = ChannelCompletion::new();
        let fan = FanOut::new()
            .with(Arc::new(LogCompletion))
            .with(Arc::new(a))
            .with(Arc::new(b));
        assert_eq!(fan.len(), 3);

        let snap = snapshot();
        fan.on_complete(&snap);
        assert_eq!(rx_a.recv().await.unwrap().wizard_id, snap.wizard_id);
        assert_eq!(rx_b.recv().await.unwrap().wizard_id, snap.wizard_id);
    }

    #[test]
    fn webhook_without_runtime_is_skipped() {
        let hook = WebhookCompletion::new("http://127.0.0.1:9/profile");
        hook.on_complete(&snapshot());
        assert_eq!(hook.url(), "http://127.0.0.1:9/profile");
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let snap = snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: WizardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snap);
    }
}

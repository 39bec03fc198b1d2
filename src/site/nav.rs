//! Navigation bar items and the feedback box.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::FeedbackError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub href: String,
}

/// Landing page sections, in bar order.
pub fn nav_items() -> Vec<NavItem> {
    [
        ("How It Works", "#steps"),
        ("Features", "#features"),
        ("About", "#about"),
        ("Contact", "#contact"),
    ]
    .into_iter()
    .map(|(name, href)| NavItem {
        name: name.to_string(),
        href: href.to_string(),
    })
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

/// Accept a feedback message. Only logged; nothing is stored.
pub fn submit_feedback(text: &str) -> Result<FeedbackReceipt, FeedbackError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FeedbackError::Empty);
    }
    let receipt = FeedbackReceipt {
        id: Uuid::new_v4(),
        received_at: Utc::now(),
    };
    info!(feedback_id = %receipt.id, feedback = %text, "Feedback submitted");
    Ok(receipt)
}

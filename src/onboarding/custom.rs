//! Custom-item buffer — free-text entries beyond a question's predefined options.
//!
//! Each category (a multi-choice question id) has a draft that the user types
//! into, and a list of committed items that gets merged into that category's
//! selections when the wizard completes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CustomItemError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomItems {
    drafts: BTreeMap<String, String>,
    items: BTreeMap<String, Vec<String>>,
}

impl CustomItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store draft text for `category`, overwriting any previous draft.
    pub fn stage_text(&mut self, category: &str, text: impl Into<String>) {
        self.drafts.insert(category.to_string(), text.into());
    }

    /// Append the trimmed draft to the category's items and clear the draft.
    ///
    /// Returns the committed item, or `None` when the draft is blank.
    pub fn commit(&mut self, category: &str) -> Option<String> {
        let trimmed = self.drafts.get(category)?.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        self.drafts.remove(category);
        self.items
            .entry(category.to_string())
            .or_default()
            .push(trimmed.clone());
        Some(trimmed)
    }

    /// Remove and return the item at `index`.
    pub fn remove(&mut self, category: &str, index: usize) -> Result<String, CustomItemError> {
        let Some(list) = self.items.get_mut(category) else {
            return Err(CustomItemError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: 0,
            });
        };
        if index >= list.len() {
            return Err(CustomItemError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: list.len(),
            });
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.items.remove(category);
        }
        Ok(removed)
    }

    pub fn items(&self, category: &str) -> &[String] {
        self.items.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn draft(&self, category: &str) -> &str {
        self.drafts.get(category).map_or("", String::as_str)
    }

    /// All committed items by category. Drafts are not included.
    pub fn committed(&self) -> &BTreeMap<String, Vec<String>> {
        &self.items
    }
}

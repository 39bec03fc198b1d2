//! Answer store — the user's recorded response per question.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{Question, QuestionKind};
use crate::error::AnswerError;

/// A recorded answer. The variant must match the question's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Single(String),
    /// Selected options in the order they were picked. No duplicates.
    MultiSelect(Vec<String>),
    ToggleMap(BTreeMap<String, bool>),
    FreeText(String),
}

impl AnswerValue {
    /// The question kind this value is valid for.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Single(_) => QuestionKind::SingleChoice,
            Self::MultiSelect(_) => QuestionKind::MultiChoice,
            Self::ToggleMap(_) => QuestionKind::Toggles,
            Self::FreeText(_) => QuestionKind::FreeText,
        }
    }

    /// Selected options, for multi-select answers.
    pub fn selections(&self) -> Option<&[String]> {
        match self {
            Self::MultiSelect(items) => Some(items),
            _ => None,
        }
    }
}

/// Mapping from question id to answer. A missing key means "unanswered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the answer for `question`.
    ///
    /// The value must have the question's shape and only name offered options.
    pub fn set_answer(&mut self, question: &Question, value: AnswerValue) -> Result<(), AnswerError> {
        if value.kind() != question.kind {
            return Err(AnswerError::KindMismatch {
                question_id: question.id.clone(),
                expected: question.kind.to_string(),
                actual: value.kind().to_string(),
            });
        }

        let value = match value {
            AnswerValue::Single(option) => {
                ensure_offered(question, &option)?;
                AnswerValue::Single(option)
            }
            AnswerValue::MultiSelect(items) => {
                let mut deduped: Vec<String> = Vec::with_capacity(items.len());
                for item in items {
                    ensure_offered(question, &item)?;
                    if !deduped.contains(&item) {
                        deduped.push(item);
                    }
                }
                AnswerValue::MultiSelect(deduped)
            }
            AnswerValue::ToggleMap(map) => {
                for option in map.keys() {
                    ensure_offered(question, option)?;
                }
                AnswerValue::ToggleMap(map)
            }
            text @ AnswerValue::FreeText(_) => text,
        };

        self.answers.insert(question.id.clone(), value);
        Ok(())
    }

    /// Flip `option` on `question`.
    ///
    /// Multi-choice: add if absent, remove if present. Toggles: invert the
    /// switch, treating an unset switch as off.
    pub fn toggle_option(&mut self, question: &Question, option: &str) -> Result<(), AnswerError> {
        match question.kind {
            QuestionKind::MultiChoice | QuestionKind::Toggles => {}
            QuestionKind::SingleChoice | QuestionKind::FreeText => {
                return Err(AnswerError::NotToggleable {
                    question_id: question.id.clone(),
                });
            }
        }
        ensure_offered(question, option)?;

        let entry = self
            .answers
            .entry(question.id.clone())
            .or_insert_with(|| match question.kind {
                QuestionKind::Toggles => AnswerValue::ToggleMap(BTreeMap::new()),
                _ => AnswerValue::MultiSelect(Vec::new()),
            });

        match entry {
            AnswerValue::MultiSelect(items) => {
                if let Some(pos) = items.iter().position(|i| i == option) {
                    items.remove(pos);
                } else {
                    items.push(option.to_string());
                }
            }
            AnswerValue::ToggleMap(map) => {
                let on = map.entry(option.to_string()).or_insert(false);
                *on = !*on;
            }
            // set_answer guarantees the stored variant matches the kind
            AnswerValue::Single(_) | AnswerValue::FreeText(_) => {
                return Err(AnswerError::NotToggleable {
                    question_id: question.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn get_answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Forget the answer for a question, returning it.
    pub fn clear(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.answers.remove(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn ensure_offered(question: &Question, option: &str) -> Result<(), AnswerError> {
    if question.offers(option) {
        Ok(())
    } else {
        Err(AnswerError::UnknownOption {
            question_id: question.id.clone(),
            option: option.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allergies() -> Question {
        Question::new("allergies", "Allergies", QuestionKind::MultiChoice)
            .with_options(["Nuts", "Dairy", "Gluten"])
    }

    fn skin() -> Question {
        Question::new("skintype", "Skin", QuestionKind::SingleChoice).with_options(["Dry", "Oily"])
    }

    fn alerts() -> Question {
        Question::new("notifications", "Alerts", QuestionKind::Toggles)
            .with_options(["Product recalls", "Research updates"])
    }

    #[test]
    fn unanswered_is_absent() {
        let store = AnswerStore::new();
        assert!(store.get_answer("allergies").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn set_answer_replaces_prior_value() {
        let q = skin();
        let mut store = AnswerStore::new();
        store.set_answer(&q, AnswerValue::Single("Dry".into())).unwrap();
        store.set_answer(&q, AnswerValue::Single("Oily".into())).unwrap();
        assert_eq!(store.get_answer("skintype"), Some(&AnswerValue::Single("Oily".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_answer_rejects_wrong_shape() {
        let mut store = AnswerStore::new();
        let err = store
            .set_answer(&skin(), AnswerValue::FreeText("Dry".into()))
            .unwrap_err();
        assert!(matches!(err, AnswerError::KindMismatch { .. }));
        assert!(store.get_answer("skintype").is_none());
    }

    #[test]
    fn set_answer_rejects_unoffered_option() {
        let mut store = AnswerStore::new();
        let err = store
            .set_answer(&allergies(), AnswerValue::MultiSelect(vec!["Nuts".into(), "Kiwi".into()]))
            .unwrap_err();
        assert_eq!(
            err,
            AnswerError::UnknownOption {
                question_id: "allergies".into(),
                option: "Kiwi".into()
            }
        );
    }

    #[test]
    fn multi_select_duplicates_collapse() {
        let mut store = AnswerStore::new();
        store
            .set_answer(
                &allergies(),
                AnswerValue::MultiSelect(vec!["Dairy".into(), "Nuts".into(), "Dairy".into()]),
            )
            .unwrap();
        assert_eq!(
            store.get_answer("allergies").unwrap().selections().unwrap(),
            ["Dairy", "Nuts"]
        );
    }

    #[test]
    fn toggle_adds_then_removes() {
        let q = allergies();
        let mut store = AnswerStore::new();
        store.toggle_option(&q, "Nuts").unwrap();
        store.toggle_option(&q, "Gluten").unwrap();
        assert_eq!(store.get_answer("allergies").unwrap().selections().unwrap(), ["Nuts", "Gluten"]);

        store.toggle_option(&q, "Nuts").unwrap();
        assert_eq!(store.get_answer("allergies").unwrap().selections().unwrap(), ["Gluten"]);
    }

    #[test]
    fn double_toggle_restores_prior_selection() {
        let q = allergies();
        let mut store = AnswerStore::new();
        store.toggle_option(&q, "Dairy").unwrap();
        let before = store.get_answer("allergies").cloned();

        for option in ["Nuts", "Dairy", "Gluten"] {
            store.toggle_option(&q, option).unwrap();
            store.toggle_option(&q, option).unwrap();
            assert_eq!(store.get_answer("allergies").cloned(), before, "option {option}");
        }
    }

    #[test]
    fn toggle_switch_group() {
        let q = alerts();
        let mut store = AnswerStore::new();
        store.toggle_option(&q, "Product recalls").unwrap();
        let Some(AnswerValue::ToggleMap(map)) = store.get_answer("notifications") else {
            panic!("expected toggle map");
        };
        assert_eq!(map.get("Product recalls"), Some(&true));
        assert_eq!(map.get("Research updates"), None);

        store.toggle_option(&q, "Product recalls").unwrap();
        let Some(AnswerValue::ToggleMap(map)) = store.get_answer("notifications") else {
            panic!("expected toggle map");
        };
        assert_eq!(map.get("Product recalls"), Some(&false));
    }

    #[test]
    fn toggle_rejects_single_choice_and_unknown_option() {
        let mut store = AnswerStore::new();
        assert!(matches!(
            store.toggle_option(&skin(), "Dry"),
            Err(AnswerError::NotToggleable { .. })
        ));
        assert!(matches!(
            store.toggle_option(&allergies(), "Kiwi"),
            Err(AnswerError::UnknownOption { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_removes_answer() {
        let q = allergies();
        let mut store = AnswerStore::new();
        store.toggle_option(&q, "Nuts").unwrap();
        assert!(store.clear("allergies").is_some());
        assert!(store.get_answer("allergies").is_none());
    }

    #[test]
    fn answer_value_wire_format() {
        let json = serde_json::to_value(AnswerValue::Single("Dry".into())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "single", "value": "Dry"}));

        let parsed: AnswerValue =
            serde_json::from_value(serde_json::json!({"type": "multi_select", "value": ["Nuts"]}))
                .unwrap();
        assert_eq!(parsed, AnswerValue::MultiSelect(vec!["Nuts".into()]));
    }
}

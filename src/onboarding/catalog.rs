//! Question catalog — the ordered, immutable list of onboarding questions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// How a question collects its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option.
    SingleChoice,
    /// Pick any number of options; also accepts custom items.
    MultiChoice,
    /// Free-form text input.
    FreeText,
    /// One on/off switch per option.
    Toggles,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SingleChoice => "single_choice",
            Self::MultiChoice => "multi_choice",
            Self::FreeText => "free_text",
            Self::Toggles => "toggles",
        };
        write!(f, "{s}")
    }
}

/// One onboarding step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: QuestionKind,
    /// Predefined options, in display order. Empty for free-text questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Question {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            kind,
            options: Vec::new(),
            placeholder: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Whether `option` is one of the predefined options.
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Ordered question list. Never empty, ids are unique.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateId { id: q.id.clone() });
            }
        }
        Ok(Self { questions })
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// The six-step ingredient profile shown to new users after sign-up.
    pub fn ingredient_profile() -> Self {
        let questions = vec![
            Question::new("allergies", "Tell us about your allergies", QuestionKind::MultiChoice)
                .with_description("Select any ingredients you are allergic to")
                .with_options([
                    "Nuts", "Dairy", "Gluten", "Soy", "Eggs", "Shellfish", "Fragrance",
                    "Parabens", "Sulfates", "Latex",
                ]),
            Question::new("avoiding", "What do you want to avoid?", QuestionKind::MultiChoice)
                .with_description("Choose ingredients you prefer to avoid in products")
                .with_options([
                    "Parabens",
                    "Sulfates",
                    "Phthalates",
                    "Formaldehyde",
                    "Synthetic Fragrances",
                    "Mineral Oil",
                    "Petrolatum",
                    "Silicones",
                ]),
            Question::new("medications", "Current medications?", QuestionKind::FreeText)
                .with_description("List any medications you are currently taking (optional)")
                .with_placeholder("Enter medications separated by commas..."),
            Question::new("skintype", "Skin type & concerns?", QuestionKind::SingleChoice)
                .with_description("Help us personalize your recommendations")
                .with_options([
                    "Dry", "Oily", "Combination", "Sensitive", "Normal", "Acne-prone", "Mature",
                    "Rosacea",
                ]),
            Question::new("products", "Preferred product types?", QuestionKind::MultiChoice)
                .with_description("What products do you use most often?")
                .with_options([
                    "Skincare", "Makeup", "Hair Care", "Body Care", "Sunscreen", "Deodorant",
                    "Toothpaste", "Fragrance",
                ]),
            Question::new("notifications", "Notification preferences?", QuestionKind::Toggles)
                .with_description("How would you like to receive updates?")
                .with_options([
                    "New ingredient alerts",
                    "Product recalls",
                    "Personalized recommendations",
                    "Weekly safety reports",
                    "Research updates",
                ]),
        ];
        Self { questions }
    }
}

impl std::ops::Index<usize> for QuestionCatalog {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

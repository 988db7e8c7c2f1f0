//! Tag taxonomy: the static configuration every engine walks.
//!
//! Pure data: the branching question tree, the flat questionnaire, the resume keyword
//! dictionary, and the leaf → tags mapping. Engines interpret it generically, so a new
//! question, leaf, or keyword category is a data change only.

pub mod defaults;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Branching tree
// ────────────────────────────────────────────────────────────────────────────

/// Named side effects a step may trigger when answered. Dispatched by the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    /// Derive the eligibility code from the chosen value (`EligibilityCode::from_answer`).
    SetEligibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub value: String,
    /// Step id (question or leaf) reached by choosing this option.
    pub next: String,
    /// Tags contributed by the choice itself, in addition to any leaf tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub options: Vec<QuizOption>,
    #[serde(default)]
    pub on_select: Option<SideEffect>,
}

impl Question {
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDefinition {
    Question(Question),
    Leaf(Leaf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTree {
    pub root: String,
    pub steps: BTreeMap<String, StepDefinition>,
}

// ────────────────────────────────────────────────────────────────────────────
// Flat questionnaire
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Single,
    Multi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A follow-up is shown only while `question` has one of `any_of` selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub question: String,
    pub any_of: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatQuestion {
    pub id: String,
    pub prompt: String,
    pub kind: SelectionKind,
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub visible_when: Option<VisibilityRule>,
    #[serde(default)]
    pub on_select: Option<SideEffect>,
}

impl FlatQuestion {
    pub fn option(&self, label: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume keywords
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub tag: String,
    /// Display grouping only; never used for scoring.
    #[serde(default)]
    pub group: Option<String>,
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub tree: QuestionTree,
    #[serde(default)]
    pub questionnaire: Vec<FlatQuestion>,
    /// Iteration order is the extractor's tie-break order.
    #[serde(default)]
    pub keywords: Vec<KeywordCategory>,
}

impl Taxonomy {
    /// The taxonomy shipped with the popup.
    pub fn builtin() -> Self {
        defaults::builtin_taxonomy()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let taxonomy: Taxonomy = serde_json::from_str(raw)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Taxonomy(format!("failed to read {}: {e}", path.display()))
        })?;
        let taxonomy = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            steps = taxonomy.tree.steps.len(),
            questions = taxonomy.questionnaire.len(),
            categories = taxonomy.keywords.len(),
            "Taxonomy loaded"
        );
        Ok(taxonomy)
    }

    pub fn root_id(&self) -> &str {
        &self.tree.root
    }

    pub fn step(&self, id: &str) -> Option<&StepDefinition> {
        self.tree.steps.get(id)
    }

    /// Tags contributed by a terminal leaf, or `None` if `id` is not a leaf.
    pub fn leaf_tags(&self, id: &str) -> Option<&[String]> {
        match self.step(id)? {
            StepDefinition::Leaf(leaf) => Some(&leaf.tags),
            StepDefinition::Question(_) => None,
        }
    }

    /// Leaf id → tag set, for every leaf in the tree.
    pub fn leaves(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tree.steps.iter().filter_map(|(id, step)| match step {
            StepDefinition::Leaf(leaf) => Some((id.as_str(), leaf.tags.as_slice())),
            StepDefinition::Question(_) => None,
        })
    }

    pub fn flat_question(&self, id: &str) -> Option<&FlatQuestion> {
        self.questionnaire.iter().find(|q| q.id == id)
    }

    /// Structural checks so the engines can rely on every reference resolving.
    pub fn validate(&self) -> Result<(), AppError> {
        let fail = |msg: String| Err(AppError::Taxonomy(msg));

        match self.step(&self.tree.root) {
            Some(StepDefinition::Question(_)) => {}
            Some(StepDefinition::Leaf(_)) => {
                return fail(format!("root '{}' must be a question", self.tree.root))
            }
            None => return fail(format!("root '{}' is not a defined step", self.tree.root)),
        }

        for (id, step) in &self.tree.steps {
            let StepDefinition::Question(question) = step else {
                continue;
            };
            if question.id != *id {
                return fail(format!("step '{id}' declares mismatched id '{}'", question.id));
            }
            if question.options.is_empty() {
                return fail(format!("question '{id}' has no options"));
            }
            let mut values = HashSet::new();
            for option in &question.options {
                if option.value.trim().is_empty() {
                    return fail(format!("question '{id}' has an option with an empty value"));
                }
                if !values.insert(option.value.as_str()) {
                    return fail(format!(
                        "question '{id}' has duplicate option value '{}'",
                        option.value
                    ));
                }
                if !self.tree.steps.contains_key(&option.next) {
                    return fail(format!(
                        "option '{}' of '{id}' points at unknown step '{}'",
                        option.value, option.next
                    ));
                }
            }
        }

        let mut seen: Vec<&FlatQuestion> = Vec::new();
        for question in &self.questionnaire {
            if seen.iter().any(|q| q.id == question.id) {
                return fail(format!("questionnaire has duplicate question '{}'", question.id));
            }
            if question.options.is_empty() {
                return fail(format!("questionnaire question '{}' has no options", question.id));
            }
            if let Some(rule) = &question.visible_when {
                // Parents must come first, which also rules out cycles.
                let Some(parent) = seen.iter().find(|q| q.id == rule.question) else {
                    return fail(format!(
                        "'{}' depends on '{}', which is not an earlier question",
                        question.id, rule.question
                    ));
                };
                if let Some(label) = rule.any_of.iter().find(|l| parent.option(l).is_none()) {
                    return fail(format!(
                        "'{}' depends on unknown option '{label}' of '{}'",
                        question.id, rule.question
                    ));
                }
            }
            seen.push(question);
        }

        Ok(())
    }
}

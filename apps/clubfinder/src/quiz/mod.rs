// Tag resolution from user answers.
// `engine` is the branching wizard; `questionnaire` is the flat, non-branching variant.
// Both hand the host a `SearchRequest`; neither talks to the catalog.

pub mod engine;
pub mod questionnaire;

use serde::{Deserialize, Serialize};

use crate::models::EligibilityCode;

pub use engine::{CurrentStep, QuizEngine, QuizState, Selection};
pub use questionnaire::Questionnaire;

/// Derived `(tags, eligibility)` ready for the matcher. Preconditions are checked by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub tags: Vec<String>,
    pub eligibility: Option<EligibilityCode>,
}

pub(crate) fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

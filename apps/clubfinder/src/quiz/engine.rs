//! Branching quiz engine: walks the taxonomy's question tree one answer at a time.
//!
//! Derived state (tags, eligibility) is only ever produced by `apply`, both on the way
//! forward and when `go_back` replays the remaining history from the root. Undo is
//! therefore always the exact state the remaining selections produce.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::EligibilityCode;
use crate::quiz::{push_unique, SearchRequest};
use crate::taxonomy::{Question, SideEffect, StepDefinition, Taxonomy};

/// One answered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub step_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    pub current_step_id: String,
    /// Insertion-ordered, no duplicates. Match results follow this order.
    pub tags: Vec<String>,
    pub eligibility: Option<EligibilityCode>,
    pub history: Vec<Selection>,
}

impl QuizState {
    fn initial(root: &str) -> Self {
        Self {
            current_step_id: root.to_string(),
            tags: Vec::new(),
            eligibility: None,
            history: Vec::new(),
        }
    }
}

/// What the UI should show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentStep<'a> {
    Question(&'a Question),
    LeafReached {
        tags: &'a [String],
        eligibility: Option<EligibilityCode>,
    },
}

/// One quiz session. Owned by a single caller; create as many as needed.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    taxonomy: Arc<Taxonomy>,
    state: QuizState,
}

impl QuizEngine {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        let state = QuizState::initial(taxonomy.root_id());
        Self { taxonomy, state }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn tags(&self) -> &[String] {
        &self.state.tags
    }

    pub fn eligibility(&self) -> Option<EligibilityCode> {
        self.state.eligibility
    }

    pub fn history(&self) -> &[Selection] {
        &self.state.history
    }

    pub fn is_complete(&self) -> bool {
        self.taxonomy.leaf_tags(&self.state.current_step_id).is_some()
    }

    pub fn current_step(&self) -> CurrentStep<'_> {
        match self.taxonomy.step(&self.state.current_step_id) {
            Some(StepDefinition::Question(question)) => CurrentStep::Question(question),
            // Validated taxonomies never point at a missing step; treat it as terminal.
            Some(StepDefinition::Leaf(_)) | None => CurrentStep::LeafReached {
                tags: &self.state.tags,
                eligibility: self.state.eligibility,
            },
        }
    }

    /// Answers the current question. On error the state is untouched.
    pub fn advance(&mut self, value: &str) -> Result<(), AppError> {
        apply(&self.taxonomy, &mut self.state, value)?;
        debug!(
            step = %self.state.current_step_id,
            tags = ?self.state.tags,
            eligibility = ?self.state.eligibility,
            "Quiz advanced"
        );
        Ok(())
    }

    /// Drops the last answer and rebuilds state by replaying the rest from the root.
    pub fn go_back(&mut self) -> Result<(), AppError> {
        let Some((_, remaining)) = self.state.history.split_last() else {
            return Err(AppError::NoHistory);
        };
        let remaining = remaining.to_vec();

        let mut replayed = QuizState::initial(self.taxonomy.root_id());
        for selection in &remaining {
            apply(&self.taxonomy, &mut replayed, &selection.value)?;
        }
        self.state = replayed;

        debug!(
            step = %self.state.current_step_id,
            depth = self.state.history.len(),
            "Quiz went back"
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = QuizState::initial(self.taxonomy.root_id());
        debug!("Quiz reset");
    }

    /// The `(tags, eligibility)` pair the host hands to the matcher.
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest {
            tags: self.state.tags.clone(),
            eligibility: self.state.eligibility,
        }
    }
}

/// The single transition function. Validates fully before mutating anything.
fn apply(taxonomy: &Taxonomy, state: &mut QuizState, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidSelection(
            "Please choose one of the options".to_string(),
        ));
    }

    let question = match taxonomy.step(&state.current_step_id) {
        Some(StepDefinition::Question(question)) => question,
        _ => {
            return Err(AppError::InvalidSelection(
                "The quiz is complete; reset to start over".to_string(),
            ))
        }
    };

    let option = question.option(value).ok_or_else(|| {
        AppError::InvalidSelection(format!(
            "'{value}' is not an option for '{}'",
            question.title
        ))
    })?;

    let next = taxonomy.step(&option.next).ok_or_else(|| {
        AppError::Taxonomy(format!(
            "option '{value}' of '{}' points at unknown step '{}'",
            question.id, option.next
        ))
    })?;

    if let Some(effect) = question.on_select {
        match effect {
            SideEffect::SetEligibility => {
                state.eligibility = Some(EligibilityCode::from_answer(value));
            }
        }
    }
    for tag in &option.tags {
        push_unique(&mut state.tags, tag);
    }
    state.history.push(Selection {
        step_id: question.id.clone(),
        value: value.to_string(),
    });
    state.current_step_id = option.next.clone();

    if let StepDefinition::Leaf(leaf) = next {
        for tag in &leaf.tags {
            push_unique(&mut state.tags, tag);
        }
    }

    Ok(())
}

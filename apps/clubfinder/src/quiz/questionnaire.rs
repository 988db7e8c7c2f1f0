//! Flat questionnaire: independent single/multi-select questions with conditional follow-ups.
//!
//! No history and no leaves: tags are a pure read of the current answers. Hiding a follow-up
//! (by changing its parent's answer) clears the follow-up's answer, so it can never leak tags.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::errors::AppError;
use crate::models::EligibilityCode;
use crate::quiz::{push_unique, SearchRequest};
use crate::taxonomy::{FlatQuestion, SelectionKind, SideEffect, Taxonomy};

#[derive(Debug, Clone)]
pub struct Questionnaire {
    taxonomy: Arc<Taxonomy>,
    answers: HashMap<String, Vec<String>>,
}

impl Questionnaire {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            answers: HashMap::new(),
        }
    }

    pub fn questions(&self) -> &[FlatQuestion] {
        &self.taxonomy.questionnaire
    }

    /// Questions the UI should currently render, in definition order.
    pub fn visible_questions(&self) -> Vec<&FlatQuestion> {
        self.questions()
            .iter()
            .filter(|q| self.is_visible(&q.id))
            .collect()
    }

    /// Walks the `visible_when` chain up to a top-level question. A chain that loops back on
    /// itself (possible only in an unvalidated taxonomy) is treated as hidden.
    pub fn is_visible(&self, question_id: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = question_id;
        loop {
            let Some(question) = self.taxonomy.flat_question(current) else {
                return false;
            };
            let Some(rule) = &question.visible_when else {
                return true;
            };
            if !visited.insert(question.id.as_str()) {
                return false;
            }
            if !self
                .answers(&rule.question)
                .iter()
                .any(|label| rule.any_of.contains(label))
            {
                return false;
            }
            current = &rule.question;
        }
    }

    pub fn answers(&self, question_id: &str) -> &[String] {
        self.answers
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replaces the answer to one question. An empty `labels` clears it.
    pub fn answer(&mut self, question_id: &str, labels: &[&str]) -> Result<(), AppError> {
        let question = self.taxonomy.flat_question(question_id).ok_or_else(|| {
            AppError::InvalidSelection(format!("'{question_id}' is not a question"))
        })?;

        if !self.is_visible(question_id) {
            return Err(AppError::InvalidSelection(format!(
                "'{}' is not shown for the current answers",
                question.prompt
            )));
        }

        let mut chosen: Vec<String> = Vec::new();
        for label in labels {
            if question.option(label).is_none() {
                return Err(AppError::InvalidSelection(format!(
                    "'{label}' is not an option for '{}'",
                    question.prompt
                )));
            }
            push_unique(&mut chosen, label);
        }

        if question.kind == SelectionKind::Single && chosen.len() > 1 {
            return Err(AppError::InvalidSelection(format!(
                "'{}' accepts a single answer",
                question.prompt
            )));
        }

        if chosen.is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers.insert(question_id.to_string(), chosen);
        }
        self.prune_hidden();

        debug!(question = %question_id, answers = ?self.answers(question_id), "Questionnaire answered");
        Ok(())
    }

    pub fn clear(&mut self, question_id: &str) {
        self.answers.remove(question_id);
        self.prune_hidden();
    }

    pub fn reset(&mut self) {
        self.answers.clear();
    }

    /// Reads tags (question order, then option order) and eligibility from the current answers.
    pub fn collect(&self) -> SearchRequest {
        let mut request = SearchRequest::default();

        for question in self.questions() {
            if !self.is_visible(&question.id) {
                continue;
            }
            let selected = self.answers(&question.id);
            if selected.is_empty() {
                continue;
            }

            if let Some(SideEffect::SetEligibility) = question.on_select {
                request.eligibility = Some(EligibilityCode::from_answer(&selected[0]));
            }

            for option in question.options.iter().filter(|o| selected.contains(&o.label)) {
                for tag in &option.tags {
                    push_unique(&mut request.tags, tag);
                }
            }
        }

        request
    }

    /// Parents precede their follow-ups (enforced by `Taxonomy::validate`), so one ordered
    /// pass clears whole chains.
    fn prune_hidden(&mut self) {
        let hidden: Vec<String> = self
            .questions()
            .iter()
            .filter(|q| q.visible_when.is_some())
            .filter(|q| self.answers.contains_key(&q.id) && !self.is_visible(&q.id))
            .map(|q| q.id.clone())
            .collect();
        for id in hidden {
            debug!(question = %id, "Clearing hidden follow-up");
            self.answers.remove(&id);
        }
    }
}

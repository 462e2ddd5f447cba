//! Quiz response grading.
//!
//! Compares a set of selections against a quiz's fixed correct answers
//! and produces per-field verdicts plus an aggregate score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::Quiz;

/// A response: field id to selected option. A field left at its
/// placeholder simply has no entry.
pub type Selections = BTreeMap<String, String>;

/// Verdict for a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGrade {
    /// The field id.
    pub field: String,
    /// What was selected.
    pub selected: String,
    /// The correct option.
    pub expected: String,
    /// Whether the selection matches.
    pub correct: bool,
}

/// The graded outcome of a complete response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizGrade {
    /// Per-field verdicts, in the quiz's field order.
    pub fields: Vec<FieldGrade>,
    /// Fields answered correctly.
    pub correct_count: u32,
    /// Total fields.
    pub total: u32,
}

impl QuizGrade {
    /// Aggregate score string of the form `"<correct>/<total>"`.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.correct_count, self.total)
    }

    /// Returns `true` when every field is correct.
    pub fn all_correct(&self) -> bool {
        self.correct_count == self.total
    }
}

/// Grade a response against a quiz.
///
/// Every field must have a selection, and every selection must be one of
/// the field's options. Response keys that name no field are rejected,
/// so a typo'd id cannot silently count as unanswered.
pub fn grade(quiz: &Quiz, selections: &Selections) -> Result<QuizGrade, QuizError> {
    for key in selections.keys() {
        if !quiz.fields.iter().any(|f| &f.id == key) {
            return Err(QuizError::UnknownField(key.clone()));
        }
    }

    let mut fields = Vec::with_capacity(quiz.fields.len());
    let mut correct_count = 0u32;
    for field in &quiz.fields {
        let selected = selections
            .get(&field.id)
            .ok_or_else(|| QuizError::IncompleteSelection(field.id.clone()))?;
        if !field.options.contains(selected) {
            return Err(QuizError::UnknownOption {
                field: field.id.clone(),
                selected: selected.clone(),
            });
        }
        let correct = *selected == field.correct;
        if correct {
            correct_count += 1;
        }
        fields.push(FieldGrade {
            field: field.id.clone(),
            selected: selected.clone(),
            expected: field.correct.clone(),
            correct,
        });
    }

    Ok(QuizGrade {
        fields,
        correct_count,
        total: quiz.fields.len() as u32,
    })
}

impl Quiz {
    /// Grade a response against this quiz. See [`grade`].
    pub fn grade(&self, selections: &Selections) -> Result<QuizGrade, QuizError> {
        grade(self, selections)
    }

    /// Returns `true` when every field has a selection among its options.
    /// The UI precondition for enabling "check answers".
    pub fn is_complete(&self, selections: &Selections) -> bool {
        self.fields.iter().all(|f| {
            selections
                .get(&f.id)
                .is_some_and(|s| f.options.contains(s))
        })
    }
}

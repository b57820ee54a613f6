use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::answers::AnswerValue;
use crate::spec::question::{QuestionKind, QuestionSpec};

pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio";

/// Why an answer was rejected. `Display` yields the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Este campo es obligatorio")]
    Required,
    #[error("Mínimo {min} caracteres")]
    MinLength { min: usize },
}

/// Result of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(error) => Some(error),
        }
    }

    pub fn message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

/// Validates a single answer against its question.
///
/// Presence is checked first (required questions only), then type-specific
/// refinements. Option membership is not checked here; see
/// [`AnswerValue::from_raw`].
pub fn validate(question: &QuestionSpec, value: Option<&AnswerValue>) -> ValidationOutcome {
    if question.required && !is_present(&question.kind, value) {
        return ValidationOutcome::Invalid(ValidationError::Required);
    }

    if let Some(error) = refine(&question.kind, value) {
        return ValidationOutcome::Invalid(error);
    }

    ValidationOutcome::Valid
}

fn is_present(kind: &QuestionKind, value: Option<&AnswerValue>) -> bool {
    match (kind, value) {
        (QuestionKind::Text { .. }, Some(AnswerValue::Text(text)))
        | (QuestionKind::Select { .. }, Some(AnswerValue::Choice(text)))
        | (QuestionKind::ImagePick { .. }, Some(AnswerValue::Image(text))) => {
            !text.trim().is_empty()
        }
        (QuestionKind::MultiSelect { .. }, Some(AnswerValue::Choices(choices))) => {
            !choices.is_empty()
        }
        (QuestionKind::Likert { .. }, Some(AnswerValue::Scale(_))) => true,
        // Absent, or shaped for another kind of question.
        _ => false,
    }
}

fn refine(kind: &QuestionKind, value: Option<&AnswerValue>) -> Option<ValidationError> {
    match (kind, value) {
        (
            QuestionKind::Text {
                min_len: Some(min), ..
            },
            Some(AnswerValue::Text(text)),
        ) if text.trim().chars().count() < *min => {
            Some(ValidationError::MinLength { min: *min })
        }
        _ => None,
    }
}

/// Last validation outcome per question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    outcomes: BTreeMap<String, ValidationOutcome>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: impl Into<String>, outcome: ValidationOutcome) {
        self.outcomes.insert(id.into(), outcome);
    }

    /// Last outcome for `id`, `None` if it was never validated.
    pub fn outcome(&self, id: &str) -> Option<&ValidationOutcome> {
        self.outcomes.get(id)
    }

    /// Current error for `id`, if its last outcome was a failure.
    pub fn get(&self, id: &str) -> Option<&ValidationError> {
        self.outcome(id).and_then(ValidationOutcome::error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValidationOutcome)> {
        self.outcomes.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.outcomes.values().any(|outcome| !outcome.is_valid())
    }
}

use std::collections::BTreeSet;

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::question::{QuestionKind, QuestionSpec};

/// Authoring defects detected when a questionnaire is loaded.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid questionnaire json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("questionnaire '{0}' has no questions")]
    Empty(String),
    #[error("question #{index} has a blank id")]
    BlankId { index: usize },
    #[error("duplicate question id '{0}'")]
    DuplicateId(String),
    #[error("question '{id}' declares no options")]
    NoOptions { id: String },
    #[error("question '{id}' lists option '{option}' more than once")]
    DuplicateOption { id: String, option: String },
    #[error("question '{id}' has max = 0, nothing could ever be selected")]
    ZeroMax { id: String },
    #[error("question '{id}' has likert bounds {min}..{max}; min must be below max")]
    LikertBounds { id: String, min: i64, max: i64 },
    #[error("question '{id}' has likert min {min}; scales start at 1")]
    LikertBelowOne { id: String, min: i64 },
    #[error("question '{id}' declares no images")]
    NoImages { id: String },
    #[error("question '{id}' lists image value '{value}' more than once")]
    DuplicateImage { id: String, value: String },
}

/// Top-level questionnaire definition. Question order is step order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormSpec {
    pub id: String,
    pub title: String,
    pub version: String,
    pub questions: Vec<QuestionSpec>,
}

impl FormSpec {
    /// Builds a questionnaire and runs the load-time checks.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        version: impl Into<String>,
        questions: Vec<QuestionSpec>,
    ) -> Result<Self, SchemaError> {
        let spec = Self {
            id: id.into(),
            title: title.into(),
            version: version.into(),
            questions,
        };
        spec.check()?;
        Ok(spec)
    }

    /// Parses a questionnaire file and runs the load-time checks.
    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let spec: FormSpec = serde_json::from_str(raw)?;
        spec.check()?;
        Ok(spec)
    }

    pub fn check(&self) -> Result<(), SchemaError> {
        if self.questions.is_empty() {
            return Err(SchemaError::Empty(self.id.clone()));
        }

        let mut seen = BTreeSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if question.id.trim().is_empty() {
                return Err(SchemaError::BlankId { index });
            }
            if !seen.insert(question.id.as_str()) {
                return Err(SchemaError::DuplicateId(question.id.clone()));
            }
            check_kind(question)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    /// JSON Schema describing the questionnaire file format.
    pub fn json_schema() -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(schema_for!(FormSpec))
    }
}

fn check_kind(question: &QuestionSpec) -> Result<(), SchemaError> {
    let id = &question.id;
    match &question.kind {
        QuestionKind::Text { .. } => Ok(()),
        QuestionKind::Select { options } => check_options(id, options),
        QuestionKind::MultiSelect { options, max } => {
            check_options(id, options)?;
            if *max == Some(0) {
                return Err(SchemaError::ZeroMax { id: id.clone() });
            }
            Ok(())
        }
        QuestionKind::Likert { min, max } => {
            if min >= max {
                return Err(SchemaError::LikertBounds {
                    id: id.clone(),
                    min: *min,
                    max: *max,
                });
            }
            if *min < 1 {
                return Err(SchemaError::LikertBelowOne {
                    id: id.clone(),
                    min: *min,
                });
            }
            Ok(())
        }
        QuestionKind::ImagePick { images } => {
            if images.is_empty() {
                return Err(SchemaError::NoImages { id: id.clone() });
            }
            let mut seen = BTreeSet::new();
            for image in images {
                if !seen.insert(image.value.as_str()) {
                    return Err(SchemaError::DuplicateImage {
                        id: id.clone(),
                        value: image.value.clone(),
                    });
                }
            }
            Ok(())
        }
    }
}

fn check_options(id: &str, options: &[String]) -> Result<(), SchemaError> {
    if options.is_empty() {
        return Err(SchemaError::NoOptions { id: id.to_string() });
    }
    let mut seen = BTreeSet::new();
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(SchemaError::DuplicateOption {
                id: id.to_string(),
                option: option.clone(),
            });
        }
    }
    Ok(())
}

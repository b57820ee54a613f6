use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::form::FormSpec;
use crate::spec::question::{QuestionKind, QuestionSpec, QuestionType};

/// A typed answer. The variant matches the kind of the question it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text (`text`).
    Text(String),
    /// One of the declared options (`select`).
    Choice(String),
    /// Selected options in selection order, no duplicates (`multiselect`).
    Choices(Vec<String>),
    /// A point on the scale (`likert`).
    Scale(i64),
    /// The `value` of the picked image (`imagepick`).
    Image(String),
}

impl AnswerValue {
    /// Converts an untyped input event into the typed value for `question`.
    ///
    /// This is the only place where input shape and option membership are
    /// checked; the validator trusts values that made it through here.
    pub fn from_raw(question: &QuestionSpec, raw: RawAnswer) -> Result<Self, InputError> {
        let id = &question.id;
        match (&question.kind, raw) {
            (QuestionKind::Text { .. }, RawAnswer::One(text)) => Ok(AnswerValue::Text(text)),
            (QuestionKind::Select { options }, RawAnswer::One(choice)) => {
                if options.contains(&choice) {
                    Ok(AnswerValue::Choice(choice))
                } else {
                    Err(InputError::NotAnOption {
                        id: id.clone(),
                        value: choice,
                    })
                }
            }
            (QuestionKind::MultiSelect { options, max }, RawAnswer::Many(choices)) => {
                let mut selected: Vec<String> = Vec::with_capacity(choices.len());
                for choice in choices {
                    if !options.contains(&choice) {
                        return Err(InputError::NotAnOption {
                            id: id.clone(),
                            value: choice,
                        });
                    }
                    if selected.contains(&choice) {
                        return Err(InputError::DuplicateChoice {
                            id: id.clone(),
                            value: choice,
                        });
                    }
                    selected.push(choice);
                }
                if let Some(max) = max
                    && selected.len() > *max
                {
                    return Err(InputError::TooManyChoices {
                        id: id.clone(),
                        max: *max,
                        got: selected.len(),
                    });
                }
                Ok(AnswerValue::Choices(selected))
            }
            (QuestionKind::Likert { min, max }, RawAnswer::Number(value)) => {
                if (*min..=*max).contains(&value) {
                    Ok(AnswerValue::Scale(value))
                } else {
                    Err(InputError::OutOfRange {
                        id: id.clone(),
                        value,
                        min: *min,
                        max: *max,
                    })
                }
            }
            (QuestionKind::ImagePick { images }, RawAnswer::One(value)) => {
                if images.iter().any(|image| image.value == value) {
                    Ok(AnswerValue::Image(value))
                } else {
                    Err(InputError::NotAnOption {
                        id: id.clone(),
                        value,
                    })
                }
            }
            (kind, raw) => Err(InputError::Shape {
                id: id.clone(),
                expected: kind.question_type(),
                got: raw.shape(),
            }),
        }
    }

    /// String payload of text, choice and image answers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) | AnswerValue::Choice(text) | AnswerValue::Image(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(choices) => Some(choices),
            _ => None,
        }
    }

    pub fn as_scale(&self) -> Option<i64> {
        match self {
            AnswerValue::Scale(value) => Some(*value),
            _ => None,
        }
    }

    /// Display form used by renderers and reports.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Text(text) | AnswerValue::Choice(text) | AnswerValue::Image(text) => {
                text.clone()
            }
            AnswerValue::Choices(choices) => choices.join(", "),
            AnswerValue::Scale(value) => value.to_string(),
        }
    }
}

/// Untyped input as it arrives from a front end or an answers file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawAnswer {
    Number(i64),
    Many(Vec<String>),
    One(String),
}

impl RawAnswer {
    fn shape(&self) -> &'static str {
        match self {
            RawAnswer::Number(_) => "number",
            RawAnswer::Many(_) => "list",
            RawAnswer::One(_) => "string",
        }
    }
}

impl From<&str> for RawAnswer {
    fn from(value: &str) -> Self {
        RawAnswer::One(value.to_string())
    }
}

impl From<String> for RawAnswer {
    fn from(value: String) -> Self {
        RawAnswer::One(value)
    }
}

impl From<i64> for RawAnswer {
    fn from(value: i64) -> Self {
        RawAnswer::Number(value)
    }
}

impl From<Vec<String>> for RawAnswer {
    fn from(value: Vec<String>) -> Self {
        RawAnswer::Many(value)
    }
}

/// Raw input that does not fit the question it was given for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("question '{id}' expects a {} answer, got a {got}", .expected.as_str())]
    Shape {
        id: String,
        expected: QuestionType,
        got: &'static str,
    },
    #[error("'{value}' is not an option of question '{id}'")]
    NotAnOption { id: String, value: String },
    #[error("'{value}' is selected more than once for question '{id}'")]
    DuplicateChoice { id: String, value: String },
    #[error("question '{id}' allows at most {max} selections, got {got}")]
    TooManyChoices { id: String, max: usize, got: usize },
    #[error("{value} is outside the {min}..={max} scale of question '{id}'")]
    OutOfRange {
        id: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Adds or removes `item` from a multi-selection.
///
/// Selected items are always removed. An unselected item is appended only
/// while the selection is below `max`; at capacity the selection comes back
/// unchanged.
pub fn toggle_choice(current: &[String], item: &str, max: Option<usize>) -> Vec<String> {
    if current.iter().any(|selected| selected == item) {
        return current
            .iter()
            .filter(|selected| *selected != item)
            .cloned()
            .collect();
    }
    if let Some(max) = max
        && current.len() >= max
    {
        return current.to_vec();
    }
    let mut next = current.to_vec();
    next.push(item.to_string());
    next
}

/// Answers keyed by question id.
///
/// Accepts any value for any id: whether a value is acceptable is the
/// validator's call, not the store's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct AnswerMap {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Functional update: returns the map with `id` set to `value`.
    pub fn set(mut self, id: impl Into<String>, value: AnswerValue) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.values.insert(id.into(), value);
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(AnswerValue::as_str)
    }

    pub fn choices(&self, id: &str) -> &[String] {
        self.get(id)
            .and_then(AnswerValue::as_choices)
            .unwrap_or_default()
    }

    pub fn scale(&self, id: &str) -> Option<i64> {
        self.get(id).and_then(AnswerValue::as_scale)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnswerMap {
    type Item = (&'a String, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Serializable export of a session's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AnswerSet {
    pub form_id: String,
    pub spec_version: String,
    pub answers: AnswerMap,
}

impl AnswerSet {
    pub fn new(spec: &FormSpec, answers: AnswerMap) -> Self {
        Self {
            form_id: spec.id.clone(),
            spec_version: spec.version.clone(),
            answers,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Answers file as read back from disk, before boundary conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct RawAnswerSet {
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub spec_version: Option<String>,
    pub answers: BTreeMap<String, RawAnswer>,
}

impl RawAnswerSet {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Discriminant of a question, without its type-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Select,
    MultiSelect,
    Likert,
    ImagePick,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Select => "select",
            QuestionType::MultiSelect => "multiselect",
            QuestionType::Likert => "likert",
            QuestionType::ImagePick => "imagepick",
        }
    }
}

/// One tile of an `imagepick` question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImageChoice {
    pub value: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ImageChoice {
    pub fn new(value: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            url: url.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text shown under the tile; falls back to the value.
    pub fn caption(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Type-specific constraints of a question. Each variant carries exactly the
/// fields its type needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Text {
        #[serde(rename = "minLen", default, skip_serializing_if = "Option::is_none")]
        min_len: Option<usize>,
    },
    Select {
        options: Vec<String>,
    },
    MultiSelect {
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    Likert {
        min: i64,
        max: i64,
    },
    ImagePick {
        images: Vec<ImageChoice>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Text { .. } => QuestionType::Text,
            QuestionKind::Select { .. } => QuestionType::Select,
            QuestionKind::MultiSelect { .. } => QuestionType::MultiSelect,
            QuestionKind::Likert { .. } => QuestionType::Likert,
            QuestionKind::ImagePick { .. } => QuestionType::ImagePick,
        }
    }

    /// Declared options for `select` and `multiselect`, empty otherwise.
    pub fn options(&self) -> &[String] {
        match self {
            QuestionKind::Select { options } | QuestionKind::MultiSelect { options, .. } => {
                options
            }
            _ => &[],
        }
    }
}

/// Definition of a single question inside a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl QuestionSpec {
    /// Builds a required question; see [`QuestionSpec::optional`].
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: true,
            kind,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, QuestionKind::Text { min_len: None })
    }

    pub fn select<I, S>(id: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            label,
            QuestionKind::Select {
                options: options.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn multiselect<I, S>(
        id: impl Into<String>,
        label: impl Into<String>,
        options: I,
        max: Option<usize>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            label,
            QuestionKind::MultiSelect {
                options: options.into_iter().map(Into::into).collect(),
                max,
            },
        )
    }

    pub fn likert(id: impl Into<String>, label: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(id, label, QuestionKind::Likert { min, max })
    }

    pub fn imagepick(
        id: impl Into<String>,
        label: impl Into<String>,
        images: Vec<ImageChoice>,
    ) -> Self {
        Self::new(id, label, QuestionKind::ImagePick { images })
    }

    /// Sets the minimum trimmed length of a `text` question. No-op for other kinds.
    pub fn with_min_len(mut self, min: usize) -> Self {
        if let QuestionKind::Text { min_len } = &mut self.kind {
            *min_len = Some(min);
        }
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_field_names() {
        let question: QuestionSpec = serde_json::from_value(json!({
            "id": "nombre",
            "type": "text",
            "label": "Nombre",
            "required": true,
            "minLen": 2
        }))
        .expect("text question should deserialize");
        assert_eq!(question.kind, QuestionKind::Text { min_len: Some(2) });
        assert!(question.required);

        let question: QuestionSpec = serde_json::from_value(json!({
            "id": "valores",
            "type": "multiselect",
            "label": "Valores",
            "options": ["Lealtad", "Libertad"],
            "max": 1
        }))
        .expect("multiselect question should deserialize");
        assert!(!question.required);
        assert_eq!(question.question_type(), QuestionType::MultiSelect);
        assert_eq!(question.kind.options().len(), 2);
    }

    #[test]
    fn likert_requires_bounds() {
        let result = serde_json::from_value::<QuestionSpec>(json!({
            "id": "bienestar",
            "type": "likert",
            "label": "Bienestar",
            "min": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn image_caption_falls_back_to_value() {
        let bare = ImageChoice::new("astros", "https://example.test/a.jpg");
        assert_eq!(bare.caption(), "astros");
        let labelled = bare.with_label("Universo y astros");
        assert_eq!(labelled.caption(), "Universo y astros");
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::answers::AnswerValue;
use crate::progress::Progress;
use crate::report::{Report, ReportGenerator, render_report_text};
use crate::spec::question::{QuestionKind, QuestionType};
use crate::wizard::{Phase, Wizard};

/// Active question as seen by a front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub required: bool,
    /// Selectable values in display order: options, image values, or scale points.
    pub choices: Vec<String>,
    /// Captions matching `choices`, for image questions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot of a wizard used by the text and JSON renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardView {
    pub form_id: String,
    pub form_title: String,
    pub phase: Phase,
    pub progress: Progress,
    pub progress_label: String,
    pub progress_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
}

impl WizardView {
    pub fn from_wizard<R: ReportGenerator>(wizard: &Wizard<R>) -> Self {
        let progress = wizard.progress();
        let question = wizard.current_question().map(|question| {
            let (choices, captions, max) = match &question.kind {
                QuestionKind::Text { .. } => (Vec::new(), Vec::new(), None),
                QuestionKind::Select { options } => (options.clone(), Vec::new(), None),
                QuestionKind::MultiSelect { options, max } => (options.clone(), Vec::new(), *max),
                QuestionKind::Likert { min, max } => (
                    (*min..=*max).map(|point| point.to_string()).collect(),
                    Vec::new(),
                    None,
                ),
                QuestionKind::ImagePick { images } => (
                    images.iter().map(|image| image.value.clone()).collect(),
                    images.iter().map(|image| image.caption().to_string()).collect(),
                    None,
                ),
            };
            QuestionView {
                id: question.id.clone(),
                label: question.label.clone(),
                kind: question.question_type(),
                required: question.required,
                choices,
                captions,
                max,
                current_value: wizard.answers().get(&question.id).cloned(),
                error: wizard
                    .errors()
                    .get(&question.id)
                    .map(ToString::to_string),
            }
        });

        Self {
            form_id: wizard.spec().id.clone(),
            form_title: wizard.spec().title.clone(),
            phase: wizard.phase(),
            progress,
            progress_label: progress.label(),
            progress_percent: progress.percent(),
            question,
            email: wizard.email().map(ToString::to_string),
            report: wizard.report().cloned(),
        }
    }
}

/// JSON form of the current screen for non-terminal frontends.
pub fn render_json(view: &WizardView) -> Result<Value, serde_json::Error> {
    serde_json::to_value(view)
}

/// Human-friendly rendering of the current screen.
pub fn render_text(view: &WizardView) -> String {
    let mut lines = vec![format!(
        "{} · {} ({}%)",
        view.form_title, view.progress_label, view.progress_percent
    )];

    match view.phase {
        Phase::InProgress { .. } => {
            if let Some(question) = &view.question {
                lines.push(question_text(question));
            }
        }
        Phase::Gate => {
            lines.push("¡Último paso!".to_string());
            lines.push(
                "Dejanos tu correo para obtener la devolución completa de tu carta natal."
                    .to_string(),
            );
        }
        Phase::Unlocked => {
            if let Some(report) = &view.report {
                lines.push(render_report_text(report));
            }
        }
    }

    lines.join("\n")
}

fn question_text(question: &QuestionView) -> String {
    let mut lines = Vec::new();
    let marker = if question.required { " *" } else { "" };
    lines.push(format!("{}{}", question.label, marker));

    match question.kind {
        QuestionType::Text => {}
        QuestionType::Likert => {
            lines.push(format!(
                "  {}  (1 = nada de acuerdo · 5 = muy de acuerdo)",
                question.choices.join(" ")
            ));
        }
        QuestionType::Select | QuestionType::MultiSelect | QuestionType::ImagePick => {
            let selected: Vec<&str> = match &question.current_value {
                Some(AnswerValue::Choices(choices)) => {
                    choices.iter().map(String::as_str).collect()
                }
                Some(value) => value.as_str().into_iter().collect(),
                None => Vec::new(),
            };
            for (index, choice) in question.choices.iter().enumerate() {
                let caption = question.captions.get(index).unwrap_or(choice);
                let mark = if selected.contains(&choice.as_str()) {
                    "x"
                } else {
                    " "
                };
                lines.push(format!("  {}. [{mark}] {caption}", index + 1));
            }
            if let Some(max) = question.max {
                lines.push(format!("  Elegí hasta {max} opciones."));
            }
        }
    }

    if let Some(value) = &question.current_value {
        lines.push(format!("  Respuesta: {}", value.display()));
    }
    if let Some(error) = &question.error {
        lines.push(format!("  ! {error}"));
    }
    lines.join("\n")
}

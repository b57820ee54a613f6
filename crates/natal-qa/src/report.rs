use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;

/// Display-ready result shown once the wizard is unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    pub summary: String,
    pub highlights: Vec<String>,
    pub advice: Vec<String>,
}

/// Computes the report from a completed answer map. Must be total and deterministic.
pub trait ReportGenerator {
    fn generate(&self, answers: &AnswerMap) -> Report;
}

impl<F> ReportGenerator for F
where
    F: Fn(&AnswerMap) -> Report,
{
    fn generate(&self, answers: &AnswerMap) -> Report {
        self(answers)
    }
}

const MISSING: &str = "—";

/// Placeholder natal chart reading. Only `nombre` and `fecha_nacimiento`
/// are echoed back; everything else is fixed copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct NatalReport;

impl ReportGenerator for NatalReport {
    fn generate(&self, answers: &AnswerMap) -> Report {
        Report {
            summary: "Con base en tus respuestas y datos de nacimiento, vemos que tu signo solar \
                      tiene un rol clave en tu camino de vida."
                .to_string(),
            highlights: vec![
                format!(
                    "Fecha de nacimiento: {}",
                    echo(answers, "fecha_nacimiento")
                ),
                format!("Nombre: {}", echo(answers, "nombre")),
            ],
            advice: vec![
                "Explorá cómo la luna influye en tus emociones diarias.".to_string(),
                "Prestá atención a tus relaciones, que parecen centrales en tu carta.".to_string(),
            ],
        }
    }
}

fn echo(answers: &AnswerMap, id: &str) -> String {
    match answers.get(id).map(|value| value.display()) {
        Some(text) if !text.is_empty() => text,
        _ => MISSING.to_string(),
    }
}

/// Renders a report as plain text with the headings of the result page.
pub fn render_report_text(report: &Report) -> String {
    let mut lines = vec!["Tu carta natal".to_string(), report.summary.clone()];
    lines.extend(report.highlights.iter().map(|line| format!(" - {line}")));
    lines.push(String::new());
    lines.push("Siguientes pasos sugeridos".to_string());
    lines.extend(report.advice.iter().map(|line| format!(" - {line}")));
    lines.join("\n")
}

pub mod prompt;
pub mod run;
pub mod schema;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use natal_qa::{FormSpec, natal_chart};
use tracing::debug;

/// Loads the questionnaire from `path`, or the built-in natal chart.
pub fn load_spec(path: Option<&Path>) -> Result<FormSpec> {
    let Some(path) = path else {
        return Ok(natal_chart());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read questionnaire {}", path.display()))?;
    let spec = FormSpec::from_json(&raw)
        .with_context(|| format!("invalid questionnaire {}", path.display()))?;
    debug!(path = %path.display(), questions = spec.len(), "questionnaire loaded");
    Ok(spec)
}

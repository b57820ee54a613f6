use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use natal_qa::{
    AnswerSet, AnswerValue, EmailAddress, RawAnswerSet, Report, ReportGenerator, Wizard,
    render_report_text,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::cmd::load_spec;
use crate::cmd::prompt::{Prompter, interact};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Questionnaire file to use instead of the built-in natal chart
    #[arg(long, value_name = "questionnaire.json")]
    pub schema: Option<PathBuf>,
    /// Replay answers from a file instead of prompting
    #[arg(long, value_name = "answers.json")]
    pub answers: Option<PathBuf>,
    /// Email address to confirm at the gate
    #[arg(long, value_name = "ADDRESS")]
    pub email: Option<String>,
    /// Write the collected answers to a file
    #[arg(long = "answers-out", value_name = "answers.json")]
    pub answers_out: Option<PathBuf>,
    /// Prompt on stdin even when it is not a terminal
    #[arg(long, conflicts_with = "answers")]
    pub interactive: bool,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RunOutput<'a> {
    form_id: &'a str,
    email: &'a EmailAddress,
    answers: &'a AnswerSet,
    report: &'a Report,
}

pub fn run(args: RunArgs) -> Result<()> {
    let spec = load_spec(args.schema.as_deref())?;
    let mut wizard = Wizard::natal(spec).context("questionnaire failed its load checks")?;

    if let Some(path) = &args.answers {
        let raw = read_answers(path)?;
        replay(&mut wizard, &raw)?;
        let address = args
            .email
            .as_deref()
            .ok_or_else(|| anyhow!("--email is required when replaying --answers"))?;
        wizard
            .confirm_email(address)
            .with_context(|| format!("cannot unlock the report with '{address}'"))?;
    } else if should_prompt(
        args.interactive,
        io::stdin().is_terminal(),
        io::stdout().is_terminal(),
    ) {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        interact(&mut wizard, &mut prompter, args.email.as_deref())?;
    } else {
        bail!("not attached to a terminal; pass --answers FILE or --interactive");
    }

    finish(&wizard, &args)
}

/// Prompting needs both ends on a terminal unless `--interactive` forces it.
fn should_prompt(forced: bool, stdin_tty: bool, stdout_tty: bool) -> bool {
    forced || (stdin_tty && stdout_tty)
}

fn read_answers(path: &Path) -> Result<RawAnswerSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers {}", path.display()))?;
    RawAnswerSet::from_json(&raw)
        .with_context(|| format!("invalid answers file {}", path.display()))
}

/// Feeds every question its recorded answer and advances, stopping at the
/// first answer that does not fit or does not validate.
pub fn replay<R: ReportGenerator>(wizard: &mut Wizard<R>, raw: &RawAnswerSet) -> Result<()> {
    if let Some(form_id) = &raw.form_id
        && form_id != &wizard.spec().id
    {
        warn!(
            answers = %form_id,
            questionnaire = %wizard.spec().id,
            "answers were recorded for another questionnaire"
        );
    }

    while let Some(question) = wizard.current_question().cloned() {
        if let Some(raw_value) = raw.answers.get(&question.id) {
            let value = AnswerValue::from_raw(&question, raw_value.clone())
                .with_context(|| format!("answer for '{}' was rejected", question.id))?;
            wizard.edit(&question.id, value)?;
        }
        let outcome = wizard.advance()?;
        if let Some(error) = outcome.error() {
            bail!("question '{}' ({}): {error}", question.id, question.label);
        }
    }

    let unknown: Vec<&String> = raw
        .answers
        .keys()
        .filter(|id| wizard.spec().question(id).is_none())
        .collect();
    if !unknown.is_empty() {
        warn!(?unknown, "answers file has ids the questionnaire does not ask");
    }
    info!(answered = wizard.answers().len(), "answers replayed");
    Ok(())
}

fn finish<R: ReportGenerator>(wizard: &Wizard<R>, args: &RunArgs) -> Result<()> {
    let (Some(report), Some(email)) = (wizard.report(), wizard.email()) else {
        bail!(
            "the questionnaire stopped at the {} phase",
            wizard.phase().as_str()
        );
    };
    let answers = AnswerSet::new(wizard.spec(), wizard.answers().clone());

    if let Some(path) = &args.answers_out {
        let json = answers
            .to_json_pretty()
            .context("failed to serialize answers")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "answers written");
    }

    if args.json {
        let output = RunOutput {
            form_id: &wizard.spec().id,
            email,
            answers: &answers,
            report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render_report_text(report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use natal_qa::{FormSpec, Phase, QuestionSpec};

    use super::*;

    fn spec() -> FormSpec {
        FormSpec::new(
            "mini",
            "Mini",
            "1",
            vec![
                QuestionSpec::text("nombre", "Nombre").with_min_len(2),
                QuestionSpec::text("hora", "Hora").optional(),
                QuestionSpec::likert("bienestar", "Bienestar", 1, 5),
            ],
        )
        .expect("valid spec")
    }

    fn answers(raw: &str) -> RawAnswerSet {
        RawAnswerSet::from_json(raw).expect("answers parse")
    }

    #[test]
    fn prompts_only_with_both_terminals_or_when_forced() {
        assert!(should_prompt(false, true, true));
        assert!(!should_prompt(false, true, false));
        assert!(!should_prompt(false, false, true));
        assert!(should_prompt(true, false, false));
    }

    #[test]
    fn replay_reaches_the_gate() {
        let mut wizard = Wizard::natal(spec()).expect("wizard");
        replay(
            &mut wizard,
            &answers(r#"{ "answers": { "nombre": "Ana", "bienestar": 3 } }"#),
        )
        .expect("replay");
        assert_eq!(wizard.phase(), Phase::Gate);
        assert!(!wizard.answers().contains("hora"));
    }

    #[test]
    fn replay_stops_at_first_invalid_answer() {
        let mut wizard = Wizard::natal(spec()).expect("wizard");
        let err = replay(
            &mut wizard,
            &answers(r#"{ "answers": { "nombre": "A", "bienestar": 3 } }"#),
        )
        .expect_err("too short");
        assert!(err.to_string().contains("Mínimo 2 caracteres"));
        assert_eq!(wizard.step(), Some(0));
    }

    #[test]
    fn replay_rejects_out_of_range_scale() {
        let mut wizard = Wizard::natal(spec()).expect("wizard");
        let err = replay(
            &mut wizard,
            &answers(r#"{ "answers": { "nombre": "Ana", "bienestar": 8 } }"#),
        )
        .expect_err("out of range");
        assert_eq!(err.to_string(), "answer for 'bienestar' was rejected");
        assert_eq!(wizard.step(), Some(2));
    }
}

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use natal_qa::{
    AnswerValue, Phase, QuestionKind, QuestionSpec, RawAnswer, ReportGenerator, Wizard,
    WizardError, WizardView, render_text,
};
use tracing::debug;

const BACK: &str = "<";

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `label` and returns the next line without its line ending.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label} ")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            bail!("stdin closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

/// What a typed line means for the active question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Back,
    /// Advance with whatever is stored.
    Continue,
    Answer(RawAnswer),
    /// Multiselect items to toggle, in the order typed.
    Toggle(Vec<String>),
    Invalid(String),
}

/// Interprets `line` for `question`. Choices may be typed by number or by value;
/// several multiselect items are separated by commas, or by spaces when numbered.
pub fn parse_entry(question: &QuestionSpec, line: &str) -> Entry {
    let trimmed = line.trim();
    if trimmed == BACK {
        return Entry::Back;
    }
    if trimmed.is_empty() {
        return Entry::Continue;
    }

    match &question.kind {
        QuestionKind::Text { .. } => Entry::Answer(RawAnswer::One(line.to_string())),
        QuestionKind::Select { options } => match pick(options, trimmed) {
            Some(choice) => Entry::Answer(RawAnswer::One(choice)),
            None => Entry::Invalid(format!("'{trimmed}' no es una opción")),
        },
        QuestionKind::ImagePick { images } => {
            let values: Vec<String> = images.iter().map(|image| image.value.clone()).collect();
            match pick(&values, trimmed) {
                Some(value) => Entry::Answer(RawAnswer::One(value)),
                None => Entry::Invalid(format!("'{trimmed}' no es una opción")),
            }
        }
        QuestionKind::MultiSelect { options, .. } => {
            if let Some(item) = pick(options, trimmed) {
                return Entry::Toggle(vec![item]);
            }
            let tokens: Vec<&str> = if trimmed.contains(',') {
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .collect()
            } else if trimmed
                .split_whitespace()
                .all(|token| token.parse::<usize>().is_ok())
            {
                trimmed.split_whitespace().collect()
            } else {
                vec![trimmed]
            };

            let mut items = Vec::with_capacity(tokens.len());
            for token in tokens {
                match pick(options, token) {
                    Some(item) => items.push(item),
                    None => return Entry::Invalid(format!("'{token}' no es una opción")),
                }
            }
            Entry::Toggle(items)
        }
        QuestionKind::Likert { .. } => match trimmed.parse::<i64>() {
            Ok(point) => Entry::Answer(RawAnswer::Number(point)),
            Err(_) => Entry::Invalid(format!("'{trimmed}' no es un número")),
        },
    }
}

/// Exact value first, then a one-based position.
fn pick(choices: &[String], token: &str) -> Option<String> {
    if let Some(choice) = choices.iter().find(|choice| *choice == token) {
        return Some(choice.clone());
    }
    let n = token.parse::<usize>().ok()?;
    n.checked_sub(1)
        .and_then(|index| choices.get(index))
        .cloned()
}

/// Drives `wizard` from typed lines until it is unlocked.
///
/// When `email` is given it is confirmed at the gate instead of prompting.
pub fn interact<R, I, O>(
    wizard: &mut Wizard<R>,
    prompter: &mut Prompter<I, O>,
    email: Option<&str>,
) -> Result<()>
where
    R: ReportGenerator,
    I: BufRead,
    O: Write,
{
    prompter.say("Escribí '<' para volver a la pregunta anterior.")?;
    loop {
        match wizard.phase() {
            Phase::InProgress { .. } => step(wizard, prompter)?,
            Phase::Gate => {
                prompter.say(&render_text(&WizardView::from_wizard(wizard)))?;
                let address = match email {
                    Some(address) => address.to_string(),
                    None => prompter.ask("Email:")?,
                };
                if address.trim() == BACK {
                    wizard.retreat()?;
                    continue;
                }
                match wizard.confirm_email(&address) {
                    Ok(_) => {}
                    Err(WizardError::MalformedEmail(err)) if email.is_none() => {
                        prompter.say(&format!("! {err}"))?
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Phase::Unlocked => return Ok(()),
        }
    }
}

fn step<R, I, O>(wizard: &mut Wizard<R>, prompter: &mut Prompter<I, O>) -> Result<()>
where
    R: ReportGenerator,
    I: BufRead,
    O: Write,
{
    let Some(question) = wizard.current_question().cloned() else {
        return Ok(());
    };
    prompter.say("")?;
    prompter.say(&render_text(&WizardView::from_wizard(wizard)))?;
    let line = prompter.ask(">")?;

    match parse_entry(&question, &line) {
        Entry::Back => {
            wizard.retreat()?;
        }
        Entry::Continue => {
            wizard.advance()?;
        }
        Entry::Answer(raw) => match AnswerValue::from_raw(&question, raw) {
            Ok(value) => {
                if wizard.edit(&question.id, value)?.is_valid() {
                    wizard.advance()?;
                }
            }
            Err(err) => prompter.say(&format!("! {err}"))?,
        },
        Entry::Toggle(items) => {
            for item in items {
                wizard.toggle_option(&item)?;
            }
        }
        Entry::Invalid(message) => prompter.say(&format!("! {message}"))?,
    }
    debug!(phase = ?wizard.phase(), "prompt handled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use natal_qa::{FormSpec, ImageChoice, NatalReport, natal_chart};

    use super::*;

    fn spec() -> FormSpec {
        FormSpec::new(
            "mini",
            "Mini",
            "1",
            vec![
                QuestionSpec::text("nombre", "Nombre").with_min_len(2),
                QuestionSpec::select("lecturas", "Lecturas", ["Nunca", "A veces"]),
                QuestionSpec::multiselect("temas", "Temas", ["Tarot", "Astrología", "Runas"], Some(2)),
                QuestionSpec::likert("bienestar", "Bienestar", 1, 5),
                QuestionSpec::imagepick(
                    "escenario",
                    "Escenario",
                    vec![
                        ImageChoice::new("astros", "https://example.test/a.jpg"),
                        ImageChoice::new("tarot", "https://example.test/t.jpg"),
                    ],
                ),
            ],
        )
        .expect("valid spec")
    }

    fn run_lines(lines: &str, email: Option<&str>) -> (Result<()>, Wizard<NatalReport>, String) {
        let mut wizard = Wizard::natal(spec()).expect("wizard");
        let mut prompter = Prompter::new(Cursor::new(lines.as_bytes().to_vec()), Vec::new());
        let result = interact(&mut wizard, &mut prompter, email);
        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        (result, wizard, output)
    }

    #[test]
    fn parses_choices_by_number_or_value() {
        let spec = spec();
        let select = &spec.questions[1];
        assert_eq!(
            parse_entry(select, "2"),
            Entry::Answer(RawAnswer::One("A veces".into()))
        );
        assert_eq!(
            parse_entry(select, "Nunca"),
            Entry::Answer(RawAnswer::One("Nunca".into()))
        );
        assert!(matches!(parse_entry(select, "7"), Entry::Invalid(_)));
        assert_eq!(parse_entry(select, " < "), Entry::Back);
        assert_eq!(parse_entry(select, ""), Entry::Continue);

        let multi = &spec.questions[2];
        assert_eq!(
            parse_entry(multi, "1, 3"),
            Entry::Toggle(vec!["Tarot".into(), "Runas".into()])
        );
        let likert = &spec.questions[3];
        assert_eq!(parse_entry(likert, "4"), Entry::Answer(RawAnswer::Number(4)));
        assert!(matches!(parse_entry(likert, "mucho"), Entry::Invalid(_)));
    }

    #[test]
    fn multiselect_values_may_contain_spaces() {
        let spec = natal_chart();
        let question = spec.question("relaciones_valor").expect("catalog question");
        assert_eq!(
            parse_entry(question, "Crecimiento personal"),
            Entry::Toggle(vec!["Crecimiento personal".into()])
        );
        assert_eq!(
            parse_entry(question, " Lealtad ,  Crecimiento personal "),
            Entry::Toggle(vec!["Lealtad".into(), "Crecimiento personal".into()])
        );
        assert!(matches!(
            parse_entry(question, "Lealtad Crecimiento"),
            Entry::Invalid(_)
        ));
    }

    #[test]
    fn numeric_option_values_win_over_positions() {
        let select = QuestionSpec::select("orden", "Orden", ["3", "2", "1"]);
        assert_eq!(
            parse_entry(&select, "1"),
            Entry::Answer(RawAnswer::One("1".into()))
        );

        let multi = QuestionSpec::multiselect("orden", "Orden", ["3", "2", "1"], None);
        assert_eq!(parse_entry(&multi, "1"), Entry::Toggle(vec!["1".into()]));
        assert_eq!(
            parse_entry(&multi, "3 1"),
            Entry::Toggle(vec!["3".into(), "1".into()])
        );
    }

    #[test]
    fn walks_the_whole_questionnaire() {
        let input = "a\nAna\n1\n1 2 3\n\n9\n5\n<\n\n2\nnope\nana@correo.com\n";
        let (result, wizard, output) = run_lines(input, None);
        result.expect("interaction completes");

        assert_eq!(wizard.phase(), Phase::Unlocked);
        assert_eq!(wizard.answers().text("nombre"), Some("Ana"));
        assert_eq!(wizard.answers().choices("temas"), ["Tarot", "Astrología"]);
        assert_eq!(wizard.answers().scale("bienestar"), Some(5));
        assert_eq!(wizard.answers().text("escenario"), Some("tarot"));
        assert_eq!(wizard.email().map(|email| email.as_str()), Some("ana@correo.com"));
        assert!(output.contains("Mínimo 2 caracteres"));
        assert!(output.contains("outside the 1..=5 scale"));
        assert!(output.contains("does not look like an email address"));
    }

    #[test]
    fn email_flag_skips_the_prompt() {
        let input = "Ana\nNunca\n2\n\n3\nastros\n";
        let (result, wizard, _) = run_lines(input, Some("ana@correo.com"));
        result.expect("interaction completes");
        assert_eq!(wizard.phase(), Phase::Unlocked);
    }

    #[test]
    fn malformed_email_flag_is_fatal() {
        let input = "Ana\nNunca\n2\n\n3\nastros\n";
        let (result, wizard, _) = run_lines(input, Some("ana"));
        assert!(result.is_err());
        assert_eq!(wizard.phase(), Phase::Gate);
    }

    #[test]
    fn closed_input_is_an_error() {
        let (result, wizard, _) = run_lines("Ana\n", None);
        let err = result.expect_err("input ends early");
        assert_eq!(err.to_string(), "stdin closed");
        assert_eq!(wizard.step(), Some(1));
    }
}

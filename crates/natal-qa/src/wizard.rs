use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::answers::{AnswerMap, AnswerValue, InputError, toggle_choice};
use crate::email::{EmailAddress, MalformedEmail};
use crate::progress::Progress;
use crate::report::{NatalReport, Report, ReportGenerator};
use crate::spec::form::{FormSpec, SchemaError};
use crate::spec::question::{QuestionKind, QuestionSpec};
use crate::validate::{ErrorMap, ValidationOutcome, validate};

/// Where the wizard is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Question `step` is active.
    InProgress { step: usize },
    /// Every question was traversed; waiting for an email address.
    Gate,
    /// Email confirmed; the report is available.
    Unlocked,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::InProgress { .. } => "in_progress",
            Phase::Gate => "gate",
            Phase::Unlocked => "unlocked",
        }
    }
}

/// Operation rejected by the wizard. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cannot {action} while the wizard is at the {} phase", .phase.as_str())]
    WrongPhase { action: &'static str, phase: Phase },
    #[error("question '{id}' is not the active question")]
    NotCurrentQuestion { id: String },
    #[error("question '{id}' is not a multiselect question")]
    NotMultiSelect { id: String },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    MalformedEmail(#[from] MalformedEmail),
}

/// Questionnaire session: owns the answers, the error map and the phase.
///
/// The mutators below are the only way to change any of them.
#[derive(Debug)]
pub struct Wizard<R = NatalReport> {
    spec: FormSpec,
    reporter: R,
    phase: Phase,
    answers: AnswerMap,
    errors: ErrorMap,
    email: Option<EmailAddress>,
    report: Option<Report>,
}

impl Wizard<NatalReport> {
    /// Wizard over `spec` with the built-in natal report.
    pub fn natal(spec: FormSpec) -> Result<Self, SchemaError> {
        Self::new(spec, NatalReport)
    }
}

impl<R: ReportGenerator> Wizard<R> {
    pub fn new(spec: FormSpec, reporter: R) -> Result<Self, SchemaError> {
        spec.check()?;
        debug!(form_id = %spec.id, questions = spec.len(), "wizard started");
        Ok(Self {
            spec,
            reporter,
            phase: Phase::InProgress { step: 0 },
            answers: AnswerMap::new(),
            errors: ErrorMap::new(),
            email: None,
            report: None,
        })
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Active step index, `None` outside `InProgress`.
    pub fn step(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress { step } => Some(step),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuestionSpec> {
        self.step().and_then(|step| self.spec.questions.get(step))
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Report computed at unlock, `None` before.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn progress(&self) -> Progress {
        let total = self.spec.len();
        let step = match self.phase {
            Phase::InProgress { step } => step,
            Phase::Gate | Phase::Unlocked => total,
        };
        let answered = self
            .spec
            .questions
            .iter()
            .filter(|question| self.answers.contains(&question.id))
            .count();
        Progress::new(step, total, answered)
    }

    /// Stores `value` for the active question and re-validates it.
    ///
    /// The value is stored even if it is invalid; the outcome is returned and
    /// recorded in the error map. Values are not clamped or checked for
    /// option membership here, see [`AnswerValue::from_raw`].
    pub fn edit(&mut self, id: &str, value: AnswerValue) -> Result<ValidationOutcome, WizardError> {
        let question = self.active_question("edit")?;
        if question.id != id {
            return Err(WizardError::NotCurrentQuestion { id: id.to_string() });
        }
        let outcome = validate(question, Some(&value));
        debug!(question = id, valid = outcome.is_valid(), "answer edited");

        self.answers.insert(id, value);
        self.errors.record(id, outcome.clone());
        Ok(outcome)
    }

    /// Adds or removes `item` on the active multiselect question, respecting its `max`.
    pub fn toggle_option(&mut self, item: &str) -> Result<ValidationOutcome, WizardError> {
        let question = self.active_question("toggle an option")?;
        let QuestionKind::MultiSelect { max, .. } = &question.kind else {
            return Err(WizardError::NotMultiSelect {
                id: question.id.clone(),
            });
        };
        let id = question.id.clone();
        let next = toggle_choice(self.answers.choices(&id), item, *max);
        self.edit(&id, AnswerValue::Choices(next))
    }

    /// Validates the active question and moves forward if it passes.
    ///
    /// Passing the last question enters the gate.
    pub fn advance(&mut self) -> Result<ValidationOutcome, WizardError> {
        let Phase::InProgress { step } = self.phase else {
            return Err(self.wrong_phase("advance"));
        };
        let question = self.active_question("advance")?;
        let id = question.id.clone();
        let outcome = validate(question, self.answers.get(&id));
        self.errors.record(&id, outcome.clone());

        if !outcome.is_valid() {
            debug!(question = %id, step, "advance blocked");
            return Ok(outcome);
        }

        let next = step + 1;
        if next == self.spec.len() {
            self.phase = Phase::Gate;
            info!(form_id = %self.spec.id, "all questions answered, waiting for email");
        } else {
            self.phase = Phase::InProgress { step: next };
            debug!(from = step, to = next, "advanced");
        }
        Ok(outcome)
    }

    /// Steps back one question without validating. At step 0 this is a no-op;
    /// from the gate it returns to the last question.
    pub fn retreat(&mut self) -> Result<Phase, WizardError> {
        self.phase = match self.phase {
            Phase::InProgress { step } => Phase::InProgress {
                step: step.saturating_sub(1),
            },
            Phase::Gate => Phase::InProgress {
                step: self.spec.len() - 1,
            },
            Phase::Unlocked => return Err(self.wrong_phase("retreat")),
        };
        debug!(phase = ?self.phase, "retreated");
        Ok(self.phase)
    }

    /// Accepts the contact address at the gate and computes the report.
    ///
    /// The generator runs exactly once, on a snapshot of the answers.
    pub fn confirm_email(&mut self, address: &str) -> Result<&Report, WizardError> {
        if self.phase != Phase::Gate {
            return Err(self.wrong_phase("confirm an email"));
        }
        let email = EmailAddress::parse(address)?;

        let snapshot = self.answers.clone();
        let report = self.reporter.generate(&snapshot);
        info!(form_id = %self.spec.id, "report unlocked");

        self.email = Some(email);
        self.phase = Phase::Unlocked;
        Ok(&*self.report.insert(report))
    }

    fn active_question(&self, action: &'static str) -> Result<&QuestionSpec, WizardError> {
        self.current_question()
            .ok_or_else(|| self.wrong_phase(action))
    }

    fn wrong_phase(&self, action: &'static str) -> WizardError {
        WizardError::WrongPhase {
            action,
            phase: self.phase,
        }
    }
}

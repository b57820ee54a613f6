#![allow(missing_docs)]

pub mod answers;
pub mod catalog;
pub mod email;
pub mod progress;
pub mod render;
pub mod report;
pub mod spec;
pub mod validate;
pub mod wizard;

pub use answers::{AnswerMap, AnswerSet, AnswerValue, InputError, RawAnswer, RawAnswerSet, toggle_choice};
pub use catalog::{NATAL_CHART_ID, natal_chart};
pub use email::{EmailAddress, MalformedEmail, is_well_formed};
pub use progress::Progress;
pub use render::{QuestionView, WizardView, render_json, render_text};
pub use report::{NatalReport, Report, ReportGenerator, render_report_text};
pub use spec::{FormSpec, ImageChoice, QuestionKind, QuestionSpec, QuestionType, SchemaError};
pub use validate::{ErrorMap, REQUIRED_MESSAGE, ValidationError, ValidationOutcome, validate};
pub use wizard::{Phase, Wizard, WizardError};

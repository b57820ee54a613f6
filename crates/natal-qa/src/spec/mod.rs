pub mod form;
pub mod question;

pub use form::{FormSpec, SchemaError};
pub use question::{ImageChoice, QuestionKind, QuestionSpec, QuestionType};

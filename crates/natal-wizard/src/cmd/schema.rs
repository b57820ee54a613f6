use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::load_spec;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Questionnaire file to print instead of the built-in one
    #[arg(long, value_name = "questionnaire.json")]
    pub schema: Option<PathBuf>,
    /// Print the JSON Schema of the questionnaire file format; ignores --schema
    #[arg(long = "json-schema")]
    pub json_schema: bool,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let value = if args.json_schema {
        natal_qa::FormSpec::json_schema().context("failed to generate JSON Schema")?
    } else {
        let spec = load_spec(args.schema.as_deref())?;
        serde_json::to_value(&spec).context("failed to serialize questionnaire")?
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

//! CLI argument definitions.

use chrono::{DateTime, Utc};
use clap::Args;
use model_factory::PolicyOverrides;
use schema_core::Value;
use std::path::PathBuf;

/// Arguments of `fixture-factory generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Model to build (defaults to the factory file's model)
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Path to factory YAML file with policy and per-field directives
    #[arg(long, short = 'f')]
    pub factory: Option<PathBuf>,

    /// Number of records to generate
    #[arg(long, short = 'n', default_value = "1")]
    pub count: u64,

    /// Random seed for deterministic generation (same seed = same records)
    #[arg(long, env = "FIXTURE_FACTORY_SEED")]
    pub seed: Option<u64>,

    /// Never set fields to null
    #[arg(long)]
    pub no_nulls: bool,

    /// Never synthesize empty sets or lists
    #[arg(long)]
    pub no_empty: bool,

    /// Fail on attributes whose type cannot be synthesized
    #[arg(long)]
    pub raise_unsupported: bool,

    /// Reference "now" for timestamps and expiries (RFC 3339)
    #[arg(long)]
    pub reference_time: Option<DateTime<Utc>>,

    /// Caller value for a field, as field=<json>; may be repeated
    #[arg(long = "set", value_name = "FIELD=JSON", value_parser = parse_assignment)]
    pub set: Vec<(String, Value)>,

    /// Output file (JSON Lines); stdout when omitted
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Policy settings given on the command line. Flags left off keep the
    /// factory file's setting.
    pub fn policy(&self) -> PolicyOverrides {
        PolicyOverrides {
            seed: self.seed,
            allow_nulls: self.no_nulls.then_some(false),
            allow_empty: self.no_empty.then_some(false),
            raise_unsupported: self.raise_unsupported.then_some(true),
        }
    }
}

/// Arguments of `fixture-factory models`.
#[derive(Args, Clone, Debug)]
pub struct ModelsArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's')]
    pub schema: PathBuf,
}

/// Parse a `field=<json>` assignment.
///
/// The right-hand side is read as JSON; anything that is not valid JSON is
/// taken as a plain string, so `--set name=Alice` works without quoting.
pub fn parse_assignment(s: &str) -> Result<(String, Value), String> {
    let (field, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=JSON, got '{s}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from_json(&json),
        Err(_) => Value::string(raw),
    };
    Ok((field.to_string(), value))
}

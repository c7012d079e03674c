//! Command-line interface for fixture-factory
//!
//! # Usage Examples
//!
//! ```bash
//! # Models and map types declared in a schema
//! fixture-factory models --schema models.yaml
//!
//! # Five records of MapModel, seeded, written to stdout
//! fixture-factory generate --schema models.yaml --model MapModel --count 5 --seed 42
//!
//! # Factory file with directives, no empty collections, to a file
//! fixture-factory generate --schema models.yaml --factory factory.yaml \
//!   --no-empty --output records.jsonl
//! ```
//!
//! Set `RUST_LOG=debug` to see dropped caller values and derived nested
//! factories, `RUST_LOG=trace` for every field resolution.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fixture_factory::{describe_schema, write_records, FactoryFile, GenerateArgs, ModelsArgs};
use model_factory::ModelFactory;
use schema_core::ModelSchema;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fixture-factory")]
#[command(about = "Generate plausible synthetic records from an attribute schema")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records of a model as JSON Lines
    Generate(GenerateArgs),

    /// List the models and map types of a schema
    Models(ModelsArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Models(args) => run_models(args),
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let schema = ModelSchema::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema from {:?}", args.schema))?;

    let factory_file = match &args.factory {
        Some(path) => FactoryFile::from_file(path)
            .with_context(|| format!("Failed to load factory file from {path:?}"))?,
        None => FactoryFile::default(),
    };

    let model = args
        .model
        .clone()
        .or_else(|| factory_file.model.clone())
        .context("No model to build: pass --model or set 'model' in the factory file")?;

    factory_file
        .validate(&schema, &model)
        .with_context(|| format!("Invalid factory configuration for model '{model}'"))?;

    let seed = args.seed.or(factory_file.seed);
    let mut base = factory_file
        .to_config_with_seed(seed)
        .context("Failed to build factory configuration")?;
    if let Some(now) = args.reference_time {
        base.reference_time = Some(now);
    }

    let mut factory =
        ModelFactory::create_factory(Arc::new(schema), &model, Some(&base), args.policy());
    let overrides: HashMap<_, _> = args.set.iter().cloned().collect();

    info!(
        "Generating {} record(s) of '{}' (seed: {:?})",
        args.count,
        model,
        factory.config().seed
    );

    let metrics = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {path:?}"))?;
            write_records(&mut factory, args.count, &overrides, file)
        }
        None => write_records(&mut factory, args.count, &overrides, io::stdout().lock()),
    }
    .with_context(|| format!("Failed to generate records of '{model}'"))?;

    info!("Wrote {} record(s)", metrics.records_written);
    Ok(())
}

fn run_models(args: ModelsArgs) -> anyhow::Result<()> {
    let schema = ModelSchema::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema from {:?}", args.schema))?;
    print!("{}", describe_schema(&schema));
    Ok(())
}

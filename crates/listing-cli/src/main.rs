//! # listing-cli
//!
//! Command-line interface for seller listing files.
//!
//! `inspect` summarizes a seller file, `transform` applies a mapping set and
//! `validate` transforms and checks the result against a marketplace
//! template.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::CliConfig;
use listing_adapter_csv::{CsvReader, CsvWriter};
use listing_mapping::{MappingDsl, MappingSet};
use listing_pipeline::Pipeline;
use listing_schema::TemplateLoader;
use listing_validation::ValidationReporter;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing")]
#[command(about = "Map and validate seller listing files")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the columns and first rows of a seller file
    Inspect {
        /// Seller file (.csv or .tsv)
        input: PathBuf,
    },

    /// Map a seller file onto marketplace attributes
    Transform {
        /// Seller file (.csv or .tsv)
        input: PathBuf,

        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,

        /// Mapping file path
        #[arg(short, long)]
        mapping: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = TransformFormat::Json)]
        format: TransformFormat,
    },

    /// Map a seller file and validate it against a marketplace template
    Validate {
        /// Seller file (.csv or .tsv)
        input: PathBuf,

        /// Mapping file path
        #[arg(short, long)]
        mapping: PathBuf,

        /// Marketplace template path
        #[arg(short, long)]
        schema: PathBuf,

        /// Report file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransformFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Json,
    Text,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Inspect { input } => {
            inspect(&config, &input)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Transform {
            input,
            output,
            mapping,
            format,
        } => {
            transform(&config, &input, output.as_deref(), &mapping, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            input,
            mapping,
            schema,
            output,
            format,
        } => validate(&config, &input, &mapping, &schema, output.as_deref(), format),
    }
}

fn inspect(config: &CliConfig, input: &Path) -> Result<()> {
    let summary = CsvReader::new()
        .with_config(config.csv_config())
        .inspect_path(input)
        .with_context(|| format!("inspecting {}", input.display()))?;
    let json = serde_json::to_string_pretty(&summary)?;
    emit(None, &json)
}

fn transform(
    config: &CliConfig,
    input: &Path,
    output: Option<&Path>,
    mapping: &Path,
    format: TransformFormat,
) -> Result<()> {
    let mapping = load_mapping(mapping)?;
    let pipeline = Pipeline::new(config.pipeline_config());
    let table = pipeline.read_file(input)?;
    let rows = pipeline.transform(&table, mapping.mappings())?;
    info!(rows = rows.len(), mapping = %mapping.name, "Transformed seller file");

    let rendered = match format {
        TransformFormat::Json => serde_json::to_string_pretty(&rows)?,
        TransformFormat::Csv => {
            let mut buffer = Vec::new();
            CsvWriter::new()
                .with_config(config.csv_config())
                .write_rows(&mut buffer, &rows)?;
            String::from_utf8(buffer).context("CSV output is not UTF-8")?
        }
    };
    emit(output, &rendered)
}

fn validate(
    config: &CliConfig,
    input: &Path,
    mapping: &Path,
    schema: &Path,
    output: Option<&Path>,
    format: ReportFormat,
) -> Result<ExitCode> {
    let mapping = load_mapping(mapping)?;
    let template = TemplateLoader::default()
        .load_from_file(schema)
        .with_context(|| format!("loading template {}", schema.display()))?;

    let mut pipeline = Pipeline::new(config.pipeline_config());
    let result = pipeline.run_file(input, &mapping, &template)?;

    let rendered = match format {
        ReportFormat::Json => serde_json::to_string_pretty(&result)?,
        ReportFormat::Text => {
            ValidationReporter::new().render_text(&result.validation_result, &result.report())
        }
    };
    emit(output, &rendered)?;

    if result.validation_result.is_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn load_mapping(path: &Path) -> Result<MappingSet> {
    MappingDsl::parse_file(path).with_context(|| format!("loading mapping {}", path.display()))
}

/// Write to `path`, or to stdout when there is none
fn emit(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            debug!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdf_table_extract::{
    DetectionOptions, ExtractionReport, LopdfEngine, Upload, extract_document,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pdf2json",
    version,
    about = "Extract per-page tables from a PDF and classify it as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract tables and write the JSON report.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum cells required per candidate table row.
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// Media type to declare for the upload.
    #[arg(long, default_value = "application/pdf")]
    media_type: String,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn run_extract(args: &ExtractArgs) -> Result<ExtractionReport> {
    let engine = LopdfEngine::new(DetectionOptions {
        min_cols: args.min_cols,
    })
    .context("invalid --min-cols")?;

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let upload = Upload {
        bytes: &bytes,
        media_type: &args.media_type,
        file_name: file_name.as_deref(),
    };
    let report = extract_document(&engine, upload)
        .with_context(|| format!("failed to extract tables from '{}'", args.input.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write report to stdout")?;
        }
    }

    Ok(report)
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_table_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(report) => {
                eprintln!(
                    "{}: {} page(s), {} table(s)",
                    report.document_type, report.page_count, report.table_count
                );
                if report.table_count > 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}

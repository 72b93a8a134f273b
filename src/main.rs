use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docupright::document::PdfiumStore;
use docupright::orientation::{plan_jobs, DetectionMode, ModeController, RotationCorrector};
use docupright::utils::config::AppConfig;
use docupright::utils::file_utils::collect_pdf_inputs;

#[derive(Parser, Debug)]
#[command(name = "docupright")]
#[command(about = "Detects wrongly rotated PDF pages from text placement and rotates them upright")]
struct Args {
    /// PDF files, or directories whose PDF files are processed
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Detection mode: absolute, relative or auto
    #[arg(long, short = 'm')]
    mode: Option<DetectionMode>,

    /// Directory for corrected documents
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Upright document whose first text page becomes the reference
    #[arg(long, short = 'r')]
    reference: Option<PathBuf>,

    /// Capture a fresh reference for every document
    #[arg(long)]
    reset_per_document: bool,

    /// Undo the rotation metadata of pages without text once a reference exists
    #[arg(long)]
    metadata_fallback: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docupright=info".into()),
        )
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one document failed.
fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => AppConfig::init_from(path)?,
        None => AppConfig::init()?,
    };

    let mode = args.mode.unwrap_or(config.detection_mode);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&*config.output_directory));
    std::fs::create_dir_all(&output_dir)?;

    let inputs = collect_pdf_inputs(&args.inputs, &config.output_suffix)?;
    let jobs = plan_jobs(&inputs, &output_dir, config)?;
    if jobs.is_empty() {
        tracing::warn!("No PDF files found");
        return Ok(true);
    }

    let store = PdfiumStore::new()?;
    let corrector = RotationCorrector::from_config(config)
        .with_reset_per_document(args.reset_per_document || config.reset_per_document);
    let mut controller = ModeController::new(mode)
        .with_metadata_fallback(args.metadata_fallback || config.metadata_fallback);

    tracing::info!(mode = %mode, documents = jobs.len(), "Starting rotation correction");

    if let Some(reference) = &args.reference {
        if !mode.uses_reference() {
            tracing::warn!("--reference has no effect in absolute mode");
        } else if !corrector.capture_reference(&store, &mut controller, reference)? {
            tracing::warn!("No reference captured, bootstrapping from the first page instead");
        }
    }

    let report = corrector.correct_batch(&store, &mut controller, &jobs);

    for outcome in &report.documents {
        match (&outcome.report, &outcome.error) {
            (Some(document), _) => tracing::info!(
                input = %outcome.input.display(),
                rotated = document.rotated_pages(),
                skipped = document.skipped_pages(),
                "Done"
            ),
            (None, Some(error)) => tracing::error!(input = %outcome.input.display(), "{error}"),
            (None, None) => {}
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    tracing::info!(
        documents = report.documents.len(),
        corrected = report.corrected_count(),
        failed = report.failed_count(),
        "Finished"
    );

    Ok(report.failed_count() == 0)
}

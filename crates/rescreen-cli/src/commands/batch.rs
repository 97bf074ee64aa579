//! Batch command - screen many resumes with one set of loaded models.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use rescreen_core::classify::{LoadedClassifier, TfidfVectorizer};
use rescreen_core::{Document, ModelBundle, ResumeScreener, ScreeningResult};

use super::load_config;
use super::screen::{OutputFormat, format_result};

type Screener = ResumeScreener<TfidfVectorizer, LoadedClassifier>;

/// File index, path, outcome (`None` when skipped) and elapsed milliseconds.
type WorkerOutput = (usize, PathBuf, Option<rescreen_core::Result<ScreeningResult>>, u64);

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching resume files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Outcome of screening a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ScreeningResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.models.model_dir = model_dir.clone();
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "pdf" | "docx")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let bundle = ModelBundle::load(&config.models)
        .map_err(|e| anyhow::anyhow!("Failed to load models: {}", e))?;
    let screener: Arc<Screener> = Arc::new(ResumeScreener::from_bundle(bundle, config.reader.clone()));

    println!(
        "{} Found {} files to screen",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    // Set by the first failing worker when the batch must stop
    let cancelled = Arc::new(AtomicBool::new(false));
    let mut tasks = JoinSet::new();
    let mut results: Vec<(usize, FileResult)> = Vec::new();

    for (index, path) in files.into_iter().enumerate() {
        while let Some(joined) = tasks.try_join_next() {
            record(joined?, &args, &progress, &mut results)?;
        }

        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        if cancelled.load(Ordering::SeqCst) {
            debug!("Batch cancelled, not starting {}", path.display());
            break;
        }

        let screener = Arc::clone(&screener);
        let cancelled = Arc::clone(&cancelled);
        let stop_on_error = !args.continue_on_error;

        tasks.spawn_blocking(move || -> WorkerOutput {
            let _permit = permit;
            if cancelled.load(Ordering::SeqCst) {
                return (index, path, None, 0);
            }

            let file_start = Instant::now();
            let outcome = screen_file(&screener, &path);
            if outcome.is_err() && stop_on_error {
                cancelled.store(true, Ordering::SeqCst);
            }
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            (index, path, Some(outcome), processing_time_ms)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = record(joined?, &args, &progress, &mut results) {
            tasks.abort_all();
            return Err(e);
        }
    }

    progress.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = results.into_iter().map(|(_, r)| r).collect();

    if let Some(output_dir) = &args.output_dir {
        for file in &results {
            if let Some(result) = &file.result {
                let output_name = file
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("resume");
                let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_result(result, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {} (generated_at {})",
            style("✓").green(),
            summary_path.display(),
            chrono::Local::now().to_rfc3339()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let successful = results.len() - failed.len();

    println!();
    println!(
        "{} Screened {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for file in &failed {
            println!(
                "  - {}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Fold one finished worker into `results`. Fails when the batch must stop.
fn record(
    (index, path, outcome, processing_time_ms): WorkerOutput,
    args: &BatchArgs,
    progress: &ProgressBar,
    results: &mut Vec<(usize, FileResult)>,
) -> anyhow::Result<()> {
    // Skipped after cancellation
    let Some(outcome) = outcome else {
        return Ok(());
    };
    progress.inc(1);

    match outcome {
        Ok(result) => results.push((
            index,
            FileResult {
                path,
                result: Some(result),
                error: None,
                processing_time_ms,
            },
        )),
        Err(e) => {
            let error_msg = e.to_string();
            if !args.continue_on_error {
                error!("Failed to screen {}: {}", path.display(), error_msg);
                progress.abandon();
                anyhow::bail!("Screening failed for {}: {}", path.display(), error_msg);
            }

            warn!("Failed to screen {}: {}", path.display(), error_msg);
            results.push((
                index,
                FileResult {
                    path,
                    result: None,
                    error: Some(error_msg),
                    processing_time_ms,
                },
            ));
        }
    }

    Ok(())
}

fn screen_file(screener: &Screener, path: &Path) -> rescreen_core::Result<ScreeningResult> {
    let document = Document::from_path(path)?;
    screener.screen(&document)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "name",
        "email",
        "phone",
        "category_id",
        "category",
        "processing_time_ms",
        "error",
    ])?;

    for file in results {
        let filename = file.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time_ms = file.processing_time_ms.to_string();

        if let Some(result) = &file.result {
            wtr.write_record([
                filename,
                "success",
                &result.contact.name,
                &result.contact.email,
                &result.contact.phone,
                &result.category_id.to_string(),
                &result.category,
                &time_ms,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                &time_ms,
                file.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

//! Screen command - extract contacts and predict the category of one resume.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use rescreen_core::{Document, DocumentKind, ModelBundle, ResumeScreener, ScreeningResult};

use super::load_config;

/// Arguments for the screen command.
#[derive(Args)]
pub struct ScreenArgs {
    /// Resume file (txt, pdf or docx)
    #[arg(required = true)]
    input: PathBuf,

    /// Declared MIME type (default: guessed from the extension)
    #[arg(long)]
    mime: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Labeled plain text lines
    Text,
    /// JSON object
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

pub async fn run(args: ScreenArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.models.model_dir = model_dir.clone();
    }

    // Models are loaded before the upload is looked at
    let bundle = ModelBundle::load(&config.models)
        .map_err(|e| anyhow::anyhow!("Failed to load models: {}", e))?;
    let screener = ResumeScreener::from_bundle(bundle, config.reader.clone());

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let kind = match &args.mime {
        Some(mime) => DocumentKind::from_mime(mime),
        None => DocumentKind::from_path(&args.input),
    };
    info!("Screening file: {} ({})", args.input.display(), kind);

    let document = Document::new(kind, fs::read(&args.input)?);
    let result = screener.screen(&document)?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a result in the requested format.
pub fn format_result(result: &ScreeningResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(result.to_display()),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
    }
}

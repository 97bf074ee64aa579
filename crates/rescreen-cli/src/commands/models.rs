//! Models command - inspect the vectorizer and classifier artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use rescreen_core::classify::{UNKNOWN_CATEGORY, categories};
use rescreen_core::{FeatureTransformer, ModelBundle};

use super::load_config;

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Check that the artifacts exist and load
    Status(StatusArgs),

    /// List the category table
    Info,
}

#[derive(Args)]
struct StatusArgs {
    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: ModelsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ModelsCommand::Status(status_args) => check_status(status_args, config_path),
        ModelsCommand::Info => show_info(),
    }
}

fn check_status(args: StatusArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(model_dir) = args.model_dir {
        config.models.model_dir = model_dir;
    }

    println!("{}", style("Model Status").bold());
    println!("Model directory: {}", style(config.models.model_dir.display()).cyan());
    println!();

    let mut all_present = true;
    for path in [config.models.vectorizer_path(), config.models.classifier_path()] {
        all_present &= print_file_status(&path)?;
    }
    println!();

    if !all_present {
        println!(
            "    {} Export the vectorizer and classifier into {} or pass --model-dir",
            style("⚠").yellow(),
            config.models.model_dir.display()
        );
        return Ok(());
    }

    match ModelBundle::load(&config.models) {
        Ok(bundle) => println!(
            "    {} Ready ({} features, {} vocabulary terms, {} classifier)",
            style("✓").green(),
            bundle.vectorizer.dimension(),
            bundle.vectorizer.vocabulary_size(),
            bundle.classifier.kind()
        ),
        Err(e) => println!("    {} Failed to load: {}", style("✗").red(), e),
    }

    Ok(())
}

fn print_file_status(path: &Path) -> anyhow::Result<bool> {
    let filename = path.file_name().and_then(|s| s.to_str()).unwrap_or("");

    if path.exists() {
        let size = fs::metadata(path)?.len();
        println!("    {} {:<25} {:>10}", style("✓").green(), filename, format_size(size));
        Ok(true)
    } else {
        println!("    {} {:<25} {:>10}", style("✗").red(), filename, "missing");
        Ok(false)
    }
}

fn show_info() -> anyhow::Result<()> {
    println!("{}", style("Categories").bold());
    for (id, label) in categories() {
        println!("  {:>3}  {}", id, label);
    }
    println!();
    println!("Any other id is reported as '{}'.", UNKNOWN_CATEGORY);

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}KB", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}

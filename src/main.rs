//! Lumora: ATS-style resume scoring and text-only document conversion

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use lumora::cli::{self, Cli, Commands, ConfigAction};
use lumora::config::Config;
use lumora::conversion::Converter;
use lumora::input::manager::InputManager;
use lumora::input::text_extractor::DocumentExtractor;
use lumora::input::DocumentFormat;
use lumora::output::formatter::{
    parse_output_format, resolve_report_path, save_report_to_file, ReportGenerator,
};
use lumora::output::report::AnalysisReport;
use lumora::processing::{score_cv, select_keywords};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

const JOB_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];
const NO_TEXT_WARNING: &str = "⚠️  No extractable text found (scanned image?). Try an OCR'd PDF.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> anyhow::Result<()> {
    let manager = InputManager::new(config.limits.clone()).with_staging(config.extraction.staging);

    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            top_k,
            output,
            save,
        } => {
            let format = match output {
                Some(format) => parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            let top_k = top_k.unwrap_or(config.scoring.top_k);

            let (job_text, job_source) = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &JOB_EXTENSIONS)
                        .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
                    let text = manager
                        .read_job_description(&path)
                        .await
                        .with_context(|| {
                            format!("Failed to read job description {}", path.display())
                        })?;
                    (Some(text), Some(path.display().to_string()))
                }
                (None, Some(text)) => (Some(text), Some("inline".to_string())),
                (None, None) => (None, None),
            };

            let started = Instant::now();
            let progress = spinner("Extracting and analyzing…");

            let extracted = manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let text_extracted = !extracted.is_blank();
            if !text_extracted {
                progress.suspend(|| {
                    println!("{}", NO_TEXT_WARNING.yellow());
                });
            }

            let cv_text = extracted.into_string();
            let result =
                tokio::task::spawn_blocking(move || score_cv(&cv_text, job_text.as_deref(), top_k))
                    .await?;
            progress.finish_and_clear();

            let report = AnalysisReport::new(
                result,
                resume.display().to_string(),
                job_source,
                text_extracted,
                started.elapsed().as_millis() as u64,
            );
            info!("Analysis complete: score {}", report.result.score);

            let use_colors = config.output.color_output && save.is_none();
            let rendered = ReportGenerator::with_options(use_colors, true, true)
                .generate_report(&report, format)?;

            match save {
                Some(target) => {
                    let path = resolve_report_path(&target, format, &report.metadata.resume_file);
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Extract { file, save } => {
            let extracted = manager
                .extract_text(&file)
                .await
                .with_context(|| format!("Failed to extract {}", file.display()))?;

            if extracted.is_blank() {
                eprintln!("{}", NO_TEXT_WARNING.yellow());
            }

            match save {
                Some(path) => {
                    tokio::fs::write(&path, extracted.as_str().as_bytes())
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Extracted text saved to {}", path.display());
                }
                None => println!("{}", extracted.as_str()),
            }
        }

        Commands::Convert { file, output } => {
            let document = manager
                .load_document(&file)
                .await
                .with_context(|| format!("Failed to load {}", file.display()))?;

            let output = match output {
                Some(path) => path,
                None => default_conversion_output(document.format())?,
            };

            let converter = Converter::new(
                DocumentExtractor::with_staging(config.extraction.staging),
                config.conversion.clone(),
            );

            let progress = spinner("Converting…");
            let conversion =
                tokio::task::spawn_blocking(move || converter.convert(&document)).await??;
            progress.finish_and_clear();

            if conversion.encoding_loss > 0 {
                println!(
                    "{}",
                    format!(
                        "⚠️  {} character(s) outside Latin-1 were dropped from the PDF",
                        conversion.encoding_loss
                    )
                    .yellow()
                );
            }

            tokio::fs::write(&output, conversion.document.bytes())
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("✅ Converted {} -> {}", file.display(), output.display());
            println!("Note: conversions are text-first; the original layout is not preserved.");
        }

        Commands::Keywords { job, limit } => {
            cli::validate_file_extension(&job, &JOB_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
            let text = manager
                .read_job_description(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let keywords = select_keywords(&text, limit.unwrap_or(config.scoring.keyword_limit));
            if keywords.is_empty() {
                println!("No keywords found.");
            }
            for (i, keyword) in keywords.iter().enumerate() {
                println!("{:>3}. {}", i + 1, keyword);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content =
                    toml::to_string_pretty(&config).context("Failed to serialize config")?;
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

fn default_conversion_output(format: DocumentFormat) -> anyhow::Result<PathBuf> {
    match format {
        DocumentFormat::Pdf => Ok(PathBuf::from("converted_from_pdf.docx")),
        DocumentFormat::Word => Ok(PathBuf::from("converted_from_docx.pdf")),
        DocumentFormat::Unknown => anyhow::bail!("Only PDF and DOCX files can be converted"),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(message.to_string());
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

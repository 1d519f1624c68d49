//! CLI interface for lumora

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lumora")]
#[command(about = "ATS-style resume scoring and text-only PDF/Word conversion")]
#[command(long_about = "Score a resume like an applicant tracking system, against a job \
description or a generic keyword set, and convert documents between PDF and Word (text only)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume
    Analyze {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description or keywords given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Number of job description keywords to match against
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Extract plain text from a document
    Extract {
        /// Path to a PDF or DOCX file
        file: PathBuf,

        /// Write the text to a file instead of stdout (cv_extracted.txt if no path given)
        #[arg(short, long, num_args = 0..=1, default_missing_value = "cv_extracted.txt")]
        save: Option<PathBuf>,
    },

    /// Convert PDF to Word or Word to PDF (text only)
    Convert {
        /// Path to a PDF or DOCX file
        file: PathBuf,

        /// Output path (defaults to converted_from_pdf.docx / converted_from_docx.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the keywords selected from a job description
    Keywords {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Maximum number of keywords
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "lumora", "analyze", "--resume", "cv.pdf", "--job-text", "rust tokio", "-k", "10",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { resume, job, job_text, top_k, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("rust tokio"));
                assert_eq!(top_k, Some(10));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_and_job_text_conflict() {
        let parsed = Cli::try_parse_from([
            "lumora", "analyze", "-r", "cv.pdf", "-j", "jd.txt", "--job-text", "rust",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_extract_save_default_name() {
        let cli = Cli::try_parse_from(["lumora", "extract", "cv.pdf", "--save"]).unwrap();
        match cli.command {
            Commands::Extract { save, .. } => {
                assert_eq!(save, Some(PathBuf::from("cv_extracted.txt")))
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("jd.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("jd.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("jd"), &["txt", "md"]).is_err());
    }
}

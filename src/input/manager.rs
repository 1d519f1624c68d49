//! Input manager: loads files from disk and applies the input policy
//! (size limit, allowed extensions) before anything reaches the core.

use crate::config::LimitsConfig;
use crate::error::{LumoraError, Result};
use crate::input::document::Document;
use crate::input::staging::Staging;
use crate::input::text_extractor::{DocumentExtractor, ExtractedText};
use log::info;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub struct InputManager {
    limits: LimitsConfig,
    staging: Staging,
}

impl InputManager {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            limits,
            staging: Staging::default(),
        }
    }

    pub fn with_staging(mut self, staging: Staging) -> Self {
        self.staging = staging;
        self
    }

    /// Load a document, rejecting oversized files and disallowed extensions
    pub async fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(LumoraError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        self.check_extension(path)?;

        let metadata = fs::metadata(path).await?;
        self.check_size(metadata.len())?;

        let bytes = fs::read(path).await?;
        let document = Document::from_named_bytes(bytes, path);
        info!(
            "Loaded {} ({} document, {} bytes)",
            path.display(),
            document.format(),
            document.len()
        );
        Ok(document)
    }

    /// Load a document and extract its plain text off the async runtime
    pub async fn extract_text(&self, path: &Path) -> Result<ExtractedText> {
        let document = self.load_document(path).await?;
        let extractor = DocumentExtractor::with_staging(self.staging);

        tokio::task::spawn_blocking(move || extractor.extract(&document))
            .await
            .map_err(|e| LumoraError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }

    /// Read a job description from a text or markdown file
    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match ext.as_deref() {
            Some("md") | Some("markdown") => {
                info!("Processing markdown job description: {}", path.display());
                Ok(markdown_to_text(&content))
            }
            Some("txt") | None => Ok(content),
            Some(other) => Err(LumoraError::UnsupportedFormat(format!(
                "Job description must be .txt or .md, got .{}",
                other
            ))),
        }
    }

    fn check_extension(&self, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| {
                LumoraError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        if self.limits.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)) {
            Ok(())
        } else {
            Err(LumoraError::UnsupportedFormat(format!(
                "Unsupported file extension: .{}. Allowed: {}",
                ext,
                self.limits.allowed_extensions.join(", ")
            )))
        }
    }

    fn check_size(&self, len: u64) -> Result<()> {
        let size_mb = len as f64 / BYTES_PER_MB;
        if size_mb > self.limits.max_file_size_mb as f64 {
            return Err(LumoraError::FileTooLarge {
                size_mb,
                max_mb: self.limits.max_file_size_mb,
            });
        }
        Ok(())
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(LimitsConfig::default())
    }
}

/// Render markdown and strip it back down to plain lines
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br />", "\n")
        .replace("</p>", "\n\n");

    // Tags go first so decoded `<` and `>` in the prose survive
    let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
    let stripped = tag_regex.replace_all(&text, "");

    // `&amp;` last, so `&amp;lt;` decodes once to `&lt;`
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

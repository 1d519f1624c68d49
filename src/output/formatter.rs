//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::{LumoraError, Result};
use crate::output::report::AnalysisReport;
use crate::processing::scorer::KeywordSource;
use crate::processing::suggestions::ScoreBand;
use colored::{Color, Colorize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const NO_TEXT_WARNING: &str = "No extractable text found (scanned image?). Try an OCR'd PDF.";

/// Trait for formatting analysis reports. [`ReportGenerator`] picks the
/// formatter whose `supports_format` matches the requested output.
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Low => Color::Red,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Strong => Color::Green,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn yes_no(&self, value: bool, yes: &str, no: &str) -> String {
        if value {
            self.colorize(yes, Color::Green)
        } else {
            self.colorize(no, Color::Red)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let r = &report.result;
        let mut out = String::new();

        out.push_str(&self.format_header("ATS SCORE"));
        push_line(
            &mut out,
            format_args!("Score: {} / 100 {}", r.score, self.format_score_badge(report.band)),
        )?;
        if !report.metadata.text_extracted {
            push_line(
                &mut out,
                format_args!("{}", self.colorize(NO_TEXT_WARNING, Color::Yellow)),
            )?;
        }

        out.push_str(&self.format_header("Breakdown"));
        push_line(
            &mut out,
            format_args!(
                "Keywords: {} / {} ({} pts, {})",
                r.kw_count,
                r.kw_total,
                r.kw_score,
                keyword_source_label(r.keyword_source)
            ),
        )?;
        push_line(
            &mut out,
            format_args!(
                "Contact:  {} ({} pts)",
                self.yes_no(r.has_contact, "Yes", "No"),
                r.contact_score
            ),
        )?;
        push_line(
            &mut out,
            format_args!(
                "Sections: {} ({} pts)",
                self.yes_no(r.has_sections, "OK", "Missing"),
                r.sections_score
            ),
        )?;
        push_line(&mut out, format_args!("Words:    {} ({} pts)", r.word_count, r.wc_score))?;

        out.push_str(&self.format_header("Matched Keywords"));
        if r.matched.is_empty() {
            out.push_str("No matches found yet. Tailor your CV to the job description keywords.\n");
        } else {
            let matched = self.colorize(&r.matched.join(", "), Color::Cyan);
            push_line(&mut out, format_args!("{}", matched))?;
        }

        out.push_str(&self.format_header("Suggestions"));
        for line in report.suggestion_lines() {
            push_line(&mut out, format_args!("• {}", line))?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let r = &report.result;
        let mut out = String::new();

        out.push_str("# ATS Score Report\n\n");

        if self.include_metadata {
            push_line(
                &mut out,
                format_args!(
                    "**Generated:** {} | **Processing Time:** {}ms",
                    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    report.metadata.processing_time_ms
                ),
            )?;
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            push_line(&mut out, format_args!("**Resume:** `{}`\n", resume_name))?;
        }

        push_line(
            &mut out,
            format_args!("**Score:** {} / 100 ({})\n", r.score, report.band.label()),
        )?;
        if !report.metadata.text_extracted {
            push_line(&mut out, format_args!("> {}\n", NO_TEXT_WARNING))?;
        }

        out.push_str("## Breakdown\n\n");
        out.push_str("| Component | Result | Points |\n");
        out.push_str("|-----------|--------|--------|\n");
        push_line(
            &mut out,
            format_args!(
                "| Keywords ({}) | {} / {} | {} |",
                keyword_source_label(r.keyword_source),
                r.kw_count,
                r.kw_total,
                r.kw_score
            ),
        )?;
        let contact = if r.has_contact { "Yes" } else { "No" };
        push_line(&mut out, format_args!("| Contact | {} | {} |", contact, r.contact_score))?;
        let sections = if r.has_sections { "OK" } else { "Missing" };
        push_line(&mut out, format_args!("| Sections | {} | {} |", sections, r.sections_score))?;
        push_line(&mut out, format_args!("| Words | {} | {} |\n", r.word_count, r.wc_score))?;

        out.push_str("## Matched Keywords\n\n");
        if r.matched.is_empty() {
            out.push_str("_No matches found yet._\n\n");
        } else {
            let chips: Vec<String> = r.matched.iter().map(|k| format!("`{}`", k)).collect();
            push_line(&mut out, format_args!("{}\n", chips.join(" ")))?;
        }

        out.push_str("## Suggestions\n\n");
        for line in report.suggestion_lines() {
            push_line(&mut out, format_args!("- {}", line))?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn push_line(out: &mut String, args: std::fmt::Arguments<'_>) -> Result<()> {
    out.write_fmt(args)
        .and_then(|_| out.write_char('\n'))
        .map_err(|e| LumoraError::OutputFormatting(e.to_string()))
}

fn keyword_source_label(source: KeywordSource) -> &'static str {
    match source {
        KeywordSource::JobDescription => "job description",
        KeywordSource::Generic => "generic set",
    }
}

pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(include_metadata)),
            ],
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        self.formatters
            .iter()
            .find(|formatter| formatter.supports_format() == format)
            .ok_or_else(|| {
                LumoraError::OutputFormatting(format!("No formatter registered for {:?}", format))
            })?
            .format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let ext = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_ats{}.{}", base_name, timestamp_suffix, ext)
}

/// Where to write a saved report. A directory target gets a generated,
/// timestamped file name inside it.
pub fn resolve_report_path(target: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> std::result::Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::{score_cv, DEFAULT_TOP_K};

    fn sample_report() -> AnalysisReport {
        let cv = "Skills: Python, Docker. jane@example.com";
        let result = score_cv(cv, None, DEFAULT_TOP_K);
        AnalysisReport::new(result, "/tmp/jane_cv.pdf", None, true, 12)
    }

    #[test]
    fn test_console_plain() {
        let text = ConsoleFormatter::new(false).format_report(&sample_report()).unwrap();
        assert!(text.contains("Score: 46 / 100 [NEEDS WORK]"));
        assert!(text.contains("docker, python"));
        assert!(text.contains("Contact:  Yes"));
        assert!(text.contains("• Add more bullet points"));
    }

    #[test]
    fn test_json_round_trip_fields() {
        let json = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["result"]["score"], 46);
        assert_eq!(value["result"]["keyword_source"], "generic");
        assert_eq!(value["band"], "low");
        assert_eq!(value["suggestions"][0]["kind"], "add_more_content");
    }

    #[test]
    fn test_markdown() {
        let md = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();
        assert!(md.starts_with("# ATS Score Report"));
        assert!(md.contains("**Resume:** `jane_cv.pdf`"));
        assert!(md.contains("`docker` `python`"));
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let generator = ReportGenerator::with_options(false, false, false);
        let report = sample_report();

        let console = generator.generate_report(&report, OutputFormat::Console).unwrap();
        assert!(console.contains("▓ ATS SCORE"));

        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());

        let md = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
        assert!(md.starts_with("# ATS Score Report"));
        assert!(!md.contains("**Generated:**"));
    }

    #[test]
    fn test_blank_extraction_warning() {
        let result = score_cv("", None, DEFAULT_TOP_K);
        let report = AnalysisReport::new(result, "scan.pdf", None, false, 1);
        let text = ReportGenerator::with_options(false, true, false)
            .generate_report(&report, OutputFormat::Console)
            .unwrap();
        assert!(text.contains("No extractable text found"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "cv/jane.pdf", false), "jane_ats.json");
        assert_eq!(suggest_filename(OutputFormat::Markdown, "jane.docx", false), "jane_ats.md");
    }

    #[test]
    fn test_resolve_report_path() {
        let dir = tempfile::tempdir().unwrap();

        let inside = resolve_report_path(dir.path(), OutputFormat::Json, "cv/jane.pdf");
        assert_eq!(inside.parent(), Some(dir.path()));
        let name = inside.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("jane_ats_"));
        assert!(name.ends_with(".json"));

        let explicit = dir.path().join("report.md");
        assert_eq!(resolve_report_path(&explicit, OutputFormat::Markdown, "jane.pdf"), explicit);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }
}

//! Configuration management for lumora

use crate::error::{LumoraError, Result};
use crate::input::staging::Staging;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Job-description keywords scored against
    pub top_k: usize,
    /// Keywords listed by the `keywords` command
    pub keyword_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_file_size_mb: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub staging: Staging,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    pub margin_mm: f32,
    pub bottom_margin_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_k: crate::processing::DEFAULT_TOP_K,
            keyword_limit: crate::processing::DEFAULT_KEYWORD_LIMIT,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 12,
            allowed_extensions: vec!["pdf".to_string(), "docx".to_string()],
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            font_size_pt: 12.0,
            line_height_mm: 8.0,
            margin_mm: 10.0,
            bottom_margin_mm: 15.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| LumoraError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LumoraError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("lumora")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.scoring.top_k == 0 {
            return Err(LumoraError::Configuration("scoring.top_k must be at least 1".to_string()));
        }
        if self.limits.allowed_extensions.is_empty() {
            return Err(LumoraError::Configuration(
                "limits.allowed_extensions must not be empty".to_string(),
            ));
        }

        let c = &self.conversion;
        if c.font_size_pt <= 0.0 || c.line_height_mm <= 0.0 {
            return Err(LumoraError::Configuration(
                "conversion font size and line height must be positive".to_string(),
            ));
        }
        if c.margin_mm < 0.0 || c.bottom_margin_mm < 0.0 {
            return Err(LumoraError::Configuration(
                "conversion margins must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scoring.top_k, 30);
        assert_eq!(config.scoring.keyword_limit, 50);
        assert_eq!(config.limits.max_file_size_mb, 12);
        assert_eq!(config.extraction.staging, Staging::TempFile);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_writes_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first, Config::default());

        let second = Config::load_from(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scoring]\ntop_k = 10\nkeyword_limit = 20\n\n[extraction]\nstaging = \"memory\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.scoring.top_k, 10);
        assert_eq!(config.extraction.staging, Staging::Memory);
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\ntop_k = 0\nkeyword_limit = 20\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(LumoraError::Configuration(_))));
    }
}

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SicheongError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;
const DEFAULT_MIN_CONTAINMENT_LEN: usize = 3;
const DEFAULT_LIMIT: usize = 5;

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub similarity_threshold: f64,
    pub min_containment_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            min_containment_len: DEFAULT_MIN_CONTAINMENT_LEN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows kept per tier.
    pub limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
}

impl AppConfig {
    /// Load config: user file (if exists) over built-in defaults.
    pub fn load() -> Result<Self, SicheongError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::parse(DEFAULT_CONFIG)
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, SicheongError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SicheongError::Config(e.to_string()))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, SicheongError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| SicheongError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SicheongError> {
        let threshold = self.matcher.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SicheongError::Config(format!(
                "similarity_threshold must be within 0.0-1.0, got {threshold}"
            )));
        }
        if self.report.limit == 0 {
            return Err(SicheongError::Config("report limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), SicheongError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SicheongError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SicheongError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "sicheong")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.matcher.similarity_threshold, 0.6);
        assert_eq!(config.matcher.min_containment_len, 3);
        assert_eq!(config.report.limit, 5);
        assert!(config.filter.exclude_keywords.iter().any(|k| k == "뉴스"));
    }

    #[test]
    fn test_defaults_agree_with_builtin_file() {
        let config = AppConfig::default();
        let matcher = MatcherConfig::default();
        assert_eq!(config.matcher.similarity_threshold, matcher.similarity_threshold);
        assert_eq!(config.matcher.min_containment_len, matcher.min_containment_len);
        assert_eq!(config.report.limit, ReportConfig::default().limit);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = AppConfig::parse("[report]\nlimit = 10\n").unwrap();
        assert_eq!(config.report.limit, 10);
        assert_eq!(config.matcher.similarity_threshold, 0.6);
        assert!(config.filter.exclude_keywords.is_empty());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = AppConfig::parse("[matcher]\nsimilarity_threshold = 0.7\n").unwrap();
        assert_eq!(config.matcher.similarity_threshold, 0.7);
        assert_eq!(config.matcher.min_containment_len, 3);

        let config = AppConfig::parse("[report]\n").unwrap();
        assert_eq!(config.report.limit, 5);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let result = AppConfig::parse("[matcher]\nsimilarity_threshold = 1.5\n");
        assert!(matches!(result, Err(SicheongError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let result = AppConfig::parse("[report]\nlimit = 0\n");
        assert!(matches!(result, Err(SicheongError::Config(_))));
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.report.limit = 7;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.report.limit, 7);
        assert_eq!(loaded.filter.exclude_keywords, config.filter.exclude_keywords);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(SicheongError::Config(_))));
    }
}

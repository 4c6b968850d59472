//! Project configuration (iconsmith.yaml) parsing.
//!
//! Every field is optional. Command line flags take precedence over the
//! file, and the file over built-in defaults.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::{IconError, Result};

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "iconsmith.yaml";

/// Resampling filter used for every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Defaults loaded from iconsmith.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding mask images.
    pub masks: Option<PathBuf>,

    /// Accepted mask file extensions.
    pub extensions: Vec<String>,

    /// Output root directory.
    pub output: Option<PathBuf>,

    /// Write into an existing mobile project instead of a standalone tree.
    pub project: Option<bool>,

    /// Maximum number of concurrent resize and write operations.
    pub jobs: Option<usize>,

    /// Resize filter.
    pub filter: Option<ResizeFilter>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IconError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| IconError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `iconsmith.yaml` in `dir` when present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Number of workers when none is configured.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
masks: assets/masks
extensions:
  - png
  - webp
output: mobile
project: true
jobs: 4
filter: catmull-rom
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.masks, Some(PathBuf::from("assets/masks")));
        assert_eq!(config.extensions, vec!["png", "webp"]);
        assert_eq!(config.output, Some(PathBuf::from("mobile")));
        assert_eq!(config.project, Some(true));
        assert_eq!(config.jobs, Some(4));
        assert_eq!(config.filter, Some(ResizeFilter::CatmullRom));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let err = Config::parse("mask: typo").unwrap_err();
        assert!(matches!(err, IconError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_filter() {
        assert!(Config::parse("filter: bicubic").is_err());
    }

    #[test]
    fn test_discover_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_discover_finds_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "jobs: 2\n").unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.jobs, Some(2));
    }

    #[test]
    fn test_discover_explicit_missing_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("other.yaml");

        let err = Config::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, IconError::Io { .. }));
    }

    #[test]
    fn test_filter_default_is_lanczos() {
        assert_eq!(ResizeFilter::default().filter_type(), FilterType::Lanczos3);
    }

    #[test]
    fn test_default_jobs_positive() {
        assert!(default_jobs() >= 1);
    }
}

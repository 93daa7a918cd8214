use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration, loaded from a TOML file.
///
/// ```toml
/// [ocr]
/// tessdata_dir = "/usr/share/tesseract-ocr/5/tessdata"
/// language = "eng"
/// max_dimension = 2800
/// contrast_stretch = true
///
/// [share]
/// inbox_dir = "/home/me/Pictures/payscan-inbox"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayscanConfig {
    pub ocr: OcrConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract `tessdata` directory; `None` uses the library default.
    pub tessdata_dir: Option<PathBuf>,
    pub language: String,
    /// Images larger than this on either side are scaled down before OCR.
    pub max_dimension: u32,
    /// Grayscale + min/max contrast stretch before OCR.
    pub contrast_stretch: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tessdata_dir: None,
            language: "eng".to_string(),
            max_dimension: 2800,
            contrast_stretch: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Directory watched for shared screenshots.
    pub inbox_dir: Option<PathBuf>,
}

impl PayscanConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

//! Per-operation download options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default pixel size for raster downloads
pub const DEFAULT_SIZE: u32 = 256;

/// Errors for invalid download options
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid color '{0}', expected 6 hex digits")]
    InvalidColor(String),

    #[error("Destination not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Destination is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Destination is read-only: {0}")]
    ReadOnly(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Raster formats offered by the asset endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageFormat {
    Png,
    Jpg,
    Gif,
    Webp,
    Ico,
}

impl ImageFormat {
    /// Token used in URLs and file extensions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Ico => "ico",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpg => "JPG",
            Self::Gif => "GIF",
            Self::Webp => "WEBP",
            Self::Ico => "ICO",
        }
    }

    /// Matching format for sniffing downloaded bytes
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::Webp => image::ImageFormat::WebP,
            Self::Ico => image::ImageFormat::Ico,
        }
    }

    pub fn all() -> &'static [ImageFormat] {
        &[Self::Png, Self::Jpg, Self::Gif, Self::Webp, Self::Ico]
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::Webp),
            "ico" => Ok(Self::Ico),
            _ => Err(OptionsError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for ImageFormat {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImageFormat> for String {
    fn from(format: ImageFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Hex color override, stored lowercase without the leading `#`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn hex(&self) -> &str {
        &self.0
    }

    /// `#rrggbb` form used inside SVG attributes
    pub fn css(&self) -> String {
        format!("#{}", self.0)
    }
}

impl FromStr for Color {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(hex.to_ascii_lowercase()))
        } else {
            Err(OptionsError::InvalidColor(s.to_string()))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Options for one download/copy operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Raster format for image downloads
    pub format: ImageFormat,
    /// Optional color override
    #[serde(default)]
    pub color: Option<Color>,
    /// Destination directory for saved files
    pub path: PathBuf,
    /// Pixel size for raster downloads
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

impl DownloadOptions {
    pub fn new(format: ImageFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            color: None,
            path: path.into(),
            size: DEFAULT_SIZE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Destination file for `stem` with the given extension
    pub fn target_file(&self, stem: &str, extension: &str) -> PathBuf {
        self.path.join(format!("{}.{}", stem, extension))
    }

    /// Check that `path` is an existing, writable directory
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_destination(&self.path)
    }
}

fn check_destination(path: &Path) -> Result<(), OptionsError> {
    if !path.exists() {
        return Err(OptionsError::PathNotFound(path.to_path_buf()));
    }
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_dir() {
        return Err(OptionsError::NotADirectory(path.to_path_buf()));
    }
    if metadata.permissions().readonly() {
        return Err(OptionsError::ReadOnly(path.to_path_buf()));
    }
    Ok(())
}

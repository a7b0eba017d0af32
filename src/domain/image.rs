use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    Fill,
    Fit,
    Limit,
    Scale,
    Thumb,
    Pad,
    Crop,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fill => "fill",
            CropMode::Fit => "fit",
            CropMode::Limit => "limit",
            CropMode::Scale => "scale",
            CropMode::Thumb => "thumb",
            CropMode::Pad => "pad",
            CropMode::Crop => "crop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    Auto,
    Center,
    Face,
    Faces,
    North,
    South,
    East,
    West,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::Auto => "auto",
            Gravity::Center => "center",
            Gravity::Face => "face",
            Gravity::Faces => "faces",
            Gravity::North => "north",
            Gravity::South => "south",
            Gravity::East => "east",
            Gravity::West => "west",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Auto,
    Webp,
    Avif,
    Jpg,
    Png,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Auto => "auto",
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// Compression quality: `auto` or a fixed level between 1 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QualityRepr", into = "String")]
pub enum Quality {
    Auto,
    Level(u8),
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Auto => write!(f, "auto"),
            Quality::Level(level) => write!(f, "{}", level),
        }
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Quality::Auto);
        }
        match s.parse::<u8>() {
            Ok(level) if (1..=100).contains(&level) => Ok(Quality::Level(level)),
            _ => Err(format!(
                "invalid quality '{}': expected 'auto' or a number between 1 and 100",
                s
            )),
        }
    }
}

/// Accepts `quality = 60` as well as `quality = "60"` or `quality = "auto"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum QualityRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<QualityRepr> for Quality {
    type Error = String;

    fn try_from(value: QualityRepr) -> Result<Self, Self::Error> {
        match value {
            QualityRepr::Number(n) => match u8::try_from(n) {
                Ok(level) if (1..=100).contains(&level) => Ok(Quality::Level(level)),
                _ => Err(format!(
                    "invalid quality {}: expected a number between 1 and 100",
                    n
                )),
            },
            QualityRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Quality> for String {
    fn from(quality: Quality) -> Self {
        quality.to_string()
    }
}

/// Delivery transformation options. Every field is optional so a partial
/// set can be layered over configured defaults with [`ImageOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<CropMode>,
    pub gravity: Option<Gravity>,
    pub format: Option<ImageFormat>,
    pub quality: Option<Quality>,
}

impl ImageOptions {
    /// Built-in defaults for storefront product imagery.
    pub fn storefront_defaults() -> Self {
        Self {
            width: None,
            height: None,
            crop: Some(CropMode::Fill),
            gravity: Some(Gravity::Auto),
            format: Some(ImageFormat::Auto),
            quality: Some(Quality::Auto),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Fields set in `overrides` win; unset ones fall back to `self`.
    pub fn merge(&self, overrides: &ImageOptions) -> ImageOptions {
        ImageOptions {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            crop: overrides.crop.or(self.crop),
            gravity: overrides.gravity.or(self.gravity),
            format: overrides.format.or(self.format),
            quality: overrides.quality.or(self.quality),
        }
    }

    /// Transformation components in delivery order (`w_,h_,c_,g_,f_,q_`).
    pub fn transformation_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(width) = self.width {
            parts.push(format!("w_{}", width));
        }
        if let Some(height) = self.height {
            parts.push(format!("h_{}", height));
        }
        if let Some(crop) = self.crop {
            parts.push(format!("c_{}", crop.as_str()));
        }
        if let Some(gravity) = self.gravity {
            parts.push(format!("g_{}", gravity.as_str()));
        }
        if let Some(format) = self.format {
            parts.push(format!("f_{}", format.as_str()));
        }
        if let Some(quality) = self.quality {
            parts.push(format!("q_{}", quality));
        }
        parts
    }
}

/// What the image host reports back after a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::glyph::FontSource;

/// Runtime settings for a generation run, read from `icongen.conf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output_dir: PathBuf,       // default "icons"
    pub font_path: Option<PathBuf>, // None = system discovery
    pub decoration: bool,          // default true
    pub write_manifest: bool,      // default true
    pub manifest_prefix: String,   // default "icons/"
    pub log_level: LevelFilter,    // default Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("icons"),
            font_path: None,
            decoration: true,
            write_manifest: true,
            manifest_prefix: "icons/".to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Where the decorative glyph should come from.
    pub fn font_source(&self) -> FontSource {
        if !self.decoration {
            FontSource::Disabled
        } else if let Some(p) = &self.font_path {
            FontSource::Path(p.clone())
        } else {
            FontSource::System
        }
    }
}

/// What was drawn below the plate of a large icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// Icon too small for any decoration.
    None,
    /// Emoji glyph rendered with the named font.
    Glyph { font: String },
    /// Glyph unavailable; the fallback ellipse was drawn instead.
    Fallback { reason: String },
}

impl Decoration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decoration::None => "none",
            Decoration::Glyph { .. } => "glyph",
            Decoration::Fallback { .. } => "fallback",
        }
    }
}

/// One icon written to disk by the driver.
#[derive(Debug, Clone)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
    pub decoration: Decoration,
}

impl GeneratedIcon {
    pub fn file_name(&self) -> String {
        crate::generate::icon_file_name(self.size)
    }
}

/// Result of a full driver run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub icons: Vec<GeneratedIcon>,
    pub manifest: Option<PathBuf>,
}

/// Entry of the `icons` array of a web app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconEntry {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub purpose: String,
}

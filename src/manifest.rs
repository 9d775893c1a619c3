use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IconError;
use crate::models::{GeneratedIcon, IconEntry};

pub const MANIFEST_FILE: &str = "manifest-icons.json";

/// Every generated icon is usable both as a regular and a maskable icon.
pub const ICON_PURPOSE: &str = "any maskable";

/// `icons` entries for the web app manifest, in generation order.
pub fn manifest_entries(icons: &[GeneratedIcon], prefix: &str) -> Vec<IconEntry> {
    icons
        .iter()
        .map(|icon| IconEntry {
            src: format!("{}{}", prefix, icon.file_name()),
            sizes: format!("{}x{}", icon.size, icon.size),
            mime_type: "image/png".to_string(),
            purpose: ICON_PURPOSE.to_string(),
        })
        .collect()
}

pub fn write_manifest(dir: &Path, entries: &[IconEntry]) -> Result<PathBuf, IconError> {
    let path = dir.join(MANIFEST_FILE);
    let mut json = serde_json::to_string_pretty(entries)?;
    json.push('\n');
    fs::write(&path, json).map_err(|source| IconError::Write { path: path.clone(), source })?;
    Ok(path)
}

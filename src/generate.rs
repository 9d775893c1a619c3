use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use log::info;
use std::fs;
use std::path::Path;

use crate::error::IconError;
use crate::glyph::FontResolver;
use crate::icon::render_icon;
use crate::manifest::{manifest_entries, write_manifest};
use crate::models::{Config, GeneratedIcon, GenerationReport};

/// Every edge length the web app ships, in generation order.
pub const ICON_SIZES: [u32; 8] = [72, 96, 128, 144, 152, 192, 384, 512];

pub fn icon_file_name(size: u32) -> String {
    format!("icon-{}x{}.png", size, size)
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)?;
    Ok(buf)
}

/// Render, encode and write one icon into `dir`.
pub fn write_icon(dir: &Path, size: u32, fonts: &FontResolver) -> Result<GeneratedIcon, IconError> {
    let rendered = render_icon(size, fonts);
    let bytes = encode_png(&rendered.image).map_err(|source| IconError::Encode { size, source })?;
    let path = dir.join(icon_file_name(size));
    fs::write(&path, bytes).map_err(|source| IconError::Write { path: path.clone(), source })?;
    Ok(GeneratedIcon { size, path, decoration: rendered.decoration })
}

/// Writes all icons (and the manifest fragment, if enabled) one after the
/// other. `on_written` is called after each file lands on disk.
pub fn generate_icons(
    cfg: &Config,
    mut on_written: impl FnMut(&GeneratedIcon),
) -> Result<GenerationReport, IconError> {
    let dir = cfg.output_dir.as_path();
    fs::create_dir_all(dir).map_err(|source| IconError::CreateDir { path: dir.to_path_buf(), source })?;

    let fonts = FontResolver::new(cfg.font_source());
    let mut report = GenerationReport::default();
    for size in ICON_SIZES {
        let icon = write_icon(dir, size, &fonts)?;
        info!("wrote {} (decoration: {})", icon.path.display(), icon.decoration.as_str());
        on_written(&icon);
        report.icons.push(icon);
    }

    if cfg.write_manifest {
        let entries = manifest_entries(&report.icons, &cfg.manifest_prefix);
        let path = write_manifest(dir, &entries)?;
        info!("wrote {}", path.display());
        report.manifest = Some(path);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::FontSource;
    use crate::models::Decoration;

    #[test]
    fn file_names_follow_convention() {
        assert_eq!(icon_file_name(72), "icon-72x72.png");
        assert_eq!(icon_file_name(512), "icon-512x512.png");
    }

    #[test]
    fn sizes_are_fixed_and_ordered() {
        assert_eq!(ICON_SIZES, [72, 96, 128, 144, 152, 192, 384, 512]);
    }

    #[test]
    fn encoded_png_decodes_to_same_pixels() {
        let img = crate::icon::render_with(96, &FontSource::Disabled);
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), img);
    }

    #[test]
    fn write_icon_reports_decoration() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = FontResolver::new(FontSource::Disabled);
        let small = write_icon(dir.path(), 144, &fonts).unwrap();
        let large = write_icon(dir.path(), 192, &fonts).unwrap();
        assert_eq!(small.decoration, Decoration::None);
        assert!(matches!(large.decoration, Decoration::Fallback { .. }));
        assert_eq!(large.path, dir.path().join("icon-192x192.png"));
        assert!(large.path.is_file());
    }

    #[test]
    fn progress_callback_sees_every_size_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            output_dir: dir.path().join("icons"),
            decoration: false,
            write_manifest: false,
            ..Config::default()
        };
        let mut seen = Vec::new();
        let report = generate_icons(&cfg, |icon| seen.push(icon.size)).unwrap();
        assert_eq!(seen, ICON_SIZES.to_vec());
        assert!(report.manifest.is_none());
    }
}

//! Best-effort emoji decoration for the larger icons.
//!
//! The glyph path is a capability check: a font is resolved once, checked for
//! a vector outline of the biceps emoji, and only then used for drawing. Any
//! failure along the way yields a [`DecorationUnavailable`] and the caller
//! draws the fallback ellipse instead.

use ab_glyph::{point, Font, FontArc, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use log::debug;
use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::canvas::{blend_pixel, fill_ellipse};
use crate::icon::IconGeometry;
use crate::models::Decoration;

/// "Flexed biceps"
pub const DECORATION_CHAR: char = '\u{1F4AA}';
pub const DECORATION_COLOR: Rgba<u8> = Rgba([249, 250, 251, 255]);

/// Semi-axes of the fallback "dumbbell head", in pixels regardless of icon size.
pub const FALLBACK_RX: i64 = 20;
pub const FALLBACK_RY: i64 = 10;

/// Families tried first during system discovery, in order of preference.
pub const EMOJI_FAMILIES: &[&str] = &[
    "Noto Emoji",
    "Noto Color Emoji",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Twemoji",
    "Twitter Color Emoji",
    "Symbola",
];

const CHECK_SCALE: f32 = 64.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Search installed system fonts.
    System,
    /// Use exactly this font file.
    Path(PathBuf),
    /// Never attempt the glyph.
    Disabled,
}

#[derive(Debug, Error)]
pub enum DecorationUnavailable {
    #[error("glyph decoration disabled")]
    Disabled,
    #[error("no installed font provides an outline for U+1F4AA")]
    NoFontFound,
    #[error("cannot read font {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse font {name}")]
    FontParse { name: String },
    #[error("font {name} has no glyph for U+1F4AA")]
    MissingGlyph { name: String },
    #[error("font {name} has no vector outline for U+1F4AA")]
    NoOutline { name: String },
    #[error("font {name} does not declare units per em")]
    NoUnitsPerEm { name: String },
}

/// A font known to carry an outline for [`DECORATION_CHAR`].
#[derive(Clone)]
pub struct GlyphFace {
    font: FontArc,
    name: String,
}

impl std::fmt::Debug for GlyphFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFace").field("name", &self.name).finish()
    }
}

impl GlyphFace {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse font bytes and check the decoration glyph is drawable.
    pub fn from_bytes(data: Vec<u8>, index: u32, name: &str) -> Result<Self, DecorationUnavailable> {
        let font = ab_glyph::FontVec::try_from_vec_and_index(data, index)
            .map_err(|_| DecorationUnavailable::FontParse { name: name.to_string() })?;
        check_outline(&font, name)?;
        Ok(Self { font: FontArc::new(font), name: name.to_string() })
    }
}

fn check_outline<F: Font>(font: &F, name: &str) -> Result<(), DecorationUnavailable> {
    let id = font.glyph_id(DECORATION_CHAR);
    if id.0 == 0 {
        return Err(DecorationUnavailable::MissingGlyph { name: name.to_string() });
    }
    // color emoji fonts often ship bitmaps only (CBDT/sbix)
    if font.outline_glyph(id.with_scale(PxScale::from(CHECK_SCALE))).is_none() {
        return Err(DecorationUnavailable::NoOutline { name: name.to_string() });
    }
    Ok(())
}

/// Scale whose em square is `em_px` pixels tall. `PxScale` itself measures
/// the line height (ascent - descent), which is larger than the em for most
/// fonts.
pub fn em_scale<F: Font>(font: &F, em_px: f32) -> Option<PxScale> {
    let units_per_em = font.units_per_em()?;
    Some(PxScale::from(em_px * font.height_unscaled() / units_per_em))
}

/// Load a specific font file.
pub fn load_face(path: &Path) -> Result<GlyphFace, DecorationUnavailable> {
    let data = std::fs::read(path).map_err(|source| DecorationUnavailable::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    GlyphFace::from_bytes(data, 0, &path.display().to_string())
}

fn family_rank(info: &fontdb::FaceInfo) -> usize {
    info.families
        .iter()
        .filter_map(|(family, _)| EMOJI_FAMILIES.iter().position(|f| f.eq_ignore_ascii_case(family)))
        .min()
        .unwrap_or(EMOJI_FAMILIES.len())
}

fn face_name(info: &fontdb::FaceInfo) -> String {
    info.families
        .first()
        .map(|(family, _)| family.clone())
        .unwrap_or_else(|| info.post_script_name.clone())
}

/// Search installed fonts, emoji families first, for a usable face.
pub fn discover_system_face() -> Result<GlyphFace, DecorationUnavailable> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    debug!("font discovery: {} system faces loaded", db.len());

    let mut faces: Vec<&fontdb::FaceInfo> = db.faces().collect();
    faces.sort_by_key(|info| family_rank(info));

    for info in faces {
        let name = face_name(info);
        // check on borrowed data; only the winning face gets copied
        let found = db.with_face_data(info.id, |data, index| {
            let font = FontRef::try_from_slice_and_index(data, index).ok()?;
            check_outline(&font, &name).ok()?;
            Some(GlyphFace::from_bytes(data.to_vec(), index, &name))
        });
        if let Some(Some(Ok(face))) = found {
            return Ok(face);
        }
    }
    Err(DecorationUnavailable::NoFontFound)
}

pub fn resolve(source: &FontSource) -> Result<GlyphFace, DecorationUnavailable> {
    match source {
        FontSource::Disabled => Err(DecorationUnavailable::Disabled),
        FontSource::Path(path) => load_face(path),
        FontSource::System => discover_system_face(),
    }
}

/// Resolves the font lazily, at most once, and remembers the outcome.
pub struct FontResolver {
    source: FontSource,
    face: OnceCell<Result<GlyphFace, DecorationUnavailable>>,
}

impl FontResolver {
    pub fn new(source: FontSource) -> Self {
        Self { source, face: OnceCell::new() }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn face(&self) -> Result<&GlyphFace, &DecorationUnavailable> {
        self.face
            .get_or_init(|| {
                let resolved = resolve(&self.source);
                match &resolved {
                    Ok(face) => debug!("decoration font: {}", face.name()),
                    Err(e) => debug!("decoration font unavailable: {}", e),
                }
                resolved
            })
            .as_ref()
    }
}

/// Draw the emoji centered horizontally with the top of its text line at
/// `center + size/6`. Nothing is drawn unless the outline is available.
pub fn draw_glyph(img: &mut RgbaImage, geo: &IconGeometry, face: &GlyphFace) -> Result<String, DecorationUnavailable> {
    let scale = em_scale(&face.font, geo.font_px as f32)
        .ok_or_else(|| DecorationUnavailable::NoUnitsPerEm { name: face.name.clone() })?;
    let scaled = face.font.as_scaled(scale);
    let id = face.font.glyph_id(DECORATION_CHAR);
    let no_outline = || DecorationUnavailable::NoOutline { name: face.name.clone() };

    // measure at the line origin first, like a text bounding box query
    let measured = face
        .font
        .outline_glyph(id.with_scale_and_position(scale, point(0.0, scaled.ascent())))
        .ok_or_else(no_outline)?;
    let bounds = measured.px_bounds();
    let text_width = (bounds.max.x - bounds.min.x) as i64;
    let text_x = geo.center - text_width / 2;
    let text_y = geo.center + geo.decoration_offset;

    let outline = face
        .font
        .outline_glyph(id.with_scale_and_position(
            scale,
            point(text_x as f32, text_y as f32 + scaled.ascent()),
        ))
        .ok_or_else(no_outline)?;
    let origin = outline.px_bounds().min;
    outline.draw(|x, y, coverage| {
        blend_pixel(
            img,
            origin.x as i64 + x as i64,
            origin.y as i64 + y as i64,
            DECORATION_COLOR,
            coverage,
        );
    });
    Ok(face.name.clone())
}

/// Fixed 40×20 ellipse at the decoration position.
pub fn draw_fallback(img: &mut RgbaImage, geo: &IconGeometry) {
    let y = geo.center + geo.decoration_offset;
    fill_ellipse(img, geo.center, y, FALLBACK_RX, FALLBACK_RY, DECORATION_COLOR);
}

/// Glyph if the face is usable, otherwise the fallback ellipse. Exactly one
/// of the two is drawn.
pub fn decorate(
    img: &mut RgbaImage,
    geo: &IconGeometry,
    face: Result<&GlyphFace, &DecorationUnavailable>,
) -> Decoration {
    let drawn = match face {
        Ok(face) => draw_glyph(img, geo, face).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match drawn {
        Ok(font) => Decoration::Glyph { font },
        Err(reason) => {
            debug!("icon {}: drawing fallback shape ({})", geo.size, reason);
            draw_fallback(img, geo);
            Decoration::Fallback { reason }
        }
    }
}

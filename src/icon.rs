use image::{Rgba, RgbaImage};

use crate::canvas::{blank, fill_circle, fill_rounded_rect};
use crate::glyph::{decorate, FontResolver, FontSource};
use crate::models::Decoration;

/// Dark gray of the safe-zone disk and the inner ring.
pub const BACKGROUND: Rgba<u8> = Rgba([31, 41, 55, 255]);
/// Lighter gray of the weight plate and the center hole.
pub const PLATE: Rgba<u8> = Rgba([55, 65, 81, 255]);
pub const BAR: Rgba<u8> = Rgba([107, 114, 128, 255]);

/// Smallest edge length that gets the emoji (or fallback) decoration.
pub const DECORATION_MIN_SIZE: u32 = 192;

/// Integer measurements of the motif for one edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGeometry {
    /// Edge length in pixels.
    pub size: u32,
    /// `size / 2`, both axes.
    pub center: i64,
    /// `floor(0.4 * size)`
    pub safe_zone_radius: i64,
    /// `floor(0.38 * size)`
    pub plate_radius: i64,
    /// `size / 4`
    pub inner_radius: i64,
    /// `size / 12`
    pub hole_radius: i64,
    /// `size / 2`, along x.
    pub bar_length: i64,
    /// `size / 20`, along y.
    pub bar_thickness: i64,
    /// Half the bar thickness.
    pub bar_radius: i64,
    /// Distance from the center down to the decoration, `size / 6`.
    pub decoration_offset: i64,
    /// Em size of the decoration glyph, `size / 8`.
    pub font_px: u32,
}

impl IconGeometry {
    pub fn for_size(size: u32) -> Self {
        let s = size as i64;
        let bar_thickness = s / 20;
        Self {
            size,
            center: s / 2,
            safe_zone_radius: s * 2 / 5,
            plate_radius: s * 19 / 50,
            inner_radius: s / 4,
            hole_radius: s / 12,
            bar_length: s / 2,
            bar_thickness,
            bar_radius: bar_thickness / 2,
            decoration_offset: s / 6,
            font_px: size / 8,
        }
    }

    /// Inclusive corners of the bar, vertically centered on the canvas.
    pub fn bar_bounds(&self) -> ((i64, i64), (i64, i64)) {
        let top = self.center - self.bar_thickness / 2;
        let half = self.bar_length / 2;
        (
            (self.center - half, top),
            (self.center + half, top + self.bar_thickness),
        )
    }

    pub fn has_decoration(&self) -> bool {
        self.size >= DECORATION_MIN_SIZE
    }
}

/// A rendered icon together with what ended up below the plate.
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    pub image: RgbaImage,
    pub decoration: Decoration,
}

/// Draws the plate-and-barbell motif. Fonts are only touched for sizes that
/// carry a decoration.
pub fn render_icon(size: u32, fonts: &FontResolver) -> RenderedIcon {
    let geo = IconGeometry::for_size(size);
    let mut img = blank(size);
    let c = geo.center;

    fill_circle(&mut img, c, c, geo.safe_zone_radius, BACKGROUND);
    fill_circle(&mut img, c, c, geo.plate_radius, PLATE);
    fill_circle(&mut img, c, c, geo.inner_radius, BACKGROUND);
    fill_circle(&mut img, c, c, geo.hole_radius, PLATE);

    let (top_left, bottom_right) = geo.bar_bounds();
    fill_rounded_rect(&mut img, top_left, bottom_right, geo.bar_radius, BAR);

    let decoration = if geo.has_decoration() {
        decorate(&mut img, &geo, fonts.face())
    } else {
        Decoration::None
    };

    RenderedIcon { image: img, decoration }
}

thread_local! {
    static SYSTEM_FONTS: FontResolver = FontResolver::new(FontSource::System);
}

/// Run `f` with the per-thread system font resolver, so discovery happens at
/// most once per thread.
pub fn with_system_fonts<R>(f: impl FnOnce(&FontResolver) -> R) -> R {
    SYSTEM_FONTS.with(f)
}

/// One-off render with its own resolver; the font is resolved again on every
/// call. Use [`render_icon`] with a shared [`FontResolver`] for batches.
pub fn render_with(size: u32, source: &FontSource) -> RgbaImage {
    render_icon(size, &FontResolver::new(source.clone())).image
}

/// Render one icon, discovering an emoji font among the system fonts. The
/// discovery result is shared by all calls on the same thread.
pub fn render(size: u32) -> RgbaImage {
    with_system_fonts(|fonts| render_icon(size, fonts).image)
}

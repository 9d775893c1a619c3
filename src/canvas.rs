use image::{Rgba, RgbaImage};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fresh size×size RGBA canvas, fully transparent.
pub fn blank(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, TRANSPARENT)
}

/// Inclusive pixel range of `[lo, hi]` clipped to `0..len`, or None if empty.
fn clip(lo: i64, hi: i64, len: u32) -> Option<(u32, u32)> {
    let lo = lo.max(0);
    let hi = hi.min(len as i64 - 1);
    if lo > hi { None } else { Some((lo as u32, hi as u32)) }
}

/// Filled, aliased disk: every pixel with (x-cx)² + (y-cy)² <= r².
pub fn fill_circle(img: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    fill_ellipse(img, cx, cy, radius, radius, color);
}

/// Filled, aliased axis-aligned ellipse with semi-axes `rx`, `ry`.
pub fn fill_ellipse(img: &mut RgbaImage, cx: i64, cy: i64, rx: i64, ry: i64, color: Rgba<u8>) {
    if rx < 0 || ry < 0 {
        return;
    }
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
        clip(cx - rx, cx + rx, img.width()),
        clip(cy - ry, cy + ry, img.height()),
    ) else {
        return;
    };
    // dx²/rx² + dy²/ry² <= 1, multiplied out to stay in integers
    let (rx2, ry2) = (rx * rx, ry * ry);
    for y in y_lo..=y_hi {
        let dy = y as i64 - cy;
        for x in x_lo..=x_hi {
            let dx = x as i64 - cx;
            if dx * dx * ry2 + dy * dy * rx2 <= rx2 * ry2 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Filled rounded rectangle over the inclusive box `[x0, x1] × [y0, y1]`.
pub fn fill_rounded_rect(
    img: &mut RgbaImage,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    radius: i64,
    color: Rgba<u8>,
) {
    if x1 < x0 || y1 < y0 {
        return;
    }
    let r = radius.max(0).min((x1 - x0) / 2).min((y1 - y0) / 2);
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) =
        (clip(x0, x1, img.width()), clip(y0, y1, img.height()))
    else {
        return;
    };
    for y in y_lo..=y_hi {
        let (y, cy) = (y as i64, (y as i64).clamp(y0 + r, y1 - r));
        for x in x_lo..=x_hi {
            let (x, cx) = (x as i64, (x as i64).clamp(x0 + r, x1 - r));
            // outside the corner regions (cx, cy) == (x, y) and this is trivially true
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Source-over blend of `color` at `coverage` (0.0..=1.0) onto one pixel.
/// Out-of-bounds coordinates are ignored.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let a = coverage.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
    if a <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    for c in 0..3 {
        let src = color[c] as f32 * a;
        let under = dst[c] as f32 * dst_a * (1.0 - a);
        dst[c] = ((src + under) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn count(img: &RgbaImage, color: Rgba<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn blank_is_transparent() {
        let img = blank(8);
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(count(&img, TRANSPARENT), 64);
    }

    #[test]
    fn circle_covers_exact_radius() {
        let mut img = blank(11);
        fill_circle(&mut img, 5, 5, 3, RED);
        assert_eq!(*img.get_pixel(5, 2), RED);
        assert_eq!(*img.get_pixel(8, 5), RED);
        assert_eq!(*img.get_pixel(5, 1), TRANSPARENT);
        // (3,3) is at distance² 8 from (5,5) but (2,2) at 18 > 9
        assert_eq!(*img.get_pixel(3, 3), RED);
        assert_eq!(*img.get_pixel(2, 2), TRANSPARENT);
        // lattice points with x²+y² <= 9
        assert_eq!(count(&img, RED), 29);
    }

    #[test]
    fn circle_is_clipped_at_edges() {
        let mut img = blank(4);
        fill_circle(&mut img, 0, 0, 10, RED);
        assert_eq!(count(&img, RED), 16);
    }

    #[test]
    fn ellipse_uses_both_axes() {
        let mut img = blank(21);
        fill_ellipse(&mut img, 10, 10, 8, 2, RED);
        assert_eq!(*img.get_pixel(2, 10), RED);
        assert_eq!(*img.get_pixel(18, 10), RED);
        assert_eq!(*img.get_pixel(10, 12), RED);
        assert_eq!(*img.get_pixel(10, 13), TRANSPARENT);
        assert_eq!(*img.get_pixel(1, 10), TRANSPARENT);
    }

    #[test]
    fn rounded_rect_trims_corners() {
        let mut img = blank(12);
        fill_rounded_rect(&mut img, (1, 1), (10, 10), 3, RED);
        assert_eq!(*img.get_pixel(1, 1), TRANSPARENT);
        assert_eq!(*img.get_pixel(10, 10), TRANSPARENT);
        assert_eq!(*img.get_pixel(1, 5), RED);
        assert_eq!(*img.get_pixel(5, 1), RED);
        assert_eq!(*img.get_pixel(5, 5), RED);
        assert_eq!(*img.get_pixel(0, 5), TRANSPARENT);
        assert_eq!(*img.get_pixel(11, 5), TRANSPARENT);
    }

    #[test]
    fn rounded_rect_with_zero_radius_is_full_box() {
        let mut img = blank(6);
        fill_rounded_rect(&mut img, (1, 2), (4, 3), 0, RED);
        assert_eq!(count(&img, RED), 8);
    }

    #[test]
    fn blend_full_coverage_replaces_pixel() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        blend_pixel(&mut img, 0, 0, RED, 1.0);
        assert_eq!(*img.get_pixel(0, 0), RED);
    }

    #[test]
    fn blend_half_coverage_mixes() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        blend_pixel(&mut img, 0, 0, Rgba([200, 100, 50, 255]), 0.5);
        assert_eq!(*img.get_pixel(0, 0), Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut img = blank(2);
        blend_pixel(&mut img, -1, 0, RED, 1.0);
        blend_pixel(&mut img, 2, 2, RED, 1.0);
        assert_eq!(count(&img, TRANSPARENT), 4);
    }
}

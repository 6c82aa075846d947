//! Promise card composition.
//!
//! A fixed-layout 1200x800 raster: accent title, word-wrapped pledge text,
//! the captured signature strokes scaled into their own region, and a small
//! footer, encoded as PNG. Text is drawn from an embedded 8x8 glyph sheet
//! scaled to the nearest whole multiple; characters outside basic ASCII
//! render as blanks.

mod glyphs;

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::CardError;

pub const CARD_W: u32 = 1200;
pub const CARD_H: u32 = 800;

/// Capture box the signature strokes are recorded against.
pub const SIG_BOX_W: f32 = 720.0;
pub const SIG_BOX_H: f32 = 300.0;

const MARGIN_X: i64 = 60;
const TITLE_BASELINE: i64 = 120;
const TITLE_PX: u32 = 48;
const BODY_TOP: i64 = 200;
const BODY_PX: u32 = 34;
const BODY_LINE_ADVANCE: i64 = 42;
const BODY_MAX_W: i64 = CARD_W as i64 - 2 * MARGIN_X;
/// Where the signature lands: x, y, width, height.
const SIG_REGION: (f32, f32, f32, f32) = (60.0, 320.0, 800.0, 200.0);
const SIG_THICKNESS: f32 = 3.0;
const FOOTER_BASELINE: i64 = 560;
const FOOTER_PX: u32 = 20;

const BG: Rgba<u8> = Rgba([0xff, 0xf6, 0xf7, 0xff]);
const ACCENT: Rgba<u8> = Rgba([0xb0, 0x30, 0x4a, 0xff]);
const INK: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xff]);

const TITLE: &str = "My Promise";
const FOOTER: &str = "Signed with love";

/// Everything needed to compose one card.
pub struct CardSpec<'a> {
    pub pledge: &'a str,
    pub strokes: &'a [Vec<(f32, f32)>],
}

/// Compose the card in memory.
pub fn compose(spec: &CardSpec) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(CARD_W, CARD_H, BG);

    draw_text(&mut img, MARGIN_X, TITLE_BASELINE, TITLE, TITLE_PX, ACCENT);

    let scale = px_scale(BODY_PX);
    let mut y = BODY_TOP;
    for line in wrap_lines(spec.pledge, BODY_MAX_W, scale) {
        draw_text(&mut img, MARGIN_X, y, &line, BODY_PX, INK);
        y += BODY_LINE_ADVANCE;
    }

    for stroke in spec.strokes {
        for pair in stroke.windows(2) {
            let a = sig_point(pair[0]);
            let b = sig_point(pair[1]);
            draw_segment(&mut img, a, b, ACCENT, SIG_THICKNESS);
        }
        // A lone point still leaves a dot.
        if stroke.len() == 1 {
            let p = sig_point(stroke[0]);
            draw_segment(&mut img, p, p, ACCENT, SIG_THICKNESS);
        }
    }

    draw_text(&mut img, MARGIN_X, FOOTER_BASELINE, FOOTER, FOOTER_PX, ACCENT);
    img
}

/// Compose and write as PNG.
///
/// # Errors
/// Returns an error if encoding or the file write fails.
pub fn render_to(path: &Path, spec: &CardSpec) -> Result<(), CardError> {
    compose(spec)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| CardError::EncodeFailed(e.to_string()))
}

/// Map a capture-box point into the card's signature region.
fn sig_point((x, y): (f32, f32)) -> (f32, f32) {
    let (rx, ry, rw, rh) = SIG_REGION;
    (x / SIG_BOX_W * rw + rx, y / SIG_BOX_H * rh + ry)
}

fn px_scale(px: u32) -> i64 {
    (i64::from(px) + 4) / 8
}

/// Word-wrap against a pixel width, measuring at 8 px per glyph times scale.
fn wrap_lines(text: &str, max_w: i64, scale: i64) -> Vec<String> {
    let advance = 8 * scale.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate_len = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if candidate_len as i64 * advance > max_w && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draw text with its baseline at `y`.
fn draw_text(img: &mut RgbaImage, x: i64, baseline: i64, text: &str, px: u32, color: Rgba<u8>) {
    let scale = px_scale(px).max(1);
    let top = baseline - 8 * scale;
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(rows) = glyphs::glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) != 0 {
                        fill_block(
                            img,
                            pen_x + col as i64 * scale,
                            top + row as i64 * scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
        pen_x += 8 * scale;
    }
}

fn fill_block(img: &mut RgbaImage, x: i64, y: i64, size: i64, color: Rgba<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            put_px(img, x + dx, y + dy, color);
        }
    }
}

fn put_px(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if (0..CARD_W as i64).contains(&x) && (0..CARD_H as i64).contains(&y) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Stamp a round pen along the segment.
fn draw_segment(
    img: &mut RgbaImage,
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    color: Rgba<u8>,
    thickness: f32,
) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i64;
    let radius = thickness / 2.0;
    let r = radius.ceil() as i64;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let cx = x0 + (x1 - x0) * t;
        let cy = y0 + (y1 - y0) * t;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f32).sqrt() <= radius {
                    put_px(img, cx.round() as i64 + dx, cy.round() as i64 + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_has_color(
        img: &RgbaImage,
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
        color: Rgba<u8>,
    ) -> bool {
        (y0..y1).any(|y| (x0..x1).any(|x| *img.get_pixel(x, y) == color))
    }

    #[test]
    fn card_has_the_fixed_size_and_background() {
        let img = compose(&CardSpec {
            pledge: "",
            strokes: &[],
        });
        assert_eq!((img.width(), img.height()), (CARD_W, CARD_H));
        assert_eq!(*img.get_pixel(0, 0), BG);
        assert_eq!(*img.get_pixel(CARD_W - 1, CARD_H - 1), BG);
    }

    #[test]
    fn title_body_and_footer_leave_pixels() {
        let img = compose(&CardSpec {
            pledge: "I will make time for us every week",
            strokes: &[],
        });
        // Title band.
        assert!(region_has_color(&img, 60, 70, 700, 125, ACCENT));
        // Body band.
        assert!(region_has_color(&img, 60, 165, 1140, 210, INK));
        // Footer band.
        assert!(region_has_color(&img, 60, 530, 700, 565, ACCENT));
    }

    #[test]
    fn signature_strokes_land_in_their_region() {
        let strokes = vec![vec![(0.0, 0.0), (SIG_BOX_W, SIG_BOX_H)]];
        let img = compose(&CardSpec {
            pledge: "",
            strokes: &strokes,
        });
        // The diagonal crosses the middle of the signature region.
        assert!(region_has_color(&img, 400, 380, 520, 460, ACCENT));
        // Nothing escapes below the region.
        assert!(!region_has_color(&img, 0, 600, CARD_W, 700, ACCENT));
    }

    #[test]
    fn long_pledges_wrap_into_multiple_lines() {
        let lines = wrap_lines(
            "I will always make you coffee in the mornings and evenings and afternoons too",
            BODY_MAX_W,
            px_scale(BODY_PX),
        );
        assert!(lines.len() > 1);
        let advance = 8 * px_scale(BODY_PX);
        assert!(lines
            .iter()
            .all(|l| l.chars().count() as i64 * advance <= BODY_MAX_W));
    }

    #[test]
    fn a_very_long_word_gets_its_own_line() {
        let lines = wrap_lines("a bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb c", 200, 1);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn render_to_writes_a_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promise-card.png");
        let strokes = vec![vec![(10.0, 10.0), (200.0, 120.0)]];
        render_to(
            &path,
            &CardSpec {
                pledge: "I will hold your hand in crowded places",
                strokes: &strokes,
            },
        )
        .unwrap();
        use image::GenericImageView;
        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (CARD_W, CARD_H));
    }
}

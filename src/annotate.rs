//! Drawing helpers for frame overlays.

use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::models::{AnnotatedFrame, Caption, Frame, PANEL, Point};

/// Approximate glyph advance of the caption font at scale 1
const GLYPH_WIDTH: u32 = 18;
const GLYPH_HEIGHT: u32 = 22;
const PANEL_MARGIN: i32 = 10;

/// Line segment of the given thickness in pixels
pub fn draw_thick_line(frame: &mut Frame, from: Point, to: Point, color: Rgb<u8>, thickness: u32) {
    let half = (thickness.max(1) / 2) as i32;
    for dy in -half..=half {
        for dx in -half..=half {
            draw_line_segment_mut(
                frame,
                (from.x.saturating_add(dx) as f32, from.y.saturating_add(dy) as f32),
                (to.x.saturating_add(dx) as f32, to.y.saturating_add(dy) as f32),
                color,
            );
        }
    }
}

/// Closed outline through `points`
pub fn draw_closed_polyline(frame: &mut Frame, points: &[Point], color: Rgb<u8>, thickness: u32) {
    if points.len() < 2 {
        return;
    }
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        draw_thick_line(frame, *a, b, color, thickness);
    }
}

pub fn draw_marker(frame: &mut Frame, at: Point, radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(frame, (at.x, at.y), radius, color);
}

/// Opaque panel behind where the caption text goes
fn caption_panel(caption: &Caption) -> (i32, i32, u32, u32) {
    let text_width = caption.text.chars().count() as u32 * GLYPH_WIDTH;
    let x = caption.anchor.x - PANEL_MARGIN;
    let y = caption.anchor.y - GLYPH_HEIGHT as i32 - PANEL_MARGIN;
    let width = text_width + 2 * PANEL_MARGIN as u32;
    let height = GLYPH_HEIGHT + 2 * PANEL_MARGIN as u32;
    (x, y, width, height)
}

/// Paint the caption's background panel and record the caption on the frame
pub fn add_caption(out: &mut AnnotatedFrame, caption: Caption) {
    let (x, y, width, height) = caption_panel(&caption);
    let (fw, fh) = (out.image.width() as i32, out.image.height() as i32);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width as i32).min(fw);
    let y1 = (y + height as i32).min(fh);
    if x1 > x0 && y1 > y0 {
        let rect = Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut out.image, rect, PANEL);
    }
    out.captions.push(caption);
}

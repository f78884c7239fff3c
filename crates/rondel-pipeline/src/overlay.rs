//! Result overlay: draw confirmed contours and detected circles onto
//! the original image.
//!
//! Confirmed contours are traced in blue with a two-pixel stroke; every
//! detected circle gets a small red center marker and a red outline.
//! Drawing follows contour extraction order, so overlapping annotations
//! stack the same way on every run.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::types::{Contour, Detection};

/// Color for confirmed contour outlines.
pub const CONTOUR_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Color for detected circle markers and outlines.
pub const CIRCLE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Radius of the small center marker, in pixels.
pub const CENTER_MARKER_RADIUS: i32 = 3;

/// Annotate the original image with the detection result.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn annotate(canvas: &mut RgbaImage, detection: &Detection) {
    for confirmed in &detection.confirmed {
        draw_contour(canvas, &confirmed.contour, CONTOUR_COLOR);

        for circle in &confirmed.circles {
            let center = (circle.cx.round() as i32, circle.cy.round() as i32);
            draw_hollow_circle_mut(canvas, center, CENTER_MARKER_RADIUS, CIRCLE_COLOR);

            // Thickened outline: three concentric one-pixel circles.
            let radius = circle.radius.round() as i32;
            for r in radius - 1..=radius + 1 {
                if r > 0 {
                    draw_hollow_circle_mut(canvas, center, r, CIRCLE_COLOR);
                }
            }
        }
    }
}

/// Draw a contour as a closed polyline with a two-pixel stroke.
///
/// The stroke is an L-shaped pen: the polyline plus copies offset one
/// pixel right and one pixel down, which thickens segments of any
/// orientation to two pixels.
#[allow(clippy::cast_precision_loss)]
fn draw_contour(canvas: &mut RgbaImage, contour: &Contour, color: Rgba<u8>) {
    let points = contour.points();
    if points.is_empty() {
        return;
    }

    for (ox, oy) in [(0.0f32, 0.0f32), (1.0, 0.0), (0.0, 1.0)] {
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            draw_line_segment_mut(
                canvas,
                (a.x as f32 + ox, a.y as f32 + oy),
                (b.x as f32 + ox, b.y as f32 + oy),
                color,
            );
        }
    }
}

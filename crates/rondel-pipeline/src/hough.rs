//! Per-contour circle confirmation via a Hough gradient transform.
//!
//! Each candidate contour is rasterized alone as a white closed polyline
//! on a black mask of the full image size, and the transform runs on
//! that isolated mask. Isolation avoids cross-contamination between
//! nearby shapes: a global Hough search becomes a per-candidate
//! confirmation test. [`confirm_circle`] is a pure function with no
//! shared mutable canvas between calls, so confirmations are independent
//! and could run in parallel.
//!
//! The transform follows the gradient method: every edge point of the
//! mask votes for possible centers along its gradient direction (both
//! ways), accumulator peaks above the vote threshold become centers, and
//! each center's radius is taken from the best-supported distance to the
//! edge points. The minimum separation between accepted centers equals
//! the mask height, so a mask normally yields at most one circle.

use image::GrayImage;

use crate::edge;
use crate::types::{Contour, DetectedCircle, DetectorConfig, Dimensions};

/// Run circle confirmation for a single contour.
///
/// Rasterizes the contour onto its own blank mask and runs the Hough
/// gradient transform on it. An empty result means the contour shows no
/// circular arc evidence.
#[must_use = "returns the circles detected on the contour's mask"]
pub fn confirm_circle(
    contour: &Contour,
    dimensions: Dimensions,
    config: &DetectorConfig,
) -> Vec<DetectedCircle> {
    let mask = rasterize_contour(contour, dimensions);
    find_circles(&mask, config)
}

/// Draw a contour as a white closed polyline on a black mask.
///
/// The mask has the full image dimensions so detected circle
/// coordinates line up with the source image. Single-point contours
/// mark their one pixel.
#[must_use = "returns the rasterized contour mask"]
#[allow(clippy::cast_precision_loss)]
pub fn rasterize_contour(contour: &Contour, dimensions: Dimensions) -> GrayImage {
    let mut mask = GrayImage::new(dimensions.width, dimensions.height);
    let points = contour.points();
    let white = image::Luma([255]);

    match points {
        [] => {}
        [p] => {
            let xy = (p.x as f32, p.y as f32);
            imageproc::drawing::draw_line_segment_mut(&mut mask, xy, xy, white);
        }
        _ => {
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                imageproc::drawing::draw_line_segment_mut(
                    &mut mask,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    white,
                );
            }
        }
    }

    mask
}

/// Detect circles in a binary mask with the Hough gradient method.
///
/// Centers must collect at least `config.hough_vote_threshold` votes and
/// their radius must be supported by at least as many edge points.
/// Accepted centers are separated by at least the mask height. Radius
/// search runs at one-pixel resolution from `config.min_radius` to
/// `config.max_radius` (zero meaning unconstrained).
#[must_use = "returns the detected circles"]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn find_circles(mask: &GrayImage, config: &DetectorConfig) -> Vec<DetectedCircle> {
    let (w, h) = mask.dimensions();
    if w < 3 || h < 3 {
        return Vec::new();
    }

    // Edge map of the mask, as the gradient method computes internally.
    let high = config.hough_edge_threshold.max(edge::MIN_THRESHOLD);
    let edges = edge::canny(mask, high / 2.0, high);

    let (gx, gy) = sobel_gradients(mask);

    let min_radius = config.min_radius.max(1);
    let max_radius = if config.max_radius == 0 {
        w.max(h)
    } else {
        config.max_radius
    };
    if max_radius < min_radius {
        return Vec::new();
    }

    // Center accumulation: each edge point casts votes along its
    // gradient line in both directions, at one-pixel radius steps.
    let stride = w as usize;
    let mut accum = vec![0u32; stride * h as usize];
    let mut edge_points: Vec<(u32, u32)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if edges.get_pixel(x, y).0[0] == 0 {
                continue;
            }
            let idx = y as usize * stride + x as usize;
            let gxv = gx[idx];
            let gyv = gy[idx];
            let mag = gxv.hypot(gyv);
            if mag < 1e-6 {
                continue;
            }
            edge_points.push((x, y));

            let dx = gxv / mag;
            let dy = gyv / mag;
            for sign in [-1.0f32, 1.0] {
                for r in min_radius..=max_radius {
                    let cx = x as f32 + sign * dx * r as f32;
                    let cy = y as f32 + sign * dy * r as f32;
                    let ci = cx.round() as i64;
                    let cj = cy.round() as i64;
                    if ci < 0 || cj < 0 || ci >= i64::from(w) || cj >= i64::from(h) {
                        // The ray leaves the mask and cannot re-enter.
                        break;
                    }
                    accum[cj as usize * stride + ci as usize] += 1;
                }
            }
        }
    }

    if edge_points.is_empty() {
        return Vec::new();
    }

    let vote_threshold = config.hough_vote_threshold.max(1);
    let peaks = accumulator_peaks(&accum, w, h, vote_threshold);
    let min_separation = f64::from(h);

    let mut circles: Vec<DetectedCircle> = Vec::new();
    for &(_, px, py) in &peaks {
        let too_close = circles.iter().any(|c| {
            let dx = f64::from(c.cx) - f64::from(px);
            let dy = f64::from(c.cy) - f64::from(py);
            dx.hypot(dy) < min_separation
        });
        if too_close {
            continue;
        }
        if let Some(circle) = estimate_radius(
            (px, py),
            &edge_points,
            min_radius,
            max_radius,
            vote_threshold,
        ) {
            circles.push(circle);
        }
    }

    circles
}

/// Local maxima of the accumulator at or above `threshold`,
/// sorted by votes, strongest first.
///
/// Border cells are eligible; neighbors outside the accumulator are
/// treated as zero, so a circle centered on the image edge is still
/// found.
#[allow(clippy::cast_sign_loss)]
fn accumulator_peaks(accum: &[u32], w: u32, h: u32, threshold: u32) -> Vec<(u32, u32, u32)> {
    let stride = w as usize;
    let mut peaks = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let votes = accum[y as usize * stride + x as usize];
            if votes < threshold {
                continue;
            }
            let mut is_max = true;
            'neighbors: for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = i64::from(x) + dx;
                    let ny = i64::from(y) + dy;
                    if nx < 0 || ny < 0 || nx >= i64::from(w) || ny >= i64::from(h) {
                        continue;
                    }
                    if accum[ny as usize * stride + nx as usize] > votes {
                        is_max = false;
                        break 'neighbors;
                    }
                }
            }
            if is_max {
                peaks.push((votes, x, y));
            }
        }
    }

    peaks.sort_by(|a, b| b.0.cmp(&a.0));
    peaks
}

/// Pick the best-supported radius for a center candidate.
///
/// Builds a one-pixel histogram of edge-point distances from the center
/// and returns the bin with the most support, provided that support
/// meets the vote threshold.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn estimate_radius(
    center: (u32, u32),
    edge_points: &[(u32, u32)],
    min_radius: u32,
    max_radius: u32,
    vote_threshold: u32,
) -> Option<DetectedCircle> {
    let bins = (max_radius - min_radius + 1) as usize;
    let mut histogram = vec![0u32; bins];

    for &(x, y) in edge_points {
        let dx = f64::from(x) - f64::from(center.0);
        let dy = f64::from(y) - f64::from(center.1);
        let r = dx.hypot(dy).round() as i64;
        if r < i64::from(min_radius) || r > i64::from(max_radius) {
            continue;
        }
        histogram[(r - i64::from(min_radius)) as usize] += 1;
    }

    let (best_bin, &support) = histogram
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)?;
    if support < vote_threshold {
        return None;
    }

    Some(DetectedCircle {
        cx: center.0 as f32,
        cy: center.1 as f32,
        radius: (best_bin as u32 + min_radius) as f32,
    })
}

/// 3x3 Sobel gradients of a grayscale image, row-major `f32` planes.
///
/// Border pixels are left at zero; the transform only needs gradients
/// where the mask has interior edge structure.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sobel_gradients(image: &GrayImage) -> (Vec<f32>, Vec<f32>) {
    let (w, h) = image.dimensions();
    let stride = w as usize;
    let mut gx = vec![0.0f32; stride * h as usize];
    let mut gy = vec![0.0f32; stride * h as usize];

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let p = |dx: i32, dy: i32| -> f32 {
                let px = (x as i32 + dx) as u32;
                let py = (y as i32 + dy) as u32;
                f32::from(image.get_pixel(px, py).0[0])
            };
            let idx = y as usize * stride + x as usize;
            gx[idx] = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            gy[idx] = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
        }
    }

    (gx, gy)
}

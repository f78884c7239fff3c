//! Geometric pre-filter: discard contours whose minimum-area bounding
//! rectangle says they cannot plausibly be disks.
//!
//! A disk's bounding rectangle is close to square and reasonably large;
//! strongly elongated rectangles belong to stretched ellipses or line
//! fragments, and tiny rectangles are noise. Rejecting these early keeps
//! the per-contour Hough confirmation from wasting work on hopeless
//! candidates.

use crate::types::{Contour, DetectorConfig, Point};

/// Side lengths of a minimum-area enclosing rectangle.
///
/// Ephemeral: computed once per contour during filtering and not
/// retained. Both sides are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    /// Length of one side in pixels.
    pub width: f64,
    /// Length of the adjacent side in pixels.
    pub height: f64,
}

impl BoundingRect {
    /// Rectangle area in square pixels.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Ratio of the longer to the shorter side.
    ///
    /// Returns `None` for degenerate rectangles whose shorter side is
    /// zero — the division-by-zero guard the filter relies on.
    #[must_use]
    pub fn side_ratio(&self) -> Option<f64> {
        let long = self.width.max(self.height);
        let short = self.width.min(self.height);
        (short > 0.0).then(|| long / short)
    }
}

/// Compute the minimum-area enclosing rectangle of a contour.
///
/// Returns `None` for contours that do not span two dimensions (fewer
/// than three points, or all points collinear); such contours cannot
/// bound a disk and are treated as degenerate.
#[must_use]
pub fn min_bounding_rect(contour: &Contour) -> Option<BoundingRect> {
    let points = contour.points();
    if points.len() < 3 || is_collinear(points) {
        return None;
    }

    let pts: Vec<imageproc::point::Point<i32>> = points
        .iter()
        .map(|p| imageproc::point::Point::new(p.x, p.y))
        .collect();
    let corners = imageproc::geometry::min_area_rect(&pts);

    Some(BoundingRect {
        width: side_length(corners[0], corners[1]),
        height: side_length(corners[1], corners[2]),
    })
}

/// Whether a contour survives the geometric pre-filter.
///
/// A contour is a candidate circle when its bounding rectangle is not
/// too elongated (`side ratio <= max_side_ratio`) and not too small
/// (`area >= min_rect_area`). Degenerate rectangles are rejected.
#[must_use]
pub fn is_candidate(contour: &Contour, config: &DetectorConfig) -> bool {
    let Some(rect) = min_bounding_rect(contour) else {
        return false;
    };
    let Some(ratio) = rect.side_ratio() else {
        return false;
    };
    ratio <= config.max_side_ratio && rect.area() >= config.min_rect_area
}

fn side_length(a: imageproc::point::Point<i32>, b: imageproc::point::Point<i32>) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// True when every point lies on the line through the first two distinct
/// points (or all points coincide).
fn is_collinear(points: &[Point]) -> bool {
    let Some(&p0) = points.first() else {
        return true;
    };
    let Some(&p1) = points.iter().find(|p| **p != p0) else {
        return true;
    };
    let ux = i64::from(p1.x - p0.x);
    let uy = i64::from(p1.y - p0.y);
    points.iter().all(|p| {
        let vx = i64::from(p.x - p0.x);
        let vy = i64::from(p.y - p0.y);
        ux * vy - uy * vx == 0
    })
}

//! Outer contour extraction from a binary edge map.
//!
//! Uses Suzuki-Abe border following via
//! [`imageproc::contours::find_contours`], keeping only top-level outer
//! boundaries (nested and hole borders are discarded, matching an
//! external-retrieval mode). Runs of collinear points are compressed so
//! each contour stores only the vertices needed to reconstruct the
//! polygon.
//!
//! Contour order follows the row-major traversal of the edge map; the
//! tie-break between contours starting on the same row is
//! implementation-defined.

use image::GrayImage;
use imageproc::contours::BorderType;

use crate::types::{Contour, Point};

/// Extract top-level outer contours from a binary edge map.
///
/// White (nonzero) pixels are foreground. Only borders without a parent
/// are kept, so boundaries nested inside another shape are discarded.
#[must_use = "returns the extracted contours"]
pub fn outer_contours(edges: &GrayImage) -> Vec<Contour> {
    let found: Vec<imageproc::contours::Contour<i32>> = imageproc::contours::find_contours(edges);

    found
        .into_iter()
        .filter(|c| c.parent.is_none() && c.border_type == BorderType::Outer)
        .filter_map(|c| {
            let points: Vec<Point> = c.points.into_iter().map(|p| Point::new(p.x, p.y)).collect();
            let compressed = compress_collinear(points);
            (!compressed.is_empty()).then(|| Contour::new(compressed))
        })
        .collect()
}

/// Remove interior points of straight runs from a closed point ring.
///
/// A point is dropped when its predecessor and successor continue in the
/// same direction, i.e. the three points are collinear and the middle
/// one adds no geometry. Direction reversals (the turn-around points of
/// a one-pixel-wide spur) are kept so the polygon still reconstructs.
fn compress_collinear(points: Vec<Point>) -> Vec<Point> {
    if points.len() < 3 {
        return points;
    }

    let n = points.len();
    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];

        let ax = i64::from(cur.x - prev.x);
        let ay = i64::from(cur.y - prev.y);
        let bx = i64::from(next.x - cur.x);
        let by = i64::from(next.y - cur.y);

        let cross = ax * by - ay * bx;
        let dot = ax * bx + ay * by;
        if cross != 0 || dot <= 0 {
            kept.push(cur);
        }
    }

    if kept.is_empty() {
        // Fully collinear ring with no reversals; keep one vertex so the
        // at-least-one-point invariant holds.
        return vec![points[0]];
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_edge_map_produces_no_contours() {
        let img = GrayImage::new(10, 10);
        assert!(outer_contours(&img).is_empty());
    }

    #[test]
    fn filled_rectangle_produces_one_outer_contour() {
        let mut img = GrayImage::new(20, 20);
        for y in 5..15 {
            for x in 5..15 {
                img.put_pixel(x, y, image::Luma([255]));
            }
        }
        let contours = outer_contours(&img);
        assert_eq!(contours.len(), 1, "expected a single outer contour");
        assert!(contours[0].len() >= 4);
    }

    #[test]
    fn hole_border_is_discarded() {
        // A 1px-wide square ring: border following finds an outer border
        // and a hole border inside it; only the outer one survives.
        let mut img = GrayImage::new(20, 20);
        for i in 5..15 {
            img.put_pixel(i, 5, image::Luma([255]));
            img.put_pixel(i, 14, image::Luma([255]));
            img.put_pixel(5, i, image::Luma([255]));
            img.put_pixel(14, i, image::Luma([255]));
        }
        let contours = outer_contours(&img);
        assert_eq!(
            contours.len(),
            1,
            "expected the hole border to be filtered out"
        );
    }

    #[test]
    fn straight_runs_are_compressed() {
        // The outer border of a filled 10x5 rectangle walks its whole
        // perimeter; after compression only the direction changes remain.
        let mut img = GrayImage::new(20, 10);
        for y in 2..7 {
            for x in 4..14 {
                img.put_pixel(x, y, image::Luma([255]));
            }
        }
        let contours = outer_contours(&img);
        assert_eq!(contours.len(), 1);
        let len = contours[0].len();
        assert!(
            (4..=8).contains(&len),
            "expected a compressed rectangle outline, got {len} points",
        );
    }

    #[test]
    fn single_pixel_keeps_one_point() {
        let mut img = GrayImage::new(10, 10);
        img.put_pixel(5, 5, image::Luma([255]));
        let contours = outer_contours(&img);
        assert_eq!(contours.len(), 1);
        assert!(!contours[0].is_empty());
        for p in contours[0].points() {
            assert_eq!(*p, Point::new(5, 5));
        }
    }

    #[test]
    fn compress_keeps_reversal_endpoints() {
        // Border following a 1px horizontal line yields an out-and-back
        // ring; compression keeps the two endpoints.
        let ring = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(3, 0),
            Point::new(2, 0),
            Point::new(1, 0),
        ];
        let compressed = compress_collinear(ring);
        assert_eq!(compressed, vec![Point::new(0, 0), Point::new(3, 0)]);
    }

    #[test]
    fn compress_preserves_corners() {
        let square = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(1, 2),
            Point::new(0, 2),
            Point::new(0, 1),
        ];
        let compressed = compress_collinear(square);
        assert_eq!(
            compressed,
            vec![
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2),
            ]
        );
    }
}

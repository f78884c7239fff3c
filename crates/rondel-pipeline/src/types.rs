//! Shared types for the rondel detection pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// original decoded image without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point on the pixel grid of a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: i32,
    /// Vertical position (pixels from top edge).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A closed boundary traced from a binary edge map.
///
/// The points form a closed polygon: the last point connects back to the
/// first. Always holds at least one point; immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the contour.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the contour and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A circle reported by the Hough transform.
///
/// Center coordinates are in the pixel space of the image the transform
/// ran on. Produced only for accepted accumulator peaks, so there are no
/// partial or invalid entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedCircle {
    /// Center x coordinate in pixels.
    pub cx: f32,
    /// Center y coordinate in pixels.
    pub cy: f32,
    /// Radius in pixels.
    pub radius: f32,
}

/// A contour that passed circle confirmation, together with the circles
/// the transform reported for it.
///
/// `circles` is non-empty by construction: a contour is only confirmed
/// when the transform returns at least one circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedContour {
    /// The contour, in extraction order coordinates.
    pub contour: Contour,
    /// Circles detected on this contour's isolated mask.
    pub circles: Vec<DetectedCircle>,
}

/// Result of running the full detection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Confirmed contours, in edge-map extraction order.
    pub confirmed: Vec<ConfirmedContour>,
    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
}

impl Detection {
    /// Number of circles found.
    ///
    /// Counts confirmed contours, not individual detected arcs: one
    /// contour is one physical object, no matter how many circles the
    /// transform returned for it.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.confirmed.len()
    }
}

/// Configuration for the detection pipeline.
///
/// All parameters are fixed heuristic constants tuned for typical image
/// brightness and contrast. The struct is immutable for the duration of
/// a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Median blur aperture (square side length, pixels). Values below 3
    /// disable blurring.
    pub median_aperture: u32,

    /// Canny edge detector low threshold. Pixels with gradient magnitude
    /// between `canny_low` and `canny_high` are edges only if connected
    /// to a strong edge.
    pub canny_low: f32,

    /// Canny edge detector high threshold. Pixels with gradient magnitude
    /// above this value are definite edges.
    pub canny_high: f32,

    /// Maximum allowed ratio of the longer to the shorter side of a
    /// contour's minimum-area bounding rectangle. Contours above this are
    /// too elongated to plausibly be disks.
    pub max_side_ratio: f64,

    /// Minimum bounding rectangle area in square pixels. Contours below
    /// this are treated as noise.
    pub min_rect_area: f64,

    /// High Canny threshold applied to the isolated contour mask inside
    /// the Hough transform (the low threshold is half this value).
    pub hough_edge_threshold: f32,

    /// Minimum accumulator votes for a circle center, and minimum edge
    /// support for its radius.
    pub hough_vote_threshold: u32,

    /// Smallest circle radius the transform reports. Zero means
    /// unconstrained.
    pub min_radius: u32,

    /// Largest circle radius the transform reports. Zero means
    /// unconstrained (bounded by the mask's larger side).
    pub max_radius: u32,
}

impl DetectorConfig {
    /// Default median blur aperture.
    pub const DEFAULT_MEDIAN_APERTURE: u32 = 11;
    /// Default Canny low threshold.
    pub const DEFAULT_CANNY_LOW: f32 = 50.0;
    /// Default Canny high threshold.
    pub const DEFAULT_CANNY_HIGH: f32 = 150.0;
    /// Default maximum bounding-rectangle side ratio.
    pub const DEFAULT_MAX_SIDE_RATIO: f64 = 2.0;
    /// Default minimum bounding-rectangle area.
    pub const DEFAULT_MIN_RECT_AREA: f64 = 500.0;
    /// Default Hough edge threshold.
    pub const DEFAULT_HOUGH_EDGE_THRESHOLD: f32 = 200.0;
    /// Default Hough accumulator vote threshold.
    pub const DEFAULT_HOUGH_VOTE_THRESHOLD: u32 = 20;
    /// Default minimum radius (unconstrained).
    pub const DEFAULT_MIN_RADIUS: u32 = 0;
    /// Default maximum radius (unconstrained).
    pub const DEFAULT_MAX_RADIUS: u32 = 0;
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            median_aperture: Self::DEFAULT_MEDIAN_APERTURE,
            canny_low: Self::DEFAULT_CANNY_LOW,
            canny_high: Self::DEFAULT_CANNY_HIGH,
            max_side_ratio: Self::DEFAULT_MAX_SIDE_RATIO,
            min_rect_area: Self::DEFAULT_MIN_RECT_AREA,
            hough_edge_threshold: Self::DEFAULT_HOUGH_EDGE_THRESHOLD,
            hough_vote_threshold: Self::DEFAULT_HOUGH_VOTE_THRESHOLD,
            min_radius: Self::DEFAULT_MIN_RADIUS,
            max_radius: Self::DEFAULT_MAX_RADIUS,
        }
    }
}

/// Errors that can occur during detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}

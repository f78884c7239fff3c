//! rondel-pipeline: circle detection pipeline (sans-IO).
//!
//! Detects circular shapes in a still image through:
//! grayscale -> median blur -> Canny edge detection -> outer contour
//! extraction -> geometric pre-filter -> per-contour Hough circle
//! confirmation.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. File reading, stdout
//! reporting, and window display live in the `rondel` CLI crate.

pub mod blur;
pub mod contour;
pub mod edge;
pub mod grayscale;
pub mod hough;
pub mod overlay;
pub mod rect;
pub mod types;

pub use types::{
    ConfirmedContour, Contour, DetectError, DetectedCircle, Detection, DetectorConfig, Dimensions,
    Point,
};

/// Run the full detection pipeline on raw image bytes.
///
/// Decodes the image (PNG, JPEG, BMP, WebP) and hands it to
/// [`detect_in`]. Callers that need the decoded image afterwards (for
/// the result overlay) should decode once via [`grayscale::decode`] and
/// call [`detect_in`] directly.
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`DetectError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn detect(image_bytes: &[u8], config: &DetectorConfig) -> Result<Detection, DetectError> {
    let rgba = grayscale::decode(image_bytes)?;
    Ok(detect_in(&rgba, config))
}

/// Run the detection pipeline on an already-decoded image.
///
/// # Pipeline steps
///
/// 1. Grayscale conversion (standard luminance weighting)
/// 2. Median blur (impulse noise suppression)
/// 3. Canny edge detection
/// 4. Outer contour extraction
/// 5. Geometric pre-filter (bounding rectangle shape and size)
/// 6. Per-contour circle confirmation (isolated-mask Hough transform)
///
/// A contour counts as one circle when confirmation returns at least
/// one detected arc, regardless of how many. Zero contours is a valid
/// zero-circle outcome, not an error.
#[must_use = "returns the detection result"]
pub fn detect_in(image: &types::RgbaImage, config: &DetectorConfig) -> Detection {
    let dimensions = Dimensions {
        width: image.width(),
        height: image.height(),
    };

    // 1. Grayscale conversion.
    let gray = grayscale::luma(image);

    // 2. Median blur.
    let blurred = blur::median_blur(&gray, config.median_aperture);

    // 3. Canny edge detection.
    let edges = edge::canny(&blurred, config.canny_low, config.canny_high);

    // 4. Outer contour extraction.
    let contours = contour::outer_contours(&edges);
    log::debug!("traced {} outer contours", contours.len());

    // 5. Geometric pre-filter.
    let candidates: Vec<Contour> = contours
        .into_iter()
        .filter(|c| rect::is_candidate(c, config))
        .collect();
    log::debug!("{} candidates after geometric pre-filter", candidates.len());

    // 6. Per-contour circle confirmation.
    let mut confirmed = Vec::new();
    for candidate in candidates {
        let circles = hough::confirm_circle(&candidate, dimensions, config);
        if !circles.is_empty() {
            confirmed.push(ConfirmedContour {
                contour: candidate,
                circles,
            });
        }
    }
    log::debug!("{} contours confirmed as circles", confirmed.len());

    Detection {
        confirmed,
        dimensions,
    }
}

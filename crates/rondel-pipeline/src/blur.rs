//! Median blur for impulse noise suppression before edge detection.
//!
//! Wraps [`imageproc::filter::median_filter`] with a square aperture.
//! A median filter removes small-scale (salt-and-pepper) noise while
//! preserving larger edges, which keeps the Canny stage from producing
//! spurious contours.

use image::GrayImage;

/// Apply a square median blur to a grayscale image.
///
/// `aperture` is the side length of the square window; the default
/// pipeline uses 11. Apertures below 3 return the image unchanged,
/// since a window of one pixel is the identity.
#[must_use = "returns the blurred image"]
pub fn median_blur(image: &GrayImage, aperture: u32) -> GrayImage {
    if aperture < 3 {
        return image.clone();
    }

    let radius = aperture / 2;
    imageproc::filter::median_filter(image, radius, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20x20 uniform gray image with a single bright impulse at (10, 10).
    fn salt_noise_image() -> GrayImage {
        let mut img = GrayImage::from_fn(20, 20, |_, _| image::Luma([100]));
        img.put_pixel(10, 10, image::Luma([255]));
        img
    }

    #[test]
    fn small_aperture_returns_identical_image() {
        let img = salt_noise_image();
        assert_eq!(img, median_blur(&img, 0));
        assert_eq!(img, median_blur(&img, 1));
        assert_eq!(img, median_blur(&img, 2));
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = GrayImage::new(17, 31);
        let blurred = median_blur(&img, 11);
        assert_eq!(blurred.width(), 17);
        assert_eq!(blurred.height(), 31);
    }

    #[test]
    fn removes_impulse_noise() {
        let img = salt_noise_image();
        let blurred = median_blur(&img, 3);
        assert_eq!(
            blurred.get_pixel(10, 10).0[0],
            100,
            "expected the impulse to be replaced by the neighborhood median",
        );
    }

    #[test]
    fn preserves_large_edges() {
        // Left half dark, right half bright. A median filter keeps the
        // regions flat away from the boundary.
        let img = GrayImage::from_fn(40, 40, |x, _y| {
            if x < 20 {
                image::Luma([30])
            } else {
                image::Luma([220])
            }
        });
        let blurred = median_blur(&img, 11);
        assert_eq!(blurred.get_pixel(5, 20).0[0], 30);
        assert_eq!(blurred.get_pixel(35, 20).0[0], 220);
    }

    #[test]
    fn uniform_image_unchanged() {
        let img = GrayImage::from_fn(15, 15, |_, _| image::Luma([128]));
        let blurred = median_blur(&img, 11);
        for pixel in blurred.pixels() {
            assert_eq!(pixel.0[0], 128);
        }
    }
}

//! Native window display for the annotated result.
//!
//! Blocks until the user presses a key or closes the window, matching
//! a look-then-dismiss workflow.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rondel_pipeline::types::RgbaImage;

/// Display an image in a window and block until dismissed.
///
/// Returns when the window is closed, Escape is pressed, or any other
/// key is pressed.
///
/// # Errors
///
/// Returns [`minifb::Error`] if the window cannot be created or the
/// framebuffer cannot be presented.
pub fn show(title: &str, image: &RgbaImage) -> Result<(), minifb::Error> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let buffer = pack_0rgb(image);

    let mut window = Window::new(title, width, height, WindowOptions::default())?;
    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
            break;
        }
        window.update_with_buffer(&buffer, width, height)?;
    }

    Ok(())
}

/// Pack RGBA pixels into the 0RGB u32 layout minifb expects.
fn pack_0rgb(image: &RgbaImage) -> Vec<u32> {
    image
        .pixels()
        .map(|p| {
            let [r, g, b, _] = p.0;
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondel_pipeline::types::RgbaImage;

    #[test]
    fn pack_drops_alpha_and_orders_channels() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([0x12, 0x34, 0x56, 0x78]));
        assert_eq!(pack_0rgb(&img), vec![0x0012_3456]);
    }

    #[test]
    fn pack_is_row_major() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));
        assert_eq!(pack_0rgb(&img), vec![0x00FF_0000, 0x0000_00FF]);
    }
}

//! Circle preview rendering
//!
//! Produces the "circle view" of a processed portrait: the centered square
//! of the image with everything outside the inscribed circle made
//! transparent, encoded as PNG.

use crate::{Error, Result};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn circle_mask_sync(image: DynamicImage) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let side = rgba.width().min(rgba.height());
    let left = (rgba.width() - side) / 2;
    let top = (rgba.height() - side) / 2;

    let radius = side as f64 / 2.0;
    let mut square = RgbaImage::new(side, side);
    for (x, y, pixel) in square.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - radius;
        let dy = y as f64 + 0.5 - radius;
        *pixel = if dx * dx + dy * dy <= radius * radius {
            *rgba.get_pixel(left + x, top + y)
        } else {
            Rgba([0, 0, 0, 0])
        };
    }

    let mut bytes = Vec::new();
    square.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Renders the circle preview of an encoded image (any format `image` decodes).
pub async fn render_circle_preview(image_data: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(image_data)?;

    tokio::task::spawn_blocking(move || circle_mask_sync(img))
        .await
        .map_err(|e| Error::Invariant(format!("Circle preview task join error: {}", e)))?
}

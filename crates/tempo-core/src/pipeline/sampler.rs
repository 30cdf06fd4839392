//! Circular ROI pixel extraction.

use crate::decoders::DecodedImage;
use crate::layout::RoiCircle;

/// One sampled pixel's RGB channels (alpha is never used by scoring).
pub type RgbSample = [u8; 3];

/// Minimum sampling radius in pixels. Guarantees a non-degenerate circle
/// even for very small configured radii.
pub(crate) const MIN_SAMPLE_RADIUS: i64 = 2;

/// Inward shrink applied to the nominal ROI radius, in pixels. Keeps the
/// sample clear of the well's printed outline and edge artifacts.
pub(crate) const EDGE_SHRINK: i64 = 2;

/// Extract all pixels inside a circular ROI.
///
/// Normalized coordinates map to pixel space as `floor(cx * width)`,
/// `floor(cy * height)` and `max(2, floor(r * width) - 2)`. Every pixel in
/// the bounding box (clipped to the grid) whose squared distance to the
/// center is within the radius is included.
///
/// An empty image, or a bounding box entirely outside the grid, yields an
/// empty sample set. That is a valid degenerate result, not an error.
pub fn sample_roi_pixels(image: &DecodedImage, roi: RoiCircle) -> Vec<RgbSample> {
    let mut pixels = Vec::new();

    if image.data.is_empty() || image.width == 0 || image.height == 0 {
        return pixels;
    }

    let width = image.width as i64;
    let height = image.height as i64;

    let center_x = (roi.cx * width as f64).floor() as i64;
    let center_y = (roi.cy * height as f64).floor() as i64;
    let radius = MIN_SAMPLE_RADIUS.max((roi.r * width as f64).floor() as i64 - EDGE_SHRINK);
    let radius_sq = radius * radius;

    let min_x = 0.max(center_x - radius);
    let max_x = (width - 1).min(center_x + radius);
    let min_y = 0.max(center_y - radius);
    let max_y = (height - 1).min(center_y + radius);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x - center_x;
            let dy = y - center_y;

            if dx * dx + dy * dy <= radius_sq {
                let idx = ((y * width + x) * 4) as usize;
                if idx + 2 < image.data.len() {
                    pixels.push([image.data[idx], image.data[idx + 1], image.data[idx + 2]]);
                }
            }
        }
    }

    pixels
}

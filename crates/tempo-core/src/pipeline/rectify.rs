//! Placeholder rectification: resize onto the canonical canvas.
//!
//! A production rectifier performs a true perspective warp of the
//! photographed chip; that is an external concern. This stage only scales
//! the image to the canonical 1500x1500 frame with nearest-neighbor
//! sampling so the normalized ROI table applies.

use crate::decoders::DecodedImage;
use crate::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Resize the image to the canonical canvas. Identity when already sized.
pub fn rectify(image: &DecodedImage) -> DecodedImage {
    let target_width = CANVAS_WIDTH;
    let target_height = CANVAS_HEIGHT;

    if image.width == target_width && image.height == target_height {
        return image.clone();
    }

    let scale_x = target_width as f64 / image.width as f64;
    let scale_y = target_height as f64 / image.height as f64;

    let mut data = vec![0u8; (target_width * target_height * 4) as usize];

    for y in 0..target_height {
        for x in 0..target_width {
            let src_x = (x as f64 / scale_x).floor() as u32;
            let src_y = (y as f64 / scale_y).floor() as u32;
            let src_idx = ((src_y * image.width + src_x) * 4) as usize;
            let dst_idx = ((y * target_width + x) * 4) as usize;

            if src_idx + 3 < image.data.len() {
                data[dst_idx] = image.data[src_idx];
                data[dst_idx + 1] = image.data[src_idx + 1];
                data[dst_idx + 2] = image.data[src_idx + 2];
                data[dst_idx + 3] = image.data[src_idx + 3];
            }
        }
    }

    DecodedImage {
        width: target_width,
        height: target_height,
        data,
        channels: 4,
    }
}

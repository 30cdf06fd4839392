//! Debug overlay rendering.
//!
//! Draws well markers on the rectified chip image so an analyst can verify
//! that the ROI layout lines up with the photographed wells. Consumes only
//! the core's debug payload; the numeric per-well values travel in the JSON
//! report rather than being rasterized into the image.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};
use tempo_core::decoders::DecodedImage;
use tempo_core::models::DebugPayload;

const MARKER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Stroke width of the marker circles, in pixels.
const MARKER_STROKE: i32 = 3;

/// Render the well markers onto the rectified image and write a PNG.
pub fn render_overlay<P: AsRef<Path>>(
    rectified: &DecodedImage,
    debug: &DebugPayload,
    path: P,
) -> Result<(), String> {
    let mut canvas = RgbaImage::from_raw(rectified.width, rectified.height, rectified.data.clone())
        .ok_or_else(|| "Rectified image buffer has unexpected length".to_string())?;

    for well in &debug.wells {
        let cx = well.center_x as i32;
        let cy = well.center_y as i32;

        // Concentric circles approximate a thick stroke
        for offset in 0..MARKER_STROKE {
            let radius = well.marker_radius as i32 + offset - MARKER_STROKE / 2;
            if radius > 0 {
                draw_hollow_circle_mut(&mut canvas, (cx, cy), radius, MARKER_COLOR);
            }
        }

        draw_cross_mut(&mut canvas, MARKER_COLOR, cx, cy);
    }

    canvas
        .save(path.as_ref())
        .map_err(|e| format!("Failed to write overlay image: {}", e))
}

//! Image decoders for chip photographs
//!
//! Decodes camera output (JPEG, PNG) into the RGBA pixel grid the analysis
//! pipeline consumes. The pipeline itself never touches files or formats.

use std::path::Path;

/// Decoded image data: an immutable rectangular grid of RGBA samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGBA data (u8, 0-255 range), row-major
    pub data: Vec<u8>,

    /// Number of channels (always 4 after decoding)
    pub channels: u8,
}

impl DecodedImage {
    /// Wrap an already-decoded RGBA buffer.
    ///
    /// Fails when the buffer length does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(format!(
                "RGBA buffer length {} does not match {}x{} image ({} bytes expected)",
                data.len(),
                width,
                height,
                expected
            ));
        }
        Ok(Self {
            width,
            height,
            data,
            channels: 4,
        })
    }
}

/// Decode an image from a file path.
///
/// All formats supported by the `image` crate are accepted; camera JPEGs and
/// PNG exports are the expected inputs.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    let path = path.as_ref();
    let dynamic = image::open(path)
        .map_err(|e| format!("Failed to decode image {}: {}", path.display(), e))?;

    let rgba = dynamic.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width,
        height,
        data: rgba.into_raw(),
        channels: 4,
    })
}

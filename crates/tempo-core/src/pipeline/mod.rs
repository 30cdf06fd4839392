//! Chip analysis pipeline
//!
//! Sequences the full run over a decoded chip photograph:
//! rectify -> sample+score all six wells -> validate -> normalize ->
//! classify the three pairs.
//!
//! This module is organized into submodules:
//! - `rectify`: placeholder resize onto the canonical canvas
//! - `sampler`: circular ROI pixel extraction
//! - `greenness`: per-well greenness scoring
//! - `validate`: structural-validity check
//! - `normalize`: cross-well score normalization
//! - `classify`: per-pair SNR and genotype call

mod classify;
mod greenness;
mod normalize;
mod rectify;
mod sampler;
mod validate;

#[cfg(test)]
mod tests;

// Re-export public items from submodules
pub use classify::classify_pair;
pub use greenness::score_samples;
pub use normalize::normalize_scores;
pub use rectify::rectify;
pub use sampler::{sample_roi_pixels, RgbSample};
pub use validate::validate_scores;

use rayon::prelude::*;

use crate::decoders::DecodedImage;
use crate::layout::{ChipLayout, RoiCircle};
use crate::models::{AnalysisReport, DebugPayload, WellDebug, WellId, WELL_PAIRS};
use crate::verbose_println;

/// Options for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// ROI layout to sample. Defaults to the calibrated chip layout.
    pub layout: ChipLayout,

    /// Attach the per-well diagnostic payload for external rendering.
    pub debug: bool,
}

/// Run the full analysis pipeline over a decoded chip photograph.
///
/// The six well scores are computed independently (fanned out over the rayon
/// pool); normalization is the barrier that needs all six. The only abort is
/// the structural-validity failure, surfaced as a descriptive message before
/// any pair results exist. The run is deterministic: identical input pixels
/// and layout produce bit-identical results.
pub fn analyze_image(
    image: &DecodedImage,
    options: &AnalyzeOptions,
) -> Result<AnalysisReport, String> {
    let rectified = rectify::rectify(image);
    verbose_println!(
        "[tempo] Rectified {}x{} -> {}x{}",
        image.width,
        image.height,
        rectified.width,
        rectified.height
    );

    // Sampling: six raw greenness scores, one per well.
    let mut scores = [0.0f64; 6];
    WellId::ALL
        .par_iter()
        .zip(scores.par_iter_mut())
        .for_each(|(well, slot)| {
            let samples = sampler::sample_roi_pixels(&rectified, options.layout.roi(*well));
            *slot = greenness::score_samples(&samples);
        });

    for (well, score) in WellId::ALL.iter().zip(scores.iter()) {
        let roi = options.layout.roi(*well);
        verbose_println!(
            "[tempo] {}: position ({:.1}%, {:.1}%), radius {:.1}%, greenness {:.6}",
            well,
            roi.cx * 100.0,
            roi.cy * 100.0,
            roi.r * 100.0,
            score
        );
    }

    // Validation: abort before normalization when the chip is not there.
    let outcome = validate::validate_scores(&scores);
    if !outcome.valid {
        return Err(outcome
            .message
            .unwrap_or_else(|| "Invalid image input".to_string()));
    }

    // Normalization: global rescale onto the shared display range.
    let normalized = normalize::normalize_scores(&scores);
    verbose_println!(
        "[tempo] Normalized scores: [{}]",
        normalized
            .iter()
            .map(|v| format!("{:.2}", v))
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Classification: one call per pair, in pair order.
    let groups = WELL_PAIRS
        .iter()
        .enumerate()
        .map(|(i, (snpv_well, wtv_well))| {
            let result = classify::classify_pair(
                i as u8 + 1,
                normalized[snpv_well.index()],
                normalized[wtv_well.index()],
            );
            verbose_println!(
                "[tempo] Group {}: SNPV={:.2} WTV={:.2} SNR={:.3} -> {}",
                result.group_number,
                result.snpv,
                result.wtv,
                result.snr,
                result.result
            );
            result
        })
        .collect();

    let debug = options
        .debug
        .then(|| build_debug_payload(&rectified, &options.layout, &scores, &normalized));

    Ok(AnalysisReport { groups, debug })
}

/// Assemble the per-well diagnostic payload for an external renderer.
///
/// Marker geometry uses the nominal ROI radius (floored at 10 px), not the
/// shrunk sampling radius, so the drawn circle traces the well outline.
fn build_debug_payload(
    rectified: &DecodedImage,
    layout: &ChipLayout,
    scores: &[f64; 6],
    normalized: &[f64; 6],
) -> DebugPayload {
    let wells = WellId::ALL
        .iter()
        .map(|well| {
            let roi = layout.roi(*well);
            WellDebug {
                well: *well,
                raw_score: scores[well.index()],
                normalized: normalized[well.index()],
                roi,
                center_x: marker_coord(roi.cx, rectified.width),
                center_y: marker_coord(roi.cy, rectified.height),
                marker_radius: marker_radius(roi, rectified.width),
            }
        })
        .collect();

    DebugPayload {
        canvas_width: rectified.width,
        canvas_height: rectified.height,
        wells,
    }
}

fn marker_coord(normalized: f64, extent: u32) -> u32 {
    (normalized * extent as f64).floor() as u32
}

fn marker_radius(roi: RoiCircle, width: u32) -> u32 {
    ((roi.r * width as f64).floor() as u32).max(10)
}

//! Per-well greenness scoring.
//!
//! Reduces a ROI's pixel samples to a single score in [0, 1]. The formula
//! blends three sub-metrics and applies a nonlinear response curve so that
//! strongly-green wells land near 1.0 and dark or non-green wells near 0.
//!
//! The weights, exponent, and scale factor below are empirically tuned
//! against reference chips. They are calibration constants, not free
//! parameters: changing any of them invalidates the classifier thresholds.

use super::sampler::RgbSample;

/// Guards the green-ratio division against a fully black pixel.
pub(crate) const GREEN_RATIO_EPS: f64 = 1e-6;

/// Weight of the averaged raw green channel value (0-255 scale).
const WEIGHT_INTENSITY: f64 = 0.6;

/// Weight of green dominance, `max(0, g - max(r, b))`.
const WEIGHT_DOMINANCE: f64 = 0.3;

/// Weight of the green ratio `g / (r + g + b)`, lifted onto the 0-255 scale.
const WEIGHT_RATIO: f64 = 0.1;

/// Exponent of the compression curve stretching dim-vs-bright differences.
const RESPONSE_EXPONENT: f64 = 0.5;

/// Scale applied after compression; together with the exponent this maps
/// bright green wells to ~100 and dark wells to ~2-5 on the display scale.
const RESPONSE_SCALE: f64 = 110.0;

/// Score a well's pixel samples.
///
/// An empty sample set scores exactly 0 by convention.
pub fn score_samples(samples: &[RgbSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sum_intensity = 0.0;
    let mut sum_dominance = 0.0;
    let mut sum_ratio = 0.0;

    for &[r, g, b] in samples {
        let (r, g, b) = (r as f64, g as f64, b as f64);

        sum_intensity += g;
        sum_dominance += (g - r.max(b)).max(0.0);
        sum_ratio += g / (r + g + b + GREEN_RATIO_EPS);
    }

    let count = samples.len() as f64;
    let avg_intensity = sum_intensity / count; // 0-255
    let avg_dominance = sum_dominance / count; // 0-255
    let avg_ratio = sum_ratio / count; // 0-1

    let combined = avg_intensity * WEIGHT_INTENSITY
        + avg_dominance * WEIGHT_DOMINANCE
        + avg_ratio * 255.0 * WEIGHT_RATIO;

    let normalized = combined / 255.0;
    let scaled = normalized.powf(RESPONSE_EXPONENT) * RESPONSE_SCALE;

    (scaled / 100.0).min(1.0)
}

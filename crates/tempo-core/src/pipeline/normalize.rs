//! Cross-well score normalization.
//!
//! Rescales the six raw greenness scores onto a shared display range. This
//! is a global transform: every well's output depends on the min/max across
//! all six wells of the same run, so a single well's displayed value is only
//! meaningful relative to the other five.

/// Raw-score spread below which relative normalization is meaningless.
pub(crate) const DEGENERATE_RANGE: f64 = 0.001;

/// Span and floor of the shared display range: [2, 100]. The floor keeps a
/// genuinely-present-but-weak well from displaying as exactly zero.
const DISPLAY_SPAN: f64 = 98.0;
const DISPLAY_FLOOR: f64 = 2.0;

/// Rescale the six raw scores onto the shared display range.
///
/// With measurable spread, scores map linearly onto [2, 100] (the observed
/// minimum lands on exactly 2, the maximum on exactly 100). When all six
/// scores are nearly identical, each is scaled directly by 100 instead;
/// stretching a near-zero spread would only amplify noise into a false
/// high/low distinction.
pub fn normalize_scores(scores: &[f64; 6]) -> [f64; 6] {
    let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let mut normalized = [0.0; 6];
    for (out, &score) in normalized.iter_mut().zip(scores.iter()) {
        *out = if range > DEGENERATE_RANGE {
            (score - min) / range * DISPLAY_SPAN + DISPLAY_FLOOR
        } else {
            score * 100.0
        };
    }

    normalized
}

//! Structural-validity check on the six raw well scores.

use crate::models::ValidationOutcome;

/// Scores at or below this level count as "no measurable signal".
pub(crate) const MIN_MEASURABLE_SIGNAL: f64 = 1e-5;

/// Decide whether the image plausibly depicts the expected chip.
///
/// Deliberately permissive: the check fails only when all six wells read as
/// zero signal. A partially implausible pattern still passes so an analyst
/// can inspect the raw output (via the debug overlay) and diagnose ROI
/// miscalibration instead of being blocked outright.
pub fn validate_scores(scores: &[f64; 6]) -> ValidationOutcome {
    let has_any_signal = scores.iter().any(|&s| s > MIN_MEASURABLE_SIGNAL);

    if has_any_signal {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid(
            "Image does not contain a valid 6-well chip structure: all wells measured as zero. \
             Check that the photo shows the chip and that the ROI layout matches the image.",
        )
    }
}

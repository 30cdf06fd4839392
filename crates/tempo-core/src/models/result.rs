//! Analysis result types: genotype calls, per-pair results, and the report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::RoiCircle;
use crate::models::WellId;

/// Genotype call for one well pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genotype {
    /// Mutant signal dominates (SNR > 2.0).
    #[serde(rename = "SNP")]
    Snp,

    /// Mixed signal (0.5 < SNR <= 2.0).
    Heterozygote,

    /// Wild-type signal dominates (SNR <= 0.5), or no measurable WTV.
    #[serde(rename = "WT")]
    Wt,
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Genotype::Snp => "SNP",
            Genotype::Heterozygote => "Heterozygote",
            Genotype::Wt => "WT",
        };
        write!(f, "{}", label)
    }
}

/// Classified result for one well pair.
///
/// `snpv` and `wtv` are the pair's normalized display scores (2 decimal
/// places); `snr` is their ratio on the 0-1 scale (3 decimal places). The
/// genotype call is made on full-precision values before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    /// Pair group number (1-3).
    pub group_number: u8,

    /// Normalized SNPV score, rounded for display.
    pub snpv: f64,

    /// Normalized WTV score, rounded for display.
    pub wtv: f64,

    /// Signal ratio SNPV/WTV, rounded for display.
    pub snr: f64,

    /// Genotype call for the pair.
    pub result: Genotype,
}

/// Outcome of the structural-validity check on the six raw well scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Per-well diagnostic values plus the pixel-space marker geometry an
/// external renderer needs to draw the well on the rectified image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellDebug {
    pub well: WellId,

    /// Raw greenness score in [0, 1].
    pub raw_score: f64,

    /// Normalized display score (shared [2, 100] or degenerate [0, 100] range).
    pub normalized: f64,

    /// ROI definition in normalized coordinates.
    pub roi: RoiCircle,

    /// Marker center on the rectified canvas, in pixels.
    pub center_x: u32,
    pub center_y: u32,

    /// Nominal marker radius in pixels (not the shrunk sampling radius).
    pub marker_radius: u32,
}

/// Diagnostic payload handed to a rendering collaborator when debug output is
/// requested. The core never draws pixels; it only supplies these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugPayload {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub wells: Vec<WellDebug>,
}

/// Final output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The three pair results, in pair order (1, 2, 3).
    pub groups: Vec<PairResult>,

    /// Present only when diagnostics were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugPayload>,
}

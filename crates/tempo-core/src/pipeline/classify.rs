//! Per-pair SNR computation and genotype classification.

use crate::models::{Genotype, PairResult};

/// SNR above this calls the pair SNP (strict `>`).
pub(crate) const SNR_SNP: f64 = 2.0;

/// SNR above this (and at most `SNR_SNP`) calls the pair Heterozygote
/// (strict `>`); at or below it the call is WT. The two thresholds are
/// symmetric in log-space around 1.0 and are fixed domain constants.
pub(crate) const SNR_HETEROZYGOTE: f64 = 0.5;

/// WTV values below this (on the 0-1 scale) are treated as zero signal;
/// the SNR is forced to 0 and the call is unconditionally WT.
pub(crate) const WTV_EPS: f64 = 1e-6;

/// Classify one well pair from its normalized scores.
///
/// The SNR is computed on the normalized values divided back to a 0-1 scale.
/// The thresholds are calibrated against this specific [2, 100] normalization,
/// so the order of operations (normalize, then ratio) must not change.
/// Classification uses full precision; the stored snpv/wtv/snr are rounded
/// afterwards for display (2, 2, and 3 decimal places).
pub fn classify_pair(group_number: u8, snpv_normalized: f64, wtv_normalized: f64) -> PairResult {
    let snpv = snpv_normalized / 100.0;
    let wtv = wtv_normalized / 100.0;

    let (snr, result) = if wtv < WTV_EPS {
        (0.0, Genotype::Wt)
    } else {
        let snr = snpv / wtv;
        let result = if snr > SNR_SNP {
            Genotype::Snp
        } else if snr > SNR_HETEROZYGOTE {
            Genotype::Heterozygote
        } else {
            Genotype::Wt
        };
        (snr, result)
    };

    PairResult {
        group_number,
        snpv: round_to(snpv_normalized, 2),
        wtv: round_to(wtv_normalized, 2),
        snr: round_to(snr, 3),
        result,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

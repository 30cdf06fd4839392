//! Tests for the analysis pipeline
//!
//! Unit tests per stage plus end-to-end runs over synthetic chip images.

use super::classify::classify_pair;
use super::greenness::score_samples;
use super::normalize::normalize_scores;
use super::rectify::rectify;
use super::sampler::sample_roi_pixels;
use super::validate::validate_scores;
use super::{analyze_image, AnalyzeOptions};
use crate::decoders::DecodedImage;
use crate::layout::{ChipLayout, RoiCircle, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::models::Genotype;

/// Create a test image filled with a uniform RGBA color
fn create_uniform_image(width: u32, height: u32, color: [u8; 4]) -> DecodedImage {
    let pixel_count = (width * height) as usize;
    let mut data = Vec::with_capacity(pixel_count * 4);
    for _ in 0..pixel_count {
        data.extend_from_slice(&color);
    }
    DecodedImage {
        width,
        height,
        data,
        channels: 4,
    }
}

/// Create a black canonical-canvas image
fn create_blank_canvas() -> DecodedImage {
    create_uniform_image(CANVAS_WIDTH, CANVAS_HEIGHT, [0, 0, 0, 255])
}

/// Paint a filled circle of `color` at a well's nominal ROI position.
/// Uses the nominal radius, which fully covers the shrunk sampling circle.
fn paint_well(image: &mut DecodedImage, roi: RoiCircle, color: [u8; 3]) {
    let width = image.width as i64;
    let height = image.height as i64;
    let center_x = (roi.cx * width as f64).floor() as i64;
    let center_y = (roi.cy * height as f64).floor() as i64;
    let radius = (roi.r * width as f64).floor() as i64;

    for y in (center_y - radius).max(0)..=(center_y + radius).min(height - 1) {
        for x in (center_x - radius).max(0)..=(center_x + radius).min(width - 1) {
            let dx = x - center_x;
            let dy = y - center_y;
            if dx * dx + dy * dy <= radius * radius {
                let idx = ((y * width + x) * 4) as usize;
                image.data[idx] = color[0];
                image.data[idx + 1] = color[1];
                image.data[idx + 2] = color[2];
            }
        }
    }
}

/// Canvas image with a specific color painted at each of the six wells.
fn create_chip_image(well_colors: [[u8; 3]; 6]) -> DecodedImage {
    let layout = ChipLayout::default();
    let mut image = create_blank_canvas();
    for (roi, color) in layout.rois().iter().zip(well_colors.iter()) {
        paint_well(&mut image, *roi, *color);
    }
    image
}

const BRIGHT_GREEN: [u8; 3] = [50, 220, 60];
const DIM_WELL: [u8; 3] = [30, 40, 35];

// ========================================================================
// Sampler Tests
// ========================================================================

#[test]
fn test_sample_empty_image_yields_no_pixels() {
    let image = DecodedImage {
        width: 0,
        height: 0,
        data: Vec::new(),
        channels: 4,
    };
    let samples = sample_roi_pixels(&image, RoiCircle::new(0.5, 0.5, 0.05));
    assert!(samples.is_empty());
}

#[test]
fn test_sample_roi_outside_grid_yields_no_pixels() {
    let image = create_uniform_image(50, 50, [10, 20, 30, 255]);
    // Center far beyond the grid; the clipped bounding box is empty
    let samples = sample_roi_pixels(&image, RoiCircle::new(5.0, 5.0, 0.05));
    assert!(samples.is_empty());
}

#[test]
fn test_sample_radius_floor_keeps_circle_non_degenerate() {
    let image = create_uniform_image(100, 100, [10, 20, 30, 255]);
    // Nominal radius would be 0; the floor forces radius 2
    let samples = sample_roi_pixels(&image, RoiCircle::new(0.5, 0.5, 0.001));
    // Lattice points with dx^2 + dy^2 <= 4
    assert_eq!(samples.len(), 13);
}

#[test]
fn test_sample_pixel_count_matches_disk() {
    let image = create_uniform_image(100, 100, [10, 20, 30, 255]);
    // radius = max(2, floor(0.1 * 100) - 2) = 8
    let samples = sample_roi_pixels(&image, RoiCircle::new(0.5, 0.5, 0.1));
    // Lattice points with dx^2 + dy^2 <= 64
    assert_eq!(samples.len(), 197);
    for s in &samples {
        assert_eq!(*s, [10, 20, 30]);
    }
}

#[test]
fn test_sample_clips_to_grid_bounds() {
    let image = create_uniform_image(100, 100, [10, 20, 30, 255]);
    let full = sample_roi_pixels(&image, RoiCircle::new(0.5, 0.5, 0.1));
    // Same circle centered on the corner: only the in-grid quadrant remains
    let corner = sample_roi_pixels(&image, RoiCircle::new(0.0, 0.0, 0.1));
    assert!(!corner.is_empty());
    assert!(corner.len() < full.len());
}

// ========================================================================
// Greenness Tests
// ========================================================================

#[test]
fn test_score_empty_samples_is_exactly_zero() {
    assert_eq!(score_samples(&[]), 0.0);
}

#[test]
fn test_score_black_samples_is_exactly_zero() {
    let samples = vec![[0u8, 0, 0]; 50];
    assert_eq!(score_samples(&samples), 0.0);
}

#[test]
fn test_score_stays_in_unit_range() {
    for color in [[255u8, 255, 255], [0, 255, 0], [255, 0, 255], [1, 2, 3]] {
        let score = score_samples(&vec![color; 20]);
        assert!(
            (0.0..=1.0).contains(&score),
            "score {} out of range for {:?}",
            score,
            color
        );
    }
}

#[test]
fn test_score_green_dominates_red() {
    let green = score_samples(&vec![[0u8, 200, 0]; 10]);
    let red = score_samples(&vec![[200u8, 0, 0]; 10]);
    assert!(green > red, "green {} should exceed red {}", green, red);
}

#[test]
fn test_score_monotonic_in_green_channel() {
    let dim = score_samples(&vec![[0u8, 50, 0]; 10]);
    let bright = score_samples(&vec![[0u8, 200, 0]; 10]);
    assert!(bright > dim);
}

#[test]
fn test_score_known_gray_value() {
    // Uniform gray (100, 100, 100): intensity 100, dominance 0, ratio 1/3.
    // combined = 60 + 0 + 8.5 = 68.5; sqrt(68.5/255) * 110 / 100 = 0.5701
    let score = score_samples(&vec![[100u8, 100, 100]; 25]);
    assert!(
        (score - 0.5701).abs() < 1e-3,
        "expected ~0.5701, got {}",
        score
    );
}

// ========================================================================
// Validator Tests
// ========================================================================

#[test]
fn test_validate_all_zero_is_invalid() {
    let outcome = validate_scores(&[0.0; 6]);
    assert!(!outcome.valid);
    assert!(outcome.message.unwrap().contains("6-well chip"));
}

#[test]
fn test_validate_threshold_is_strict() {
    // Exactly at the threshold still counts as no signal
    let outcome = validate_scores(&[1e-5; 6]);
    assert!(!outcome.valid);
}

#[test]
fn test_validate_single_faint_well_passes() {
    let outcome = validate_scores(&[0.0, 0.0, 0.0, 0.0, 2e-5, 0.0]);
    assert!(outcome.valid);
    assert!(outcome.message.is_none());
}

// ========================================================================
// Normalizer Tests
// ========================================================================

#[test]
fn test_normalize_endpoints_hit_display_range() {
    let normalized = normalize_scores(&[0.02, 0.95, 0.03, 0.90, 0.01, 0.88]);
    assert_eq!(normalized[4], 2.0, "minimum maps to exactly 2");
    assert_eq!(normalized[1], 100.0, "maximum maps to exactly 100");
}

#[test]
fn test_normalize_preserves_ordering() {
    let raw = [0.02, 0.95, 0.03, 0.90, 0.01, 0.88];
    let normalized = normalize_scores(&raw);
    for i in 0..6 {
        for j in 0..6 {
            if raw[i] > raw[j] {
                assert!(normalized[i] >= normalized[j]);
            }
        }
    }
}

#[test]
fn test_normalize_degenerate_spread_scales_directly() {
    let normalized = normalize_scores(&[0.5; 6]);
    for v in normalized {
        assert!((v - 50.0).abs() < 1e-12);
    }

    // Spread at the threshold (not above) also takes the direct branch
    let raw = [0.5, 0.5, 0.5, 0.5, 0.5, 0.501];
    let normalized = normalize_scores(&raw);
    for (n, r) in normalized.iter().zip(raw.iter()) {
        assert!((n - r * 100.0).abs() < 1e-12);
    }
}

// ========================================================================
// Classifier Tests
// ========================================================================

#[test]
fn test_classify_snr_above_two_is_snp() {
    let result = classify_pair(1, 100.0, 40.0);
    assert_eq!(result.result, Genotype::Snp);
    assert!((result.snr - 2.5).abs() < 1e-9);
}

#[test]
fn test_classify_boundary_snr_two_is_heterozygote() {
    // The SNP rule is strict: SNR == 2.0 stays Heterozygote
    let result = classify_pair(1, 100.0, 50.0);
    assert_eq!(result.result, Genotype::Heterozygote);
}

#[test]
fn test_classify_boundary_snr_half_is_wt() {
    // The Heterozygote rule is strict: SNR == 0.5 stays WT
    let result = classify_pair(1, 50.0, 100.0);
    assert_eq!(result.result, Genotype::Wt);
}

#[test]
fn test_classify_near_zero_wtv_forces_wt() {
    let result = classify_pair(2, 80.0, 0.0);
    assert_eq!(result.result, Genotype::Wt);
    assert_eq!(result.snr, 0.0);
}

#[test]
fn test_classify_monotonic_in_snpv() {
    // Increasing SNPV (WTV fixed) never moves the call back toward WT
    fn rank(g: Genotype) -> u8 {
        match g {
            Genotype::Wt => 0,
            Genotype::Heterozygote => 1,
            Genotype::Snp => 2,
        }
    }

    let mut last = 0;
    for snpv in 0..=200 {
        let result = classify_pair(1, snpv as f64, 50.0);
        let r = rank(result.result);
        assert!(r >= last, "rank dropped at snpv={}", snpv);
        last = r;
    }
}

#[test]
fn test_classify_rounds_after_calling() {
    // 33.333 / 66.666 = 0.500003...: displayed SNR rounds to 0.500, but the
    // call is made on full precision and stays Heterozygote
    let result = classify_pair(3, 33.333, 66.666);
    assert_eq!(result.result, Genotype::Heterozygote);
    assert_eq!(result.snr, 0.5);
    assert_eq!(result.snpv, 33.33);
    assert_eq!(result.wtv, 66.67);
}

#[test]
fn test_normalize_then_classify_is_global_but_calls_are_per_pair() {
    // Pair 1 has extreme spread; pairs 2 and 3 sit mid-range. Normalization
    // uses the global min/max while each pair is still called on its own.
    let normalized = normalize_scores(&[0.9, 0.02, 0.5, 0.4, 0.45, 0.5]);
    let g1 = classify_pair(1, normalized[0], normalized[1]);
    let g2 = classify_pair(2, normalized[2], normalized[3]);
    let g3 = classify_pair(3, normalized[4], normalized[5]);

    assert_eq!(g1.result, Genotype::Snp);
    assert!(g1.snr > 2.0);
    assert_eq!(g2.result, Genotype::Heterozygote);
    assert_eq!(g3.result, Genotype::Heterozygote);
}

// ========================================================================
// Rectify Tests
// ========================================================================

#[test]
fn test_rectify_identity_when_already_canonical() {
    let image = create_blank_canvas();
    let rectified = rectify(&image);
    assert_eq!(rectified, image);
}

#[test]
fn test_rectify_scales_to_canvas() {
    let image = create_uniform_image(10, 20, [7, 8, 9, 255]);
    let rectified = rectify(&image);
    assert_eq!(rectified.width, CANVAS_WIDTH);
    assert_eq!(rectified.height, CANVAS_HEIGHT);
    // Nearest-neighbor preserves a uniform fill exactly
    assert_eq!(&rectified.data[0..4], &[7, 8, 9, 255]);
    let last = rectified.data.len() - 4;
    assert_eq!(&rectified.data[last..], &[7, 8, 9, 255]);
}

// ========================================================================
// End-to-End Pipeline Tests
// ========================================================================

#[test]
fn test_analyze_blank_image_aborts_with_structural_error() {
    let image = create_blank_canvas();
    let err = analyze_image(&image, &AnalyzeOptions::default()).unwrap_err();
    assert!(err.contains("6-well chip"), "unexpected message: {}", err);
}

#[test]
fn test_analyze_clean_wt_chip() {
    // Wells 2, 4, 6 (WTV) bright green; wells 1, 3, 5 (SNPV) dim
    let image = create_chip_image([
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
    ]);

    let report = analyze_image(&image, &AnalyzeOptions::default()).unwrap();
    assert_eq!(report.groups.len(), 3);
    for (i, group) in report.groups.iter().enumerate() {
        assert_eq!(group.group_number as usize, i + 1);
        assert_eq!(group.result, Genotype::Wt);
        assert!(group.snr <= 0.5);
        assert!(group.snpv < group.wtv);
    }
    assert!(report.debug.is_none());
}

#[test]
fn test_analyze_snp_pair_amid_wt_pairs() {
    // Pair 1 inverted (SNPV bright, WTV dim); pairs 2 and 3 wild-type
    let image = create_chip_image([
        BRIGHT_GREEN,
        DIM_WELL,
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
    ]);

    let report = analyze_image(&image, &AnalyzeOptions::default()).unwrap();
    assert_eq!(report.groups[0].result, Genotype::Snp);
    assert!(report.groups[0].snr > 2.0);
    assert_eq!(report.groups[1].result, Genotype::Wt);
    assert_eq!(report.groups[2].result, Genotype::Wt);
}

#[test]
fn test_analyze_is_deterministic() {
    let image = create_chip_image([
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
    ]);
    let options = AnalyzeOptions::default();

    let first = analyze_image(&image, &options).unwrap();
    let second = analyze_image(&image, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_analyze_debug_payload_geometry() {
    let image = create_chip_image([
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
    ]);
    let options = AnalyzeOptions {
        debug: true,
        ..Default::default()
    };

    let report = analyze_image(&image, &options).unwrap();
    let debug = report.debug.expect("debug payload requested");
    assert_eq!(debug.canvas_width, CANVAS_WIDTH);
    assert_eq!(debug.canvas_height, CANVAS_HEIGHT);
    assert_eq!(debug.wells.len(), 6);

    // hole1 at (0.37, 0.29, r 0.05) on the 1500px canvas
    let hole1 = &debug.wells[0];
    assert_eq!(hole1.center_x, 555);
    assert_eq!(hole1.center_y, 435);
    assert_eq!(hole1.marker_radius, 75);
    assert!(hole1.raw_score > 0.0);
    assert!(hole1.normalized >= 2.0);
}

#[test]
fn test_analyze_resizes_small_photo_onto_canvas() {
    // Paint the chip at 300x300; analysis rectifies to 1500x1500 first.
    // Nearest-neighbor upscaling keeps the well fills uniform, so the
    // classifications match the full-size chip.
    let layout = ChipLayout::default();
    let mut image = create_uniform_image(300, 300, [0, 0, 0, 255]);
    let colors = [
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
        DIM_WELL,
        BRIGHT_GREEN,
    ];
    for (roi, color) in layout.rois().iter().zip(colors.iter()) {
        paint_well(&mut image, *roi, *color);
    }

    let report = analyze_image(&image, &AnalyzeOptions::default()).unwrap();
    for group in &report.groups {
        assert_eq!(group.result, Genotype::Wt);
    }
}

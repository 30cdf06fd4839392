//! Fixed chip geometry: the canonical canvas and the six calibrated well ROIs.
//!
//! The ROI table is a hand-calibrated constant of the chip hardware, marked up
//! once from a good reference photograph. It is never derived from the image
//! at runtime; well positions are a property of the chip, not of the photo.

use serde::{Deserialize, Serialize};

use crate::models::WellId;

/// Width of the canonical rectified canvas in pixels.
pub const CANVAS_WIDTH: u32 = 1500;

/// Height of the canonical rectified canvas in pixels.
pub const CANVAS_HEIGHT: u32 = 1500;

/// A circular region of interest in normalized image coordinates.
///
/// `cx` and `cy` are fractions of the image width and height respectively;
/// `r` is a fraction of the image width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiCircle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl RoiCircle {
    pub const fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }
}

/// The six-well ROI layout of a TEMPO chip.
///
/// The default values are the calibrated positions for the oval chip, with
/// wells numbered 1-6. Odd wells carry the SNPV stain, even wells the WTV
/// stain; (1,2), (3,4), (5,6) form pairs 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipLayout {
    pub hole1: RoiCircle,
    pub hole2: RoiCircle,
    pub hole3: RoiCircle,
    pub hole4: RoiCircle,
    pub hole5: RoiCircle,
    pub hole6: RoiCircle,
}

impl Default for ChipLayout {
    fn default() -> Self {
        Self {
            hole1: RoiCircle::new(0.37, 0.29, 0.05), // SNPV - top-left
            hole2: RoiCircle::new(0.64, 0.29, 0.05), // WTV  - top-right-center
            hole3: RoiCircle::new(0.25, 0.47, 0.05), // SNPV - middle-left
            hole4: RoiCircle::new(0.38, 0.71, 0.05), // WTV  - bottom-left
            hole5: RoiCircle::new(0.74, 0.48, 0.05), // SNPV - middle-right
            hole6: RoiCircle::new(0.60, 0.72, 0.05), // WTV  - bottom-right-center
        }
    }
}

impl ChipLayout {
    /// The ROI circle for a given well.
    pub fn roi(&self, well: WellId) -> RoiCircle {
        match well {
            WellId::Hole1 => self.hole1,
            WellId::Hole2 => self.hole2,
            WellId::Hole3 => self.hole3,
            WellId::Hole4 => self.hole4,
            WellId::Hole5 => self.hole5,
            WellId::Hole6 => self.hole6,
        }
    }

    /// All six ROIs in well order (1-6).
    pub fn rois(&self) -> [RoiCircle; 6] {
        [
            self.hole1, self.hole2, self.hole3, self.hole4, self.hole5, self.hole6,
        ]
    }

    /// Check the configuration-time geometry invariants.
    ///
    /// No two ROI circles may overlap: overlapping wells would double-count
    /// shared pixels across samples. Radii must also be positive and centers
    /// inside the unit square.
    pub fn validate(&self) -> Result<(), String> {
        let rois = self.rois();

        for (i, roi) in rois.iter().enumerate() {
            if roi.r <= 0.0 {
                return Err(format!("hole{} has non-positive radius {}", i + 1, roi.r));
            }
            if !(0.0..=1.0).contains(&roi.cx) || !(0.0..=1.0).contains(&roi.cy) {
                return Err(format!(
                    "hole{} center ({}, {}) outside normalized bounds",
                    i + 1,
                    roi.cx,
                    roi.cy
                ));
            }
        }

        // Pairwise overlap check on the canonical square canvas, where cx, cy
        // and r all share the same normalized scale.
        for i in 0..rois.len() {
            for j in (i + 1)..rois.len() {
                let dx = rois[i].cx - rois[j].cx;
                let dy = rois[i].cy - rois[j].cy;
                let min_dist = rois[i].r + rois[j].r;
                if dx * dx + dy * dy < min_dist * min_dist {
                    return Err(format!("hole{} and hole{} overlap", i + 1, j + 1));
                }
            }
        }

        Ok(())
    }
}

//! Well identity, stain roles, and the fixed pair map.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one of the six wells on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellId {
    Hole1,
    Hole2,
    Hole3,
    Hole4,
    Hole5,
    Hole6,
}

/// Stain role of a well. This mapping is a static invariant of the chip:
/// odd-numbered wells carry the mutant (SNPV) stain, even-numbered wells the
/// wild-type (WTV) stain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellRole {
    /// Mutant-allele stain well.
    Snpv,
    /// Wild-type stain well.
    Wtv,
}

/// The fixed well pairing: (SNPV well, WTV well) for pair groups 1-3.
pub const WELL_PAIRS: [(WellId, WellId); 3] = [
    (WellId::Hole1, WellId::Hole2),
    (WellId::Hole3, WellId::Hole4),
    (WellId::Hole5, WellId::Hole6),
];

impl WellId {
    /// All six wells in layout order.
    pub const ALL: [WellId; 6] = [
        WellId::Hole1,
        WellId::Hole2,
        WellId::Hole3,
        WellId::Hole4,
        WellId::Hole5,
        WellId::Hole6,
    ];

    /// 1-based well number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based position in layout order.
    pub fn index(self) -> usize {
        match self {
            WellId::Hole1 => 0,
            WellId::Hole2 => 1,
            WellId::Hole3 => 2,
            WellId::Hole4 => 3,
            WellId::Hole5 => 4,
            WellId::Hole6 => 5,
        }
    }

    /// Stain role of this well.
    pub fn role(self) -> WellRole {
        if self.number() % 2 == 1 {
            WellRole::Snpv
        } else {
            WellRole::Wtv
        }
    }

    /// 1-based pair group this well belongs to.
    pub fn pair_group(self) -> u8 {
        self.index() as u8 / 2 + 1
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hole{}", self.number())
    }
}

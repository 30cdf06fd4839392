//! Data models for the TEMPO analyzer
//!
//! Core data structures for wells, pair results, and analysis reports.

mod result;
mod well;

// Re-export all public types to maintain the existing public API
pub use result::{
    AnalysisReport, DebugPayload, Genotype, PairResult, ValidationOutcome, WellDebug,
};

pub use well::{WellId, WellRole, WELL_PAIRS};

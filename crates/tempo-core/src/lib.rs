//! TEMPO Core Library
//!
//! Core functionality for genotyping a photographed 6-well TEMPO assay chip.

pub mod config;
pub mod decoders;
pub mod layout;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use layout::{ChipLayout, RoiCircle, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use models::{
    AnalysisReport, DebugPayload, Genotype, PairResult, ValidationOutcome, WellDebug, WellId,
    WellRole,
};
pub use pipeline::{analyze_image, AnalyzeOptions};

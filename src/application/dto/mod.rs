/// Application-layer DTOs for presenting analysis results.
pub mod analysis_report;

pub use analysis_report::{AnalysisReport, VulnerabilityReport};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::Finding;

/// Aggregate emitted by one analysis pipeline run.
///
/// `vulnerabilities` holds exactly one finding per component (the worst
/// case after the per-component collapse), sorted by `hdfm_score`
/// descending. The weights map is keyed by metric name and sums to 1.0,
/// or equals the uniform degenerate map, or is empty when nothing was
/// scored.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub sbom_id: String,
    pub timestamp: DateTime<Utc>,
    pub total_components: usize,
    pub total_vulnerabilities: usize,
    pub critical_findings: usize,
    pub hub_components: usize,
    pub max_depth: usize,
    pub vulnerabilities: Vec<Finding>,
    pub entropy_weights: BTreeMap<String, f64>,
}

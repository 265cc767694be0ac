use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::domain::{AnalysisResult, Finding};

/// Output shape for one prioritized finding.
#[derive(Debug, Clone, Serialize)]
pub struct VulnerabilityReport {
    pub id: String,
    pub component: String,
    pub cvss_score: f64,
    pub hdfm_score: f64,
    pub priority: String,
    pub tcs: f64,
    pub epss: f64,
    pub kev: bool,
    pub description: String,
}

impl From<&Finding> for VulnerabilityReport {
    fn from(finding: &Finding) -> Self {
        Self {
            id: finding.id.clone(),
            component: finding.component_name.clone(),
            cvss_score: finding.cvss_score,
            hdfm_score: finding.hdfm_score,
            priority: finding.priority.as_str().to_string(),
            tcs: finding.tcs,
            epss: finding.epss,
            kev: finding.kev,
            description: finding.description.clone(),
        }
    }
}

/// Serializable analysis report handed to formatters and presenters.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub sbom_id: String,
    pub timestamp: String,
    pub total_components: usize,
    pub total_vulnerabilities: usize,
    pub critical_findings: usize,
    pub hub_components: usize,
    pub max_depth: usize,
    pub vulnerabilities: Vec<VulnerabilityReport>,
    pub entropy_weights: BTreeMap<String, f64>,
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            sbom_id: result.sbom_id.clone(),
            timestamp: result.timestamp.to_rfc3339(),
            total_components: result.total_components,
            total_vulnerabilities: result.total_vulnerabilities,
            critical_findings: result.critical_findings,
            hub_components: result.hub_components,
            max_depth: result.max_depth,
            vulnerabilities: result.vulnerabilities.iter().map(Into::into).collect(),
            entropy_weights: result.entropy_weights.clone(),
        }
    }
}

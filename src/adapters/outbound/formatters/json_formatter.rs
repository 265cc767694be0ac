use crate::application::dto::AnalysisReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Renders the analysis report as pretty-printed JSON.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_format_emits_valid_json() {
        let report = AnalysisReport {
            sbom_id: "sbom-1".to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            total_components: 1,
            total_vulnerabilities: 1,
            critical_findings: 0,
            hub_components: 0,
            max_depth: 0,
            vulnerabilities: Vec::new(),
            entropy_weights: BTreeMap::new(),
        };
        let output = JsonFormatter::new().format(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["sbom_id"], "sbom-1");
        assert_eq!(parsed["total_components"], 1);
    }
}

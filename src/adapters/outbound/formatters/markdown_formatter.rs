use std::fmt::Write as _;

use crate::application::dto::AnalysisReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Renders the analysis report as a human-readable Markdown document:
/// a summary block followed by the prioritized findings table.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "# SBOM Triage Report")?;
        writeln!(out)?;
        writeln!(out, "- SBOM: `{}`", report.sbom_id)?;
        writeln!(out, "- Analyzed: {}", report.timestamp)?;
        writeln!(out, "- Components: {}", report.total_components)?;
        writeln!(out, "- Findings: {}", report.total_vulnerabilities)?;
        writeln!(out, "- Critical: {}", report.critical_findings)?;
        writeln!(out, "- Hub components: {}", report.hub_components)?;
        writeln!(out, "- Max dependency depth: {}", report.max_depth)?;
        writeln!(out)?;

        if !report.entropy_weights.is_empty() {
            let weights = report
                .entropy_weights
                .iter()
                .map(|(name, weight)| format!("{} {:.3}", name, weight))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "Metric weights: {}", weights)?;
            writeln!(out)?;
        }

        writeln!(out, "## Prioritized Findings")?;
        writeln!(out)?;
        writeln!(
            out,
            "| ID | Component | CVSS | HDFM Score | Priority | TCS | KEV |"
        )?;
        writeln!(out, "|----|-----------|------|------------|----------|-----|-----|")?;

        for vuln in &report.vulnerabilities {
            writeln!(
                out,
                "| {} | {} | {:.1} | {:.3} | {} | {:.3} | {} |",
                vuln.id,
                vuln.component,
                vuln.cvss_score,
                vuln.hdfm_score,
                vuln.priority,
                vuln.tcs,
                if vuln.kev { "YES" } else { "no" }
            )?;
        }

        Ok(out)
    }
}

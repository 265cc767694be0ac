use crate::application::dto::AnalysisReport;
use crate::shared::Result;

/// ReportFormatter port for rendering an analysis report.
pub trait ReportFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String>;
}

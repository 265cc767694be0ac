/// Outbound ports (driven ports) - infrastructure interfaces.
///
/// These ports define the interfaces the application core uses to reach
/// external systems (vulnerability databases, registries, threat feeds,
/// persistence, console).
pub mod analysis_repository;
pub mod graph_analyzer;
pub mod metadata_provider;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod threat_intelligence;
pub mod vulnerability_lookup;

pub use analysis_repository::{AnalysisRepository, SbomSummary, StoredSbom};
pub use graph_analyzer::GraphAnalyzer;
pub use metadata_provider::{ComponentMetadata, MetadataProvider};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use threat_intelligence::ThreatIntelligence;
pub use vulnerability_lookup::VulnerabilityLookup;

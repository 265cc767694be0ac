//! sbom-triage - vulnerability prioritization for CycloneDX SBOMs
//!
//! This library ingests a Software Bill of Materials, hydrates it from
//! external vulnerability, registry, and threat-intelligence sources,
//! and ranks the findings with a hybrid decision-fusion score that
//! combines CVSS severity, dependency-graph criticality, attack-vector
//! exposure, and real-world exploitability signals.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`analysis`): entities, the CycloneDX normalizer,
//!   and the pure scoring services
//! - **Application Layer** (`application`): use cases and report DTOs
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_triage::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let sbom: serde_json::Value = serde_json::from_str("{...}")?;
//!
//! // Create adapters
//! let osv = OsvClient::new("https://api.osv.dev/v1")?;
//! let registry = DepsDevClient::new("https://api.deps.dev/v3alpha")?;
//! let intel = ThreatIntelClient::new(
//!     "https://api.first.org/data/v1/epss",
//!     "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json",
//! )?;
//! let repository = InMemoryAnalysisRepository::new();
//!
//! // Compose the pipeline
//! let ingest = IngestSbomUseCase::new(osv, registry, StderrProgressReporter::hidden());
//! let prioritize =
//!     PrioritizeAnalysisUseCase::new(AdjacencyGraphAnalyzer::new(), intel, repository);
//!
//! let (components, dependencies) = ingest.execute(&sbom).await?;
//! let result = prioritize.execute("sbom-1", components, &dependencies).await?;
//! println!("{} critical findings", result.critical_findings);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analysis;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FilePresenter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::graph::AdjacencyGraphAnalyzer;
    pub use crate::adapters::outbound::network::{DepsDevClient, OsvClient, ThreatIntelClient};
    pub use crate::adapters::outbound::persistence::InMemoryAnalysisRepository;
    pub use crate::analysis::domain::{
        AnalysisResult, Component, DependencyRecord, Finding, PackageUrl, Priority,
    };
    pub use crate::analysis::services::{HdfmModel, MaintenanceRisk};
    pub use crate::application::dto::{AnalysisReport, VulnerabilityReport};
    pub use crate::application::use_cases::{IngestSbomUseCase, PrioritizeAnalysisUseCase};
    pub use crate::ports::outbound::{
        AnalysisRepository, ComponentMetadata, GraphAnalyzer, MetadataProvider, OutputPresenter,
        ProgressReporter, ReportFormatter, SbomSummary, StoredSbom, ThreatIntelligence,
        VulnerabilityLookup,
    };
    pub use crate::shared::{AnalysisError, Result};
}

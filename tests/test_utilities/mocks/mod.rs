mod mock_metadata_provider;
mod mock_progress_reporter;
mod mock_threat_intelligence;
mod mock_vulnerability_lookup;

pub use mock_metadata_provider::MockMetadataProvider;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_threat_intelligence::MockThreatIntelligence;
pub use mock_vulnerability_lookup::MockVulnerabilityLookup;

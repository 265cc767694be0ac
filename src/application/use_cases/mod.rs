/// Application use cases orchestrating domain services through ports.
pub mod ingest_sbom;
pub mod prioritize;

pub use ingest_sbom::IngestSbomUseCase;
pub use prioritize::PrioritizeAnalysisUseCase;

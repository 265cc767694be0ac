use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::analysis::domain::AnalysisResult;
use crate::shared::Result;

/// A raw SBOM document as persisted, with its display metadata.
#[derive(Debug, Clone)]
pub struct StoredSbom {
    pub id: String,
    pub name: String,
    pub version: String,
    pub source: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

/// Listing row for stored SBOMs.
#[derive(Debug, Clone)]
pub struct SbomSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// AnalysisRepository port: write-through persistence for raw SBOMs and
/// analysis snapshots. The core only consumes this interface; results
/// handed to it are treated as immutable.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Persists a raw SBOM document and returns its generated id.
    async fn save_sbom(&self, sbom_data: &Value, source: &str) -> Result<String>;

    /// Retrieves a stored SBOM by id.
    async fn get_sbom(&self, sbom_id: &str) -> Result<Option<StoredSbom>>;

    /// Lists recently stored SBOMs, newest first.
    async fn list_sboms(&self, limit: usize) -> Result<Vec<SbomSummary>>;

    /// Appends an analysis snapshot for an SBOM.
    async fn save_analysis(&self, sbom_id: &str, result: &AnalysisResult) -> Result<()>;

    /// Most recent analysis for an SBOM, if any.
    async fn get_latest_analysis(&self, sbom_id: &str) -> Result<Option<AnalysisResult>>;

    /// All analyses for an SBOM, timestamp descending.
    async fn get_all_analyses(&self, sbom_id: &str) -> Result<Vec<AnalysisResult>>;
}

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::domain::cyclonedx;
use crate::analysis::domain::AnalysisResult;
use crate::ports::outbound::{AnalysisRepository, SbomSummary, StoredSbom};
use crate::shared::Result;

/// In-memory write-through repository for raw SBOMs and analysis
/// snapshots.
///
/// Snapshots append in arrival order, which is also timestamp order
/// within a process, so "latest" is the last appended entry.
pub struct InMemoryAnalysisRepository {
    sboms: DashMap<String, StoredSbom>,
    analyses: DashMap<String, Vec<AnalysisResult>>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self {
            sboms: DashMap::new(),
            analyses: DashMap::new(),
        }
    }
}

impl Default for InMemoryAnalysisRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn save_sbom(&self, sbom_data: &Value, source: &str) -> Result<String> {
        let sbom_id = format!("sbom-{}", Uuid::new_v4());
        let (name, version) = cyclonedx::display_metadata(sbom_data);

        self.sboms.insert(
            sbom_id.clone(),
            StoredSbom {
                id: sbom_id.clone(),
                name,
                version,
                source: source.to_string(),
                data: sbom_data.clone(),
                created_at: Utc::now(),
            },
        );

        Ok(sbom_id)
    }

    async fn get_sbom(&self, sbom_id: &str) -> Result<Option<StoredSbom>> {
        Ok(self.sboms.get(sbom_id).map(|entry| entry.clone()))
    }

    async fn list_sboms(&self, limit: usize) -> Result<Vec<SbomSummary>> {
        let mut summaries: Vec<SbomSummary> = self
            .sboms
            .iter()
            .map(|entry| SbomSummary {
                id: entry.id.clone(),
                name: entry.name.clone(),
                version: entry.version.clone(),
                source: entry.source.clone(),
                created_at: entry.created_at,
            })
            .collect();

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(limit);
        Ok(summaries)
    }

    async fn save_analysis(&self, sbom_id: &str, result: &AnalysisResult) -> Result<()> {
        self.analyses
            .entry(sbom_id.to_string())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    async fn get_latest_analysis(&self, sbom_id: &str) -> Result<Option<AnalysisResult>> {
        Ok(self
            .analyses
            .get(sbom_id)
            .and_then(|entries| entries.last().cloned()))
    }

    async fn get_all_analyses(&self, sbom_id: &str) -> Result<Vec<AnalysisResult>> {
        Ok(self
            .analyses
            .get(sbom_id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}

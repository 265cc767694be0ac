use chrono::Utc;
use serde_json::Value;

use crate::analysis::domain::cyclonedx;
use crate::analysis::domain::{Component, DependencyRecord};
use crate::analysis::services::MaintenanceRisk;
use crate::ports::outbound::{MetadataProvider, ProgressReporter, VulnerabilityLookup};
use crate::shared::Result;

/// IngestSbomUseCase - parses a CycloneDX document and hydrates its
/// components from the vulnerability and registry ports.
///
/// Inline findings shipped inside the SBOM win over database findings
/// with the same id. Port failures are recovered locally: the affected
/// components keep going with no external data and the pipeline
/// continues.
pub struct IngestSbomUseCase<L, M, P>
where
    L: VulnerabilityLookup,
    M: MetadataProvider,
    P: ProgressReporter,
{
    vulnerability_lookup: L,
    metadata_provider: M,
    progress_reporter: P,
}

impl<L, M, P> IngestSbomUseCase<L, M, P>
where
    L: VulnerabilityLookup,
    M: MetadataProvider,
    P: ProgressReporter,
{
    pub fn new(vulnerability_lookup: L, metadata_provider: M, progress_reporter: P) -> Self {
        Self {
            vulnerability_lookup,
            metadata_provider,
            progress_reporter,
        }
    }

    /// Parses and hydrates an SBOM into components plus the dependency
    /// edge list.
    pub async fn execute(
        &self,
        sbom_data: &Value,
    ) -> Result<(Vec<Component>, Vec<DependencyRecord>)> {
        let (mut components, dependencies) = cyclonedx::normalize(sbom_data)?;

        self.progress_reporter.report(&format!(
            "Scanning {} components via vulnerability database...",
            components.len()
        ));

        let mut osv_results = match self
            .vulnerability_lookup
            .batch_lookup_by_purl(&components)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("vulnerability lookup unavailable: {}", e);
                self.progress_reporter
                    .report_error("Vulnerability lookup unavailable; continuing without it");
                Default::default()
            }
        };

        for component in &mut components {
            if let Some(osv_findings) = osv_results.remove(&component.bom_ref) {
                let existing_ids: std::collections::HashSet<String> = component
                    .vulnerabilities
                    .iter()
                    .map(|v| v.id.clone())
                    .collect();

                for finding in osv_findings {
                    if !existing_ids.contains(&finding.id) {
                        component.vulnerabilities.push(finding);
                    }
                }
            }
        }

        let total_findings: usize = components.iter().map(|c| c.vulnerabilities.len()).sum();
        let affected = components
            .iter()
            .filter(|c| !c.vulnerabilities.is_empty())
            .count();
        tracing::debug!(
            "found {} findings across {}/{} components",
            total_findings,
            affected,
            components.len()
        );

        self.progress_reporter
            .report("Checking maintenance status via package registry...");

        let metadata = match self.metadata_provider.get_metadata(&components).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("metadata provider unavailable: {}", e);
                Default::default()
            }
        };

        let now = Utc::now();
        for component in &mut components {
            if let Some(meta) = metadata.get(&component.bom_ref) {
                component.published_at = meta.published_at;
                component.is_deprecated = meta.is_deprecated;
                component.maintenance_risk_score =
                    MaintenanceRisk::score(meta.is_deprecated, meta.published_at, now);
            }
        }

        Ok((components, dependencies))
    }
}

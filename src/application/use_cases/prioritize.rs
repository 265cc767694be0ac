use std::collections::HashSet;

use chrono::Utc;

use crate::analysis::domain::{AnalysisResult, Component, DependencyRecord, Finding, Priority};
use crate::analysis::services::HdfmModel;
use crate::ports::outbound::{AnalysisRepository, GraphAnalyzer, ThreatIntelligence};
use crate::shared::{AnalysisError, Result};

/// PrioritizeAnalysisUseCase - the scoring orchestrator.
///
/// Runs the fusion pipeline over hydrated components in a fixed order:
/// graph criticality first, then per-finding enrichment, then entropy
/// weights and the population baseline, then raw scores, the
/// per-component collapse, and finally distribution-aware priority
/// assignment. The finished result is written through the repository
/// and returned.
pub struct PrioritizeAnalysisUseCase<G, T, R>
where
    G: GraphAnalyzer,
    T: ThreatIntelligence,
    R: AnalysisRepository,
{
    graph_analyzer: G,
    threat_intel: T,
    repository: R,
}

impl<G, T, R> PrioritizeAnalysisUseCase<G, T, R>
where
    G: GraphAnalyzer,
    T: ThreatIntelligence,
    R: AnalysisRepository,
{
    pub fn new(graph_analyzer: G, threat_intel: T, repository: R) -> Self {
        Self {
            graph_analyzer,
            threat_intel,
            repository,
        }
    }

    pub async fn execute(
        &self,
        sbom_id: &str,
        components: Vec<Component>,
        dependencies: &[DependencyRecord],
    ) -> Result<AnalysisResult> {
        let total_components = components.len();

        let tcs_scores = self
            .graph_analyzer
            .topological_criticality(&components, dependencies);
        let hub_components = tcs_scores.values().filter(|s| **s > 0.7).count();
        let max_depth = self.graph_analyzer.max_depth(dependencies);

        let known_refs: HashSet<&str> = components.iter().map(|c| c.bom_ref.as_str()).collect();
        for component in &components {
            for finding in &component.vulnerabilities {
                if !known_refs.contains(finding.component_ref.as_str()) {
                    return Err(AnalysisError::internal(
                        "enrichment",
                        Some(finding.id.clone()),
                        format!(
                            "finding references unknown component '{}'",
                            finding.component_ref
                        ),
                    )
                    .into());
                }
            }
        }

        // Enrichment: threat intelligence is consulted exactly once per
        // finding. Components with nothing on file surface through a
        // zero-scored placeholder.
        let mut all_vulns: Vec<Finding> = Vec::new();
        for component in components {
            if component.vulnerabilities.is_empty() {
                all_vulns.push(Finding::placeholder(&component));
                continue;
            }

            let component_tcs = tcs_scores
                .get(component.bom_ref.as_str())
                .copied()
                .unwrap_or(0.0);

            for mut vuln in component.vulnerabilities {
                vuln.tcs = component_tcs;
                vuln.vei = HdfmModel::calculate_vei(&vuln.cvss_vector);
                vuln.epss = self.threat_intel.get_epss_score(&vuln.id).await;
                vuln.kev = self.threat_intel.is_kev(&vuln.id).await;
                vuln.exploitability = HdfmModel::exploitability_fusion(vuln.epss, vuln.kev);
                all_vulns.push(vuln);
            }
        }

        if all_vulns.is_empty() {
            let result = AnalysisResult {
                sbom_id: sbom_id.to_string(),
                timestamp: Utc::now(),
                total_components,
                total_vulnerabilities: 0,
                critical_findings: 0,
                hub_components,
                max_depth,
                vulnerabilities: Vec::new(),
                entropy_weights: Default::default(),
            };
            self.persist(sbom_id, &result).await;
            return Ok(result);
        }

        let scoring = HdfmModel::derive_weights(&all_vulns);
        tracing::debug!(
            "entropy weights {:?}, epss baseline {:.4}",
            scoring.weights,
            scoring.epss_baseline
        );

        for vuln in &mut all_vulns {
            vuln.hdfm_score = HdfmModel::calculate_hdfm_score(vuln, &scoring.weights);
        }

        let mut all_vulns = HdfmModel::collapse_worst_per_component(all_vulns);
        HdfmModel::sort_by_score_desc(&mut all_vulns);
        HdfmModel::assign_priorities(&mut all_vulns);

        let critical_findings = all_vulns
            .iter()
            .filter(|v| v.priority == Priority::Critical)
            .count();

        let result = AnalysisResult {
            sbom_id: sbom_id.to_string(),
            timestamp: Utc::now(),
            total_components,
            total_vulnerabilities: all_vulns.len(),
            critical_findings,
            hub_components,
            max_depth,
            vulnerabilities: all_vulns,
            entropy_weights: scoring.weights,
        };

        self.persist(sbom_id, &result).await;
        Ok(result)
    }

    /// Write-through persistence. A failing repository does not void the
    /// analysis; the caller still receives the result and its sbom_id.
    async fn persist(&self, sbom_id: &str, result: &AnalysisResult) {
        if let Err(e) = self.repository.save_analysis(sbom_id, result).await {
            tracing::warn!("failed to persist analysis for {}: {}", sbom_id, e);
        }
    }
}

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::analysis::domain::{Component, Finding};
use crate::analysis::services::HdfmModel;
use crate::ports::outbound::VulnerabilityLookup;
use crate::shared::Result;

/// OSV batch-query client.
///
/// Queries the `/querybatch` endpoint by PURL in chunks, hydrates slim
/// records that lack aliases via individual `/vulns/{id}` lookups, and
/// collapses alias-connected records into one finding per equivalence
/// class. Individual record lookups are cached by id for the lifetime
/// of the process.
pub struct OsvClient {
    client: reqwest::Client,
    base_url: String,
    cache: DashMap<String, OsvRecord>,
}

impl OsvClient {
    const BATCH_TIMEOUT: Duration = Duration::from_secs(30);
    const SINGLE_TIMEOUT: Duration = Duration::from_secs(10);
    const MAX_BATCH_SIZE: usize = 1000;
    const HYDRATION_CONCURRENCY: usize = 8;

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("sbom-triage/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cache: DashMap::new(),
        })
    }

    /// Fetches the full record for a vulnerability id, consulting the
    /// process-lifetime cache first.
    async fn lookup_vulnerability(&self, vuln_id: &str) -> Option<OsvRecord> {
        if let Some(cached) = self.cache.get(vuln_id) {
            return Some(cached.clone());
        }

        let url = format!("{}/vulns/{}", self.base_url, vuln_id);
        let response = match self
            .client
            .get(&url)
            .timeout(Self::SINGLE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("OSV lookup for {} failed: {}", vuln_id, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "OSV lookup for {} returned status {}",
                vuln_id,
                response.status()
            );
            return None;
        }

        match response.json::<OsvRecord>().await {
            Ok(record) => {
                // Concurrent writers converge on the same upstream value.
                self.cache.insert(vuln_id.to_string(), record.clone());
                Some(record)
            }
            Err(e) => {
                tracing::warn!("OSV record for {} could not be parsed: {}", vuln_id, e);
                None
            }
        }
    }

    /// Hydrates slim batch records missing aliases via individual
    /// lookups, preserving record order.
    async fn hydrate(&self, records: Vec<OsvRecord>) -> Vec<OsvRecord> {
        stream::iter(records)
            .map(|record| async move {
                if record.aliases.is_empty() {
                    match self.lookup_vulnerability(&record.id).await {
                        Some(full) => full,
                        None => record,
                    }
                } else {
                    record
                }
            })
            .buffered(Self::HYDRATION_CONCURRENCY)
            .collect()
            .await
    }
}

#[async_trait]
impl VulnerabilityLookup for OsvClient {
    async fn batch_lookup_by_purl(
        &self,
        components: &[Component],
    ) -> Result<HashMap<String, Vec<Finding>>> {
        let targets: Vec<&Component> = components.iter().filter(|c| c.purl.is_some()).collect();
        if targets.is_empty() {
            return Ok(HashMap::new());
        }

        let mut all_results = HashMap::new();

        for chunk in targets.chunks(Self::MAX_BATCH_SIZE) {
            let queries: Vec<OsvQuery> = chunk
                .iter()
                .map(|c| OsvQuery {
                    package: OsvQueryPackage {
                        purl: c.purl.clone().unwrap_or_default(),
                    },
                })
                .collect();

            let response = match self
                .client
                .post(format!("{}/querybatch", self.base_url))
                .timeout(Self::BATCH_TIMEOUT)
                .json(&OsvBatchQuery { queries })
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("OSV batch query failed: {}", e);
                    continue;
                }
            };

            if !response.status().is_success() {
                tracing::warn!("OSV batch query returned status {}", response.status());
                continue;
            }

            let batch: OsvBatchResponse = match response.json().await {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!("OSV batch response could not be parsed: {}", e);
                    continue;
                }
            };

            for (component, result) in chunk.iter().copied().zip(batch.results) {
                if result.vulns.is_empty() {
                    continue;
                }

                let hydrated = self.hydrate(result.vulns).await;
                let findings = dedupe_into_findings(hydrated, component);
                if !findings.is_empty() {
                    all_results.insert(component.bom_ref.clone(), findings);
                }
            }
        }

        Ok(all_results)
    }
}

// OSV wire structures

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvQueryPackage,
}

#[derive(Debug, Serialize)]
struct OsvQueryPackage {
    purl: String,
}

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    #[serde(default)]
    results: Vec<OsvBatchResult>,
}

#[derive(Debug, Deserialize)]
struct OsvBatchResult {
    #[serde(default)]
    vulns: Vec<OsvRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct OsvRecord {
    id: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    severity: Option<Vec<OsvSeverity>>,
    #[serde(default)]
    database_specific: Option<OsvDatabaseSpecific>,
}

#[derive(Debug, Clone, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String,
    score: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OsvDatabaseSpecific {
    #[serde(default)]
    severity: Option<String>,
}

/// Collapses records into alias-connected equivalence classes and
/// converts each class representative into a finding.
///
/// Two records belong to the same class when one's id appears among the
/// other's aliases or their alias sets intersect, transitively.
fn dedupe_into_findings(records: Vec<OsvRecord>, component: &Component) -> Vec<Finding> {
    let mut groups: Vec<(HashSet<String>, Vec<OsvRecord>)> = Vec::new();

    for record in records {
        let mut ids: HashSet<String> = record.aliases.iter().cloned().collect();
        ids.insert(record.id.clone());

        let hits: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, (group_ids, _))| !group_ids.is_disjoint(&ids))
            .map(|(i, _)| i)
            .collect();

        match hits.split_first() {
            None => groups.push((ids, vec![record])),
            Some((&first, bridged)) => {
                // A record can connect previously separate groups; fold
                // them into the first hit, back to front so the indexes
                // stay valid.
                for &i in bridged.iter().rev() {
                    let (merged_ids, merged_records) = groups.remove(i);
                    groups[first].0.extend(merged_ids);
                    groups[first].1.extend(merged_records);
                }
                groups[first].0.extend(ids);
                groups[first].1.push(record);
            }
        }
    }

    groups
        .into_iter()
        .map(|(ids, records)| convert_group(&ids, &records, component))
        .collect()
}

/// Picks the class representative (CVE > GHSA > first-seen) and builds
/// the finding, preserving the remaining class ids as aliases.
fn convert_group(class_ids: &HashSet<String>, records: &[OsvRecord], component: &Component) -> Finding {
    let representative = records
        .iter()
        .find(|r| r.id.starts_with("CVE-"))
        .or_else(|| records.iter().find(|r| r.id.starts_with("GHSA-")))
        .unwrap_or(&records[0]);

    let mut id = representative.id.clone();
    if !id.starts_with("CVE-") {
        if let Some(cve) = representative
            .aliases
            .iter()
            .find(|a| a.starts_with("CVE-"))
        {
            id = cve.clone();
        }
    }

    let mut aliases: Vec<String> = class_ids.iter().filter(|a| **a != id).cloned().collect();
    aliases.sort();

    let (cvss_score, cvss_vector) = extract_cvss(representative);

    let description = representative
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(representative
            .details
            .as_deref()
            .filter(|s| !s.is_empty()))
        .unwrap_or("No description available");

    Finding::new(
        id,
        component.bom_ref.clone(),
        component.name.clone(),
        cvss_score,
        cvss_vector,
        description,
    )
    .with_aliases(aliases)
}

/// CVSS extraction ladder: a `CVSS_V3*` severity entry whose score is a
/// vector string wins (score synthesized from the vector); otherwise
/// the database-specific severity label maps to a coarse score.
fn extract_cvss(record: &OsvRecord) -> (f64, String) {
    let mut cvss_score = 0.0;
    let mut cvss_vector = String::new();

    if let Some(severities) = &record.severity {
        for item in severities {
            if item.severity_type.to_uppercase().contains("CVSS_V3") {
                if item.score.starts_with("CVSS:") {
                    cvss_vector = item.score.clone();
                    cvss_score = HdfmModel::cvss_from_vector(&item.score);
                }
                break;
            }
        }
    }

    if cvss_score == 0.0 {
        if let Some(label) = record
            .database_specific
            .as_ref()
            .and_then(|db| db.severity.as_deref())
        {
            cvss_score = severity_label_score(label);
        }
    }

    (cvss_score, cvss_vector)
}

fn severity_label_score(label: &str) -> f64 {
    match label.to_uppercase().as_str() {
        "CRITICAL" => 9.5,
        "HIGH" => 7.5,
        "MODERATE" | "MEDIUM" => 5.0,
        "LOW" => 2.5,
        _ => 0.0,
    }
}

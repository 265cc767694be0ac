use std::collections::HashSet;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;

use crate::ports::outbound::ThreatIntelligence;
use crate::shared::{AnalysisError, Result};

/// Threat intelligence client backed by the FIRST EPSS API and the CISA
/// known-exploited-vulnerabilities catalog.
///
/// The KEV set is a read-mostly snapshot refreshed by `sync_data`;
/// readers always observe either the old or the new set, never a
/// partial one, and a failed refresh keeps the previous snapshot. EPSS
/// scores are cached per CVE for the lifetime of the process.
pub struct ThreatIntelClient {
    client: reqwest::Client,
    epss_base_url: String,
    kev_catalog_url: String,
    kev_cache: RwLock<HashSet<String>>,
    epss_cache: DashMap<String, f64>,
}

impl ThreatIntelClient {
    const EPSS_TIMEOUT: Duration = Duration::from_secs(5);
    const KEV_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(epss_base_url: impl Into<String>, kev_catalog_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("sbom-triage/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            epss_base_url: epss_base_url.into(),
            kev_catalog_url: kev_catalog_url.into(),
            kev_cache: RwLock::new(HashSet::new()),
            epss_cache: DashMap::new(),
        })
    }

    async fn fetch_epss(&self, cve_id: &str) -> Option<f64> {
        let url = format!("{}?cve={}", self.epss_base_url, cve_id);

        let response = match self.client.get(&url).timeout(Self::EPSS_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("EPSS lookup for {} failed: {}", cve_id, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "EPSS lookup for {} returned status {}",
                cve_id,
                response.status()
            );
            return None;
        }

        match response.json::<EpssResponse>().await {
            Ok(payload) => parse_epss_payload(&payload),
            Err(e) => {
                tracing::warn!("EPSS response for {} could not be parsed: {}", cve_id, e);
                None
            }
        }
    }
}

#[async_trait]
impl ThreatIntelligence for ThreatIntelClient {
    async fn get_epss_score(&self, cve_id: &str) -> f64 {
        if !cve_id.starts_with("CVE-") {
            return 0.0;
        }

        if let Some(cached) = self.epss_cache.get(cve_id) {
            return *cached;
        }

        match self.fetch_epss(cve_id).await {
            Some(score) => {
                self.epss_cache.insert(cve_id.to_string(), score);
                score
            }
            // Transient failures are not cached so a later analysis can
            // still pick the score up.
            None => 0.0,
        }
    }

    async fn is_kev(&self, cve_id: &str) -> bool {
        self.kev_cache
            .read()
            .map(|set| set.contains(cve_id))
            .unwrap_or(false)
    }

    async fn sync_data(&self) -> Result<()> {
        let unavailable = |details: String| AnalysisError::ExternalUnavailable {
            source_name: "kev".to_string(),
            details,
        };

        let response = self
            .client
            .get(&self.kev_catalog_url)
            .timeout(Self::KEV_TIMEOUT)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("status {}", response.status())).into());
        }

        let catalog: KevCatalog = response
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed catalog: {}", e)))?;

        let fresh = kev_ids_from_catalog(&catalog);
        tracing::debug!("KEV catalog refreshed: {} entries", fresh.len());

        // Whole-set swap: readers see the old or the new snapshot.
        if let Ok(mut cache) = self.kev_cache.write() {
            *cache = fresh;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct EpssResponse {
    #[serde(default)]
    data: Vec<EpssEntry>,
}

#[derive(Debug, Deserialize)]
struct EpssEntry {
    /// The API serves the probability as a decimal string.
    #[serde(default)]
    epss: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KevCatalog {
    #[serde(default)]
    vulnerabilities: Vec<KevEntry>,
}

#[derive(Debug, Deserialize)]
struct KevEntry {
    #[serde(rename = "cveID", default)]
    cve_id: Option<String>,
}

fn parse_epss_payload(payload: &EpssResponse) -> Option<f64> {
    payload
        .data
        .first()
        .and_then(|entry| entry.epss.as_deref())
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .map(|score| score.clamp(0.0, 1.0))
}

fn kev_ids_from_catalog(catalog: &KevCatalog) -> HashSet<String> {
    catalog
        .vulnerabilities
        .iter()
        .filter_map(|entry| entry.cve_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ThreatIntelClient {
        ThreatIntelClient::new(
            "https://api.first.org/data/v1/epss",
            "https://www.cisa.gov/feeds/known_exploited_vulnerabilities.json",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_cve_id_scores_zero_without_lookup() {
        let client = client();
        assert_eq!(client.get_epss_score("GHSA-xxxx-yyyy-zzzz").await, 0.0);
        assert_eq!(client.get_epss_score("HEALTHY").await, 0.0);
    }

    #[tokio::test]
    async fn test_kev_membership_reads_snapshot() {
        let client = client();
        assert!(!client.is_kev("CVE-2021-44228").await);

        client
            .kev_cache
            .write()
            .unwrap()
            .insert("CVE-2021-44228".to_string());
        assert!(client.is_kev("CVE-2021-44228").await);
        assert!(!client.is_kev("CVE-2024-0001").await);
    }

    #[tokio::test]
    async fn test_cached_epss_score_short_circuits() {
        let client = client();
        client.epss_cache.insert("CVE-2022-28346".to_string(), 0.97);
        assert_eq!(client.get_epss_score("CVE-2022-28346").await, 0.97);
    }

    #[test]
    fn test_parse_epss_payload() {
        let payload: EpssResponse = serde_json::from_str(
            r#"{"data": [{"cve": "CVE-2022-28346", "epss": "0.973210000", "percentile": "0.999"}]}"#,
        )
        .unwrap();
        let score = parse_epss_payload(&payload).unwrap();
        assert!((score - 0.97321).abs() < 1e-9);
    }

    #[test]
    fn test_parse_epss_payload_empty_or_invalid() {
        let payload: EpssResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parse_epss_payload(&payload).is_none());

        let payload: EpssResponse =
            serde_json::from_str(r#"{"data": [{"epss": "not-a-number"}]}"#).unwrap();
        assert!(parse_epss_payload(&payload).is_none());
    }

    #[test]
    fn test_parse_epss_payload_clamps_range() {
        let payload: EpssResponse =
            serde_json::from_str(r#"{"data": [{"epss": "1.5"}]}"#).unwrap();
        assert_eq!(parse_epss_payload(&payload), Some(1.0));
    }

    #[test]
    fn test_kev_ids_from_catalog() {
        let catalog: KevCatalog = serde_json::from_str(
            r#"{
                "title": "CISA Catalog of Known Exploited Vulnerabilities",
                "vulnerabilities": [
                    {"cveID": "CVE-2021-44228", "vendorProject": "Apache"},
                    {"cveID": "CVE-2022-28346"},
                    {"vendorProject": "missing id"}
                ]
            }"#,
        )
        .unwrap();
        let ids = kev_ids_from_catalog(&catalog);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("CVE-2021-44228"));
        assert!(ids.contains("CVE-2022-28346"));
    }
}

use async_trait::async_trait;

use crate::shared::Result;

/// ThreatIntelligence port for exploitability signals.
///
/// The orchestrator calls `get_epss_score` and `is_kev` exactly once per
/// finding per analysis; any caching or retry policy lives below this
/// seam.
#[async_trait]
pub trait ThreatIntelligence: Send + Sync {
    /// EPSS exploitation probability in [0.0, 1.0].
    ///
    /// Returns 0.0 for non-CVE identifiers and on any failure.
    async fn get_epss_score(&self, cve_id: &str) -> f64;

    /// Whether the id is in the known-exploited-vulnerabilities catalog.
    async fn is_kev(&self, cve_id: &str) -> bool;

    /// Refreshes the local KEV snapshot from the upstream catalog.
    ///
    /// On failure the previously cached snapshot is retained; the set
    /// must never fail open to empty.
    async fn sync_data(&self) -> Result<()>;
}

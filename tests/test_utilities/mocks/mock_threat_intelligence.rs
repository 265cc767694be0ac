use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sbom_triage::prelude::*;

/// Mock threat intelligence with frozen EPSS scores and KEV membership.
///
/// EPSS lookups are counted per id so tests can verify the orchestrator
/// consults the port exactly once per finding.
#[derive(Clone, Default)]
pub struct MockThreatIntelligence {
    epss: HashMap<String, f64>,
    kev: HashSet<String>,
    epss_calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockThreatIntelligence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epss(mut self, cve_id: &str, score: f64) -> Self {
        self.epss.insert(cve_id.to_string(), score);
        self
    }

    pub fn with_kev(mut self, cve_id: &str) -> Self {
        self.kev.insert(cve_id.to_string());
        self
    }

    pub fn epss_call_count(&self, cve_id: &str) -> usize {
        self.epss_calls
            .lock()
            .unwrap()
            .get(cve_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ThreatIntelligence for MockThreatIntelligence {
    async fn get_epss_score(&self, cve_id: &str) -> f64 {
        *self
            .epss_calls
            .lock()
            .unwrap()
            .entry(cve_id.to_string())
            .or_insert(0) += 1;
        self.epss.get(cve_id).copied().unwrap_or(0.0)
    }

    async fn is_kev(&self, cve_id: &str) -> bool {
        self.kev.contains(cve_id)
    }

    async fn sync_data(&self) -> Result<()> {
        Ok(())
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use sbom_triage::prelude::*;

/// Mock vulnerability lookup returning a frozen per-component result map.
#[derive(Clone, Default)]
pub struct MockVulnerabilityLookup {
    results: HashMap<String, Vec<Finding>>,
    fail: bool,
}

impl MockVulnerabilityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_findings(mut self, bom_ref: &str, findings: Vec<Finding>) -> Self {
        self.results.insert(bom_ref.to_string(), findings);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            results: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl VulnerabilityLookup for MockVulnerabilityLookup {
    async fn batch_lookup_by_purl(
        &self,
        _components: &[Component],
    ) -> Result<HashMap<String, Vec<Finding>>> {
        if self.fail {
            anyhow::bail!("mock lookup failure");
        }
        Ok(self.results.clone())
    }
}

use std::collections::HashMap;

use async_trait::async_trait;

use crate::analysis::domain::{Component, Finding};
use crate::shared::Result;

/// VulnerabilityLookup port for batch vulnerability database queries.
///
/// Given components carrying package URLs, implementations return a
/// de-duplicated set of findings keyed by `bom_ref`. Components without
/// a PURL are skipped. Failures for a subset of components must not
/// abort the map; affected components simply receive no entries.
#[async_trait]
pub trait VulnerabilityLookup: Send + Sync {
    /// Looks up vulnerabilities for every component with a PURL.
    ///
    /// # Returns
    /// Map of `bom_ref` to the component's de-duplicated findings.
    /// Components with no known vulnerabilities are absent from the map.
    async fn batch_lookup_by_purl(
        &self,
        components: &[Component],
    ) -> Result<HashMap<String, Vec<Finding>>>;
}

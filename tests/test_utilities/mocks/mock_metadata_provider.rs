use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sbom_triage::prelude::*;

/// Mock registry metadata provider with a frozen result map.
#[derive(Clone, Default)]
pub struct MockMetadataProvider {
    results: HashMap<String, ComponentMetadata>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(
        mut self,
        bom_ref: &str,
        published_at: Option<DateTime<Utc>>,
        is_deprecated: bool,
    ) -> Self {
        self.results.insert(
            bom_ref.to_string(),
            ComponentMetadata {
                published_at,
                is_deprecated,
            },
        );
        self
    }
}

#[async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn get_metadata(
        &self,
        _components: &[Component],
    ) -> Result<HashMap<String, ComponentMetadata>> {
        Ok(self.results.clone())
    }
}

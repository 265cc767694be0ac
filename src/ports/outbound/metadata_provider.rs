use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analysis::domain::Component;
use crate::shared::Result;

/// Registry metadata for one component version.
#[derive(Debug, Clone, Default)]
pub struct ComponentMetadata {
    pub published_at: Option<DateTime<Utc>>,
    pub is_deprecated: bool,
}

/// MetadataProvider port for component registry lookups (publication
/// timestamps and deprecation flags).
///
/// Components without a PURL, or whose PURL type the backing registry
/// does not cover, are silently skipped. Individual lookup failures
/// must not abort the map.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetches metadata keyed by `bom_ref` for every resolvable component.
    async fn get_metadata(
        &self,
        components: &[Component],
    ) -> Result<HashMap<String, ComponentMetadata>>;
}

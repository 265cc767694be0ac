use chrono::{DateTime, Utc};

use super::Finding;

/// A component extracted from a CycloneDX SBOM.
///
/// `bom_ref` is unique across components of a single analysis. The PURL
/// is optional; components without one are excluded from external
/// hydration but still participate in graph analysis and the final
/// report.
#[derive(Debug, Clone)]
pub struct Component {
    pub bom_ref: String,
    pub name: String,
    pub version: String,
    pub purl: Option<String>,
    /// CycloneDX dependency scope ("required", "optional", "excluded").
    pub scope: Option<String>,
    pub vulnerabilities: Vec<Finding>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_deprecated: bool,
    /// Derived during ingestion from deprecation and release age, in [0, 1].
    pub maintenance_risk_score: f64,
}

impl Component {
    pub fn new(
        bom_ref: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        purl: Option<String>,
    ) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            name: name.into(),
            version: version.into(),
            purl,
            scope: None,
            vulnerabilities: Vec::new(),
            published_at: None,
            is_deprecated: false,
            maintenance_risk_score: 0.0,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }
}

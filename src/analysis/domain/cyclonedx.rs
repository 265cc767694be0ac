//! CycloneDX 1.4 JSON normalization.
//!
//! Validates the document shape and extracts the ordered component set
//! plus the dependency edge list. Inline `vulnerabilities[]` entries are
//! retained as pre-seeded findings; they take precedence over database
//! lookups for the same id during hydration.

use serde::Deserialize;
use serde_json::Value;

use crate::analysis::domain::coerce::coerce_f64;
use crate::analysis::domain::{Component, DependencyRecord, Finding};
use crate::shared::{AnalysisError, Result};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    components: Vec<RawComponent>,
    #[serde(default)]
    dependencies: Vec<DependencyRecord>,
}

#[derive(Debug, Deserialize)]
struct RawComponent {
    #[serde(rename = "bom-ref", default)]
    bom_ref: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    purl: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    vulnerabilities: Vec<RawVulnerability>,
}

#[derive(Debug, Deserialize)]
struct RawVulnerability {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    ratings: Vec<RawRating>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRating {
    /// Accepted as a number or a numeric string.
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    vector: Option<String>,
}

/// Parses a CycloneDX document into components and dependency records.
///
/// Fails with [`AnalysisError::InvalidSbom`] when the document cannot be
/// deserialized or the `components` array is absent or empty. Components
/// without any usable identifier (`bom-ref`, `purl` or `name`) are
/// skipped.
pub fn normalize(document: &Value) -> Result<(Vec<Component>, Vec<DependencyRecord>)> {
    let raw: RawDocument = serde_json::from_value(document.clone())
        .map_err(|e| AnalysisError::invalid_sbom(format!("malformed CycloneDX document: {}", e)))?;

    if raw.components.is_empty() {
        return Err(AnalysisError::invalid_sbom("SBOM must contain components").into());
    }

    let mut components = Vec::with_capacity(raw.components.len());

    for comp_data in raw.components {
        let bom_ref = comp_data
            .bom_ref
            .clone()
            .or_else(|| comp_data.purl.clone())
            .or_else(|| comp_data.name.clone());

        let bom_ref = match bom_ref {
            Some(r) => r,
            None => continue,
        };

        let name = comp_data.name.unwrap_or_else(|| "Unknown".to_string());
        let version = comp_data.version.unwrap_or_else(|| "Unknown".to_string());

        let mut component = Component::new(bom_ref.clone(), name.clone(), version, comp_data.purl)
            .with_scope(comp_data.scope);

        for vuln_data in comp_data.vulnerabilities {
            let id = vuln_data.id.unwrap_or_else(|| "UNKNOWN".to_string());
            let (score, vector) = match vuln_data.ratings.first() {
                Some(rating) => (
                    rating.score.as_ref().map(coerce_f64).unwrap_or(0.0),
                    rating.vector.clone().unwrap_or_default(),
                ),
                None => (0.0, String::new()),
            };
            let description = vuln_data
                .description
                .unwrap_or_else(|| "No description".to_string());

            component.vulnerabilities.push(Finding::new(
                id,
                bom_ref.clone(),
                name.clone(),
                score,
                vector,
                &description,
            ));
        }

        components.push(component);
    }

    if components.is_empty() {
        return Err(
            AnalysisError::invalid_sbom("no component carries a usable identifier").into(),
        );
    }

    Ok((components, raw.dependencies))
}

/// Extracts the display name and version from `metadata.component`,
/// falling back to "Unknown" for stored SBOM listings.
pub fn display_metadata(document: &Value) -> (String, String) {
    let name = document
        .pointer("/metadata/component/name")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();
    let version = document
        .pointer("/metadata/component/version")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();
    (name, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_sbom() -> Value {
        json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.4",
            "components": [
                {
                    "bom-ref": "pkg:npm/axios@0.21.1",
                    "name": "axios",
                    "version": "0.21.1",
                    "purl": "pkg:npm/axios@0.21.1"
                }
            ],
            "dependencies": [
                {"ref": "root-app", "dependsOn": ["pkg:npm/axios@0.21.1"]}
            ]
        })
    }

    #[test]
    fn test_normalize_minimal_document() {
        let (components, dependencies) = normalize(&minimal_sbom()).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].bom_ref, "pkg:npm/axios@0.21.1");
        assert_eq!(components[0].name, "axios");
        assert_eq!(dependencies.len(), 1);
        assert_eq!(dependencies[0].bom_ref, "root-app");
        assert_eq!(dependencies[0].depends_on, vec!["pkg:npm/axios@0.21.1"]);
    }

    #[test]
    fn test_normalize_rejects_missing_components() {
        let doc = json!({"bomFormat": "CycloneDX", "dependencies": []});
        let err = normalize(&doc).unwrap_err();
        let analysis_err = err.downcast_ref::<AnalysisError>().unwrap();
        assert!(matches!(analysis_err, AnalysisError::InvalidSbom { .. }));
    }

    #[test]
    fn test_normalize_rejects_empty_components() {
        let doc = json!({"components": []});
        assert!(normalize(&doc).is_err());
    }

    #[test]
    fn test_bom_ref_falls_back_to_purl_then_name() {
        let doc = json!({
            "components": [
                {"name": "left-pad", "version": "1.3.0", "purl": "pkg:npm/left-pad@1.3.0"},
                {"name": "tiny-lib", "version": "0.1.0"},
                {"version": "9.9.9"}
            ]
        });
        let (components, _) = normalize(&doc).unwrap();
        // The identifier-less third component is skipped.
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].bom_ref, "pkg:npm/left-pad@1.3.0");
        assert_eq!(components[1].bom_ref, "tiny-lib");
    }

    #[test]
    fn test_inline_vulnerabilities_are_preseeded() {
        let doc = json!({
            "components": [
                {
                    "bom-ref": "log4j",
                    "name": "log4j-core",
                    "version": "2.14.1",
                    "vulnerabilities": [{
                        "id": "CVE-2021-44228",
                        "ratings": [{"score": 10.0, "vector": "CVSS:3.1/AV:N/AC:L"}],
                        "description": "Log4Shell RCE"
                    }]
                }
            ]
        })
        ;
        let (components, _) = normalize(&doc).unwrap();
        let finding = &components[0].vulnerabilities[0];
        assert_eq!(finding.id, "CVE-2021-44228");
        assert_eq!(finding.cvss_score, 10.0);
        assert_eq!(finding.cvss_vector, "CVSS:3.1/AV:N/AC:L");
        assert!((finding.severity - 1.0).abs() < 1e-9);
        assert_eq!(finding.description, "Log4Shell RCE");
    }

    #[test]
    fn test_inline_vulnerability_with_string_score() {
        let doc = json!({
            "components": [
                {
                    "bom-ref": "a",
                    "name": "a",
                    "version": "1",
                    "vulnerabilities": [{
                        "id": "CVE-2024-0001",
                        "ratings": [{"score": "7.5"}]
                    }]
                }
            ]
        });
        let (components, _) = normalize(&doc).unwrap();
        let finding = &components[0].vulnerabilities[0];
        assert_eq!(finding.cvss_score, 7.5);
        assert_eq!(finding.cvss_vector, "");
        assert_eq!(finding.description, "No description");
    }

    #[test]
    fn test_inline_vulnerability_without_ratings() {
        let doc = json!({
            "components": [
                {
                    "bom-ref": "a",
                    "name": "a",
                    "version": "1",
                    "vulnerabilities": [{"id": "CVE-2024-0002"}]
                }
            ]
        });
        let (components, _) = normalize(&doc).unwrap();
        assert_eq!(components[0].vulnerabilities[0].cvss_score, 0.0);
    }

    #[test]
    fn test_scope_is_carried() {
        let doc = json!({
            "components": [
                {"bom-ref": "a", "name": "a", "version": "1", "scope": "excluded"}
            ]
        });
        let (components, _) = normalize(&doc).unwrap();
        assert_eq!(components[0].scope.as_deref(), Some("excluded"));
    }

    #[test]
    fn test_missing_dependencies_defaults_empty() {
        let doc = json!({
            "components": [{"bom-ref": "a", "name": "a", "version": "1"}]
        });
        let (_, dependencies) = normalize(&doc).unwrap();
        assert!(dependencies.is_empty());
    }

    #[test]
    fn test_display_metadata() {
        let doc = json!({
            "metadata": {"component": {"name": "demo-app", "version": "1.0.0"}},
            "components": [{"bom-ref": "a", "name": "a", "version": "1"}]
        });
        let (name, version) = display_metadata(&doc);
        assert_eq!(name, "demo-app");
        assert_eq!(version, "1.0.0");
    }

    #[test]
    fn test_display_metadata_missing() {
        let (name, version) = display_metadata(&json!({}));
        assert_eq!(name, "Unknown");
        assert_eq!(version, "Unknown");
    }
}

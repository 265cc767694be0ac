use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Deserialize;

use crate::analysis::domain::coerce::coerce_bool;
use crate::analysis::domain::{Component, PackageUrl};
use crate::ports::outbound::{ComponentMetadata, MetadataProvider};
use crate::shared::Result;

/// Package systems the Deps.dev API covers.
const SUPPORTED_SYSTEMS: [&str; 6] = ["npm", "pypi", "maven", "go", "cargo", "nuget"];

/// Deps.dev registry client for publication timestamps and deprecation
/// flags.
///
/// The API has no batch endpoint, so versions are fetched individually
/// with bounded concurrency. Components without a PURL or outside the
/// supported systems are silently skipped, and individual failures
/// never abort the map.
pub struct DepsDevClient {
    client: reqwest::Client,
    base_url: String,
}

impl DepsDevClient {
    const TIMEOUT: Duration = Duration::from_secs(2);
    const CONCURRENCY: usize = 16;

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("sbom-triage/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn version_url(&self, purl: &PackageUrl) -> String {
        format!(
            "{}/systems/{}/packages/{}/versions/{}",
            self.base_url,
            purl.package_type,
            urlencoding::encode(&purl.name),
            purl.version
        )
    }

    async fn fetch_version(
        client: &reqwest::Client,
        url: &str,
        component_name: &str,
    ) -> Option<ComponentMetadata> {
        let response = match client.get(url).timeout(Self::TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Deps.dev lookup for {} failed: {}", component_name, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                "Deps.dev lookup for {} returned status {}",
                component_name,
                response.status()
            );
            return None;
        }

        match response.json::<DepsDevVersion>().await {
            Ok(version) => Some(version.into_metadata()),
            Err(e) => {
                tracing::warn!(
                    "Deps.dev response for {} could not be parsed: {}",
                    component_name,
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl MetadataProvider for DepsDevClient {
    async fn get_metadata(
        &self,
        components: &[Component],
    ) -> Result<HashMap<String, ComponentMetadata>> {
        let targets: Vec<(&Component, PackageUrl)> = components
            .iter()
            .filter_map(|c| {
                let purl = PackageUrl::parse(c.purl.as_deref()?)?;
                SUPPORTED_SYSTEMS
                    .contains(&purl.package_type.as_str())
                    .then_some((c, purl))
            })
            .collect();

        let client = self.client.clone();
        let requests: Vec<(String, String, String)> = targets
            .into_iter()
            .map(|(component, purl)| (component.bom_ref.clone(), component.name.clone(), self.version_url(&purl)))
            .collect();

        let results: Vec<Option<(String, ComponentMetadata)>> = stream::iter(requests)
            .map(|(bom_ref, component_name, url)| {
                let client = client.clone();
                async move {
                    Self::fetch_version(&client, &url, &component_name)
                        .await
                        .map(|meta| (bom_ref, meta))
                }
            })
            .buffer_unordered(Self::CONCURRENCY)
            .collect()
            .await;

        Ok(results.into_iter().flatten().collect())
    }
}

#[derive(Debug, Deserialize)]
struct DepsDevVersion {
    #[serde(rename = "publishedAt", default)]
    published_at: Option<String>,
    /// Accepted as a bool or a boolean-ish string.
    #[serde(rename = "isDeprecated", default)]
    is_deprecated: Option<serde_json::Value>,
}

impl DepsDevVersion {
    fn into_metadata(self) -> ComponentMetadata {
        let published_at = self.published_at.as_deref().and_then(parse_timestamp);
        let is_deprecated = self
            .is_deprecated
            .as_ref()
            .map(coerce_bool)
            .unwrap_or(false);

        ComponentMetadata {
            published_at,
            is_deprecated,
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

use serde::Deserialize;

/// One entry of the CycloneDX `dependencies[]` array, carried through
/// the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyRecord {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(rename = "dependsOn", default)]
    pub depends_on: Vec<String>,
}

impl DependencyRecord {
    pub fn new(bom_ref: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            depends_on,
        }
    }
}

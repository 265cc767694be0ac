use super::Component;

/// Maximum length kept for finding descriptions.
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Remediation priority bucket assigned after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CRITICAL" => Ok(Priority::Critical),
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// A single vulnerability finding attached to a component.
///
/// Constructed during ingestion with its identity and CVSS data; the
/// derived metrics (`tcs`, `vei`, `epss`, `kev`, `exploitability`,
/// `hdfm_score`, `priority`) are filled in by the prioritization
/// pipeline and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Canonical identifier. When aliases exist the preference is
    /// CVE > GHSA > first-seen; once chosen it stays stable.
    pub id: String,
    pub component_ref: String,
    pub component_name: String,
    pub cvss_score: f64,
    pub cvss_vector: String,
    pub description: String,
    /// Alternate identifiers preserved for later joins.
    pub aliases: Vec<String>,

    pub severity: f64,
    pub tcs: f64,
    pub vei: f64,
    pub epss: f64,
    pub kev: bool,
    pub exploitability: f64,

    pub hdfm_score: f64,
    pub priority: Priority,
}

impl Finding {
    /// Creates a finding with derived metrics zeroed and priority LOW.
    ///
    /// `severity` is derived as `cvss_score / 10` and the description is
    /// truncated to 500 characters.
    pub fn new(
        id: impl Into<String>,
        component_ref: impl Into<String>,
        component_name: impl Into<String>,
        cvss_score: f64,
        cvss_vector: impl Into<String>,
        description: &str,
    ) -> Self {
        Self {
            id: id.into(),
            component_ref: component_ref.into(),
            component_name: component_name.into(),
            cvss_score,
            cvss_vector: cvss_vector.into(),
            description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
            aliases: Vec::new(),
            severity: cvss_score / 10.0,
            tcs: 0.0,
            vei: 0.0,
            epss: 0.0,
            kev: false,
            exploitability: 0.0,
            hdfm_score: 0.0,
            priority: Priority::Low,
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Synthesizes the placeholder finding for a component with no known
    /// vulnerabilities, so every component surfaces in the final report.
    ///
    /// Placeholders score 0 and end up LOW after priority assignment.
    pub fn placeholder(component: &Component) -> Self {
        let status = if component.is_deprecated {
            "DEPRECATED"
        } else {
            "HEALTHY"
        };
        Self::new(
            status,
            component.bom_ref.clone(),
            component.name.clone(),
            0.0,
            "",
            &format!("Component is {}", status.to_lowercase()),
        )
    }

    /// True for HEALTHY/DEPRECATED placeholders synthesized by the
    /// orchestrator rather than looked up from a database.
    pub fn is_placeholder(&self) -> bool {
        self.id == "HEALTHY" || self.id == "DEPRECATED"
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_severity_from_cvss() {
        let finding = Finding::new("CVE-2024-0001", "ref-a", "pkg-a", 7.5, "", "desc");
        assert!((finding.severity - 0.75).abs() < 1e-9);
        assert_eq!(finding.priority, Priority::Low);
        assert_eq!(finding.hdfm_score, 0.0);
    }

    #[test]
    fn test_new_truncates_description() {
        let long = "x".repeat(600);
        let finding = Finding::new("CVE-2024-0001", "ref-a", "pkg-a", 5.0, "", &long);
        assert_eq!(finding.description.chars().count(), 500);
    }

    #[test]
    fn test_placeholder_healthy() {
        let comp = Component::new("ref-a", "pkg-a", "1.0.0", None);
        let finding = Finding::placeholder(&comp);
        assert_eq!(finding.id, "HEALTHY");
        assert_eq!(finding.description, "Component is healthy");
        assert_eq!(finding.cvss_score, 0.0);
        assert!(finding.is_placeholder());
    }

    #[test]
    fn test_placeholder_deprecated() {
        let mut comp = Component::new("ref-a", "pkg-a", "1.0.0", None);
        comp.is_deprecated = true;
        let finding = Finding::placeholder(&comp);
        assert_eq!(finding.id, "DEPRECATED");
        assert_eq!(finding.description, "Component is deprecated");
    }

    #[test]
    fn test_real_finding_is_not_placeholder() {
        let finding = Finding::new("CVE-2024-0001", "ref-a", "pkg-a", 5.0, "", "desc");
        assert!(!finding.is_placeholder());
    }

    #[test]
    fn test_priority_round_trip() {
        for p in [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("URGENT".parse::<Priority>().is_err());
    }
}

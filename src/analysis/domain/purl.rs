/// Parsed package URL of the form `pkg:<type>/<name>@<version>`.
///
/// The version is taken after the final `@` so scoped names such as
/// `pkg:npm/@babel/core@7.0.0` keep their `@` prefix intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUrl {
    pub package_type: String,
    pub name: String,
    pub version: String,
}

impl PackageUrl {
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix("pkg:")?;
        let (package_type, rest) = rest.split_once('/')?;
        let (name, version) = rest.rsplit_once('@')?;

        if package_type.is_empty() || name.is_empty() || version.is_empty() {
            return None;
        }

        Some(Self {
            package_type: package_type.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let purl = PackageUrl::parse("pkg:npm/axios@0.21.1").unwrap();
        assert_eq!(purl.package_type, "npm");
        assert_eq!(purl.name, "axios");
        assert_eq!(purl.version, "0.21.1");
    }

    #[test]
    fn test_parse_scoped_npm_name() {
        let purl = PackageUrl::parse("pkg:npm/@babel/core@7.0.0").unwrap();
        assert_eq!(purl.package_type, "npm");
        assert_eq!(purl.name, "@babel/core");
        assert_eq!(purl.version, "7.0.0");
    }

    #[test]
    fn test_parse_maven_group() {
        let purl = PackageUrl::parse("pkg:maven/org.apache.logging.log4j/log4j-core@2.14.1")
            .unwrap();
        assert_eq!(purl.package_type, "maven");
        assert_eq!(purl.name, "org.apache.logging.log4j/log4j-core");
        assert_eq!(purl.version, "2.14.1");
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert!(PackageUrl::parse("npm/axios@0.21.1").is_none());
    }

    #[test]
    fn test_parse_rejects_missing_version() {
        assert!(PackageUrl::parse("pkg:npm/axios").is_none());
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(PackageUrl::parse("pkg:/axios@1.0").is_none());
        assert!(PackageUrl::parse("pkg:npm/@1.0").is_none());
        assert!(PackageUrl::parse("pkg:npm/axios@").is_none());
    }
}

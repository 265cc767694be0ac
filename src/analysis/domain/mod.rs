/// Domain entities and value objects for SBOM analysis.
pub mod coerce;
pub mod component;
pub mod cyclonedx;
pub mod dependency;
pub mod finding;
pub mod purl;
pub mod result;

pub use component::Component;
pub use dependency::DependencyRecord;
pub use finding::{Finding, Priority};
pub use purl::PackageUrl;
pub use result::AnalysisResult;

/// Network adapters for the external vulnerability, registry, and
/// threat-intelligence services.
pub mod depsdev_client;
pub mod osv_client;
pub mod threat_intel_client;

pub use depsdev_client::DepsDevClient;
pub use osv_client::OsvClient;
pub use threat_intel_client::ThreatIntelClient;

/// Domain layer: entities, the CycloneDX normalizer, and pure scoring
/// services.
pub mod domain;
pub mod services;

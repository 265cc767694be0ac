/// Persistence adapters implementing the `AnalysisRepository` port.
pub mod in_memory;

pub use in_memory::InMemoryAnalysisRepository;

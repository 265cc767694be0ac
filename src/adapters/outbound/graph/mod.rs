/// Dependency-graph analysis adapter.
pub mod adjacency_analyzer;

pub use adjacency_analyzer::AdjacencyGraphAnalyzer;

use std::collections::HashMap;

use crate::analysis::domain::{Component, DependencyRecord};

/// GraphAnalyzer port for dependency-DAG topology analysis.
///
/// Pure CPU work: implementations must not block on I/O.
pub trait GraphAnalyzer: Send + Sync {
    /// Topological Criticality Score per `bom_ref`, each in [0.0, 1.0].
    ///
    /// Blends normalized in-degree with the component's declared scope.
    fn topological_criticality(
        &self,
        components: &[Component],
        dependencies: &[DependencyRecord],
    ) -> HashMap<String, f64>;

    /// Longest shortest-path length from any root (zero in-degree node)
    /// to any reachable node; 0 for an empty graph or when no roots
    /// exist.
    fn max_depth(&self, dependencies: &[DependencyRecord]) -> usize;
}

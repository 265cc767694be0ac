use std::collections::{HashMap, HashSet, VecDeque};

use crate::analysis::domain::{Component, DependencyRecord};
use crate::ports::outbound::GraphAnalyzer;

/// Graph analyzer over a plain adjacency list.
///
/// Criticality blends structural centrality (in-degree normalized by
/// the graph maximum) with the declared dependency scope. Unknown scope
/// lands above "optional" on purpose: uncertainty is treated as mildly
/// risky. "excluded" is demoted below "optional" since the component is
/// declared out of the deployed artifact.
pub struct AdjacencyGraphAnalyzer;

impl AdjacencyGraphAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn scope_priority(scope: Option<&str>) -> f64 {
        match scope {
            Some("required") => 1.0,
            Some("optional") => 0.5,
            Some("excluded") => 0.3,
            _ => 0.6,
        }
    }
}

impl Default for AdjacencyGraphAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphAnalyzer for AdjacencyGraphAnalyzer {
    fn topological_criticality(
        &self,
        components: &[Component],
        dependencies: &[DependencyRecord],
    ) -> HashMap<String, f64> {
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        for dep in dependencies {
            for target in &dep.depends_on {
                *in_degree.entry(target.as_str()).or_insert(0) += 1;
            }
        }

        let max_in_degree = in_degree.values().copied().max().unwrap_or(1).max(1);

        components
            .iter()
            .map(|comp| {
                let degree = in_degree.get(comp.bom_ref.as_str()).copied().unwrap_or(0);
                let normalized_degree = degree as f64 / max_in_degree as f64;
                let scope_priority = Self::scope_priority(comp.scope.as_deref());
                (
                    comp.bom_ref.clone(),
                    (normalized_degree + scope_priority) / 2.0,
                )
            })
            .collect()
    }

    fn max_depth(&self, dependencies: &[DependencyRecord]) -> usize {
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut nodes: HashSet<&str> = HashSet::new();
        let mut targets: HashSet<&str> = HashSet::new();

        for dep in dependencies {
            for target in &dep.depends_on {
                adjacency
                    .entry(dep.bom_ref.as_str())
                    .or_default()
                    .push(target.as_str());
                nodes.insert(dep.bom_ref.as_str());
                nodes.insert(target.as_str());
                targets.insert(target.as_str());
            }
        }

        if nodes.is_empty() {
            return 0;
        }

        let roots: Vec<&str> = nodes
            .iter()
            .copied()
            .filter(|n| !targets.contains(n))
            .collect();
        if roots.is_empty() {
            return 0;
        }

        // Longest shortest-path length from any root: BFS per root.
        let mut max_depth = 0;
        for root in roots {
            let mut distances: HashMap<&str, usize> = HashMap::new();
            let mut queue = VecDeque::new();
            distances.insert(root, 0);
            queue.push_back(root);

            while let Some(node) = queue.pop_front() {
                let depth = distances[node];
                max_depth = max_depth.max(depth);

                if let Some(children) = adjacency.get(node) {
                    for child in children {
                        if !distances.contains_key(child) {
                            distances.insert(child, depth + 1);
                            queue.push_back(child);
                        }
                    }
                }
            }
        }

        max_depth
    }
}

//! Connection traversal: shortest paths between every pair of targets
use crate::traversal::graph::{Orientation, SourceGraph};
use crate::traversal::path::shortest_paths;
use crate::traversal::TraversalResult;

/// Union of the `count` shortest undirected paths between every pair of targets
///
/// Pairs are visited in target order. The union connects the targets but isn't a minimal
/// connecting subgraph.
pub fn connection(graph: &SourceGraph, targets: &[String], count: usize) -> TraversalResult {
    let mut result = TraversalResult::default();
    for (index, source) in targets.iter().enumerate() {
        for target in &targets[index + 1..] {
            for path in shortest_paths(graph, source, target, Orientation::Either, count) {
                result.include_path(&path);
            }
        }
    }
    result
}

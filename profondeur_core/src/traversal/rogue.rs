//! Rogue traversal: one node and the links that touch it
use crate::traversal::graph::SourceGraph;
use crate::traversal::TraversalResult;

pub fn rogue(graph: &SourceGraph, focus: &str) -> TraversalResult {
    let mut result = TraversalResult::default();
    result.include_node(focus);
    for step in graph.steps(focus) {
        result.include_link(step.link);
    }
    result
}

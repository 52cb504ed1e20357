//! Proximity traversal: breadth first expansion to a bounded depth
use std::collections::{HashSet, VecDeque};

use crate::traversal::graph::{Direction, Orientation, SourceGraph};
use crate::traversal::TraversalResult;

/// Nodes within `depth` links of the focus, and every link followed to reach them
///
/// Links from a node at the depth bound are not followed. A link between two visited nodes
/// is still included when one of them lies inside the bound.
pub fn proximity(
    graph: &SourceGraph,
    focus: &str,
    direction: Direction,
    depth: usize,
) -> TraversalResult {
    let orientation: Orientation = direction.into();
    let mut result = TraversalResult::default();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    visited.insert(focus);
    result.include_node(focus);
    queue.push_back((focus, 0));
    while let Some((node, distance)) = queue.pop_front() {
        if distance >= depth {
            continue;
        }
        for step in graph.steps(node) {
            if !step.follows(orientation) {
                continue;
            }
            result.include_link(step.link);
            if visited.insert(step.neighbor) {
                result.include_node(step.neighbor);
                queue.push_back((step.neighbor, distance + 1));
            }
        }
    }
    result
}

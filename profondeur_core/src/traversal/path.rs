//! Shortest simple paths between two nodes
//!
//! Paths are ranked by length and then by their sequence of node identifiers. Yen's
//! algorithm finds them in rank order, deviating from each accepted path at every one of its
//! nodes, with a breadth first search for the spur path that always picks the
//! lexicographically first of the shortest paths.
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::traversal::graph::{Orientation, SourceGraph};
use crate::traversal::TraversalResult;

/// A simple path through a source graph
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GraphPath {
    /// Number of links, first for ranking
    length: usize,
    pub nodes: Vec<String>,
    pub links: Vec<String>,
}

impl GraphPath {
    fn new(nodes: Vec<String>, links: Vec<String>) -> Self {
        GraphPath {
            length: links.len(),
            nodes,
            links,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Nodes and links that a spur search must avoid
#[derive(Default)]
struct Blocked<'b> {
    nodes: HashSet<&'b str>,
    links: HashSet<&'b str>,
}

/// Shortest path, lexicographically first among equally short ones
fn shortest_path(
    graph: &SourceGraph,
    source: &str,
    target: &str,
    orientation: Orientation,
    blocked: &Blocked,
) -> Option<GraphPath> {
    if blocked.nodes.contains(source) || blocked.nodes.contains(target) {
        return None;
    }
    // Distance of every node to the target, searching backwards
    let mut distances: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    distances.insert(target, 0);
    queue.push_back(target);
    let backwards = orientation.reversed();
    while let Some(node) = queue.pop_front() {
        if node == source {
            break;
        }
        let distance = distances[node];
        for step in graph.steps(node) {
            if !step.follows(backwards)
                || blocked.links.contains(step.link)
                || blocked.nodes.contains(step.neighbor)
                || distances.contains_key(step.neighbor)
            {
                continue;
            }
            distances.insert(step.neighbor, distance + 1);
            queue.push_back(step.neighbor);
        }
    }
    let mut remaining = *distances.get(source)?;

    // Walk forwards, always taking the smallest neighbor that is one step closer
    let mut nodes = vec![source.to_string()];
    let mut links = Vec::new();
    let mut node = source;
    while remaining > 0 {
        let step = graph.steps(node).iter().find(|step| {
            step.follows(orientation)
                && !blocked.links.contains(step.link)
                && distances.get(step.neighbor) == Some(&(remaining - 1))
        })?;
        nodes.push(step.neighbor.to_string());
        links.push(step.link.to_string());
        node = step.neighbor;
        remaining -= 1;
    }
    Some(GraphPath::new(nodes, links))
}

/// Up to `count` shortest simple paths from `source` to `target`, in rank order
///
/// A source that is also the target gives the single path without links.
pub(crate) fn shortest_paths(
    graph: &SourceGraph,
    source: &str,
    target: &str,
    orientation: Orientation,
    count: usize,
) -> Vec<GraphPath> {
    let Some(first) = shortest_path(graph, source, target, orientation, &Blocked::default())
    else {
        return Vec::new();
    };
    let mut accepted = vec![first];
    let mut candidates: BTreeSet<GraphPath> = BTreeSet::new();
    while accepted.len() < count {
        let Some(previous) = accepted.last() else {
            break;
        };
        for index in 0..previous.length {
            let spur = &previous.nodes[index];
            let root_nodes = &previous.nodes[..=index];
            let mut blocked = Blocked::default();
            for path in &accepted {
                if path.nodes.len() > index + 1 && path.nodes[..=index] == *root_nodes {
                    blocked.links.insert(&path.links[index]);
                }
            }
            blocked
                .nodes
                .extend(root_nodes[..index].iter().map(String::as_str));
            let Some(spur_path) = shortest_path(graph, spur, target, orientation, &blocked)
            else {
                continue;
            };
            let mut nodes = root_nodes[..index].to_vec();
            nodes.extend(spur_path.nodes);
            let mut links = previous.links[..index].to_vec();
            links.extend(spur_path.links);
            let path = GraphPath::new(nodes, links);
            if !accepted.contains(&path) {
                candidates.insert(path);
            }
        }
        match candidates.pop_first() {
            Some(path) => accepted.push(path),
            None => break,
        }
    }
    accepted
}

/// Nodes and links of the shortest paths between two nodes
pub fn path(
    graph: &SourceGraph,
    source: &str,
    target: &str,
    orientation: Orientation,
    count: usize,
) -> TraversalResult {
    let mut result = TraversalResult::default();
    for path in shortest_paths(graph, source, target, orientation, count) {
        result.include_path(&path);
    }
    result
}

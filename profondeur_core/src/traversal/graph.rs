//! Adjacency over the nodes and links that a traversal may search
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::network::{Network, NetworkLink};
use crate::subnetwork::Subnetwork;

/// Direction of a proximity expansion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow links in their stored orientation
    Successors,
    /// Follow links against their stored orientation
    Predecessors,
    #[default]
    Neighbors,
}

/// Direction constraint of a path search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDirection {
    Forward,
    Reverse,
    #[default]
    Both,
}

/// Which way a step may go along a link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    Backward,
    Either,
}

impl Orientation {
    pub(crate) fn reversed(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Backward,
            Orientation::Backward => Orientation::Forward,
            Orientation::Either => Orientation::Either,
        }
    }
}

impl From<Direction> for Orientation {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Successors => Orientation::Forward,
            Direction::Predecessors => Orientation::Backward,
            Direction::Neighbors => Orientation::Either,
        }
    }
}

impl From<PathDirection> for Orientation {
    fn from(direction: PathDirection) -> Self {
        match direction {
            PathDirection::Forward => Orientation::Forward,
            PathDirection::Reverse => Orientation::Backward,
            PathDirection::Both => Orientation::Either,
        }
    }
}

/// A move from one node to a neighbor across a link
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Step<'a> {
    pub neighbor: &'a str,
    pub link: &'a str,
    /// The move follows the link's stored orientation, or the link is undirected
    pub forward: bool,
    /// The move goes against the link's stored orientation, or the link is undirected
    pub backward: bool,
}

impl Step<'_> {
    pub(crate) fn follows(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Forward => self.forward,
            Orientation::Backward => self.backward,
            Orientation::Either => true,
        }
    }
}

/// Nodes and links that a traversal searches, either a whole network or a subnetwork of it
#[derive(Clone, Debug)]
pub struct SourceGraph<'a> {
    adjacency: IndexMap<&'a str, Vec<Step<'a>>>,
}

impl<'a> SourceGraph<'a> {
    pub fn full(network: &'a Network) -> Self {
        Self::from_parts(
            network.nodes.keys().map(String::as_str),
            network.links.values(),
        )
    }

    /// Only the nodes and links of a subnetwork
    pub fn restricted(network: &'a Network, subnetwork: &Subnetwork) -> Self {
        Self::from_parts(
            network
                .nodes
                .keys()
                .filter(|id| subnetwork.nodes.contains(*id))
                .map(String::as_str),
            network
                .links
                .values()
                .filter(|link| subnetwork.links.contains(&link.id)),
        )
    }

    fn from_parts(
        nodes: impl Iterator<Item = &'a str>,
        links: impl Iterator<Item = &'a NetworkLink>,
    ) -> Self {
        let mut adjacency: IndexMap<&'a str, Vec<Step<'a>>> =
            nodes.map(|node| (node, Vec::new())).collect();
        for link in links {
            if !(adjacency.contains_key(link.source.as_str())
                && adjacency.contains_key(link.target.as_str()))
            {
                continue;
            }
            if let Some(steps) = adjacency.get_mut(link.source.as_str()) {
                steps.push(Step {
                    neighbor: &link.target,
                    link: &link.id,
                    forward: true,
                    backward: !link.directed,
                });
            }
            if let Some(steps) = adjacency.get_mut(link.target.as_str()) {
                steps.push(Step {
                    neighbor: &link.source,
                    link: &link.id,
                    forward: !link.directed,
                    backward: true,
                });
            }
        }
        // Sorted steps make every search visit neighbors in identifier order
        for steps in adjacency.values_mut() {
            steps.sort();
        }
        SourceGraph { adjacency }
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub(crate) fn steps(&self, node: &str) -> &[Step<'a>] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

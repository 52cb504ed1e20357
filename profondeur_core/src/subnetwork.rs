//! Subnetworks: named selections of nodes and links of a network
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::network::Network;
use crate::traversal::TraversalResult;

/// How a traversal result combines with the current subnetwork
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// Add what the traversal found, searching the whole network
    #[default]
    Union,
    /// Remove what the traversal found, searching the subnetwork itself
    Difference,
}

/// Nodes and links selected from a network
///
/// Every link's endpoints are nodes of the subnetwork, and both sets follow the network's
/// order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subnetwork {
    pub name: String,
    pub nodes: IndexSet<String>,
    pub links: IndexSet<String>,
}

impl Subnetwork {
    pub fn empty(name: &str) -> Self {
        Subnetwork {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Every node and link of a network
    pub fn full(name: &str, network: &Network) -> Self {
        Subnetwork {
            name: name.to_string(),
            nodes: network.nodes.keys().cloned().collect(),
            links: network.links.keys().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Combine a traversal result into a new subnetwork
    ///
    /// Identifiers that the network doesn't know are dropped, as are links that lose an
    /// endpoint.
    pub fn combine(
        &self,
        network: &Network,
        result: &TraversalResult,
        combination: Combination,
    ) -> Subnetwork {
        let (nodes, links): (IndexSet<&String>, IndexSet<&String>) = match combination {
            Combination::Union => (
                self.nodes.iter().chain(&result.nodes).collect(),
                self.links.iter().chain(&result.links).collect(),
            ),
            Combination::Difference => (
                self.nodes.difference(&result.nodes).collect(),
                self.links.difference(&result.links).collect(),
            ),
        };
        let nodes: IndexSet<String> = network
            .nodes
            .keys()
            .filter(|id| nodes.contains(id))
            .cloned()
            .collect();
        let links: IndexSet<String> = network
            .links
            .values()
            .filter(|link| {
                links.contains(&link.id)
                    && nodes.contains(&link.source)
                    && nodes.contains(&link.target)
            })
            .map(|link| link.id.clone())
            .collect();
        log::debug!(
            "Subnetwork {} now has {} nodes and {} links",
            self.name,
            nodes.len(),
            links.len()
        );
        Subnetwork {
            name: self.name.clone(),
            nodes,
            links,
        }
    }
}

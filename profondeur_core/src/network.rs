//! Network of nodes and links for the candidate network
//!
//! Candidate reactions and candidate metabolites become nodes, and every participation of a
//! candidate metabolite in a candidate reaction becomes a link. Links point from reactant
//! metabolites to reactions and from reactions to product metabolites. Links of reactions
//! that only move metabolites keep that orientation, while links of conversions can be
//! followed either way. A metabolite in both roles of one reaction gives a single link that
//! can always be followed either way.
//!
//! Node identifiers are candidate identifiers and link identifiers are `source_target`.
//! Reactions and metabolites share one namespace, so an identifier that is already taken
//! gets the first free numeric suffix, `_2`, `_3` and so on.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::candidacy::CandidateNetwork;
use crate::metabolic_model::reaction::Role;

/// Node of the network
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NetworkNode {
    Reaction {
        id: String,
        /// Identifier of the candidate reaction
        candidate: String,
    },
    Metabolite {
        id: String,
        /// Identifier of the candidate metabolite
        candidate: String,
        /// Reaction this node belongs to, when the metabolite is replicated
        replication: Option<String>,
    },
}

impl NetworkNode {
    pub fn reaction(candidate: &str) -> Self {
        NetworkNode::Reaction {
            id: candidate.to_string(),
            candidate: candidate.to_string(),
        }
    }

    pub fn metabolite(candidate: &str) -> Self {
        NetworkNode::Metabolite {
            id: candidate.to_string(),
            candidate: candidate.to_string(),
            replication: None,
        }
    }

    /// Node of a replicated metabolite, private to one reaction
    pub fn replicate(candidate: &str, reaction: &str) -> Self {
        NetworkNode::Metabolite {
            id: format!("{}_{}", candidate, reaction),
            candidate: candidate.to_string(),
            replication: Some(reaction.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NetworkNode::Reaction { id, .. } | NetworkNode::Metabolite { id, .. } => id,
        }
    }

    fn with_id(mut self, identifier: &str) -> Self {
        match &mut self {
            NetworkNode::Reaction { id, .. } | NetworkNode::Metabolite { id, .. } => {
                *id = identifier.to_string()
            }
        }
        self
    }
}

/// Role of the metabolite end of a link
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRole {
    Reactant,
    Product,
    Both,
}

impl LinkRole {
    fn from_roles(roles: &[Role]) -> Option<Self> {
        match roles {
            [Role::Reactant] => Some(LinkRole::Reactant),
            [Role::Product] => Some(LinkRole::Product),
            [] => None,
            _ => Some(LinkRole::Both),
        }
    }
}

/// Link between a metabolite node and a reaction node
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkLink {
    /// Identifier, `source_target`
    pub id: String,
    pub source: String,
    pub target: String,
    pub role: LinkRole,
    /// Whether the link can only be followed from source to target
    pub directed: bool,
}

impl NetworkLink {
    pub fn new(source: &str, target: &str, role: LinkRole, directed: bool) -> Self {
        NetworkLink {
            id: format!("{}_{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            role,
            directed,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Network already has a node or link with identifier {0}")]
    DuplicateIdentifier(String),
    #[error("Link {link} references missing node {node}")]
    MissingEndpoint { link: String, node: String },
}

/// Counts that summarize a network
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStatistics {
    pub reactions: usize,
    pub metabolites: usize,
    /// Metabolite nodes that belong to a single reaction
    pub replicates: usize,
    pub links: usize,
    pub directed_links: usize,
}

/// Nodes and links, in a deterministic order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Network {
    pub nodes: IndexMap<String, NetworkNode>,
    pub links: IndexMap<String, NetworkLink>,
}

impl Network {
    pub fn new_empty() -> Self {
        Network::default()
    }

    pub fn add_node(&mut self, node: NetworkNode) -> Result<(), NetworkError> {
        if self.nodes.contains_key(node.id()) {
            return Err(NetworkError::DuplicateIdentifier(node.id().to_string()));
        }
        self.nodes.insert(node.id().to_string(), node);
        Ok(())
    }

    pub fn add_link(&mut self, link: NetworkLink) -> Result<(), NetworkError> {
        if self.links.contains_key(&link.id) {
            return Err(NetworkError::DuplicateIdentifier(link.id));
        }
        for node in [&link.source, &link.target] {
            if !self.nodes.contains_key(node) {
                return Err(NetworkError::MissingEndpoint {
                    link: link.id.clone(),
                    node: node.clone(),
                });
            }
        }
        self.links.insert(link.id.clone(), link);
        Ok(())
    }

    /// Build the network for a candidate network
    ///
    /// # Examples
    /// ```rust
    /// use profondeur_core::candidacy::CandidateNetwork;
    /// use profondeur_core::network::Network;
    /// let network = Network::build(&CandidateNetwork::default());
    /// assert!(network.nodes.is_empty());
    /// ```
    pub fn build(candidates: &CandidateNetwork) -> Self {
        let mut network = Network::new_empty();
        for reaction in candidates.reactions.values() {
            network.insert_unique_node(NetworkNode::reaction(&reaction.id));
        }
        // Node of every candidate metabolite, keyed by candidate and by reaction for replicates
        let mut metabolite_nodes: HashMap<(&str, Option<&str>), String> = HashMap::new();
        for metabolite in candidates.metabolites.values() {
            if metabolite.replication {
                for reaction in &metabolite.reactions {
                    let node =
                        network.insert_unique_node(NetworkNode::replicate(&metabolite.id, reaction));
                    metabolite_nodes.insert((metabolite.id.as_str(), Some(reaction.as_str())), node);
                }
            } else {
                let node = network.insert_unique_node(NetworkNode::metabolite(&metabolite.id));
                metabolite_nodes.insert((metabolite.id.as_str(), None), node);
            }
        }
        for reaction in candidates.reactions.values() {
            for candidate in reaction.metabolites() {
                let roles = reaction.roles(candidate);
                let Some(role) = LinkRole::from_roles(&roles) else {
                    continue;
                };
                let replicated = candidates
                    .metabolites
                    .get(candidate)
                    .map(|m| m.replication)
                    .unwrap_or(false);
                let key = (candidate, replicated.then_some(reaction.id.as_str()));
                let Some(node) = metabolite_nodes.get(&key) else {
                    log::warn!("Candidate metabolite {} of {} has no node", candidate, reaction.id);
                    continue;
                };
                let directed = !reaction.conversion && role != LinkRole::Both;
                let link = match role {
                    LinkRole::Product => NetworkLink::new(&reaction.id, node, role, directed),
                    LinkRole::Reactant | LinkRole::Both => {
                        NetworkLink::new(node, &reaction.id, role, directed)
                    }
                };
                network.insert_unique_link(link);
            }
        }
        log::debug!(
            "Built network with {} nodes and {} links",
            network.nodes.len(),
            network.links.len()
        );
        network
    }

    /// Insert a node built from candidates, renaming it if its identifier is taken
    fn insert_unique_node(&mut self, node: NetworkNode) -> String {
        let id = unique_identifier(node.id(), |id| self.nodes.contains_key(id));
        if id != node.id() {
            log::warn!("Node identifier {} is taken, using {}", node.id(), id);
        }
        self.nodes.insert(id.clone(), node.with_id(&id));
        id
    }

    /// Insert a link built from candidates, renaming it if its identifier is taken
    fn insert_unique_link(&mut self, link: NetworkLink) {
        let id = unique_identifier(&link.id, |id| self.links.contains_key(id));
        if id != link.id {
            log::warn!("Link identifier {} is taken, using {}", link.id, id);
        }
        self.links.insert(id.clone(), NetworkLink { id, ..link });
    }

    pub fn statistics(&self) -> NetworkStatistics {
        let mut statistics = NetworkStatistics {
            links: self.links.len(),
            directed_links: self.links.values().filter(|l| l.directed).count(),
            ..Default::default()
        };
        for node in self.nodes.values() {
            match node {
                NetworkNode::Reaction { .. } => statistics.reactions += 1,
                NetworkNode::Metabolite { replication, .. } => {
                    statistics.metabolites += 1;
                    if replication.is_some() {
                        statistics.replicates += 1;
                    }
                }
            }
        }
        statistics
    }
}

/// `base`, or `base` with the first numeric suffix that isn't taken
fn unique_identifier(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut suffix = 2;
    loop {
        let identifier = format!("{}_{}", base, suffix);
        if !taken(&identifier) {
            return identifier;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod network_tests {
    use super::*;
    use crate::candidacy::{resolve, CandidacyOptions, CandidacyOptionsBuilder};
    use crate::filter::{filter, Filters};
    use crate::metabolic_model::compartment::Compartment;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::metabolic_model::model::Model;
    use crate::metabolic_model::reaction::{Participant, ReactionBuilder};

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        for compartment in ["c", "e"] {
            model.add_compartment(Compartment::new(compartment, None)).unwrap();
        }
        for metabolite in ["A", "B", "C", "H"] {
            model.add_metabolite(Metabolite::new_id_only(metabolite)).unwrap();
        }
        let reactions = [
            ("R1", vec![Participant::reactant("A", "c"), Participant::product("B", "c")]),
            (
                "R2",
                vec![
                    Participant::reactant("B", "c"),
                    Participant::reactant("H", "c"),
                    Participant::product("C", "c"),
                    Participant::product("H", "c"),
                ],
            ),
            ("T1", vec![Participant::reactant("A", "e"), Participant::product("A", "c")]),
        ];
        for (id, participants) in reactions {
            let reaction = ReactionBuilder::default()
                .id(id.to_string())
                .participants(participants)
                .build()
                .unwrap();
            model.add_reaction(reaction).unwrap();
        }
        model
    }

    fn build(model: &Model, options: &CandidacyOptions) -> Network {
        let sets = filter(model, &Filters::all(model));
        Network::build(&resolve(model, &sets, options))
    }

    fn options(compartmentalization: bool) -> CandidacyOptions {
        CandidacyOptionsBuilder::default()
            .compartmentalization(compartmentalization)
            .build()
            .unwrap()
    }

    #[test]
    fn conversion_links() {
        let network = build(&setup_model(), &options(false));
        assert_eq!(
            network.nodes.keys().collect::<Vec<_>>(),
            vec!["R1", "R2", "A", "B", "C", "H"]
        );
        assert_eq!(
            network.links.keys().collect::<Vec<_>>(),
            vec!["A_R1", "R1_B", "B_R2", "H_R2", "R2_C"]
        );
        let h = &network.links["H_R2"];
        assert_eq!(h.role, LinkRole::Both);
        assert!(!h.directed);
        assert!(network.links.values().all(|l| !l.directed));
    }

    #[test]
    fn transport_links() {
        let network = build(&setup_model(), &options(true));
        let inward = &network.links["A_e_T1"];
        assert!(inward.directed);
        assert_eq!(inward.role, LinkRole::Reactant);
        let outward = &network.links["T1_A_c"];
        assert!(outward.directed);
        assert_eq!(outward.role, LinkRole::Product);
        assert!(!network.links["A_c_R1"].directed);
        let statistics = network.statistics();
        assert_eq!(statistics.reactions, 3);
        assert_eq!(statistics.directed_links, 2);
    }

    #[test]
    fn replicated_metabolites() {
        let mut options = options(false);
        options.simplifications.replications.insert("B".to_string());
        let network = build(&setup_model(), &options);
        assert!(!network.nodes.contains_key("B"));
        assert_eq!(
            network.nodes["B_R1"],
            NetworkNode::Metabolite {
                id: "B_R1".to_string(),
                candidate: "B".to_string(),
                replication: Some("R1".to_string()),
            }
        );
        assert!(network.links.contains_key("R1_B_R1"));
        assert!(network.links.contains_key("B_R2_R2"));
        assert_eq!(network.statistics().replicates, 2);
    }

    #[test]
    fn manual_links_need_endpoints() {
        let mut network = Network::new_empty();
        network.add_node(NetworkNode::metabolite("A")).unwrap();
        network.add_node(NetworkNode::reaction("R1")).unwrap();
        assert_eq!(
            network.add_node(NetworkNode::reaction("R1")),
            Err(NetworkError::DuplicateIdentifier("R1".to_string()))
        );
        network
            .add_link(NetworkLink::new("A", "R1", LinkRole::Reactant, false))
            .unwrap();
        assert!(matches!(
            network.add_link(NetworkLink::new("R1", "B", LinkRole::Product, false)),
            Err(NetworkError::MissingEndpoint { .. })
        ));
        assert_eq!(network.links.len(), 1);
    }

    #[test]
    fn reaction_named_like_metabolite() {
        let mut model = Model::new_empty();
        model.add_compartment(Compartment::new("c", None)).unwrap();
        for metabolite in ["A", "B"] {
            model.add_metabolite(Metabolite::new_id_only(metabolite)).unwrap();
        }
        let reaction = ReactionBuilder::default()
            .id("A".to_string())
            .participants(vec![Participant::reactant("A", "c"), Participant::product("B", "c")])
            .build()
            .unwrap();
        model.add_reaction(reaction).unwrap();
        let network = build(&model, &options(false));

        assert_eq!(network.nodes.len(), 3);
        assert_eq!(network.nodes.keys().collect::<Vec<_>>(), vec!["A", "A_2", "B"]);
        assert_eq!(
            network.nodes["A_2"],
            NetworkNode::Metabolite {
                id: "A_2".to_string(),
                candidate: "A".to_string(),
                replication: None,
            }
        );
        assert_eq!(network.links.keys().collect::<Vec<_>>(), vec!["A_2_A", "A_B"]);
        assert!(network.links.values().all(|l| l.source != l.target));
        let statistics = network.statistics();
        assert_eq!((statistics.reactions, statistics.metabolites), (1, 2));
    }

    #[test]
    fn colliding_link_identifiers() {
        // Reactant R_M of reaction c and product M_c of reaction R both give R_M_c
        let mut model = Model::new_empty();
        for compartment in ["c", "M"] {
            model.add_compartment(Compartment::new(compartment, None)).unwrap();
        }
        for metabolite in ["M", "R", "S"] {
            model.add_metabolite(Metabolite::new_id_only(metabolite)).unwrap();
        }
        let reactions = [
            ("R", vec![Participant::reactant("S", "c"), Participant::product("M", "c")]),
            ("c", vec![Participant::reactant("R", "M"), Participant::product("S", "M")]),
        ];
        for (id, participants) in reactions {
            let reaction = ReactionBuilder::default()
                .id(id.to_string())
                .participants(participants)
                .build()
                .unwrap();
            model.add_reaction(reaction).unwrap();
        }
        let network = build(&model, &options(true));

        assert_eq!(
            network.links.keys().collect::<Vec<_>>(),
            vec!["S_c_R", "R_M_c", "R_M_c_2", "c_S_M"]
        );
        let renamed = &network.links["R_M_c_2"];
        assert_eq!((renamed.source.as_str(), renamed.target.as_str()), ("R_M", "c"));
        assert_eq!(renamed.id, "R_M_c_2");
        let first = &network.links["R_M_c"];
        assert_eq!((first.source.as_str(), first.target.as_str()), ("R", "M_c"));
    }

    #[test]
    fn numeric_suffixes() {
        let taken = ["A", "A_2"];
        assert_eq!(unique_identifier("B", |id| taken.contains(&id)), "B");
        assert_eq!(unique_identifier("A", |id| taken.contains(&id)), "A_3");
    }
}

//! Exploration: one immutable snapshot of filters, candidates, network and subnetwork
//!
//! Every query produces a new snapshot rather than changing the current one. The parts that
//! a query doesn't touch are shared between snapshots.
use std::sync::Arc;

use thiserror::Error;

use crate::candidacy::{resolve, CandidacyOptions, CandidateNetwork};
use crate::filter::{filter, CurrentSets, Filters};
use crate::metabolic_model::model::Model;
use crate::network::Network;
use crate::subnetwork::{Combination, Subnetwork};
use crate::traversal::{traverse, SourceGraph, TraversalError, TraversalRequest, TraversalResult};

/// Name of the subnetwork an exploration starts with
pub const DEFAULT_SUBNETWORK: &str = "subnetwork";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplorationError {
    #[error("Traversal failed: {0}")]
    Traversal(#[from] TraversalError),
}

#[derive(Clone, Debug)]
pub struct Exploration {
    filters: Filters,
    options: CandidacyOptions,
    sets: Arc<CurrentSets>,
    candidates: Arc<CandidateNetwork>,
    network: Arc<Network>,
    subnetwork: Subnetwork,
}

impl Exploration {
    /// Filter the model, resolve candidates and build the network, with an empty subnetwork
    ///
    /// # Examples
    /// ```rust
    /// use profondeur_core::candidacy::CandidacyOptions;
    /// use profondeur_core::exploration::Exploration;
    /// use profondeur_core::filter::Filters;
    /// use profondeur_core::metabolic_model::model::Model;
    /// let model = Model::new_empty();
    /// let exploration = Exploration::new(&model, Filters::all(&model), CandidacyOptions::default());
    /// assert!(exploration.subnetwork().is_empty());
    /// ```
    pub fn new(model: &Model, filters: Filters, options: CandidacyOptions) -> Self {
        let sets = filter(model, &filters);
        let candidates = resolve(model, &sets, &options);
        let network = Network::build(&candidates);
        log::info!(
            "Exploring {} candidate reactions and {} candidate metabolites of model {}",
            candidates.reactions.len(),
            candidates.metabolites.len(),
            model.id.as_deref().unwrap_or("without id")
        );
        Exploration {
            filters,
            options,
            sets: Arc::new(sets),
            candidates: Arc::new(candidates),
            network: Arc::new(network),
            subnetwork: Subnetwork::empty(DEFAULT_SUBNETWORK),
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn options(&self) -> &CandidacyOptions {
        &self.options
    }

    pub fn sets(&self) -> &CurrentSets {
        &self.sets
    }

    pub fn candidates(&self) -> &CandidateNetwork {
        &self.candidates
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn subnetwork(&self) -> &Subnetwork {
        &self.subnetwork
    }

    /// The same exploration with every node and link in the subnetwork
    pub fn with_full_subnetwork(&self) -> Self {
        Exploration {
            subnetwork: Subnetwork::full(&self.subnetwork.name, &self.network),
            ..self.clone()
        }
    }

    /// Run a traversal without combining its result
    ///
    /// Unions search the whole network, differences search the subnetwork.
    pub fn traverse(&self, request: &TraversalRequest) -> Result<TraversalResult, ExplorationError> {
        let graph = match request.combination {
            Combination::Union => SourceGraph::full(&self.network),
            Combination::Difference => SourceGraph::restricted(&self.network, &self.subnetwork),
        };
        Ok(traverse(&graph, &request.query)?)
    }

    /// Run a traversal and combine its result into the subnetwork of a new exploration
    pub fn query(&self, request: &TraversalRequest) -> Result<Exploration, ExplorationError> {
        let result = self.traverse(request)?;
        let subnetwork = self
            .subnetwork
            .combine(&self.network, &result, request.combination);
        Ok(Exploration {
            subnetwork,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod exploration_tests {
    use super::*;
    use crate::candidacy::CandidacyOptionsBuilder;
    use crate::metabolic_model::compartment::Compartment;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::metabolic_model::reaction::{Participant, ReactionBuilder};
    use crate::traversal::{Direction, Query};

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        model.add_compartment(Compartment::new("c", None)).unwrap();
        for metabolite in ["A", "B"] {
            model.add_metabolite(Metabolite::new_id_only(metabolite)).unwrap();
        }
        for (id, replicate) in [("R1", "R2"), ("R2", "R1")] {
            let reaction = ReactionBuilder::default()
                .id(id.to_string())
                .participants(vec![Participant::reactant("A", "c"), Participant::product("B", "c")])
                .replicates(vec![replicate.to_string()])
                .build()
                .unwrap();
            model.add_reaction(reaction).unwrap();
        }
        model
    }

    fn setup_exploration() -> Exploration {
        let model = setup_model();
        let options = CandidacyOptionsBuilder::default()
            .compartmentalization(false)
            .build()
            .unwrap();
        Exploration::new(&model, Filters::all(&model), options)
    }

    fn rogue(focus: &str, combination: Combination) -> TraversalRequest {
        TraversalRequest::new(
            Query::Rogue {
                focus: focus.to_string(),
            },
            combination,
        )
    }

    #[test]
    fn rogue_into_empty_subnetwork() {
        let exploration = setup_exploration();
        let candidates = exploration.candidates();
        assert_eq!(candidates.reactions.keys().collect::<Vec<_>>(), vec!["R1"]);
        assert_eq!(candidates.reactions["R1"].members, vec!["R1", "R2"]);
        assert_eq!(candidates.metabolites.keys().collect::<Vec<_>>(), vec!["A", "B"]);

        let next = exploration.query(&rogue("B", Combination::Union)).unwrap();
        assert_eq!(next.subnetwork().nodes.iter().collect::<Vec<_>>(), vec!["B"]);
        assert!(next.subnetwork().links.is_empty());
        // Earlier snapshots don't change
        assert!(exploration.subnetwork().is_empty());
    }

    #[test]
    fn difference_searches_subnetwork() {
        let exploration = setup_exploration();
        // Nothing to find in an empty subnetwork
        assert_eq!(
            exploration.query(&rogue("B", Combination::Difference)).err(),
            Some(ExplorationError::Traversal(TraversalError::NotFound("B".to_string())))
        );
        let full = exploration.with_full_subnetwork();
        assert_eq!(full.subnetwork().nodes.len(), 3);
        let next = full.query(&rogue("R1", Combination::Difference)).unwrap();
        assert_eq!(next.subnetwork().nodes.iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(next.subnetwork().links.is_empty());
    }

    #[test]
    fn proximity_then_toggle() {
        let exploration = setup_exploration();
        let request = TraversalRequest::new(
            Query::Proximity {
                focus: "A".to_string(),
                direction: Direction::Successors,
                depth: 2,
            },
            Combination::Union,
        );
        let next = exploration.query(&request).unwrap();
        assert_eq!(next.subnetwork().nodes.iter().collect::<Vec<_>>(), vec!["R1", "A", "B"]);
        assert_eq!(next.subnetwork().links.iter().collect::<Vec<_>>(), vec!["A_R1", "R1_B"]);
        let toggled = next.query(&rogue("A", Combination::Difference)).unwrap();
        assert_eq!(toggled.subnetwork().nodes.iter().collect::<Vec<_>>(), vec!["R1", "B"]);
        assert_eq!(toggled.subnetwork().links.iter().collect::<Vec<_>>(), vec!["R1_B"]);
        let restored = toggled.query(&rogue("A", Combination::Union)).unwrap();
        assert_eq!(restored.subnetwork(), next.subnetwork());
    }
}

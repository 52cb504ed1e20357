//! Set filter: which reactions and metabolites pass the compartments and processes a user admits
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// Compartments and processes that a user admits
///
/// An empty set admits nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub compartments: IndexSet<String>,
    pub processes: IndexSet<String>,
}

impl Filters {
    pub fn new<C, P>(compartments: C, processes: P) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Filters {
            compartments: compartments.into_iter().map(Into::into).collect(),
            processes: processes.into_iter().map(Into::into).collect(),
        }
    }

    /// Admit every compartment and process of a model
    ///
    /// Processes that reactions name without the model declaring them are admitted too,
    /// after the declared ones.
    pub fn all(model: &Model) -> Self {
        let mut processes: IndexSet<String> = model.processes.keys().cloned().collect();
        for reaction in model.reactions.values() {
            for process in &reaction.processes {
                if !processes.contains(process) {
                    processes.insert(process.clone());
                }
            }
        }
        Filters {
            compartments: model.compartments.keys().cloned().collect(),
            processes,
        }
    }

    /// Whether a reaction belongs to an admitted process
    ///
    /// Reactions that don't declare any process aren't subject to the process filter.
    fn admits_processes(&self, reaction: &Reaction) -> bool {
        reaction.processes.is_empty()
            || reaction.processes.iter().any(|p| self.processes.contains(p))
    }
}

/// What of a reaction currently passes the filters
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReactionSets {
    /// Metabolites that participate in an admitted compartment
    pub metabolites: IndexSet<String>,
    /// Admitted compartments in which participants lie
    pub compartments: IndexSet<String>,
    /// Admitted processes of the reaction
    pub processes: IndexSet<String>,
}

/// What of a metabolite currently passes the filters
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetaboliteSets {
    /// Passing reactions in which the metabolite participates
    pub reactions: IndexSet<String>,
    /// Admitted compartments in which the metabolite participates
    pub compartments: IndexSet<String>,
    /// Admitted processes of the passing reactions
    pub processes: IndexSet<String>,
}

/// Current sets of every passing reaction, keyed by reaction id
pub type CurrentReactionSets = IndexMap<String, ReactionSets>;
/// Current sets of every passing metabolite, keyed by metabolite id
///
/// Candidacy only reads the reaction sets. These are for callers listing what passes, see
/// [`crate::exploration::Exploration::sets`].
pub type CurrentMetaboliteSets = IndexMap<String, MetaboliteSets>;

/// Current sets of the reactions and metabolites that pass the filters
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CurrentSets {
    pub reactions: CurrentReactionSets,
    pub metabolites: CurrentMetaboliteSets,
}

/// Determine which reactions and metabolites pass the filters
///
/// A reaction passes when it belongs to an admitted process (or to no process at all) and
/// at least one of its participants lies in an admitted compartment.
pub fn filter(model: &Model, filters: &Filters) -> CurrentSets {
    let mut reactions = CurrentReactionSets::new();
    let mut metabolites = CurrentMetaboliteSets::new();
    for reaction in model.reactions.values() {
        if !filters.admits_processes(reaction) {
            continue;
        }
        let mut sets = ReactionSets::default();
        for participant in &reaction.participants {
            if filters.compartments.contains(&participant.compartment) {
                sets.metabolites.insert(participant.metabolite.clone());
                sets.compartments.insert(participant.compartment.clone());
            }
        }
        if sets.metabolites.is_empty() {
            continue;
        }
        sets.processes = reaction
            .processes
            .iter()
            .filter(|p| filters.processes.contains(*p))
            .cloned()
            .collect();
        for participant in &reaction.participants {
            if !filters.compartments.contains(&participant.compartment) {
                continue;
            }
            let record = metabolites.entry(participant.metabolite.clone()).or_default();
            record.reactions.insert(reaction.id.clone());
            record.compartments.insert(participant.compartment.clone());
            record.processes.extend(sets.processes.iter().cloned());
        }
        reactions.insert(reaction.id.clone(), sets);
    }
    log::debug!(
        "{} reactions and {} metabolites pass filters",
        reactions.len(),
        metabolites.len()
    );
    CurrentSets {
        reactions,
        metabolites,
    }
}

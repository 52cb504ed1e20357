//! User simplifications of the candidate network
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::candidacy::relevance::is_relevant;
use crate::candidacy::CandidateReaction;
use crate::metabolic_model::model::Model;

/// Candidate reactions and metabolites that a user marks for simplification
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Simplifications {
    /// Candidate reactions to omit
    #[serde(default)]
    pub reactions: IndexSet<String>,
    /// Candidate metabolites to omit
    #[serde(default)]
    pub metabolites: IndexSet<String>,
    /// Candidate metabolites to replicate, one network node for each reaction they join
    #[serde(default)]
    pub replications: IndexSet<String>,
}

impl Simplifications {
    /// Whether a candidate metabolite should be replicated
    ///
    /// Omission wins over replication.
    pub fn replicates(&self, metabolite: &str) -> bool {
        self.replications.contains(metabolite) && !self.metabolites.contains(metabolite)
    }
}

/// Omit candidate reactions and candidate metabolites
///
/// Reactions that lose the participants their operation needs become irrelevant and are
/// dropped. Metabolites orphaned by dropped reactions disappear when the candidate
/// metabolites are collected afterwards, and since an orphan belongs to no reaction this
/// never makes another reaction irrelevant.
pub(crate) fn simplify(
    model: &Model,
    reactions: IndexMap<String, CandidateReaction>,
    simplifications: &Simplifications,
    compartmentalization: bool,
) -> IndexMap<String, CandidateReaction> {
    if simplifications.reactions.is_empty() && simplifications.metabolites.is_empty() {
        return reactions;
    }
    reactions
        .into_iter()
        .filter_map(|(id, mut candidate)| {
            if simplifications.reactions.contains(&id) {
                log::debug!("Omitting candidate reaction {}", id);
                return None;
            }
            let count = candidate.participants.len();
            candidate
                .participants
                .retain(|p| !simplifications.metabolites.contains(&p.candidate));
            if candidate.participants.len() == count {
                return Some((id, candidate));
            }
            let operation = &model.reactions.get(&candidate.reaction)?.operation;
            if is_relevant(operation, &candidate.participants, compartmentalization) {
                Some((id, candidate))
            } else {
                log::debug!("Candidate reaction {} is irrelevant after simplification", id);
                None
            }
        })
        .collect()
}

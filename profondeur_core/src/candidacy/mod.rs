//! Candidacy resolution: the deduplicated, context-resolved network of candidate reactions and
//! candidate metabolites that the current filters, compartmentalization, and simplifications
//! admit.
//!
//! Resolution is a pure function of its inputs. Candidates are ordered by identifier and
//! redundant replicates collapse onto the lexicographically first member of their class, so
//! the result doesn't depend on the order of reactions in the model.

pub mod redundancy;
pub mod relevance;
pub mod simplification;

use std::hash::{Hash, Hasher};

use derive_builder::Builder;
use indexmap::IndexMap;
use serde::Serialize;

use crate::candidacy::redundancy::partition_redundant;
use crate::candidacy::relevance::{filter_participants, is_relevant, Participation};
use crate::candidacy::simplification::{simplify, Simplifications};
use crate::configuration;
use crate::filter::CurrentSets;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Participant, Role};
use crate::utils::hashing::hash_as_hex_string;

/// Options of a candidacy pass
#[derive(Builder, Clone, Debug, Default, PartialEq)]
pub struct CandidacyOptions {
    /// Whether metabolite identity includes the compartment
    #[builder(default = "configuration::current().compartmentalization")]
    pub compartmentalization: bool,
    /// Candidates to omit or replicate
    #[builder(default = "Simplifications::default()")]
    pub simplifications: Simplifications,
}

/// Identifier of the candidate metabolite for a metabolite in a compartment
///
/// # Examples
/// ```rust
/// use profondeur_core::candidacy::candidate_metabolite_id;
/// assert_eq!(candidate_metabolite_id("glc", "c", false), "glc");
/// assert_eq!(candidate_metabolite_id("glc", "c", true), "glc_c");
/// ```
pub fn candidate_metabolite_id(
    metabolite: &str,
    compartment: &str,
    compartmentalization: bool,
) -> String {
    if compartmentalization {
        format!("{}_{}", metabolite, compartment)
    } else {
        metabolite.to_string()
    }
}

/// A participant of a candidate reaction, resolved to its candidate metabolite
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateParticipant {
    /// Identifier of the candidate metabolite
    pub candidate: String,
    /// Identifier of the general metabolite
    pub metabolite: String,
    pub compartment: String,
    pub role: Role,
    pub coefficient: f64,
}

impl CandidateParticipant {
    fn resolve(participant: &Participant, compartmentalization: bool) -> Self {
        CandidateParticipant {
            candidate: candidate_metabolite_id(
                &participant.metabolite,
                &participant.compartment,
                compartmentalization,
            ),
            metabolite: participant.metabolite.clone(),
            compartment: participant.compartment.clone(),
            role: participant.role,
            coefficient: participant.coefficient,
        }
    }
}

impl Participation for CandidateParticipant {
    fn metabolite(&self) -> &str {
        &self.metabolite
    }

    fn compartment(&self) -> &str {
        &self.compartment
    }

    fn role(&self) -> Role {
        self.role
    }
}

impl Hash for CandidateParticipant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.candidate.hash(state);
        self.metabolite.hash(state);
        self.compartment.hash(state);
        self.role.hash(state);
        self.coefficient.to_bits().hash(state);
    }
}

/// Representative of one class of redundant, relevant reactions
#[derive(Clone, Debug, PartialEq, Hash, Serialize)]
pub struct CandidateReaction {
    /// Identifier, the same as the source reaction's
    pub id: String,
    /// Identifier of the source reaction
    pub reaction: String,
    /// Identifiers of every reaction the candidate represents, itself included
    pub members: Vec<String>,
    /// Whether the source reaction converts metabolites, rather than only moving them
    pub conversion: bool,
    /// Participants that remain after filters and simplifications
    pub participants: Vec<CandidateParticipant>,
}

impl CandidateReaction {
    /// Unique candidate metabolites of the reaction, in participant order
    pub fn metabolites(&self) -> Vec<&str> {
        crate::utils::sets::collect_unique(self.participants.iter().map(|p| p.candidate.as_str()))
    }

    /// Roles in which a candidate metabolite participates
    pub fn roles(&self, candidate: &str) -> Vec<Role> {
        let mut roles: Vec<Role> = self
            .participants
            .iter()
            .filter(|p| p.candidate == candidate)
            .map(|p| p.role)
            .collect();
        roles.sort();
        roles.dedup();
        roles
    }
}

/// A metabolite, or a metabolite in a compartment, that participates in candidate reactions
#[derive(Clone, Debug, PartialEq, Hash, Serialize)]
pub struct CandidateMetabolite {
    /// Identifier, `metabolite` or `metabolite_compartment`
    pub id: String,
    /// Identifier of the general metabolite
    pub metabolite: String,
    /// Compartment, only when compartmentalization is on
    pub compartment: Option<String>,
    /// Identifiers of the candidate reactions that include the metabolite
    pub reactions: Vec<String>,
    /// Whether the network gives the metabolite a separate node for each reaction
    pub replication: bool,
}

/// Result of a candidacy pass
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CandidateNetwork {
    pub compartmentalization: bool,
    /// Candidate reactions, ordered by identifier
    pub reactions: IndexMap<String, CandidateReaction>,
    /// Candidate metabolites, ordered by identifier
    pub metabolites: IndexMap<String, CandidateMetabolite>,
}

impl Hash for CandidateNetwork {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compartmentalization.hash(state);
        for reaction in self.reactions.values() {
            reaction.hash(state);
        }
        for metabolite in self.metabolites.values() {
            metabolite.hash(state);
        }
    }
}

impl CandidateNetwork {
    /// Content fingerprint, equal for equal candidate networks
    pub fn fingerprint(&self) -> String {
        hash_as_hex_string(self)
    }
}

/// Resolve the candidate network
///
/// # Parameters
/// - `model`: the model store
/// - `sets`: current sets from the set filter
/// - `options`: compartmentalization and simplifications
///
/// # Examples
/// ```rust
/// use profondeur_core::candidacy::{resolve, CandidacyOptions};
/// use profondeur_core::filter::{filter, Filters};
/// use profondeur_core::metabolic_model::model::Model;
/// let model = Model::new_empty();
/// let sets = filter(&model, &Filters::all(&model));
/// let candidates = resolve(&model, &sets, &CandidacyOptions::default());
/// assert!(candidates.reactions.is_empty());
/// ```
pub fn resolve(model: &Model, sets: &CurrentSets, options: &CandidacyOptions) -> CandidateNetwork {
    let compartmentalization = options.compartmentalization;

    // Filter participants to context and keep the relevant reactions
    let mut relevant: IndexMap<String, Vec<&Participant>> = IndexMap::new();
    let mut replicates: IndexMap<String, Vec<String>> = IndexMap::new();
    for (id, reaction_sets) in &sets.reactions {
        let Some(reaction) = model.reactions.get(id) else {
            continue;
        };
        let participants = filter_participants(&reaction.participants, reaction_sets);
        if is_relevant(&reaction.operation, &participants, compartmentalization) {
            relevant.insert(id.clone(), participants);
            replicates.insert(id.clone(), reaction.replicates.clone());
        }
    }

    // Collapse redundant replicates onto their priority representative
    let classes = partition_redundant(&relevant, &replicates, compartmentalization);
    let mut reactions: IndexMap<String, CandidateReaction> = IndexMap::new();
    for members in classes {
        let Some(priority) = members.first() else {
            continue;
        };
        let Some(participants) = relevant.get(priority) else {
            continue;
        };
        if members.len() > 1 {
            log::debug!("Candidate reaction {} represents {:?}", priority, members);
        }
        let conversion = model
            .reactions
            .get(priority)
            .map(|r| r.operation.is_conversion())
            .unwrap_or(true);
        let candidate = CandidateReaction {
            id: priority.clone(),
            reaction: priority.clone(),
            conversion,
            participants: participants
                .iter()
                .map(|p| CandidateParticipant::resolve(p, compartmentalization))
                .collect(),
            members: members.clone(),
        };
        reactions.insert(priority.clone(), candidate);
    }

    let mut reactions = simplify(model, reactions, &options.simplifications, compartmentalization);
    reactions.sort_keys();
    let metabolites =
        collect_metabolites(&reactions, &options.simplifications, compartmentalization);

    let candidates = CandidateNetwork {
        compartmentalization,
        reactions,
        metabolites,
    };
    log::info!(
        "Resolved {} candidate reactions and {} candidate metabolites from {} relevant reactions",
        candidates.reactions.len(),
        candidates.metabolites.len(),
        relevant.len()
    );
    candidates
}

/// Deduplicate the participants of every candidate reaction into candidate metabolites
fn collect_metabolites(
    reactions: &IndexMap<String, CandidateReaction>,
    simplifications: &Simplifications,
    compartmentalization: bool,
) -> IndexMap<String, CandidateMetabolite> {
    let mut metabolites: IndexMap<String, CandidateMetabolite> = IndexMap::new();
    for reaction in reactions.values() {
        for participant in &reaction.participants {
            let metabolite = metabolites
                .entry(participant.candidate.clone())
                .or_insert_with(|| CandidateMetabolite {
                    id: participant.candidate.clone(),
                    metabolite: participant.metabolite.clone(),
                    compartment: compartmentalization.then(|| participant.compartment.clone()),
                    reactions: Vec::new(),
                    replication: simplifications.replicates(&participant.candidate),
                });
            if !metabolite.reactions.contains(&reaction.id) {
                metabolite.reactions.push(reaction.id.clone());
            }
        }
    }
    metabolites.sort_keys();
    for metabolite in metabolites.values_mut() {
        metabolite.reactions.sort();
    }
    metabolites
}

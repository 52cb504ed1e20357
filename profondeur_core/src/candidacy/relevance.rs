//! Participant filtering and relevance of a reaction's operation in the current context
use crate::filter::ReactionSets;
use crate::metabolic_model::reaction::{Operation, Participant, Role, Transport};
use crate::utils::sets::{collect_unique, mutually_inclusive};

/// Anything that places a metabolite, in a compartment, in a role of a reaction
pub trait Participation {
    /// Identifier of the general metabolite
    fn metabolite(&self) -> &str;
    /// Identifier of the compartment
    fn compartment(&self) -> &str;
    fn role(&self) -> Role;
}

impl Participation for Participant {
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

impl<P: Participation> Participation for &P {
    fn metabolite(&self) -> &str {
        (**self).metabolite()
    }

    fn compartment(&self) -> &str {
        (**self).compartment()
    }

    fn role(&self) -> Role {
        (**self).role()
    }
}

/// Participants whose metabolite and compartment both pass the filters
pub fn filter_participants<'a>(
    participants: &'a [Participant],
    sets: &ReactionSets,
) -> Vec<&'a Participant> {
    participants
        .iter()
        .filter(|p| {
            sets.metabolites.contains(&p.metabolite) && sets.compartments.contains(&p.compartment)
        })
        .collect()
}

/// Whether an operation is still satisfiable by the remaining participants
///
/// Conversions need distinct reactant and product metabolites. Transports need
/// compartmentalization and a declared transport whose metabolite still moves between two
/// different compartments.
pub fn is_relevant<P: Participation>(
    operation: &Operation,
    participants: &[P],
    compartmentalization: bool,
) -> bool {
    match operation {
        Operation::Conversion { .. } => conversion_relevant(participants),
        Operation::Transport { transports } => {
            compartmentalization
                && transports
                    .iter()
                    .any(|transport| transport_relevant(transport, participants))
        }
        Operation::Inert => false,
    }
}

fn role_metabolites<P: Participation>(participants: &[P], role: Role) -> Vec<&str> {
    collect_unique(
        participants
            .iter()
            .filter(|p| p.role() == role)
            .map(|p| p.metabolite()),
    )
}

fn conversion_relevant<P: Participation>(participants: &[P]) -> bool {
    let reactants = role_metabolites(participants, Role::Reactant);
    let products = role_metabolites(participants, Role::Product);
    !reactants.is_empty()
        && !products.is_empty()
        && !mutually_inclusive(reactants.iter().copied(), products.iter().copied())
}

fn role_compartments<'a, P: Participation>(
    participants: &'a [P],
    metabolite: &str,
    role: Role,
) -> Vec<&'a str> {
    participants
        .iter()
        .filter(|p| p.role() == role && p.metabolite() == metabolite)
        .map(|p| p.compartment())
        .collect()
}

fn transport_relevant<P: Participation>(transport: &Transport, participants: &[P]) -> bool {
    let origins = role_compartments(participants, &transport.metabolite, Role::Reactant);
    let destinations = role_compartments(participants, &transport.metabolite, Role::Product);
    origins
        .iter()
        .any(|origin| destinations.iter().any(|destination| destination != origin))
}
